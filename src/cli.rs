use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "kira-groupchart",
    version,
    about = "Per-lineage group summaries with significance letters, rendered as ranked bar charts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Validate(ValidateArgs),
    Summarize(SummarizeArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Analysis manifest (TOML)")]
    pub manifest: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub tsv: bool,

    #[arg(long, default_value_t = 0, help = "Number of threads (0 = auto)")]
    pub threads: usize,

    #[arg(long, num_args = 1.., help = "Only run the named datasets (repeatable)")]
    pub only: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, help = "Analysis manifest (TOML)")]
    pub manifest: PathBuf,
}

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    #[arg(long, help = "Delimited input table (.csv, .tsv, optionally .gz)")]
    pub input: PathBuf,

    #[arg(long, help = "Grouping (lineage) column")]
    pub group: String,

    #[arg(long, help = "Numeric response column")]
    pub response: String,

    #[arg(long, help = "Optional symbiont status column")]
    pub symbiont: Option<String>,

    #[arg(long, help = "Optional 0/1 censor column (1 = censored)")]
    pub censor: Option<String>,

    #[arg(long, default_value_t = false, requires = "censor")]
    pub drop_censored: bool,

    #[arg(long, help = "Optional group/letter file")]
    pub letters: Option<PathBuf>,
}
