use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use kira_groupchart::cli::{Cli, Commands, RunArgs, SummarizeArgs, ValidateArgs};
use kira_groupchart::ctx::Ctx;
use kira_groupchart::io;
use kira_groupchart::manifest::{DatasetSpec, Manifest, load_manifest};
use kira_groupchart::pipeline::Pipeline;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => handle_run(args)?,
        Commands::Validate(args) => handle_validate(args)?,
        Commands::Summarize(args) => handle_summarize(args)?,
    }

    Ok(())
}

fn handle_run(args: RunArgs) -> Result<()> {
    let manifest = load_manifest(&args.manifest)?;
    let datasets = select_datasets(&manifest, &args.only)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build thread pool: {}", e))?;
    let results: Vec<Result<Ctx>> = pool.install(|| {
        datasets
            .par_iter()
            .map(|ds| run_dataset(ds, &args.out, args.json, args.tsv))
            .collect()
    });

    let mut ctxs = Vec::with_capacity(results.len());
    for result in results {
        ctxs.push(result?);
    }

    println!("kira-groupchart v{}", env!("CARGO_PKG_VERSION"));
    for ctx in &ctxs {
        print_summary(ctx)?;
    }
    Ok(())
}

fn run_dataset(ds: &DatasetSpec, out: &Path, json: bool, tsv: bool) -> Result<Ctx> {
    let mut ctx = Ctx::new(
        ds.clone(),
        out.to_path_buf(),
        json,
        tsv,
        env!("CARGO_PKG_VERSION"),
    );
    Pipeline::full()
        .run(&mut ctx)
        .with_context(|| format!("dataset '{}' failed", ds.name))?;
    Ok(ctx)
}

fn handle_validate(args: ValidateArgs) -> Result<()> {
    let manifest = load_manifest(&args.manifest)?;
    let mut ctxs = Vec::with_capacity(manifest.datasets.len());
    for ds in &manifest.datasets {
        let mut ctx = Ctx::new(
            ds.clone(),
            PathBuf::from("."),
            false,
            false,
            env!("CARGO_PKG_VERSION"),
        );
        Pipeline::validate()
            .run(&mut ctx)
            .with_context(|| format!("dataset '{}' failed", ds.name))?;
        ctxs.push(ctx);
    }

    println!("kira-groupchart validate ok");
    for ctx in &ctxs {
        println!(
            "{}\tgroups={}\tobservations={}",
            ctx.dataset.name,
            ctx.statistics.len(),
            ctx.observations.len()
        );
        print_warnings(ctx);
    }
    Ok(())
}

fn handle_summarize(args: SummarizeArgs) -> Result<()> {
    let name = dataset_name_from_path(&args.input);
    let mut ds = DatasetSpec::new(name, args.input, args.group, args.response);
    ds.symbiont_column = args.symbiont;
    ds.censor_column = args.censor;
    ds.drop_censored = args.drop_censored;
    ds.letters_file = args.letters;

    let mut ctx = Ctx::new(
        ds,
        PathBuf::from("."),
        false,
        false,
        env!("CARGO_PKG_VERSION"),
    );
    Pipeline::summarize().run(&mut ctx)?;
    print_summary(&ctx)
}

fn select_datasets(manifest: &Manifest, only: &[String]) -> Result<Vec<DatasetSpec>> {
    if only.is_empty() {
        return Ok(manifest.datasets.clone());
    }
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(only.len());
    for name in only {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let ds = manifest
            .dataset(name)
            .with_context(|| format!("unknown dataset '{}' in --only", name))?;
        out.push(ds.clone());
    }
    Ok(out)
}

fn dataset_name_from_path(path: &Path) -> String {
    let stem = path
        .file_name()
        .and_then(|s| s.to_str())
        .and_then(|s| s.split('.').next())
        .unwrap_or("dataset");
    if stem.is_empty() {
        "dataset".to_string()
    } else {
        stem.to_string()
    }
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    print_warnings(ctx);
    Ok(())
}

fn print_warnings(ctx: &Ctx) {
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}
