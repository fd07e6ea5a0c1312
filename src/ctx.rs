use std::path::PathBuf;

use crate::chart::RankedBarChart;
use crate::groups::{GroupStatistic, Observation};
use crate::letters::LetterMap;
use crate::manifest::DatasetSpec;
use crate::schema::v1::GroupChartV1;

#[derive(Debug, Clone, Default)]
pub struct InputMeta {
    pub rows: Option<u64>,
    pub skipped: Option<u64>,
    pub censored_dropped: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub svg_path: PathBuf,
    pub json_path: PathBuf,
    pub tsv_path: PathBuf,
}

/// State of one dataset run, threaded through the pipeline stages.
#[derive(Debug)]
pub struct Ctx {
    pub dataset: DatasetSpec,
    pub write_json: bool,
    pub write_tsv: bool,
    pub tool_version: String,
    pub observations: Vec<Observation>,
    pub input_meta: InputMeta,
    pub statistics: Vec<GroupStatistic>,
    pub letters: Option<LetterMap>,
    pub chart: Option<RankedBarChart>,
    pub svg_written: bool,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: Option<GroupChartV1>,
}

impl Ctx {
    pub fn new(
        dataset: DatasetSpec,
        out_dir: PathBuf,
        write_json: bool,
        write_tsv: bool,
        tool_version: &str,
    ) -> Self {
        let svg_path = out_dir.join(format!("{}.svg", dataset.name));
        let json_path = out_dir.join(format!("{}.json", dataset.name));
        let tsv_path = out_dir.join(format!("{}.tsv", dataset.name));
        Self {
            dataset,
            write_json,
            write_tsv,
            tool_version: tool_version.to_string(),
            observations: Vec::new(),
            input_meta: InputMeta::default(),
            statistics: Vec::new(),
            letters: None,
            chart: None,
            svg_written: false,
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                svg_path,
                json_path,
                tsv_path,
            },
            report: None,
        }
    }

    /// Statistics in chart order (descending mean, ties by group).
    pub fn ranked_statistics(&self) -> Vec<&GroupStatistic> {
        crate::chart::rank_statistics(&self.statistics)
    }
}
