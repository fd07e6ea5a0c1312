use serde::{Deserialize, Serialize};

use crate::chart::FillBy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMeta {
    pub path: String,
    pub rows: u64,
    pub skipped: u64,
    pub observations: u64,
    pub groups: u64,
    pub censored_dropped: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRow {
    pub rank: u64,
    pub group: String,
    pub symbiont_status: Option<String>,
    pub n: u64,
    pub mean: f64,
    /// `null` when undefined (single observation).
    pub standard_error: Option<f64>,
    pub significance_letter: Option<String>,
    pub censored: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartMeta {
    pub svg_path: Option<String>,
    pub fill_by: FillBy,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub y_limit: Option<(f64, f64)>,
    pub letter_offset: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupChartV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub dataset: String,
    pub input_meta: InputMeta,
    pub groups: Vec<GroupRow>,
    pub chart: ChartMeta,
    pub warnings: Vec<String>,
}
