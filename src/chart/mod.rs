//! Ranked bar chart layout.
//!
//! [`build_ranked_bar_chart`] turns annotated group statistics into a fully
//! positioned chart model; [`render`] draws that model. Keeping the layout
//! separate lets callers inspect bar order and label positions without
//! parsing the rendered artifact.

pub mod render;

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::groups::GroupStatistic;

pub use render::{render_svg, write_svg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillBy {
    /// Fill by symbiont status when the dataset has one.
    #[default]
    Auto,
    SymbiontStatus,
    None,
}

impl FillBy {
    /// Effective fill mode for a dataset with or without symbiont statuses.
    pub fn resolve(self, has_symbiont: bool) -> FillBy {
        match self {
            FillBy::Auto if has_symbiont => FillBy::SymbiontStatus,
            FillBy::Auto => FillBy::None,
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub title: Option<String>,
    pub fill_by: FillBy,
    pub y_axis_label: String,
    pub x_axis_label: String,
    /// Fixed y-axis range; e.g. `[0, 100]` for percentages.
    pub y_limit: Option<(f64, f64)>,
    /// Distance above the error-bar cap at which the letter is drawn,
    /// in display units.
    pub letter_offset: f64,
    /// Multiplier applied to means and standard errors before display.
    pub scale: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: None,
            fill_by: FillBy::Auto,
            y_axis_label: "Mean".to_string(),
            x_axis_label: "Lineage".to_string(),
            y_limit: None,
            letter_offset: 0.0,
            scale: 1.0,
            width: 900,
            height: 600,
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<(), ChartError> {
        if let Some((lo, hi)) = self.y_limit {
            if !lo.is_finite() || !hi.is_finite() || lo >= hi {
                return Err(ChartError::InvalidConfig(format!(
                    "y_limit must be an increasing finite range, got ({}, {})",
                    lo, hi
                )));
            }
        }
        if !self.letter_offset.is_finite() || self.letter_offset < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "letter_offset must be finite and >= 0, got {}",
                self.letter_offset
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidConfig(
                "width and height must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// One positioned bar, in display units (after `scale`).
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub group: String,
    pub mean: f64,
    pub standard_error: Option<f64>,
    /// `(mean - se, mean + se)`; absent when the standard error is undefined.
    pub error_bar: Option<(f64, f64)>,
    pub letter: String,
    pub letter_y: f64,
    pub fill_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedBarChart {
    pub bars: Vec<Bar>,
    /// Distinct fill keys in ascending order; empty when bars are not filled
    /// by symbiont status.
    pub fill_keys: Vec<String>,
    pub y_range: (f64, f64),
    pub config: ChartConfig,
}

/// Descending mean, ties broken by group identifier ascending.
///
/// Adding `0.0` folds `-0.0` into `0.0` so signed zeros tie.
pub fn rank_order(a: &GroupStatistic, b: &GroupStatistic) -> Ordering {
    (b.mean + 0.0)
        .total_cmp(&(a.mean + 0.0))
        .then_with(|| a.group.cmp(&b.group))
}

pub fn rank_statistics(statistics: &[GroupStatistic]) -> Vec<&GroupStatistic> {
    let mut ranked: Vec<&GroupStatistic> = statistics.iter().collect();
    ranked.sort_by(|a, b| rank_order(a, b));
    ranked
}

pub fn build_ranked_bar_chart(
    statistics: &[GroupStatistic],
    config: &ChartConfig,
) -> Result<RankedBarChart, ChartError> {
    config.validate()?;
    if statistics.is_empty() {
        return Err(ChartError::NoObservations);
    }

    let has_symbiont = statistics.iter().any(|s| s.symbiont_status.is_some());
    let fill = config.fill_by.resolve(has_symbiont) == FillBy::SymbiontStatus && has_symbiont;

    let mut bars = Vec::with_capacity(statistics.len());
    for stat in rank_statistics(statistics) {
        let letter = stat
            .significance_letter
            .clone()
            .ok_or_else(|| ChartError::MissingLetter {
                group: stat.group.clone(),
            })?;
        let mean = stat.mean * config.scale;
        let se = stat.standard_error.map(|se| se * config.scale);
        let error_bar = se.map(|se| (mean - se, mean + se));
        let letter_y = mean + se.unwrap_or(0.0) + config.letter_offset;
        bars.push(Bar {
            group: stat.group.clone(),
            mean,
            standard_error: se,
            error_bar,
            letter,
            letter_y,
            fill_key: if fill {
                Some(
                    stat.symbiont_status
                        .clone()
                        .unwrap_or_else(|| "unknown".to_string()),
                )
            } else {
                None
            },
        });
    }

    let fill_keys: Vec<String> = bars
        .iter()
        .filter_map(|b| b.fill_key.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let y_range = match config.y_limit {
        Some(limit) => limit,
        None => auto_y_range(&bars),
    };

    Ok(RankedBarChart {
        bars,
        fill_keys,
        y_range,
        config: config.clone(),
    })
}

fn auto_y_range(bars: &[Bar]) -> (f64, f64) {
    let mut lo = 0.0f64;
    let mut hi = 0.0f64;
    for bar in bars {
        let (bar_lo, bar_hi) = bar.error_bar.unwrap_or((bar.mean, bar.mean));
        lo = lo.min(bar_lo).min(bar.mean);
        hi = hi.max(bar_hi).max(bar.letter_y);
    }
    let pad = (hi - lo) * 0.1;
    if pad > 0.0 {
        (if lo < 0.0 { lo - pad } else { lo }, hi + pad)
    } else {
        (lo, lo + 1.0)
    }
}
