use std::collections::BTreeMap;

use crate::error::ChartError;
use crate::math::stats;

/// One row of a per-subject dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub group: String,
    pub symbiont_status: Option<String>,
    pub response: f64,
    pub censored: Option<bool>,
}

impl Observation {
    pub fn new(group: impl Into<String>, response: f64) -> Self {
        Self {
            group: group.into(),
            symbiont_status: None,
            response,
            censored: None,
        }
    }

    pub fn with_symbiont(mut self, status: impl Into<String>) -> Self {
        self.symbiont_status = Some(status.into());
        self
    }
}

/// Per-group summary derived from observations.
///
/// `standard_error` is `None` when it is undefined (a single observation).
/// `significance_letter` is `None` until letters are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStatistic {
    pub group: String,
    pub n: usize,
    pub mean: f64,
    pub standard_error: Option<f64>,
    pub symbiont_status: Option<String>,
    pub significance_letter: Option<String>,
    pub censored: usize,
}

struct GroupAcc<'a> {
    values: Vec<f64>,
    symbiont: Option<&'a str>,
    censored: usize,
}

/// Partitions observations by group and summarizes each partition.
///
/// Output is ordered by group identifier so repeated calls are identical.
pub fn compute_group_statistics(
    observations: &[Observation],
) -> Result<Vec<GroupStatistic>, ChartError> {
    if observations.is_empty() {
        return Err(ChartError::NoObservations);
    }

    let mut groups: BTreeMap<&str, GroupAcc<'_>> = BTreeMap::new();
    for obs in observations {
        if !obs.response.is_finite() {
            return Err(ChartError::NonFiniteResponse {
                group: obs.group.clone(),
                value: obs.response,
            });
        }
        let status = obs.symbiont_status.as_deref();
        let acc = groups.entry(obs.group.as_str()).or_insert(GroupAcc {
            values: Vec::new(),
            symbiont: status,
            censored: 0,
        });
        if acc.symbiont != status {
            return Err(ChartError::InconsistentSymbiont {
                group: obs.group.clone(),
                first: acc.symbiont.unwrap_or("none").to_string(),
                second: status.unwrap_or("none").to_string(),
            });
        }
        acc.values.push(obs.response);
        if obs.censored == Some(true) {
            acc.censored += 1;
        }
    }

    let mut out = Vec::with_capacity(groups.len());
    for (group, acc) in groups {
        let (mean, standard_error) = summarize_values(group, &acc.values)?;
        out.push(GroupStatistic {
            group: group.to_string(),
            n: acc.values.len(),
            mean,
            standard_error,
            symbiont_status: acc.symbiont.map(str::to_string),
            significance_letter: None,
            censored: acc.censored,
        });
    }
    Ok(out)
}

/// Mean and standard error of one group's responses.
pub fn summarize_values(group: &str, values: &[f64]) -> Result<(f64, Option<f64>), ChartError> {
    let mean = stats::mean(values).ok_or_else(|| ChartError::EmptyGroup {
        group: group.to_string(),
    })?;
    Ok((mean, stats::standard_error(values)))
}

/// Groups whose standard error is undefined.
pub fn single_observation_groups(statistics: &[GroupStatistic]) -> Vec<&str> {
    statistics
        .iter()
        .filter(|s| s.standard_error.is_none())
        .map(|s| s.group.as_str())
        .collect()
}
