//! Analysis manifest: one `[[dataset]]` table per response variable.
//!
//! ```toml
//! [[dataset]]
//! name = "parasitism"
//! input = "data/parasitism.csv"
//! group_column = "lineage"
//! response_column = "parasitized"
//! symbiont_column = "symbiont"
//! letters = { L1 = "a", L2 = "ab", L3 = "b" }
//!
//! [dataset.chart]
//! y_axis_label = "Parasitism rate (%)"
//! scale = 100.0
//! y_limit = [0, 100]
//! letter_offset = 4.0
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::chart::ChartConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetSpec {
    pub name: String,
    pub input: PathBuf,
    pub group_column: String,
    pub response_column: String,
    #[serde(default)]
    pub symbiont_column: Option<String>,
    /// 0/1 column; 1 marks a censored observation.
    #[serde(default)]
    pub censor_column: Option<String>,
    #[serde(default)]
    pub drop_censored: bool,
    #[serde(default)]
    pub letters: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub letters_file: Option<PathBuf>,
    #[serde(default)]
    pub chart: ChartConfig,
}

impl DatasetSpec {
    pub fn new(
        name: impl Into<String>,
        input: PathBuf,
        group_column: impl Into<String>,
        response_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input,
            group_column: group_column.into(),
            response_column: response_column.into(),
            symbiont_column: None,
            censor_column: None,
            drop_censored: false,
            letters: None,
            letters_file: None,
            chart: ChartConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(rename = "dataset", default)]
    pub datasets: Vec<DatasetSpec>,
}

impl Manifest {
    pub fn dataset(&self, name: &str) -> Option<&DatasetSpec> {
        self.datasets.iter().find(|d| d.name == name)
    }
}

/// Loads and validates a manifest. Relative paths are resolved against the
/// manifest's directory.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let mut manifest = parse_manifest(&content)
        .with_context(|| format!("invalid manifest {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for ds in &mut manifest.datasets {
        ds.input = resolve(base, &ds.input);
        if let Some(letters_file) = &ds.letters_file {
            ds.letters_file = Some(resolve(base, letters_file));
        }
    }
    Ok(manifest)
}

pub fn parse_manifest(content: &str) -> Result<Manifest> {
    let manifest: Manifest = toml::from_str(content).context("failed to parse TOML manifest")?;
    validate(&manifest)?;
    Ok(manifest)
}

fn validate(manifest: &Manifest) -> Result<()> {
    if manifest.datasets.is_empty() {
        bail!("manifest defines no [[dataset]] entries");
    }
    let mut names = HashSet::new();
    for ds in &manifest.datasets {
        if ds.name.is_empty()
            || !ds
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            bail!(
                "dataset name '{}' must be non-empty and use only [A-Za-z0-9_.-]",
                ds.name
            );
        }
        if !names.insert(ds.name.as_str()) {
            bail!("duplicate dataset name '{}'", ds.name);
        }
        if ds.letters.is_some() && ds.letters_file.is_some() {
            bail!(
                "dataset '{}' sets both letters and letters_file",
                ds.name
            );
        }
        if ds.drop_censored && ds.censor_column.is_none() {
            bail!(
                "dataset '{}' sets drop_censored without censor_column",
                ds.name
            );
        }
        ds.chart
            .validate()
            .with_context(|| format!("dataset '{}'", ds.name))?;
    }
    Ok(())
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
