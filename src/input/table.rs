use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::groups::Observation;
use crate::input::{detect_delimiter, split_record};
use crate::io::read_to_string_maybe_gz;

/// Column names to pull out of an input table.
#[derive(Debug, Clone, Copy)]
pub struct TableColumns<'a> {
    pub group: &'a str,
    pub response: &'a str,
    pub symbiont: Option<&'a str>,
    pub censor: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub observations: Vec<Observation>,
    /// Data rows seen, including skipped ones.
    pub rows: usize,
    pub skipped: usize,
    pub warnings: Vec<String>,
}

pub fn read_observations(path: &Path, columns: TableColumns<'_>) -> Result<LoadedTable> {
    let content = read_to_string_maybe_gz(path)
        .with_context(|| format!("failed to read input table {}", path.display()))?;
    parse_observations(
        &content,
        detect_delimiter(path),
        columns,
        &path.display().to_string(),
    )
}

pub fn parse_observations(
    content: &str,
    delimiter: char,
    columns: TableColumns<'_>,
    source: &str,
) -> Result<LoadedTable> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());

    let (_, header_line) = lines
        .next()
        .ok_or_else(|| anyhow::anyhow!("{}: empty table (no header row)", source))?;
    let header: Vec<String> = split_record(header_line.trim_start_matches('\u{feff}'), delimiter)
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();
    let index: HashMap<&str, usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| (h.as_str(), i))
        .collect();

    let lookup = |name: &str| -> Result<usize> {
        index.get(name).copied().ok_or_else(|| {
            anyhow::anyhow!(
                "{}: missing required column '{}' (available: {})",
                source,
                name,
                header.join(", ")
            )
        })
    };
    let group_col = lookup(columns.group)?;
    let response_col = lookup(columns.response)?;
    let symbiont_col = columns.symbiont.map(lookup).transpose()?;
    let censor_col = columns.censor.map(lookup).transpose()?;

    let mut observations = Vec::new();
    let mut rows = 0usize;
    let mut skipped = 0usize;
    let mut warnings = Vec::new();

    for (idx, line) in lines {
        let line_no = idx + 1;
        rows += 1;
        let fields = split_record(line.trim_end_matches('\r'), delimiter);
        if fields.len() != header.len() {
            bail!(
                "{}:{} expected {} fields, found {}",
                source,
                line_no,
                header.len(),
                fields.len()
            );
        }

        let group = fields[group_col].trim();
        if group.is_empty() {
            bail!("{}:{} empty '{}' value", source, line_no, columns.group);
        }

        let raw = fields[response_col].trim();
        if is_missing(raw) {
            skipped += 1;
            warnings.push(format!(
                "{}:{} missing '{}' value; row skipped",
                source, line_no, columns.response
            ));
            continue;
        }
        let response: f64 = raw.parse().map_err(|_| {
            anyhow::anyhow!(
                "{}:{} invalid numeric value '{}' in column '{}'",
                source,
                line_no,
                raw,
                columns.response
            )
        })?;

        let symbiont_status = symbiont_col
            .map(|c| fields[c].trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let censored = match censor_col {
            Some(c) => Some(parse_censor(fields[c].trim()).ok_or_else(|| {
                anyhow::anyhow!(
                    "{}:{} censor indicator must be 0 or 1, found '{}'",
                    source,
                    line_no,
                    fields[c].trim()
                )
            })?),
            None => None,
        };

        observations.push(Observation {
            group: group.to_string(),
            symbiont_status,
            response,
            censored,
        });
    }

    Ok(LoadedTable {
        observations,
        rows,
        skipped,
        warnings,
    })
}

fn is_missing(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("na") || raw.eq_ignore_ascii_case("nan")
}

fn parse_censor(raw: &str) -> Option<bool> {
    match raw {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}
