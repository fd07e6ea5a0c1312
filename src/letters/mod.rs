mod loader;

use std::collections::BTreeMap;

use crate::error::ChartError;
use crate::groups::GroupStatistic;

pub use loader::{load_letters_file, parse_letters};

/// Group identifier to significance letter, as produced by an external
/// multiple-comparisons procedure.
pub type LetterMap = BTreeMap<String, String>;

/// Binds letters to statistics by group key.
///
/// Every group must have an entry and every entry must name a group; letters
/// are never matched by position.
pub fn attach_significance_letters(
    statistics: Vec<GroupStatistic>,
    letters: &LetterMap,
) -> Result<Vec<GroupStatistic>, ChartError> {
    let unknown: Vec<String> = letters
        .keys()
        .filter(|k| !statistics.iter().any(|s| &s.group == *k))
        .cloned()
        .collect();

    let mut out = Vec::with_capacity(statistics.len());
    for mut stat in statistics {
        let letter = letters
            .get(&stat.group)
            .ok_or_else(|| ChartError::MissingLetter {
                group: stat.group.clone(),
            })?;
        stat.significance_letter = Some(letter.clone());
        out.push(stat);
    }

    if !unknown.is_empty() {
        return Err(ChartError::UnknownLetterGroup { groups: unknown });
    }
    Ok(out)
}
