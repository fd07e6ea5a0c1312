use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::input::{detect_delimiter, split_record};
use crate::io::read_to_string_maybe_gz;
use crate::letters::LetterMap;

pub fn load_letters_file(path: &Path) -> Result<LetterMap> {
    let content = read_to_string_maybe_gz(path)
        .with_context(|| format!("failed to read letters file {}", path.display()))?;
    parse_letters(&content, detect_delimiter(path), &path.display().to_string())
}

/// Parses `group<delim>letter` lines. Blank lines and `#` comments are
/// ignored; a leading `group<delim>letter` header is optional.
pub fn parse_letters(content: &str, delimiter: char, source: &str) -> Result<LetterMap> {
    let mut letters = LetterMap::new();
    let mut seen_record = false;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim().trim_start_matches('\u{feff}');
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let parts = split_record(trimmed, delimiter);
        if parts.len() != 2 {
            bail!(
                "{}:{} malformed letters record (expected 2 columns)",
                source,
                line_no
            );
        }
        let group = parts[0].trim();
        let letter = parts[1].trim();
        if !seen_record {
            seen_record = true;
            if group.eq_ignore_ascii_case("group") && letter.eq_ignore_ascii_case("letter") {
                continue;
            }
        }
        if group.is_empty() || letter.is_empty() {
            bail!("{}:{} empty field in letters record", source, line_no);
        }
        if let Some(prev) = letters.get(group) {
            bail!(
                "{}:{} duplicate letter for group '{}' (already '{}')",
                source,
                line_no,
                group,
                prev
            );
        }
        letters.insert(group.to_string(), letter.to_string());
    }

    Ok(letters)
}
