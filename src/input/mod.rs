mod table;

use std::path::Path;

pub use table::{LoadedTable, TableColumns, parse_observations, read_observations};

/// Tab for `.tsv`/`.tab`/`.txt` (optionally gzipped), comma otherwise.
pub fn detect_delimiter(path: &Path) -> char {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    if name.ends_with(".tsv") || name.ends_with(".tab") || name.ends_with(".txt") {
        '\t'
    } else {
        ','
    }
}

/// Splits one delimited record. Fields wrapped in double quotes may contain
/// the delimiter; `""` inside a quoted field is a literal quote.
pub fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }
    fields.push(field);
    fields
}
