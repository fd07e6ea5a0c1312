use std::collections::BTreeMap;
use std::fs;

use kira_groupchart::error::ChartError;
use kira_groupchart::groups::{Observation, compute_group_statistics};
use kira_groupchart::letters::{
    LetterMap, attach_significance_letters, load_letters_file, parse_letters,
};
use tempfile::TempDir;

fn letter_map(pairs: &[(&str, &str)]) -> LetterMap {
    pairs
        .iter()
        .map(|(g, l)| (g.to_string(), l.to_string()))
        .collect::<BTreeMap<_, _>>()
}

fn two_groups() -> Vec<kira_groupchart::groups::GroupStatistic> {
    let data = vec![
        Observation::new("A", 1.0),
        Observation::new("A", 3.0),
        Observation::new("B", 5.0),
        Observation::new("B", 9.0),
    ];
    compute_group_statistics(&data).unwrap()
}

#[test]
fn letters_bound_by_group_key() {
    // B has the larger mean; binding must not depend on rank order
    let stats = attach_significance_letters(two_groups(), &letter_map(&[("B", "a"), ("A", "b")]))
        .unwrap();
    let a = stats.iter().find(|s| s.group == "A").unwrap();
    let b = stats.iter().find(|s| s.group == "B").unwrap();
    assert_eq!(a.significance_letter.as_deref(), Some("b"));
    assert_eq!(b.significance_letter.as_deref(), Some("a"));
}

#[test]
fn missing_letter_fails() {
    let err = attach_significance_letters(two_groups(), &letter_map(&[("A", "a")])).unwrap_err();
    assert_eq!(
        err,
        ChartError::MissingLetter {
            group: "B".to_string()
        }
    );
}

#[test]
fn unknown_letter_group_fails() {
    let err = attach_significance_letters(
        two_groups(),
        &letter_map(&[("A", "a"), ("B", "b"), ("C", "c")]),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ChartError::UnknownLetterGroup {
            groups: vec!["C".to_string()]
        }
    );
}

#[test]
fn parse_letters_with_header_and_comments() {
    let content = "# tukey output\ngroup\tletter\nL1\ta\nL2\tab\n\nL3\tb\n";
    let letters = parse_letters(content, '\t', "test").unwrap();
    assert_eq!(letters.len(), 3);
    assert_eq!(letters["L2"], "ab");
}

#[test]
fn parse_letters_rejects_duplicates_and_malformed() {
    let dup = parse_letters("L1\ta\nL1\tb\n", '\t', "test").unwrap_err();
    assert!(dup.to_string().contains("duplicate letter for group 'L1'"));
    let bad = parse_letters("L1\ta\textra\n", '\t', "test").unwrap_err();
    assert!(bad.to_string().contains("test:1 malformed"));
}

#[test]
fn load_letters_csv_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("letters.csv");
    fs::write(&path, "group,letter\nA,a\nB,\"b\"\n").unwrap();
    let letters = load_letters_file(&path).unwrap();
    assert_eq!(letters, letter_map(&[("A", "a"), ("B", "b")]));
}
