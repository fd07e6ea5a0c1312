use std::fs;
use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

const PARASITISM: &str = "\
lineage,symbiont,parasitized
A,Hamiltonella,1
A,Hamiltonella,1
A,Hamiltonella,0
A,Hamiltonella,1
B,none,0
B,none,0
B,none,0
B,none,1
";

const DEVELOPMENT: &str = "\
lineage\tdays
L1\t9
L1\t10
L1\t11
L2\t12
L2\t12
L2\t12
L3\t12
L3\t11
L3\t13
";

fn write_inputs(dir: &Path) {
    fs::write(dir.join("parasitism.csv"), PARASITISM).unwrap();
    fs::write(dir.join("development.tsv"), DEVELOPMENT).unwrap();
    fs::write(dir.join("development_letters.tsv"), "L1\tb\nL2\ta\nL3\ta\n").unwrap();
    fs::write(
        dir.join("analysis.toml"),
        r#"
[[dataset]]
name = "parasitism"
input = "parasitism.csv"
group_column = "lineage"
response_column = "parasitized"
symbiont_column = "symbiont"
letters = { A = "a", B = "b" }

[dataset.chart]
y_axis_label = "Parasitism rate (%)"
scale = 100.0
y_limit = [0, 100]
letter_offset = 3.0

[[dataset]]
name = "development"
input = "development.tsv"
group_column = "lineage"
response_column = "days"
letters_file = "development_letters.tsv"

[dataset.chart]
fill_by = "none"
y_axis_label = "Development time (days)"
letter_offset = 0.5
"#,
    )
    .unwrap();
}

/// Text content of every `<text>` element in an SVG document.
fn svg_texts(svg: &str) -> Vec<String> {
    svg.split("</text>")
        .filter_map(|chunk| chunk.rfind("<text").map(|i| &chunk[i..]))
        .filter_map(|el| el.find('>').map(|j| el[j + 1..].trim().to_string()))
        .collect()
}

fn run(manifest: &Path, out: &Path) -> String {
    let mut cmd = Command::cargo_bin("kira-groupchart").unwrap();
    cmd.args([
        "run",
        "--manifest",
        manifest.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--json",
        "--tsv",
    ]);
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn run_writes_chart_tsv_and_json() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_inputs(input.path());
    let stdout = run(&input.path().join("analysis.toml"), out.path());

    assert!(stdout.contains("Dataset: parasitism (rows=8, groups=2)"));
    assert!(stdout.contains("Dataset: development (rows=9, groups=3)"));

    let svg = fs::read_to_string(out.path().join("parasitism.svg")).unwrap();
    let texts = svg_texts(&svg);
    assert!(texts.iter().any(|t| t == "a"));
    assert!(texts.iter().any(|t| t == "b"));
    assert!(texts.iter().any(|t| t == "Hamiltonella"));

    let tsv = fs::read_to_string(out.path().join("parasitism.tsv")).unwrap();
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(
        lines[0],
        "rank\tgroup\tsymbiont_status\tn\tmean\tstandard_error\tletter\tcensored"
    );
    assert_eq!(lines[1], "1\tA\tHamiltonella\t4\t0.750000\t0.250000\ta\t0");
    assert_eq!(lines[2], "2\tB\tnone\t4\t0.250000\t0.250000\tb\t0");

    let v: Value =
        serde_json::from_slice(&fs::read(out.path().join("development.json")).unwrap()).unwrap();
    assert_eq!(v["tool"], "kira-groupchart");
    assert_eq!(v["schema_version"], "v1");
    assert_eq!(v["dataset"], "development");
    assert_eq!(v["input_meta"]["groups"], 3);
    assert_eq!(v["chart"]["svg_path"], "development.svg");
    assert_eq!(v["chart"]["fill_by"], "none");
    // L2 and L3 tie on mean 12; group id breaks the tie
    assert_eq!(v["groups"][0]["group"], "L2");
    assert_eq!(v["groups"][1]["group"], "L3");
    assert_eq!(v["groups"][2]["group"], "L1");
    assert_eq!(v["groups"][2]["significance_letter"], "b");
    assert_eq!(v["groups"][0]["standard_error"], 0.0);
}

#[test]
fn outputs_are_deterministic() {
    let input = TempDir::new().unwrap();
    write_inputs(input.path());
    let out1 = TempDir::new().unwrap();
    let out2 = TempDir::new().unwrap();
    let manifest = input.path().join("analysis.toml");
    run(&manifest, out1.path());
    run(&manifest, out2.path());

    for name in [
        "parasitism.svg",
        "parasitism.tsv",
        "parasitism.json",
        "development.svg",
        "development.tsv",
        "development.json",
    ] {
        let a = fs::read(out1.path().join(name)).unwrap();
        let b = fs::read(out2.path().join(name)).unwrap();
        assert_eq!(a, b, "mismatch in {}", name);
    }
}

#[test]
fn missing_letter_fails_the_run() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_inputs(input.path());
    fs::write(
        input.path().join("development_letters.tsv"),
        "L1\tb\nL2\ta\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("kira-groupchart").unwrap();
    cmd.args([
        "run",
        "--manifest",
        input.path().join("analysis.toml").to_str().unwrap(),
        "--out",
        out.path().to_str().unwrap(),
    ]);
    let output = cmd.assert().failure().get_output().stderr.clone();
    let stderr = String::from_utf8(output).unwrap();
    assert!(stderr.contains("dataset 'development' failed"));
    assert!(stderr.contains("no significance letter supplied for group 'L3'"));
}

#[test]
fn only_runs_selected_dataset() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_inputs(input.path());

    let mut cmd = Command::cargo_bin("kira-groupchart").unwrap();
    cmd.args([
        "run",
        "--manifest",
        input.path().join("analysis.toml").to_str().unwrap(),
        "--out",
        out.path().to_str().unwrap(),
        "--only",
        "development",
    ]);
    cmd.assert().success();
    assert!(out.path().join("development.svg").exists());
    assert!(!out.path().join("parasitism.svg").exists());
    assert!(!out.path().join("development.json").exists());
}

#[test]
fn repeated_only_name_runs_once() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_inputs(input.path());

    let mut cmd = Command::cargo_bin("kira-groupchart").unwrap();
    cmd.args([
        "run",
        "--manifest",
        input.path().join("analysis.toml").to_str().unwrap(),
        "--out",
        out.path().to_str().unwrap(),
        "--only",
        "development",
        "development",
    ]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.matches("Dataset: development").count(), 1);
}
