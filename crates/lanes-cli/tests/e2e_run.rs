//! E2E tests for the `lanes` binary.
//!
//! Each test runs the binary as a subprocess in an isolated temp directory.
//! Report-only tests pass `--no-plots` to keep runs fast.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

const SURVEY: &str = "\
Lane survey, spring
MID
Ana
Bruno

Top
Ana
Carla
Jg
Carla
Sup
Davi
ADC
Davi
Eli
";

const REPORTS: [&str; 5] = [
    "incidence_matrix.txt",
    "student_similarity_jaccard.txt",
    "lane_cooccurrence.txt",
    "student_similarity_metrics.txt",
    "lane_cooccurrence_metrics.txt",
];

/// Build a Command targeting the `lanes` binary, rooted in `dir`.
fn lanes_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lanes").expect("lanes binary must exist");
    cmd.current_dir(dir);
    // Suppress tracing output that goes to stderr.
    cmd.env("LANES_LOG", "error");
    cmd
}

/// Temp directory with the survey at the default location.
fn project() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::create_dir_all(dir.path().join("data")).expect("mkdir data");
    fs::write(dir.path().join("data/DataSet.txt"), SURVEY).expect("write survey");
    dir
}

fn read(dir: &Path, rel: &str) -> String {
    fs::read_to_string(dir.join(rel)).unwrap_or_else(|e| panic!("read {rel}: {e}"))
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[test]
fn writes_five_reports() {
    let dir = project();
    lanes_cmd(dir.path()).arg("--no-plots").assert().success();

    for name in REPORTS {
        assert!(
            dir.path().join("output").join(name).is_file(),
            "{name} missing"
        );
    }
    assert!(!dir.path().join("plots").exists());
}

#[test]
fn writes_three_plots_by_default() {
    let dir = project();
    lanes_cmd(dir.path()).assert().success();

    for (name, (width, height)) in [
        ("BipGraph.png", (1000_u32, 600_u32)),
        ("StudentSimGraph.png", (800, 800)),
        ("LaneCoocGraph.png", (600, 600)),
    ] {
        let bytes = fs::read(dir.path().join("plots").join(name))
            .unwrap_or_else(|e| panic!("read {name}: {e}"));
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "{name} is not a PNG");
        assert_eq!(&bytes[16..20], &width.to_be_bytes(), "{name} width");
        assert_eq!(&bytes[20..24], &height.to_be_bytes(), "{name} height");
    }
}

#[test]
fn incidence_report_content() {
    let dir = project();
    lanes_cmd(dir.path()).arg("--no-plots").assert().success();

    assert_eq!(
        read(dir.path(), "output/incidence_matrix.txt"),
        "       MID  Top  Jg  Sup  ADC\n\
         Ana      1    1   0    0    0\n\
         Bruno    1    0   0    0    0\n\
         Carla    0    1   1    0    0\n\
         Davi     0    0   0    1    1\n\
         Eli      0    0   0    0    1\n"
    );
}

#[test]
fn similarity_report_content() {
    let dir = project();
    lanes_cmd(dir.path()).arg("--no-plots").assert().success();

    assert_eq!(
        read(dir.path(), "output/student_similarity_jaccard.txt"),
        "         Ana  Bruno  Carla  Davi  Eli\n\
         Ana    1.000    0.5  0.333   0.0  0.0\n\
         Bruno  0.500    1.0  0.000   0.0  0.0\n\
         Carla  0.333    0.0  1.000   0.0  0.0\n\
         Davi   0.000    0.0  0.000   1.0  0.5\n\
         Eli    0.000    0.0  0.000   0.5  1.0\n"
    );
}

#[test]
fn cooccurrence_metrics_report_has_metric_columns() {
    let dir = project();
    lanes_cmd(dir.path()).arg("--no-plots").assert().success();

    let report = read(dir.path(), "output/lane_cooccurrence_metrics.txt");
    let header = report.lines().next().expect("header line");
    let columns: Vec<&str> = header.split_whitespace().collect();
    assert_eq!(
        columns,
        ["degree", "strength", "betweenness", "closeness", "eigenvector", "clustering"]
    );
    let labels: Vec<&str> = report
        .lines()
        .skip(1)
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(labels, ["MID", "Top", "Jg", "Sup", "ADC"]);
}

#[test]
fn reruns_are_byte_identical() {
    let dir = project();
    lanes_cmd(dir.path()).arg("--no-plots").assert().success();
    let first: Vec<String> = REPORTS
        .iter()
        .map(|name| read(dir.path(), &format!("output/{name}")))
        .collect();

    lanes_cmd(dir.path()).arg("--no-plots").assert().success();
    for (name, before) in REPORTS.iter().zip(&first) {
        assert_eq!(&read(dir.path(), &format!("output/{name}")), before, "{name} changed");
    }
}

// ---------------------------------------------------------------------------
// Paths and config
// ---------------------------------------------------------------------------

#[test]
fn data_and_output_flags_override_defaults() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("survey.txt"), "Top\nAna\n").expect("write survey");

    lanes_cmd(dir.path())
        .args(["--data", "survey.txt", "--output-dir", "reports", "--no-plots"])
        .assert()
        .success();

    assert!(dir.path().join("reports/incidence_matrix.txt").is_file());
    assert!(!dir.path().join("output").exists());
}

#[test]
fn config_file_is_honoured() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("survey.txt"), "MID\nAna\n").expect("write survey");
    fs::write(
        dir.path().join("lanes.toml"),
        "[paths]\ndata = \"survey.txt\"\noutput = \"tables\"\n\n[render]\nplots = false\n",
    )
    .expect("write config");

    lanes_cmd(dir.path()).assert().success();

    assert!(dir.path().join("tables/lane_cooccurrence.txt").is_file());
    assert!(!dir.path().join("plots").exists());
}

#[test]
fn malformed_config_fails() {
    let dir = project();
    fs::write(dir.path().join("lanes.toml"), "[paths\n").expect("write config");

    lanes_cmd(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("lanes.toml"));
}

// ---------------------------------------------------------------------------
// Errors and summary
// ---------------------------------------------------------------------------

#[test]
fn missing_dataset_fails_with_path() {
    let dir = TempDir::new().expect("temp dir");

    lanes_cmd(dir.path())
        .arg("--no-plots")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DataSet.txt"))
        .stderr(predicate::str::contains("hint:"));

    assert!(!dir.path().join("output").exists());
}

#[test]
fn text_summary_names_written_files() {
    let dir = project();
    lanes_cmd(dir.path())
        .arg("--no-plots")
        .assert()
        .success()
        .stdout(predicate::str::contains("students:      5"))
        .stdout(predicate::str::contains("dropped lines: 1"))
        .stdout(predicate::str::contains("incidence_matrix.txt"));
}

#[test]
fn json_summary() {
    let dir = project();
    let output = lanes_cmd(dir.path())
        .args(["--no-plots", "--json"])
        .output()
        .expect("run should not crash");
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON summary");
    assert_eq!(json["students"], 5);
    assert_eq!(json["dropped_lines"], 1);
    assert_eq!(json["bipartite"]["edge_count"], 8);
    assert_eq!(json["similarity"]["edge_count"], 3);
    assert_eq!(json["cooccurrence"]["edge_count"], 3);
    assert_eq!(json["reports"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["plots"].as_array().map(Vec::len), Some(0));
}

#[test]
fn help_lists_flags() {
    let dir = TempDir::new().expect("temp dir");
    lanes_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-plots"))
        .stdout(predicate::str::contains("--output-dir"));
}
