//! End-to-end tests of the `marker-screen` binary.

use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{NamedTempFile, TempDir};

const SICKLE_CELL: &str = "CTGACTCCTGTGGAGAAGTCT";

fn sequence_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn marker_screen() -> Command {
    Command::cargo_bin("marker-screen").unwrap()
}

#[test]
fn test_screen_detects_embedded_marker() {
    let sample = sequence_file(&format!("GGG{SICKLE_CELL}TTT\n"), ".txt");

    marker_screen()
        .args(["screen"])
        .arg(sample.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Sickle_Cell_Anemia"));
}

#[test]
fn test_screen_json_with_custom_catalog() {
    let catalog = sequence_file("X ACGT\nY GGGG\nbroken line here\n", ".txt");
    let sample = sequence_file(">sample\nTTACGTTT\n", ".fa");

    let output = marker_screen()
        .args(["--format", "json", "screen", "--method", "rabin", "--catalog"])
        .arg(catalog.path())
        .arg(sample.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["method"], "rabin");
    assert_eq!(json["samples"][0]["markers"], serde_json::json!(["X"]));
}

#[test]
fn test_screen_unknown_method_falls_back() {
    let catalog = sequence_file("X ACGT\n", ".txt");
    let sample = sequence_file("TTACGTTT", ".txt");

    marker_screen()
        .args(["--format", "json", "screen", "--method", "nonsense", "--catalog"])
        .arg(catalog.path())
        .arg(sample.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"simple\""));
}

#[test]
fn test_screen_missing_file_fails() {
    marker_screen()
        .args(["screen", "/nonexistent/sample.fa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_compare_identical_samples() {
    let a = sequence_file("ACGTACGTACGTACGT", ".txt");
    let b = sequence_file("ACGTACGTACGTACGT", ".txt");

    marker_screen()
        .args(["compare", "--method", "lcs"])
        .arg(a.path())
        .arg(b.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn test_compare_tsv() {
    let a = sequence_file("AAAA", ".txt");
    let b = sequence_file("AATT", ".txt");

    marker_screen()
        .args(["--format", "tsv", "compare", "--method", "simple"])
        .arg(a.path())
        .arg(b.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("simple\t0.5000"));
}

#[test]
fn test_analyze_report() {
    let catalog = sequence_file("X ACGT\nY GGGG\n", ".txt");
    let a = sequence_file("TTACGTTT", ".txt");
    let b = sequence_file("GGGGAAAA", ".txt");

    let output = marker_screen()
        .args(["--format", "json", "analyze", "--catalog"])
        .arg(catalog.path())
        .arg(a.path())
        .arg(b.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["sample1"], serde_json::json!(["X"]));
    assert_eq!(json["sample2"], serde_json::json!(["Y"]));
    assert_eq!(json["similarity_percent"], "0.00%");
}

#[test]
fn test_analyze_respects_config_length_limit() {
    let config = sequence_file(r#"{"max_sequence_length": 4}"#, ".json");
    let a = sequence_file("ACGTACGT", ".txt");
    let b = sequence_file("ACGT", ".txt");

    marker_screen()
        .args(["analyze", "--config"])
        .arg(config.path())
        .arg(a.path())
        .arg(b.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sequence too long"));
}

#[test]
fn test_compare_respects_pairwise_work_limit() {
    let config = sequence_file(r#"{"max_pairwise_work": 100}"#, ".json");
    let a = sequence_file(&"ACGT".repeat(5), ".txt");
    let b = sequence_file(&"ACGT".repeat(6), ".txt");

    marker_screen()
        .args(["compare", "--method", "rabin", "--config"])
        .arg(config.path())
        .arg(a.path())
        .arg(b.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Comparison too large"));

    marker_screen()
        .args(["compare", "--method", "jaccard", "--config"])
        .arg(config.path())
        .arg(a.path())
        .arg(b.path())
        .assert()
        .success();
}

#[test]
fn test_invalid_config_rejected() {
    let config = sequence_file(r#"{"screening": {"jaccard_threshold": 2.0}}"#, ".json");
    let a = sequence_file("ACGT", ".txt");
    let b = sequence_file("ACGT", ".txt");

    marker_screen()
        .args(["compare", "--config"])
        .arg(config.path())
        .arg(a.path())
        .arg(b.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("jaccard_threshold"));
}

#[test]
fn test_catalog_list_and_show() {
    marker_screen()
        .args(["catalog", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cystic_Fibrosis"))
        .stdout(predicate::str::contains("Marfan_Syndrome"));

    marker_screen()
        .args(["catalog", "show", "Sickle_Cell_Anemia"])
        .assert()
        .success()
        .stdout(predicate::str::contains(SICKLE_CELL));

    marker_screen()
        .args(["catalog", "show", "No_Such_Disease"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_catalog_export_roundtrip() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("markers.json");
    let text_path = dir.path().join("markers.txt");

    for path in [&json_path, &text_path] {
        marker_screen()
            .args(["catalog", "export"])
            .arg(path)
            .assert()
            .success()
            .stdout(predicate::str::contains("Exported 8 markers"));
    }

    let json = std::fs::read_to_string(&json_path).unwrap();
    assert!(json.contains("\"version\""));
    let text = std::fs::read_to_string(&text_path).unwrap();
    assert!(text.contains(&format!("Sickle_Cell_Anemia {SICKLE_CELL}")));

    // An exported catalog can be loaded back
    let sample = sequence_file(SICKLE_CELL, ".txt");
    screen_with_catalog(&json_path, sample.path());
}

fn screen_with_catalog(catalog: &Path, sample: &Path) {
    marker_screen()
        .args(["screen", "--catalog"])
        .arg(catalog)
        .arg(sample)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sickle_Cell_Anemia"));
}

#[test]
fn test_threshold_override() {
    let catalog = sequence_file("X ACGTACGTAC\n", ".txt");
    // One mismatch against the marker: 9 of 10 positions
    let sample = sequence_file("GGACGTTCGTACGG", ".txt");

    marker_screen()
        .args(["--format", "tsv", "screen", "--catalog"])
        .arg(catalog.path())
        .arg(sample.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\tX"));

    marker_screen()
        .args(["--format", "tsv", "screen", "--exact-threshold", "1.0", "--catalog"])
        .arg(catalog.path())
        .arg(sample.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\tX").not());

    marker_screen()
        .args(["screen", "--jaccard-threshold", "3"])
        .arg(sample.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("jaccard_threshold"));
}
