//! Integration tests for the lifeboat CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn lifeboat_cmd() -> Command {
    Command::cargo_bin("lifeboat").unwrap()
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/passengers.csv")
}

#[test]
fn test_cli_help() {
    lifeboat_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("describe"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_cli_version() {
    lifeboat_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_analyze_prints_results_table() {
    let dir = tempdir().unwrap();
    lifeboat_cmd()
        .current_dir(dir.path())
        .arg("analyze")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Gender vs survival"))
        .stdout(predicate::str::contains("Age across passenger classes"))
        .stdout(predicate::str::contains("Correlation between age and fare"))
        .stdout(predicate::str::contains("p-value"));
}

#[test]
fn test_core_suite_limits_hypotheses() {
    let dir = tempdir().unwrap();
    lifeboat_cmd()
        .current_dir(dir.path())
        .args(["analyze", "--suite", "core"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Age difference by survival"))
        .stdout(predicate::str::contains("Fare difference by survival").not())
        .stdout(predicate::str::contains("Port of embarkation").not());
}

#[test]
fn test_analyze_writes_json_report() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("reports");
    lifeboat_cmd()
        .current_dir(dir.path())
        .args(["analyze", "--quiet", "--format", "json", "--out"])
        .arg(&out)
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"));

    let content = fs::read_to_string(out.join("lifeboat-report.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 11);
    assert_eq!(results[0]["hypothesis"]["id"], "sex_vs_survival");
    assert_eq!(results[0]["outcome"]["status"], "computed");
    assert_eq!(json["dataset"]["passengers"], 30);
}

#[test]
fn test_analyze_writes_markdown_report() {
    let dir = tempdir().unwrap();
    lifeboat_cmd()
        .current_dir(dir.path())
        .args(["analyze", "--quiet", "--impute-age", "--format", "markdown", "--out", "."])
        .arg(fixture())
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("lifeboat-report.md")).unwrap();
    assert!(content.starts_with("# Titanic hypothesis report"));
    assert!(content.contains("## Summary"));
    assert!(content.contains("Gender vs survival"));
    assert!(content.contains("Filled 6 missing `age` value(s)"));
}

#[test]
fn test_implicit_config_is_picked_up() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".lifeboat.yml"),
        "analysis:\n  suite: core\noutput:\n  format: yaml\n  out_dir: out\n",
    )
    .unwrap();

    lifeboat_cmd()
        .current_dir(dir.path())
        .args(["analyze", "--quiet"])
        .arg(fixture())
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("out/lifeboat-report.yaml")).unwrap();
    assert!(content.contains("suite: core"));
    assert!(content.contains("age_vs_fare"));
}

#[test]
fn test_analyze_missing_dataset_fails() {
    let dir = tempdir().unwrap();
    lifeboat_cmd()
        .current_dir(dir.path())
        .args(["analyze", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.csv"));
}

#[test]
fn test_analyze_without_dataset_fails() {
    let dir = tempdir().unwrap();
    lifeboat_cmd()
        .current_dir(dir.path())
        .arg("analyze")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No dataset given"));
}

#[test]
fn test_analyze_rejects_missing_columns() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("bad.csv");
    fs::write(&csv, "survived,sex,age\n1,female,20\n").unwrap();

    lifeboat_cmd()
        .current_dir(dir.path())
        .arg("analyze")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pclass"));
}

#[test]
fn test_analyze_rejects_invalid_alpha() {
    let dir = tempdir().unwrap();
    lifeboat_cmd()
        .current_dir(dir.path())
        .args(["analyze", "--alpha", "1.5"])
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("validation failed"));
}

#[test]
fn test_describe_shows_preview() {
    lifeboat_cmd()
        .args(["describe", "--head", "3"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("30 rows × 12 columns"))
        .stdout(predicate::str::contains("First 3 rows"))
        .stdout(predicate::str::contains("Missing before"));
}

#[test]
fn test_print_default_config() {
    lifeboat_cmd()
        .arg("print-default-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha: 0.05"))
        .stdout(predicate::str::contains("suite: extended"));
}

#[test]
fn test_init_config_respects_force() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("lifeboat.yml");

    lifeboat_cmd()
        .args(["init-config", "--output"])
        .arg(&output)
        .assert()
        .success();
    assert!(output.exists());

    lifeboat_cmd()
        .args(["init-config", "--output"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    lifeboat_cmd()
        .args(["init-config", "--force", "--output"])
        .arg(&output)
        .assert()
        .success();
}

#[test]
fn test_validate_config() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.yml");
    let bad = dir.path().join("bad.yml");
    fs::write(&good, "analysis:\n  alpha: 0.01\n").unwrap();
    fs::write(&bad, "plots:\n  histogram_bins: 0\n").unwrap();

    lifeboat_cmd()
        .args(["validate-config", "--detailed", "--config"])
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("Yates correction"));

    lifeboat_cmd()
        .args(["validate-config", "--config"])
        .arg(&bad)
        .assert()
        .failure();
}
