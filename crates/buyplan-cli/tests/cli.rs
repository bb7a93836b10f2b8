use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Command pointed at an empty (all-defaults) config file inside `dir`.
fn buyplan(dir: &TempDir) -> Command {
    let config = config_file(dir.path(), "");
    let mut cmd = Command::cargo_bin("buyplan-cli").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

fn config_file(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn estimate_with_defaults_reports_44_units() {
    let tmp = tempdir().unwrap();
    buyplan(&tmp)
        .arg("estimate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lifespan:"))
        .stdout(predicate::str::contains("12 weeks"))
        .stdout(predicate::str::contains("PLM ROS:"))
        .stdout(predicate::str::contains("0.36"))
        .stdout(predicate::str::contains("44 units"));
}

#[test]
fn estimate_json_is_machine_readable() {
    let tmp = tempdir().unwrap();
    let output = buyplan(&tmp)
        .args(["estimate", "--lifespan", "12", "--stores", "20", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["lifespan_weeks"], 12);
    assert_eq!(value["store_count"], 20);
    assert_eq!(value["total_buy"], 88);
}

#[test]
fn out_of_range_lifespan_is_rejected() {
    let tmp = tempdir().unwrap();
    buyplan(&tmp)
        .args(["estimate", "--lifespan", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("20"));
}

#[test]
fn config_defaults_apply_when_flags_are_omitted() {
    let tmp = tempdir().unwrap();
    let config = config_file(tmp.path(), "[defaults]\nstores = 20\n");
    Command::cargo_bin("buyplan-cli")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("estimate")
        .assert()
        .success()
        .stdout(predicate::str::contains("88 units"));
}

#[test]
fn invalid_config_defaults_fail_cleanly() {
    let tmp = tempdir().unwrap();
    let config = config_file(tmp.path(), "[defaults]\nlifespan = 99\n");
    Command::cargo_bin("buyplan-cli")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("estimate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("lifespan 99"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let tmp = tempdir().unwrap();
    Command::cargo_bin("buyplan-cli")
        .unwrap()
        .arg("--config")
        .arg(tmp.path().join("absent.toml"))
        .arg("estimate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn profile_lists_reference_products() {
    let tmp = tempdir().unwrap();
    buyplan(&tmp)
        .arg("profile")
        .assert()
        .success()
        .stdout(predicate::str::contains("DECLINE @ 12W"))
        .stdout(predicate::str::contains("PLM"))
        .stdout(predicate::str::contains("0.2260"));
}

#[test]
fn ascii_chart_goes_to_stdout() {
    let tmp = tempdir().unwrap();
    buyplan(&tmp)
        .args(["chart", "ros"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ROS for Total Buy"))
        .stdout(predicate::str::contains("Legend:"))
        .stdout(predicate::str::contains("Avg.ROS = 0.36"));
}

#[test]
fn svg_chart_written_to_file() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("charts").join("comparison.svg");
    buyplan(&tmp)
        .args(["chart", "comparison", "--format", "svg", "--samples", "50", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Chart written to"));
    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<polyline").count(), 6);
}

#[test]
fn json_chart_carries_reference_curves() {
    let tmp = tempdir().unwrap();
    let output = buyplan(&tmp)
        .args(["chart", "comparison", "--format", "json", "--samples", "25"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let series = value["series"].as_array().unwrap();
    assert_eq!(series.len(), 6);
    assert_eq!(series[0]["points"].as_array().unwrap().len(), 25);
    assert_eq!(series[5]["label"], "PLM, LS 12");
}

#[test]
fn sweep_covers_requested_lifespans() {
    let tmp = tempdir().unwrap();
    let output = buyplan(&tmp)
        .args(["sweep", "--from", "6", "--to", "9", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let weeks: Vec<u64> = rows
        .iter()
        .map(|r| r["lifespan_weeks"].as_u64().unwrap())
        .collect();
    assert_eq!(weeks, vec![6, 7, 8, 9]);
}

#[test]
fn reversed_sweep_fails() {
    let tmp = tempdir().unwrap();
    buyplan(&tmp)
        .args(["sweep", "--from", "10", "--to", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty lifespan range"));
}

#[test]
fn config_init_then_show() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("cfg").join("config.toml");
    Command::cargo_bin("buyplan-cli")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    Command::cargo_bin("buyplan-cli")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    Command::cargo_bin("buyplan-cli")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lifespan = 12"))
        .stdout(predicate::str::contains("samples = 500"));
}

#[test]
fn completions_for_bash() {
    let tmp = tempdir().unwrap();
    buyplan(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("buyplan-cli"));
}
