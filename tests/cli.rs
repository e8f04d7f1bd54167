//! Integration tests for the riskmap binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// The binary run inside `dir` with a clean environment for riskmap settings.
fn riskmap(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("riskmap").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RISKMAP_SNAPSHOT")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    for name in riskmap::config::RECOGNIZED_OPTIONS {
        cmd.env_remove(name);
    }
    cmd
}

fn with_snapshot() -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let snapshot = common::write_acme_snapshot(temp.path());
    (temp, snapshot)
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_help() {
    let temp = TempDir::new().unwrap();
    riskmap(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependency-risk scoring"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn test_dashboard_json() {
    let (temp, snapshot) = with_snapshot();
    let output = riskmap(&temp)
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["--format", "json", "dashboard"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["summary"]["highRiskEmployeeCount"], 1);
    assert_eq!(json["rankings"]["topRiskSystems"][0]["name"], "Billing");
}

#[test]
fn test_snapshot_from_environment() {
    let (temp, snapshot) = with_snapshot();
    riskmap(&temp)
        .env("RISKMAP_SNAPSHOT", &snapshot)
        .args(["employee", "e1", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"riskScore\": 60"));
}

#[test]
fn test_landing_as_of() {
    let (temp, snapshot) = with_snapshot();
    let output = riskmap(&temp)
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["-f", "json", "landing", "--as-of", "2025-03-10T12:00:00Z"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["hero"]["employees"], 3);
    assert_eq!(json["riskVisuals"]["dailyTrend"].as_array().unwrap().len(), 7);
}

#[test]
fn test_list_with_filters() {
    let (temp, snapshot) = with_snapshot();
    let output = riskmap(&temp)
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["-f", "json", "employees", "--risk-level", "medium", "--limit", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["meta"]["total"], 1);
    assert_eq!(json["meta"]["limit"], 5);
    assert_eq!(json["data"][0]["name"], "Ada");
}

#[test]
fn test_profile_role_tag() {
    let (temp, snapshot) = with_snapshot();
    let output = riskmap(&temp)
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["-f", "json", "profile", "--email", "lead@acme.io", "--role", "manager"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["role"], "MANAGER");
    assert_eq!(json["team"]["name"], "Platform");
}

#[test]
fn test_terminal_output_renders_tables() {
    let (temp, snapshot) = with_snapshot();
    riskmap(&temp)
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["team", "t2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Payments"))
        .stdout(predicate::str::contains("Cleo"))
        .stdout(predicate::str::contains("MEDIUM"));
}

#[test]
fn test_not_found_exits_with_two() {
    let (temp, snapshot) = with_snapshot();
    riskmap(&temp)
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["system", "s404"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("404"))
        .stderr(predicate::str::contains("system not found: s404"));

    riskmap(&temp)
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["manager-team", "m2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("has no team"));
}

#[test]
fn test_unknown_email_exits_with_two() {
    let (temp, snapshot) = with_snapshot();
    riskmap(&temp)
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["employee", "--email", "ghost@acme.io"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_snapshot_is_an_error() {
    let temp = TempDir::new().unwrap();
    riskmap(&temp)
        .arg("dashboard")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("RISKMAP_SNAPSHOT"));
}

#[test]
fn test_inconsistent_snapshot_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(
        &path,
        r#"{"employees": [{"id": "e1", "name": "A", "email": "a@x.io", "teamId": "nope"}]}"#,
    )
    .unwrap();
    riskmap(&temp)
        .arg("--snapshot")
        .arg(&path)
        .arg("dashboard")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown team nope"));
}

#[test]
fn test_init_then_validate() {
    let temp = TempDir::new().unwrap();
    riskmap(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains(".riskmap.toml"));
    assert!(temp.path().join(".riskmap.toml").exists());

    riskmap(&temp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    riskmap(&temp).args(["init", "--force"]).assert().success();

    riskmap(&temp)
        .args(["config", "--validate", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"scoring\""));
}

#[test]
fn test_config_validate_reports_problems() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".riskmap.toml"),
        "[scoring]\ncriticality = -3.0\n",
    )
    .unwrap();
    riskmap(&temp)
        .args(["config", "--validate"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Criticality weight"));
}

#[test]
fn test_env_override_shows_in_config() {
    let temp = TempDir::new().unwrap();
    let output = riskmap(&temp)
        .env("RISK_WEIGHT_WORKLOAD", "0.5")
        .args(["config", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["scoring"]["workload"], 0.5);
}
