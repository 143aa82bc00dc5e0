//! Integration tests: run the mazdoor binary and check exit codes and output.

use std::process::Command;

fn mazdoor() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mazdoor"));
    // Keep the ambient environment out of worker-count and quiet decisions
    cmd.env_remove("MAZDOOR_WORKERS")
        .env_remove("MAZDOOR_QUIET")
        .env_remove("MAZDOOR_LOG");
    cmd
}

#[test]
fn test_help() {
    let out = mazdoor().arg("--help").output().unwrap();
    assert!(out.status.success(), "mazdoor --help should succeed");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("map"));
    assert!(stdout.contains("count"));
}

#[test]
fn test_version() {
    let out = mazdoor().arg("--version").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("0.3.1") || stdout.contains("mazdoor"));
}

#[test]
fn test_no_subcommand_prints_banner() {
    let out = mazdoor().output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("mazdoor"));
}

#[test]
fn test_map_default_demo_set() {
    let out = mazdoor().args(["map", "--workers", "3"]).output().unwrap();
    assert!(out.status.success(), "default map should succeed");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("5 items: 5 ok"));
}

#[test]
fn test_map_scenario_multiset() {
    let out = mazdoor()
        .args(["map", "1", "2", "3", "4", "5", "--workers", "3", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(v["command"], "map");
    assert_eq!(v["report"]["total"], 5);
    assert_eq!(v["report"]["succeeded"], 5);

    let values: Vec<i64> = v["values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|x| x.as_i64().unwrap())
        .collect();
    assert_eq!(values, vec![2, 4, 6, 8, 10]);
}

#[test]
fn test_map_fail_on_exits_nonzero() {
    let out = mazdoor()
        .args(["map", "1", "2", "3", "--fail-on", "2", "--workers", "2", "--json"])
        .output()
        .unwrap();
    assert!(!out.status.success(), "a failed slot should exit nonzero");

    let stdout = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(v["report"]["total"], 3);
    assert_eq!(v["report"]["failed"], 1);
    let errors = v["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().contains("induced failure on 2"));
}

#[test]
fn test_map_zero_workers_fails_preflight() {
    let out = mazdoor()
        .args(["map", "1", "2", "--workers", "0"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("at least 1"));
}

#[test]
fn test_count_small_batch() {
    let out = mazdoor()
        .args(["count", "--tasks", "50", "--workers", "4", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(v["count"], 50);
    assert_eq!(v["expected"], 50);
}

#[test]
fn test_count_thousand_increments() {
    let out = mazdoor()
        .args(["count", "--tasks", "1000", "--workers", "8", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success(), "1000 increments should never lose an update");

    let stdout = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(v["count"], 1000);
    assert_eq!(v["report"]["total"], 1000);
}

#[test]
fn test_config_file_sets_workers() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".mazdoorrc"), r#"{"workers": 2}"#).unwrap();

    let out = mazdoor()
        .current_dir(tmp.path())
        .args(["map", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(v["report"]["workers"], 2);
}
