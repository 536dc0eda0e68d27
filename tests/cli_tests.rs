//! End-to-end CLI tests
//!
//! Only commands that don't touch the network are exercised here.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_sources_lists_default_feeds() {
    Command::cargo_bin("venture-watch")
        .unwrap()
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains("TechCrunch"))
        .stdout(predicate::str::contains("VentureBeat"));
}

#[test]
fn test_sources_json_output() {
    let output = Command::cargo_bin("venture-watch")
        .unwrap()
        .args(["sources", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let sources: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let sources = sources.as_array().unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0]["name"], "TechCrunch");
}

#[test]
fn test_collect_rejects_unknown_source() {
    Command::cargo_bin("venture-watch")
        .unwrap()
        .args(["collect", "--source", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no configured source"));
}

#[test]
fn test_missing_config_file_errors() {
    Command::cargo_bin("venture-watch")
        .unwrap()
        .args(["--config", "/nonexistent/venture.toml", "sources"])
        .assert()
        .failure();
}
