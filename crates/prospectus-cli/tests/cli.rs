//! Integration tests for the `prospectus` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn prospectus() -> Command {
    Command::cargo_bin("prospectus").expect("prospectus binary should be built")
}

/// Config with no artificial latency so tests stay fast.
fn write_config(dir: &Path, failure_rate: f64) -> PathBuf {
    let path = dir.join("config.json");
    let config = format!(
        r#"{{"mock":{{"min_delay_ms":0,"max_delay_ms":0,"failure_rate":{failure_rate}}}}}"#
    );
    std::fs::write(&path, config).expect("write config");
    path
}

#[test]
fn test_help_lists_commands() {
    prospectus()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_ask_prints_transcript() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(dir.path(), 0.0);

    prospectus()
        .arg("--config")
        .arg(&config)
        .args(["ask", "What are the fees?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You: What are the fees?"))
        .stdout(predicate::str::contains("Sources: Pages 45, 46"))
        .stdout(predicate::str::contains("Thinking").not());
}

#[test]
fn test_ask_json() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(dir.path(), 0.0);

    let output = prospectus()
        .arg("--config")
        .arg(&config)
        .args(["ask", "--json", "Who is the vice chancellor?"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(body["question"], "Who is the vice chancellor?");
    assert!(body["session_id"]
        .as_str()
        .is_some_and(|id| id.starts_with("user_")));
    assert!(body["answer"]
        .as_str()
        .is_some_and(|text| text.contains("Lawrence Ezemonye")));
    assert_eq!(body["source_pages"], serde_json::json!([5, 12]));
    assert!(body.get("error").is_none());
}

#[test]
fn test_ask_json_failure_reports_error() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(dir.path(), 1.0);

    let output = prospectus()
        .arg("--config")
        .arg(&config)
        .args(["ask", "--json", "  fees  "])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(
        body,
        serde_json::json!({
            "error": "Sorry, I encountered an error. Please try again.",
            "question": "fees",
        })
    );
}

#[test]
fn test_ask_failure_shows_fallback() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(dir.path(), 1.0);

    prospectus()
        .arg("--config")
        .arg(&config)
        .args(["ask", "admission requirements"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "AI: Sorry, I encountered an error. Please try again.",
        ));
}

#[test]
fn test_ask_blank_question() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(dir.path(), 0.0);

    prospectus()
        .arg("--config")
        .arg(&config)
        .args(["ask", "   "])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("question is empty"));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{"mock":{"min_delay_ms":5,"max_delay_ms":1}}"#).expect("write");

    prospectus()
        .arg("--config")
        .arg(&config)
        .args(["ask", "fees"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_init_writes_config() {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("nested").join("config.json");

    prospectus()
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).expect("read")).expect("json");
    assert_eq!(written["mock"]["min_delay_ms"], 1000);
    assert_eq!(written["mock"]["max_delay_ms"], 2000);

    prospectus()
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    prospectus()
        .arg("--config")
        .arg(&config)
        .args(["init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
}

#[test]
fn test_log_file_receives_logs() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(dir.path(), 0.0);
    let log = dir.path().join("prospectus.log");

    prospectus()
        .env("RUST_LOG", "debug")
        .arg("--config")
        .arg(&config)
        .arg("--log-file")
        .arg(&log)
        .args(["ask", "courses"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let logs = std::fs::read_to_string(&log).expect("log file");
    assert!(logs.contains("session started"));
}
