//! Binary-level tests for the exit-code contract.
//!
//! The mock backend (TELOS_USE_MOCK=1) makes the binary deterministic, and
//! TELOS_CONFIG_DIR keeps every test inside its own temporary config dir.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn telos(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("telos").unwrap();
    cmd.env("TELOS_CONFIG_DIR", config_dir.path());
    cmd.env_remove("TELOS_USE_MOCK");
    cmd
}

fn telos_mock(config_dir: &TempDir) -> Command {
    let mut cmd = telos(config_dir);
    cmd.env("TELOS_USE_MOCK", "1");
    cmd
}

#[test]
fn no_arguments_prints_usage_to_stderr_and_exits_1() {
    let temp = TempDir::new().unwrap();
    telos(&temp)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn safe_suggestion_goes_to_stdout() {
    let temp = TempDir::new().unwrap();
    telos_mock(&temp)
        .args(["show", "disk", "usage"])
        .assert()
        .code(0)
        .stdout("df -h\n");
}

#[test]
fn destructive_suggestion_is_blocked_with_empty_stdout() {
    let temp = TempDir::new().unwrap();
    telos_mock(&temp)
        .args(["delete", "everything"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn backtick_wrapped_suggestion_is_blocked() {
    let temp = TempDir::new().unwrap();
    telos_mock(&temp)
        .args(["list", "files"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn verbose_diagnostics_never_touch_stdout() {
    let temp = TempDir::new().unwrap();
    telos_mock(&temp)
        .arg("--verbose")
        .args(["show", "disk", "usage"])
        .assert()
        .code(0)
        .stdout("df -h\n");
}

#[test]
fn help_and_version_exit_0() {
    let temp = TempDir::new().unwrap();
    telos(&temp)
        .arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Usage"));

    let temp = TempDir::new().unwrap();
    telos(&temp)
        .arg("--version")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("telos"));
}

#[test]
fn config_show_prints_defaults() {
    let temp = TempDir::new().unwrap();
    telos(&temp)
        .args(["config", "show"])
        .assert()
        .code(0)
        .stdout(
            predicate::str::contains("backend: on-device")
                .and(predicate::str::contains("llama3.2"))
                .and(predicate::str::contains("http://localhost:11434")),
        );
}

#[test]
fn config_set_round_trips_through_show() {
    let temp = TempDir::new().unwrap();
    telos(&temp)
        .args(["config", "set", "model", "mistral"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Set model = mistral"));

    telos(&temp)
        .args(["config", "show"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("model:   mistral"));
}

#[test]
fn config_set_invalid_backend_exits_1_and_leaves_file_untouched() {
    let temp = TempDir::new().unwrap();
    telos(&temp)
        .args(["config", "set", "model", "mistral"])
        .assert()
        .code(0);
    let before = fs::read_to_string(temp.path().join("config.toml")).unwrap();

    telos(&temp)
        .args(["config", "set", "backend", "invalidvalue"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unknown backend"));

    let after = fs::read_to_string(temp.path().join("config.toml")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn config_set_unknown_key_exits_1() {
    let temp = TempDir::new().unwrap();
    telos(&temp)
        .args(["config", "set", "router_model", "qwen2.5:0.5b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown config key"));
    assert!(!temp.path().join("config.toml").exists());
}

#[test]
fn config_set_with_missing_value_exits_1() {
    let temp = TempDir::new().unwrap();
    telos(&temp)
        .args(["config", "set", "backend"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}
