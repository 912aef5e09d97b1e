//! Integration tests for the `mrv` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live switch.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `mrv` binary with env isolation.
///
/// Clears all `MRV_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn mrv_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("mrv");
    cmd.env("HOME", "/tmp/mrv-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/mrv-cli-test-nonexistent")
        .env_remove("MRV_PROFILE")
        .env_remove("MRV_HOST")
        .env_remove("MRV_PORT")
        .env_remove("MRV_USERNAME")
        .env_remove("MRV_PASSWORD")
        .env_remove("MRV_VENDOR")
        .env_remove("MRV_OUTPUT")
        .env_remove("MRV_TIMEOUT")
        .env_remove("MRV_INTERVAL");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = mrv_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    mrv_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("multicast")
            .and(predicate::str::contains("check"))
            .and(predicate::str::contains("watch"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    mrv_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mrv"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    mrv_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    mrv_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    mrv_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = mrv_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_check_without_config_fails() {
    mrv_cmd().arg("check").assert().failure().stderr(
        predicate::str::contains("config")
            .or(predicate::str::contains("switch"))
            .or(predicate::str::contains("profile")),
    );
}

#[test]
fn test_check_without_vendor_fails_with_usage_error() {
    let output = mrv_cmd()
        .args(["--host", "sw1.example.net", "check"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("vendor"),
        "Expected error mentioning vendor:\n{text}"
    );
}

#[test]
fn test_check_rejects_unknown_vendor() {
    let output = mrv_cmd()
        .args([
            "--host",
            "sw1.example.net",
            "--username",
            "admin",
            "--vendor",
            "juniper",
            "check",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("vendor"),
        "Expected error mentioning vendor:\n{text}"
    );
}

#[test]
fn test_unknown_profile_is_an_error() {
    mrv_cmd()
        .args(["--profile", "nope", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_invalid_output_format() {
    let output = mrv_cmd()
        .args(["--output", "invalid", "check"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_global_flags_parsing() {
    // All flags should parse correctly — the failure should be about
    // missing switch config, not about argument parsing.
    mrv_cmd()
        .args([
            "--output",
            "json",
            "--verbose",
            "--quiet",
            "--timeout",
            "60",
            "check",
        ])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("switch"))
                .or(predicate::str::contains("profile")),
        );
}

// ── Config subcommands ──────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    mrv_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_path_prints_a_path() {
    mrv_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_subcommands_exist() {
    mrv_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("path"))
                .and(predicate::str::contains("set-password")),
        );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_watch_help_mentions_interval() {
    mrv_cmd()
        .args(["watch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("interval"));
}

#[test]
fn test_check_help_mentions_validation() {
    mrv_cmd()
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("validation").or(predicate::str::contains("report")));
}
