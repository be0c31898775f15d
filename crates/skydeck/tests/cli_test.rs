//! Integration tests for the `skydeck` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live store.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `skydeck` binary with env isolation.
///
/// Clears all `SKYDECK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn skydeck_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("skydeck");
    cmd.env("HOME", "/tmp/skydeck-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/skydeck-cli-test-nonexistent")
        .env_remove("SKYDECK_PROFILE")
        .env_remove("SKYDECK_STORE")
        .env_remove("SKYDECK_TOKEN")
        .env_remove("SKYDECK_OUTPUT")
        .env_remove("SKYDECK_TIMEOUT")
        .env_remove("SKYDECK_EMAIL")
        .env_remove("SKYDECK_PASSWORD");
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
    let output = skydeck_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    skydeck_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("drone-model content")
            .and(predicate::str::contains("content"))
            .and(predicate::str::contains("drones"))
            .and(predicate::str::contains("login")),
    );
}

#[test]
fn test_version_flag() {
    skydeck_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("skydeck"));
}

#[test]
fn test_content_help_lists_subcommands() {
    skydeck_cmd().args(["content", "--help"]).assert().success().stdout(
        predicate::str::contains("list")
            .and(predicate::str::contains("add"))
            .and(predicate::str::contains("update"))
            .and(predicate::str::contains("delete")),
    );
}

#[test]
fn test_unknown_command_fails() {
    skydeck_cmd()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    skydeck_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Config-less invocation ──────────────────────────────────────────

#[test]
fn test_content_list_without_config_errors() {
    let output = skydeck_cmd()
        .args(["content", "list", "krok"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("config") || text.contains("store"),
        "Expected a config hint in output:\n{text}"
    );
}

#[test]
fn test_config_path_prints_a_path() {
    skydeck_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
