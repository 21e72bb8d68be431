// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for daemon-facing commands when no daemon is running.

#![allow(clippy::unwrap_used)]

mod common;
use common::*;

#[test]
fn status_reports_not_running() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["daemon", "status"])
        .assert()
        .success()
        .stdout("Status: not running\n");
}

#[test]
fn stop_when_not_running() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["daemon", "stop"])
        .assert()
        .success()
        .stdout("Daemon is not running.\n");
}

#[test]
fn check_needs_the_daemon() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("daemon is not running"))
        .stderr(predicate::str::contains("gitbell daemon start"));
}

#[test]
fn logs_without_log_file() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["daemon", "logs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No daemon logs found"));
}

#[test]
fn stale_socket_is_cleaned_up() {
    let state = TempDir::new().unwrap();
    std::fs::write(state.path().join("daemon.sock"), "stale").unwrap();
    std::fs::write(state.path().join("daemon.pid"), "12345").unwrap();

    gb(&state).args(["daemon", "stop"]).assert().success();
    assert!(!state.path().join("daemon.sock").exists());
    assert!(!state.path().join("daemon.pid").exists());
}

#[test]
fn start_with_missing_binary_fails() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .env("GITBELL_DAEMON_BINARY", state.path().join("no-such-gitbelld"))
        .args(["daemon", "start"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to start daemon"));
}
