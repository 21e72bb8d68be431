// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `gitbell history` and `gitbell stats`.

#![allow(clippy::unwrap_used)]

mod common;
use common::*;

#[test]
fn history_starts_empty() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .arg("history")
        .assert()
        .success()
        .stdout("No notifications yet.\n");
}

#[test]
fn history_json_is_an_empty_list() {
    let state = TempDir::new().unwrap();
    let value = json(&state, &["history", "-o", "json", "-n", "5"]);
    assert_eq!(value["notifications"], serde_json::json!([]));
}

#[test]
fn history_clear_succeeds() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["history", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared"));
}

#[test]
fn stats_on_fresh_state() {
    let state = TempDir::new().unwrap();
    track(&state, &["octo/demo"]);
    gb(&state)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Repositories: 1 (0 failing)"))
        .stdout(predicate::str::contains("Checks: 0"))
        .stdout(predicate::str::contains("Last check: never"))
        .stdout(predicate::str::contains("Daemon: not running"));
}
