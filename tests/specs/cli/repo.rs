// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `gitbell add`, `remove` and `list`.

#![allow(clippy::unwrap_used)]

mod common;
use common::*;

#[test]
fn list_starts_empty() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No repositories monitored."));
}

#[test]
fn add_then_list() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["add", "octo/demo", "--no-verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now monitoring octo/demo"));

    gb(&state)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("octo/demo"))
        .stdout(predicate::str::contains("not checked"));
}

#[test]
fn add_persists_across_invocations() {
    let state = TempDir::new().unwrap();
    track(&state, &["octo/demo", "rust-lang/rust"]);

    let value = json(&state, &["list", "-o", "json"]);
    let names: Vec<&str> = value["repositories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["full_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["octo/demo", "rust-lang/rust"]);
}

#[test]
fn add_duplicate_fails() {
    let state = TempDir::new().unwrap();
    track(&state, &["octo/demo"]);

    gb(&state)
        .args(["add", "octo/demo", "--no-verify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already being monitored"));
}

#[test]
fn add_malformed_name_fails() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["add", "not-a-repo", "--no-verify"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: invalid repository"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn add_verification_failure_does_not_track() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["add", "octo/demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GitHub API request failed"));

    let value = json(&state, &["list", "-o", "json"]);
    assert!(value["repositories"].as_array().unwrap().is_empty());
}

#[test]
fn remove_tracked_repository() {
    let state = TempDir::new().unwrap();
    track(&state, &["octo/demo", "octo/other"]);

    gb(&state)
        .args(["remove", "octo/demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stopped monitoring octo/demo"));

    gb(&state)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("octo/other"))
        .stdout(predicate::str::contains("octo/demo").not());
}

#[test]
fn remove_unknown_fails() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["rm", "octo/demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not tracked"));
}

#[test]
fn reset_forgets_repositories() {
    let state = TempDir::new().unwrap();
    track(&state, &["octo/demo"]);

    gb(&state)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 repositories"));

    gb(&state)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No repositories monitored."));
}
