// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `gitbell export`.

#![allow(clippy::unwrap_used)]

mod common;
use common::*;

#[test]
fn export_to_stdout_omits_token() {
    let state = TempDir::new().unwrap();
    track(&state, &["octo/demo"]);
    gb(&state)
        .args(["config", "set", "token", "ghp_supersecret"])
        .assert()
        .success();

    let output = gb(&state).arg("export").output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(!text.contains("ghp_supersecret"));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["repositories"][0]["full_name"], "octo/demo");
    assert_eq!(value["stats"]["total_checks"], 0);
    assert!(value["exported_at"].is_string());
}

#[test]
fn export_to_file() {
    let state = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let path = out_dir.path().join("gitbell.json");
    track(&state, &["octo/demo", "octo/other"]);

    gb(&state)
        .arg("export")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 repositories"));

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["repositories"].as_array().unwrap().len(), 2);
}

#[test]
fn export_empty_path_fails() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["export", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("export path cannot be empty"));
}
