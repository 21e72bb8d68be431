// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use chrono::TimeZone;

use super::*;
use crate::test_support::{Output, TestContext};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap()
}

fn populated() -> TestContext {
    let ctx = TestContext::new();
    ctx.track("octo/demo").track("rust-lang/rust");
    ctx.storage
        .update_settings(|s| s.credential = Some("ghp_topsecret".to_string()))
        .unwrap();
    ctx.storage
        .update_stats(|s| s.record_pass(4, fixed_now()))
        .unwrap();
    ctx
}

#[test]
fn export_to_stdout() {
    let ctx = populated();
    let mut out = Output::default();
    run_impl(&ctx.storage, None, fixed_now(), &mut out).unwrap();

    let text = out.text();
    assert!(!text.contains("ghp_topsecret"));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["repositories"].as_array().unwrap().len(), 2);
    assert_eq!(value["stats"]["total_issues_found"], 4);
    assert_eq!(value["settings"]["check_interval_minutes"], 10);
    assert!(value["settings"].get("credential").is_none());
}

#[test]
fn export_to_file() {
    let ctx = populated();
    let path = ctx.state_dir.join("backup.json");

    let mut out = Output::default();
    run_impl(&ctx.storage, Some(&path), fixed_now(), &mut out).unwrap();
    assert_eq!(
        out.text(),
        format!("Exported 2 repositories to {}\n", path.display())
    );

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(!written.contains("ghp_topsecret"));
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["repositories"][0]["full_name"], "octo/demo");
}

#[test]
fn export_into_missing_directory_fails() {
    let ctx = populated();
    let path = ctx.state_dir.join("missing").join("backup.json");
    let err = run_impl(&ctx.storage, Some(&path), fixed_now(), &mut Output::default());
    assert!(matches!(err, Err(Error::Io(_))));
}

#[test]
fn empty_path_is_rejected() {
    assert!(matches!(run(Some("  ")), Err(Error::ExportPathEmpty)));
}
