// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Test helpers are shared across spec files; not every file uses every one.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Unreachable API endpoint so no spec ever talks to GitHub.
pub const OFFLINE_API: &str = "http://127.0.0.1:1";

/// A `gitbell` command isolated to `state`.
pub fn gb(state: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("gitbell");
    cmd.env("GITBELL_STATE_DIR", state.path())
        .env("GITBELL_API_URL", OFFLINE_API)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// Track repositories without contacting GitHub.
pub fn track(state: &TempDir, repos: &[&str]) {
    for repo in repos {
        gb(state)
            .args(["add", repo, "--no-verify"])
            .assert()
            .success();
    }
}

/// Run a command and parse its stdout as JSON.
pub fn json(state: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = gb(state).args(args).output().unwrap();
    assert!(output.status.success(), "{:?} failed", args);
    serde_json::from_slice(&output.stdout).unwrap()
}
