// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `gitbell config` and `gitbell token`.

#![allow(clippy::unwrap_used)]

mod common;
use common::*;

#[test]
fn show_defaults() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("interval = 10"))
        .stdout(predicate::str::contains("token = (not set)"))
        .stdout(predicate::str::contains("theme = dark"));
}

#[test]
fn set_values_persist() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["config", "set", "interval", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking every 20 minute(s)."))
        .stdout(predicate::str::contains("when it next starts"));
    gb(&state)
        .args(["config", "set", "sound", "off"])
        .assert()
        .success();

    gb(&state)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("interval = 20"))
        .stdout(predicate::str::contains("sound = off"));
}

#[test]
fn invalid_interval_is_rejected() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["config", "set", "interval", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid check interval"));
}

#[test]
fn unknown_key_is_a_usage_error() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["config", "set", "volume", "11"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn token_is_masked_and_removable() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["config", "set", "token", "ghp_abcdefghijkl9876"])
        .assert()
        .success()
        .stdout(predicate::str::contains("****9876"));

    gb(&state)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("token = ****9876"))
        .stdout(predicate::str::contains("ghp_").not());

    gb(&state)
        .args(["config", "unset", "token"])
        .assert()
        .success()
        .stdout("Token removed.\n");
}

#[test]
fn token_validate_without_token() {
    let state = TempDir::new().unwrap();
    gb(&state)
        .args(["token", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no token configured"));
}
