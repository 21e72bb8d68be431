// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `gitbell check`: ask the daemon for an immediate pass.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::daemon::{self, DaemonClient, CHECK_TIMEOUT_SECS};
use crate::error::{Error, Result};

use super::state_dir;

pub fn run() -> Result<()> {
    run_impl(&state_dir()?, &mut std::io::stdout())
}

pub(crate) fn run_impl(state_dir: &Path, out: &mut impl Write) -> Result<()> {
    if daemon::detect_daemon(state_dir)?.is_none() {
        return Err(Error::DaemonNotRunning);
    }

    let mut client = DaemonClient::connect_with_timeout(
        &daemon::get_socket_path(state_dir),
        Duration::from_secs(CHECK_TIMEOUT_SECS),
    )?;
    let new_issues = client.check_now()?;
    match new_issues {
        0 => writeln!(out, "No new issues.")?,
        1 => writeln!(out, "1 new issue.")?,
        n => writeln!(out, "{n} new issues.")?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
