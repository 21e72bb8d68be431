// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `gitbell stats`: counters across passes plus the daemon's last quota.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use gb_core::{ResourceStatus, Storage};

use crate::daemon;
use crate::display::{format_rate_limit, time_ago_or};
use crate::error::Result;

use super::open_storage;

pub fn run() -> Result<()> {
    let (storage, dir) = open_storage()?;
    run_impl(&storage, &dir, Utc::now(), &mut std::io::stdout())
}

pub(crate) fn run_impl(
    storage: &Storage,
    state_dir: &Path,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<()> {
    let stats = storage.stats()?;
    let repositories = storage.repositories()?;
    let failing = repositories
        .iter()
        .filter(|r| r.status == ResourceStatus::Error)
        .count();

    writeln!(
        out,
        "Repositories: {} ({} failing)",
        repositories.len(),
        failing
    )?;
    writeln!(out, "Checks: {}", stats.total_checks)?;
    writeln!(out, "Issues found: {}", stats.total_issues_found)?;
    writeln!(
        out,
        "Last check: {}",
        time_ago_or(stats.last_check_time, now, "never")
    )?;

    // A daemon that fails to answer is reported as stopped.
    match daemon::get_daemon_status(state_dir).ok().flatten() {
        Some(status) => {
            writeln!(out, "Daemon: running")?;
            if let Some(limit) = status.rate_limit {
                writeln!(out, "Rate limit: {}", format_rate_limit(&limit))?;
            }
        }
        None => writeln!(out, "Daemon: not running")?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
