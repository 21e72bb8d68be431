// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon management commands.

use std::io::Write;
use std::path::Path;

use chrono::Utc;

use crate::daemon::{self, CLI_VERSION};
use crate::display::{format_rate_limit, format_uptime, time_ago_or};
use crate::error::{Error, Result};

use super::state_dir;

/// Show daemon status.
pub fn status() -> Result<()> {
    status_impl(&state_dir()?, &mut std::io::stdout())
}

pub(crate) fn status_impl(state_dir: &Path, out: &mut impl Write) -> Result<()> {
    let status = match daemon::get_daemon_status(state_dir) {
        Ok(Some(status)) => status,
        Ok(None) => {
            writeln!(out, "Status: not running")?;
            return Ok(());
        }
        Err(e) => {
            writeln!(out, "Status: error ({})", e)?;
            return Ok(());
        }
    };

    writeln!(out, "Status: running")?;
    writeln!(out, "PID: {}", status.pid)?;
    writeln!(out, "Uptime: {}", format_uptime(status.uptime_secs))?;
    match status.interval_minutes {
        Some(minutes) => writeln!(out, "Interval: every {minutes} minute(s)")?,
        None => writeln!(out, "Interval: not scheduled")?,
    }
    writeln!(
        out,
        "Last pass: {}{}",
        time_ago_or(status.last_pass_at, Utc::now(), "none yet"),
        if status.pass_running { " (pass running)" } else { "" }
    )?;
    if let Some(limit) = status.rate_limit {
        writeln!(out, "Rate limit: {}", format_rate_limit(&limit))?;
    }
    if let Ok(version) = daemon::get_daemon_version(state_dir) {
        if version != CLI_VERSION {
            writeln!(
                out,
                "warning: daemon is v{version}, CLI is v{CLI_VERSION}\n  hint: restart it with 'gitbell daemon stop && gitbell daemon start'"
            )?;
        }
    }
    Ok(())
}

/// Stop the daemon.
pub fn stop() -> Result<()> {
    stop_impl(&state_dir()?, &mut std::io::stdout())
}

pub(crate) fn stop_impl(state_dir: &Path, out: &mut impl Write) -> Result<()> {
    if daemon::detect_daemon(state_dir)?.is_none() {
        writeln!(out, "Daemon is not running.")?;
        return Ok(());
    }

    match daemon::stop_daemon_forcefully(state_dir) {
        Ok(()) => writeln!(out, "Daemon stopped.")?,
        Err(e) => writeln!(out, "Failed to stop daemon: {}", e)?,
    }
    Ok(())
}

/// Start the daemon.
pub fn start() -> Result<()> {
    let dir = state_dir()?;
    let mut out = std::io::stdout();

    match daemon::detect_daemon(&dir)? {
        Some(info) => writeln!(out, "Daemon is already running (PID: {})", info.pid)?,
        None => match daemon::spawn_daemon(&dir) {
            Ok(info) => writeln!(out, "Daemon started (PID: {})", info.pid)?,
            Err(e) => return Err(Error::Daemon(format!("failed to start daemon: {}", e))),
        },
    }
    Ok(())
}

/// View daemon logs.
pub fn logs(follow: bool) -> Result<()> {
    let log_path = daemon::get_log_path(&state_dir()?);

    if !log_path.exists() {
        println!("No daemon logs found at {}", log_path.display());
        return Ok(());
    }

    if follow {
        let status = std::process::Command::new("tail")
            .arg("-f")
            .arg(&log_path)
            .status()?;

        if !status.success() {
            return Err(Error::Io(std::io::Error::other("tail command failed")));
        }
    } else {
        let content = std::fs::read_to_string(&log_path)?;
        print!("{}", content);
    }

    Ok(())
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;
