// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: spawn, detect, cleanup.
//!
//! gitbelld is spawned as a background process and talks to the CLI over a
//! Unix socket. Socket, PID and log files live in the state directory
//! (`~/.local/state/gitbell/` by default).

use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use gb_core::env;
use gb_ipc::{DaemonRequest, DaemonResponse, DaemonStatus};

use crate::error::{Error, Result};

use super::client::DaemonClient;

/// Socket filename within the state directory.
const SOCKET_NAME: &str = "daemon.sock";
/// PID filename within the state directory.
const PID_NAME: &str = "daemon.pid";
/// Log filename within the state directory.
const LOG_NAME: &str = "daemon.log";
/// Daemon executable name.
const DAEMON_BINARY: &str = "gitbelld";

/// CLI version, compared against the daemon's during status reports.
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Information about a running daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonInfo {
    /// Process ID of the daemon.
    pub pid: u32,
}

/// Get the socket path for the given state directory.
pub fn get_socket_path(state_dir: &Path) -> PathBuf {
    state_dir.join(SOCKET_NAME)
}

/// Get the PID file path for the given state directory.
pub fn get_pid_path(state_dir: &Path) -> PathBuf {
    state_dir.join(PID_NAME)
}

/// Get the log file path for the given state directory.
pub fn get_log_path(state_dir: &Path) -> PathBuf {
    state_dir.join(LOG_NAME)
}

/// Detect if a daemon is running for the given state directory.
///
/// Returns Some(DaemonInfo) if a daemon answers a ping, None otherwise.
/// Cleans up stale PID/socket files if found.
pub fn detect_daemon(state_dir: &Path) -> Result<Option<DaemonInfo>> {
    let socket_path = get_socket_path(state_dir);
    let pid_path = get_pid_path(state_dir);

    if !socket_path.exists() {
        if pid_path.exists() {
            let _ = fs::remove_file(&pid_path);
        }
        return Ok(None);
    }

    let Ok(mut client) = DaemonClient::connect_with_timeout(&socket_path, Duration::from_secs(2))
    else {
        cleanup_stale_files(state_dir);
        return Ok(None);
    };

    match client.request(DaemonRequest::Ping) {
        // PID file missing means the daemon is still starting up.
        Ok(DaemonResponse::Pong) => Ok(read_pid_file(&pid_path)
            .filter(|pid| *pid > 0)
            .map(|pid| DaemonInfo { pid })),
        _ => {
            cleanup_stale_files(state_dir);
            Ok(None)
        }
    }
}

/// Get daemon status by connecting to the daemon.
pub fn get_daemon_status(state_dir: &Path) -> Result<Option<DaemonStatus>> {
    let socket_path = get_socket_path(state_dir);
    if !socket_path.exists() {
        return Ok(None);
    }

    match DaemonClient::connect(&socket_path) {
        Ok(mut client) => client.status().map(Some),
        Err(e) => {
            cleanup_stale_files(state_dir);
            Err(e)
        }
    }
}

/// Ask a running daemon for its version.
pub fn get_daemon_version(state_dir: &Path) -> Result<String> {
    let mut client = DaemonClient::connect(&get_socket_path(state_dir))?;
    client.hello(CLI_VERSION)
}

/// Send a shutdown request to the daemon.
pub(crate) fn stop_daemon(state_dir: &Path) -> Result<()> {
    let socket_path = get_socket_path(state_dir);
    if !socket_path.exists() {
        return Err(Error::DaemonNotRunning);
    }

    let mut client = DaemonClient::connect_with_timeout(&socket_path, Duration::from_secs(2))?;
    match client.request(DaemonRequest::Shutdown)? {
        DaemonResponse::ShuttingDown => Ok(()),
        DaemonResponse::Error { message } => Err(Error::Daemon(message)),
        other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
    }
}

/// Find the gitbelld binary.
///
/// Order: `GITBELL_DAEMON_BINARY`, next to the current executable, then PATH.
fn find_daemon_binary() -> PathBuf {
    if let Some(path) = env::daemon_binary() {
        return path;
    }

    if let Ok(exe) = std::env::current_exe() {
        let sibling = exe.with_file_name(DAEMON_BINARY);
        if sibling.exists() {
            return sibling;
        }
    }

    PathBuf::from(DAEMON_BINARY)
}

/// Spawn a new daemon process for the given state directory.
///
/// The daemon holds an exclusive lock on `daemon.lock`, so a racing second
/// spawn exits early and this call reports whichever daemon answers.
pub fn spawn_daemon(state_dir: &Path) -> Result<DaemonInfo> {
    if let Some(info) = detect_daemon(state_dir)? {
        return Ok(info);
    }

    fs::create_dir_all(state_dir)?;
    let binary = find_daemon_binary();

    let mut child = Command::new(&binary)
        .arg("--state-dir")
        .arg(state_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            Error::Daemon(format!(
                "failed to start {} ({}): {}",
                DAEMON_BINARY,
                binary.display(),
                e
            ))
        })?;

    // The daemon prints READY once its socket is bound.
    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines() {
            match line {
                Ok(line) if line == "READY" => break,
                Ok(_) => continue,
                Err(_) => break,
            }
        }
    }

    for _ in 0..150 {
        if let Ok(Some(status)) = child.try_wait() {
            let mut stderr_output = String::new();
            if let Some(mut stderr) = child.stderr.take() {
                let _ = stderr.read_to_string(&mut stderr_output);
            }
            return Err(Error::Daemon(format!(
                "daemon process exited with status: {}\n{}",
                status,
                stderr_output.trim()
            )));
        }

        if let Some(info) = detect_daemon(state_dir)? {
            return Ok(info);
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    Err(Error::Daemon(
        "daemon failed to start: could not connect after multiple attempts".to_string(),
    ))
}

/// Clean up stale socket and PID files.
fn cleanup_stale_files(state_dir: &Path) {
    let _ = fs::remove_file(get_socket_path(state_dir));
    let _ = fs::remove_file(get_pid_path(state_dir));
}

/// Read PID from the PID file.
fn read_pid_file(pid_path: &Path) -> Option<u32> {
    fs::read_to_string(pid_path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

/// Stop the daemon, falling back to SIGKILL if graceful shutdown fails.
pub fn stop_daemon_forcefully(state_dir: &Path) -> Result<()> {
    let pid = read_pid_file(&get_pid_path(state_dir));

    if stop_daemon(state_dir).is_ok() {
        if let Some(pid) = pid {
            wait_for_process_exit(pid, Duration::from_secs(1));
        }
        cleanup_stale_files(state_dir);
        return Ok(());
    }

    if let Some(pid) = pid {
        tracing::debug!(pid, "graceful shutdown failed, sending SIGKILL");
        let _ = Command::new("kill").arg("-9").arg(pid.to_string()).output();
        std::thread::sleep(Duration::from_millis(100));
    }

    cleanup_stale_files(state_dir);
    Ok(())
}

/// Wait for a process to exit, with timeout.
fn wait_for_process_exit(pid: u32, timeout: Duration) {
    let start = std::time::Instant::now();

    while start.elapsed() < timeout {
        match Command::new("kill").arg("-0").arg(pid.to_string()).output() {
            Ok(output) if !output.status.success() => return,
            Err(_) => return,
            _ => {}
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}
