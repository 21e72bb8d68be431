// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! IPC client for communicating with gitbelld.

use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

use gb_ipc::{framing, DaemonRequest, DaemonResponse, DaemonStatus};

use crate::error::{Error, Result};

/// Timeout for quick requests (status, interval updates).
const TIMEOUT_SECS: u64 = 5;

/// Timeout for `checkNow`, which waits for a whole pass.
pub const CHECK_TIMEOUT_SECS: u64 = 300;

/// A client connection to the daemon.
pub struct DaemonClient {
    stream: UnixStream,
}

impl DaemonClient {
    /// Connect to the daemon at the given socket path.
    pub fn connect(socket_path: &Path) -> Result<Self> {
        Self::connect_with_timeout(socket_path, Duration::from_secs(TIMEOUT_SECS))
    }

    /// Connect with a custom read/write timeout.
    pub fn connect_with_timeout(socket_path: &Path, timeout: Duration) -> Result<Self> {
        let stream = UnixStream::connect(socket_path)
            .map_err(|e| Error::Daemon(format!("failed to connect to daemon: {}", e)))?;

        stream
            .set_read_timeout(Some(timeout))
            .map_err(|e| Error::Daemon(format!("failed to set read timeout: {}", e)))?;
        stream
            .set_write_timeout(Some(timeout))
            .map_err(|e| Error::Daemon(format!("failed to set write timeout: {}", e)))?;

        Ok(DaemonClient { stream })
    }

    /// Send a request and receive a response.
    pub fn request(&mut self, request: DaemonRequest) -> Result<DaemonResponse> {
        framing::write_message(&mut self.stream, &request)?;
        Ok(framing::read_message(&mut self.stream)?)
    }

    /// Run a pass now; returns the number of new issues it found.
    pub fn check_now(&mut self) -> Result<u64> {
        match self.request(DaemonRequest::CheckNow)? {
            DaemonResponse::CheckResult {
                success: true,
                new_issues,
                ..
            } => Ok(new_issues),
            DaemonResponse::CheckResult { error, .. } => Err(Error::CheckFailed(
                error.unwrap_or_else(|| "unknown error".to_string()),
            )),
            other => Err(unexpected(other)),
        }
    }

    /// Re-arm the daemon's timer with a new period.
    pub fn update_interval(&mut self, minutes: i64) -> Result<()> {
        match self.request(DaemonRequest::UpdateInterval { interval: minutes })? {
            DaemonResponse::IntervalUpdated { success: true, .. } => Ok(()),
            DaemonResponse::IntervalUpdated { error, .. } => Err(Error::Daemon(
                error.unwrap_or_else(|| "interval rejected".to_string()),
            )),
            other => Err(unexpected(other)),
        }
    }

    pub fn status(&mut self) -> Result<DaemonStatus> {
        match self.request(DaemonRequest::Status)? {
            DaemonResponse::Status(status) => Ok(status),
            other => Err(unexpected(other)),
        }
    }

    /// Exchange versions; returns the daemon's.
    pub fn hello(&mut self, version: &str) -> Result<String> {
        match self.request(DaemonRequest::Hello {
            version: version.to_string(),
        })? {
            DaemonResponse::Hello { version } => Ok(version),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(response: DaemonResponse) -> Error {
    match response {
        DaemonResponse::Error { message } => Error::Daemon(message),
        other => Error::Daemon(format!("unexpected response: {:?}", other)),
    }
}
