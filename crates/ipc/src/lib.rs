// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared IPC protocol for CLI-daemon communication.
//!
//! This crate defines the message types and framing protocol used between
//! the `gitbell` CLI and the `gitbelld` daemon. Messages are serialized as
//! JSON with length-prefixed framing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use gb_core::RateLimit;

// ============================================================================
// Protocol types
// ============================================================================

/// Request sent from CLI to daemon.
///
/// Requests are tagged by `action`, e.g. `{"action":"checkNow"}` or
/// `{"action":"updateInterval","interval":15}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum DaemonRequest {
    /// Run a pass now and report how many new issues it found.
    CheckNow,
    /// Replace the scheduling period. Validated by the daemon.
    UpdateInterval { interval: i64 },
    /// Get daemon status.
    Status,
    /// Graceful shutdown.
    Shutdown,
    /// Ping to check if daemon is alive.
    Ping,
    /// Version handshake request.
    Hello { version: String },
}

/// Response sent from daemon to CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DaemonResponse {
    /// Outcome of a `checkNow` request.
    CheckResult {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        #[serde(rename = "newIssues", default)]
        new_issues: u64,
    },
    /// Outcome of an `updateInterval` request.
    IntervalUpdated {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// Status response.
    Status(DaemonStatus),
    /// Shutdown acknowledged.
    ShuttingDown,
    /// Pong response.
    Pong,
    /// Version handshake response.
    Hello { version: String },
    /// Error response.
    Error { message: String },
}

impl DaemonResponse {
    pub fn check_ok(new_issues: u64) -> Self {
        DaemonResponse::CheckResult {
            success: true,
            error: None,
            new_issues,
        }
    }

    pub fn check_failed(error: impl Into<String>) -> Self {
        DaemonResponse::CheckResult {
            success: false,
            error: Some(error.into()),
            new_issues: 0,
        }
    }

    pub fn interval_ok() -> Self {
        DaemonResponse::IntervalUpdated {
            success: true,
            error: None,
        }
    }

    pub fn interval_failed(error: impl Into<String>) -> Self {
        DaemonResponse::IntervalUpdated {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Daemon status information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaemonStatus {
    /// Current daemon PID.
    pub pid: u32,
    /// Uptime in seconds.
    pub uptime_secs: u64,
    /// Active scheduling period, if the timer is running.
    #[serde(default)]
    pub interval_minutes: Option<u32>,
    /// Whether a pass is in flight.
    #[serde(default)]
    pub pass_running: bool,
    /// Quota reported by the most recent remote response.
    #[serde(default)]
    pub rate_limit: Option<RateLimit>,
    /// When the most recent pass finished.
    #[serde(default)]
    pub last_pass_at: Option<DateTime<Utc>>,
}

impl DaemonStatus {
    /// Create a new status with the given parameters.
    pub fn new(pid: u32, uptime_secs: u64) -> Self {
        Self {
            pid,
            uptime_secs,
            interval_minutes: None,
            pass_running: false,
            rate_limit: None,
            last_pass_at: None,
        }
    }
}

// ============================================================================
// Message framing
// ============================================================================

/// Maximum message size (1MB) to prevent malformed messages from causing hangs.
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

fn encode<T: Serialize>(message: &T) -> std::io::Result<(u32, Vec<u8>)> {
    let json = serde_json::to_vec(message)
        .map_err(|e| std::io::Error::other(format!("serialize error: {}", e)))?;
    if json.len() > MAX_MESSAGE_SIZE {
        return Err(std::io::Error::other("message too large"));
    }
    let len = u32::try_from(json.len()).map_err(|_| std::io::Error::other("message too large"))?;
    Ok((len, json))
}

fn checked_len(len_buf: [u8; 4]) -> std::io::Result<usize> {
    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_MESSAGE_SIZE {
        return Err(std::io::Error::other(format!(
            "message too large: {} bytes (max {})",
            len, MAX_MESSAGE_SIZE
        )));
    }
    Ok(len)
}

fn decode<T: serde::de::DeserializeOwned>(buf: &[u8]) -> std::io::Result<T> {
    serde_json::from_slice(buf)
        .map_err(|e| std::io::Error::other(format!("deserialize error: {}", e)))
}

/// IPC message framing.
///
/// Messages are framed as:
/// - 4 bytes: message length (big-endian u32)
/// - N bytes: JSON-encoded message
pub mod framing {
    use std::io::{Read, Write};

    use serde::de::DeserializeOwned;
    use serde::Serialize;

    /// Write a serializable message to the given writer.
    pub fn write_message<W: Write, T: Serialize>(
        writer: &mut W,
        message: &T,
    ) -> std::io::Result<()> {
        let (len, json) = super::encode(message)?;
        writer.write_all(&len.to_be_bytes())?;
        writer.write_all(&json)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a deserializable message from the given reader.
    pub fn read_message<R: Read, T: DeserializeOwned>(reader: &mut R) -> std::io::Result<T> {
        let mut len_buf = [0u8; 4];
        reader.read_exact(&mut len_buf)?;
        let len = super::checked_len(len_buf)?;

        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf)?;
        super::decode(&buf)
    }
}

/// The same framing over tokio streams, for the daemon's async server.
#[cfg(feature = "tokio")]
pub mod async_framing {
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

    pub async fn write_message<W, T>(writer: &mut W, message: &T) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
        T: Serialize,
    {
        let (len, json) = super::encode(message)?;
        writer.write_all(&len.to_be_bytes()).await?;
        writer.write_all(&json).await?;
        writer.flush().await?;
        Ok(())
    }

    pub async fn read_message<R, T>(reader: &mut R) -> std::io::Result<T>
    where
        R: AsyncRead + Unpin,
        T: DeserializeOwned,
    {
        let mut len_buf = [0u8; 4];
        reader.read_exact(&mut len_buf).await?;
        let len = super::checked_len(len_buf)?;

        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf).await?;
        super::decode(&buf)
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
