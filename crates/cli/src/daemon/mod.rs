// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Talking to the gitbelld daemon.
//!
//! The CLI reads and writes the state store directly. Only requests that
//! need the running scheduler (`checkNow`, `updateInterval`, status and
//! shutdown) go over the daemon's Unix socket.

mod client;
mod lifecycle;

pub use client::{DaemonClient, CHECK_TIMEOUT_SECS};
pub use lifecycle::{
    detect_daemon, get_daemon_status, get_daemon_version, get_log_path, get_socket_path,
    spawn_daemon, stop_daemon_forcefully, CLI_VERSION,
};
