// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`names`] submodule. Both the daemon and the CLI resolve the state
//! directory through [`resolve_state_dir`] so they always agree on where the
//! socket and database live.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Returns the value of `GITBELL_STATE_DIR` if set.
pub fn state_dir() -> Option<PathBuf> {
    std::env::var(names::GITBELL_STATE_DIR).ok().map(PathBuf::from)
}

/// Returns the value of `XDG_STATE_HOME` if set.
pub fn xdg_state_home() -> Option<PathBuf> {
    std::env::var(names::XDG_STATE_HOME).ok().map(PathBuf::from)
}

/// Returns the GitHub API base URL, honoring `GITBELL_API_URL`.
pub fn api_url() -> String {
    std::env::var(names::GITBELL_API_URL)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Returns the value of `GITBELL_DAEMON_BINARY` if set.
pub fn daemon_binary() -> Option<PathBuf> {
    std::env::var(names::GITBELL_DAEMON_BINARY)
        .ok()
        .map(PathBuf::from)
}

/// Resolve the state directory.
///
/// Order: `GITBELL_STATE_DIR`, `$XDG_STATE_HOME/gitbell`,
/// `~/.local/state/gitbell`, then a relative fallback.
pub fn resolve_state_dir() -> PathBuf {
    if let Some(dir) = state_dir() {
        return dir;
    }
    if let Some(dir) = xdg_state_home() {
        return dir.join("gitbell");
    }
    dirs::home_dir()
        .map(|h| h.join(".local/state/gitbell"))
        .unwrap_or_else(|| PathBuf::from(".local/state/gitbell"))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
