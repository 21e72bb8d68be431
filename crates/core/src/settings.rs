// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User settings stored in the synced partition.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default minutes between scheduled passes.
pub const DEFAULT_CHECK_INTERVAL_MINUTES: u32 = 10;

/// User-editable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_check_interval_minutes")]
    pub check_interval_minutes: u32,
    /// GitHub token sent as a bearer credential when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_check_interval_minutes() -> u32 {
    DEFAULT_CHECK_INTERVAL_MINUTES
}

fn default_true() -> bool {
    true
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            check_interval_minutes: default_check_interval_minutes(),
            credential: None,
            notifications_enabled: true,
            sound_enabled: true,
            theme: default_theme(),
        }
    }
}

impl Settings {
    /// The credential, ignoring blank strings.
    pub fn token(&self) -> Option<&str> {
        self.credential
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// A copy safe to export: the credential is removed.
    pub fn redacted(&self) -> Settings {
        Settings {
            credential: None,
            ..self.clone()
        }
    }
}

/// Validate a check interval in minutes.
pub fn validate_interval(minutes: i64) -> Result<u32> {
    if minutes < 1 {
        return Err(Error::InvalidInterval(minutes));
    }
    u32::try_from(minutes).map_err(|_| Error::InvalidInterval(minutes))
}

/// Parse a boolean setting value as typed on the command line.
pub fn parse_switch(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(Error::InvalidInput(format!(
            "invalid switch value '{value}'\n  hint: use on or off"
        ))),
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
