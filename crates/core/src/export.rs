// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Portable export of user data.
//!
//! The export carries everything needed to recreate a setup except the
//! credential, which is stripped before serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::history::RunStats;
use crate::resource::TrackedResource;
use crate::settings::Settings;
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub repositories: Vec<TrackedResource>,
    pub settings: Settings,
    pub stats: RunStats,
    pub exported_at: DateTime<Utc>,
}

impl ExportDocument {
    /// Snapshot the current state.
    pub fn build(storage: &Storage, exported_at: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            repositories: storage.repositories()?,
            settings: storage.settings()?.redacted(),
            stats: storage.stats()?,
            exported_at,
        })
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
