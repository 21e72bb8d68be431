// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracked repositories and their polling state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Identifies a remote repository as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    pub owner: String,
    pub name: String,
}

impl ResourceId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// The unique `owner/name` key.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for ResourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut parts = trimmed.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None)
                if !owner.trim().is_empty() && !name.trim().is_empty() =>
            {
                Ok(ResourceId::new(owner.trim(), name.trim()))
            }
            _ => Err(Error::InvalidResource(s.to_string())),
        }
    }
}

/// Polling status of a tracked repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    /// Last poll succeeded (or no poll has run yet).
    #[default]
    Active,
    /// A poll is in flight.
    Checking,
    /// Last poll failed; see `last_error`.
    Error,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Active => "active",
            ResourceStatus::Checking => "checking",
            ResourceStatus::Error => "error",
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A repository being monitored for new issues.
///
/// `last_watermark` is the highest issue number already accounted for. It is
/// `None` until the first successful (baseline) poll, and never decreases
/// once set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedResource {
    pub owner: String,
    pub name: String,
    pub full_name: String,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub last_checked: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_watermark: Option<u64>,
    #[serde(default)]
    pub status: ResourceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl TrackedResource {
    /// Create a freshly added resource with no baseline.
    pub fn new(id: &ResourceId, added_at: DateTime<Utc>) -> Self {
        Self {
            owner: id.owner.clone(),
            name: id.name.clone(),
            full_name: id.full_name(),
            added_at,
            last_checked: None,
            last_watermark: None,
            status: ResourceStatus::Active,
            last_error: None,
        }
    }

    pub fn id(&self) -> ResourceId {
        ResourceId::new(self.owner.clone(), self.name.clone())
    }

    /// True until a baseline poll has recorded a watermark.
    pub fn needs_baseline(&self) -> bool {
        self.last_watermark.is_none()
    }

    /// Raise the watermark to `candidate` if it is higher.
    pub fn advance_watermark(&mut self, candidate: Option<u64>) {
        self.last_watermark = match (self.last_watermark, candidate) {
            (Some(current), Some(new)) => Some(current.max(new)),
            (current, new) => current.or(new),
        };
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
