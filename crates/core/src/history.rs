// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Notification log and run statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::issue::{labels_are_approachable, Issue};

/// Number of notification records retained, newest first.
pub const HISTORY_LIMIT: usize = 100;

/// One raised notification, as recorded in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// `full_name` of the repository the issue belongs to.
    pub resource: String,
    pub issue_number: u64,
    pub issue_title: String,
    pub issue_url: String,
    #[serde(default)]
    pub labels: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl NotificationRecord {
    pub fn new(resource: &str, issue: &Issue, timestamp: DateTime<Utc>) -> Self {
        Self {
            resource: resource.to_string(),
            issue_number: issue.number,
            issue_title: issue.title.clone(),
            issue_url: issue.url.clone(),
            labels: issue.labels.clone(),
            timestamp,
        }
    }

    pub fn is_approachable(&self) -> bool {
        labels_are_approachable(&self.labels)
    }
}

/// Prepend `record` to `history`, keeping at most [`HISTORY_LIMIT`] entries.
pub fn push_newest(history: &mut Vec<NotificationRecord>, record: NotificationRecord) {
    history.insert(0, record);
    history.truncate(HISTORY_LIMIT);
}

/// Aggregate counters across passes.
///
/// Counters only grow; they return to zero solely through an explicit reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    #[serde(default)]
    pub total_issues_found: u64,
    #[serde(default)]
    pub total_checks: u64,
    #[serde(default)]
    pub last_check_time: Option<DateTime<Utc>>,
}

impl RunStats {
    /// Fold one completed pass into the counters.
    pub fn record_pass(&mut self, new_issues: u64, at: DateTime<Utc>) {
        self.total_issues_found = self.total_issues_found.saturating_add(new_issues);
        self.total_checks = self.total_checks.saturating_add(1);
        self.last_check_time = Some(at);
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
