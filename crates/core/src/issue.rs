// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issues as fetched from the remote source.
//!
//! Issues are transient snapshots: they are never persisted individually,
//! only summarized into [`NotificationRecord`](crate::history::NotificationRecord)s.

use serde::{Deserialize, Serialize};

/// Label fragments that mark an issue as suitable for newcomers.
pub const APPROACHABLE_MARKERS: &[&str] =
    &["good first issue", "beginner-friendly", "easy", "help wanted"];

/// Returns true if any label case-insensitively contains an approachable marker.
pub fn labels_are_approachable<S: AsRef<str>>(labels: &[S]) -> bool {
    labels.iter().any(|label| {
        let label = label.as_ref().to_lowercase();
        APPROACHABLE_MARKERS
            .iter()
            .any(|marker| label.contains(marker))
    })
}

/// An open issue in a tracked repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Monotonic per repository, not globally unique.
    pub number: u64,
    pub title: String,
    pub url: String,
    pub labels: Vec<String>,
    /// The issues endpoint also returns pull requests; they carry this flag
    /// and are never counted or notified.
    #[serde(default)]
    pub is_pull_request: bool,
}

impl Issue {
    /// Create an issue, deduplicating labels while preserving their order.
    pub fn new(
        number: u64,
        title: impl Into<String>,
        url: impl Into<String>,
        labels: Vec<String>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(labels.len());
        for label in labels {
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        Self {
            number,
            title: title.into(),
            url: url.into(),
            labels: unique,
            is_pull_request: false,
        }
    }

    /// Mark this entry as a pull request.
    pub fn into_pull_request(mut self) -> Self {
        self.is_pull_request = true;
        self
    }

    pub fn is_approachable(&self) -> bool {
        labels_are_approachable(&self.labels)
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
