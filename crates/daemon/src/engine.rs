// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Polling, diffing and reconciliation.
//!
//! A pass walks every tracked repository in order. For each one it fetches
//! the newest open issues, compares them with the stored watermark, raises
//! alerts for anything above it and records the new watermark. Failures are
//! confined to the repository that produced them.
//!
//! Passes never overlap. [`Engine::run_pass`] waits for an in-flight pass to
//! finish; [`Engine::run_scheduled_pass`] drops the trigger instead.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use gb_core::github::{IssueSource, RateLimit};
use gb_core::{
    Issue, NotificationRecord, ResourceStatus, Result, Storage, TrackedResource,
};

use crate::dispatch::Dispatcher;

/// What happened to one repository during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceOutcome {
    pub full_name: String,
    pub status: ResourceStatus,
    pub new_issues: u64,
    pub watermark: Option<u64>,
    pub error: Option<String>,
}

/// Summary of one completed pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassResult {
    pub new_issues: u64,
    pub outcomes: Vec<ResourceOutcome>,
    pub rate_limit: Option<RateLimit>,
    pub finished_at: DateTime<Utc>,
}

impl PassResult {
    fn empty() -> Self {
        Self {
            new_issues: 0,
            outcomes: Vec::new(),
            rate_limit: None,
            finished_at: Utc::now(),
        }
    }
}

/// Keep real issues only, one per number, oldest first.
fn normalize(issues: Vec<Issue>) -> Vec<Issue> {
    let mut issues: Vec<Issue> = issues.into_iter().filter(|i| !i.is_pull_request).collect();
    issues.sort_by_key(|i| i.number);
    issues.dedup_by_key(|i| i.number);
    issues
}

pub struct Engine {
    storage: Arc<Storage>,
    source: Arc<dyn IssueSource>,
    dispatcher: Arc<Dispatcher>,
    pass_lock: tokio::sync::Mutex<()>,
    last_rate_limit: Mutex<Option<RateLimit>>,
    last_pass_at: Mutex<Option<DateTime<Utc>>>,
}

impl Engine {
    pub fn new(
        storage: Arc<Storage>,
        source: Arc<dyn IssueSource>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            storage,
            source,
            dispatcher,
            pass_lock: tokio::sync::Mutex::new(()),
            last_rate_limit: Mutex::new(None),
            last_pass_at: Mutex::new(None),
        }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Run a pass, waiting for any in-flight pass to finish first.
    pub async fn run_pass(&self) -> Result<PassResult> {
        let _pass = self.pass_lock.lock().await;
        self.execute().await
    }

    /// Run a pass unless one is already in flight.
    pub async fn run_scheduled_pass(&self) -> Result<Option<PassResult>> {
        let Ok(_pass) = self.pass_lock.try_lock() else {
            tracing::debug!("pass already running, skipping scheduled trigger");
            return Ok(None);
        };
        self.execute().await.map(Some)
    }

    pub fn is_running(&self) -> bool {
        self.pass_lock.try_lock().is_err()
    }

    /// Quota reported by the most recent successful fetch.
    pub fn last_rate_limit(&self) -> Option<RateLimit> {
        self.last_rate_limit.lock().ok().and_then(|r| *r)
    }

    pub fn last_pass_at(&self) -> Option<DateTime<Utc>> {
        self.last_pass_at.lock().ok().and_then(|t| *t)
    }

    async fn execute(&self) -> Result<PassResult> {
        let resources = self.storage.repositories()?;
        if resources.is_empty() {
            tracing::debug!("no repositories tracked");
            return Ok(PassResult::empty());
        }
        let settings = self.storage.settings()?;
        let token = settings.token();

        tracing::info!(repositories = resources.len(), "starting pass");
        let mut outcomes = Vec::with_capacity(resources.len());
        let mut rate_limit = None;
        for resource in &resources {
            match self.poll(resource, token).await {
                Polled::Done(outcome, quota) => {
                    rate_limit = Some(quota);
                    outcomes.push(outcome);
                }
                Polled::Failed(outcome) => outcomes.push(outcome),
                Polled::Removed => {
                    tracing::debug!(repo = %resource.full_name, "removed during pass, skipping");
                }
            }
        }

        let new_issues: u64 = outcomes.iter().map(|o| o.new_issues).sum();
        let finished_at = Utc::now();
        self.storage
            .update_stats(|stats| stats.record_pass(new_issues, finished_at))?;

        if let Some(quota) = rate_limit {
            if let Ok(mut last) = self.last_rate_limit.lock() {
                *last = Some(quota);
            }
        }
        if let Ok(mut last) = self.last_pass_at.lock() {
            *last = Some(finished_at);
        }

        let failed = outcomes
            .iter()
            .filter(|o| o.status == ResourceStatus::Error)
            .count();
        tracing::info!(new_issues, failed, "pass complete");

        Ok(PassResult {
            new_issues,
            outcomes,
            rate_limit,
            finished_at,
        })
    }

    async fn poll(&self, resource: &TrackedResource, token: Option<&str>) -> Polled {
        let full_name = resource.full_name.as_str();
        match self.try_poll(resource, token).await {
            Ok(polled) => polled,
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(repo = full_name, "check failed: {message}");
                let now = Utc::now();
                let recorded = self.storage.update_repository(full_name, |r| {
                    r.status = ResourceStatus::Error;
                    r.last_error = Some(message.clone());
                    r.last_checked = Some(now);
                });
                let watermark = match recorded {
                    Ok(Some(r)) => r.last_watermark,
                    Ok(None) => return Polled::Removed,
                    Err(e) => {
                        tracing::warn!(repo = full_name, "failed to record error: {e}");
                        resource.last_watermark
                    }
                };
                Polled::Failed(ResourceOutcome {
                    full_name: full_name.to_string(),
                    status: ResourceStatus::Error,
                    new_issues: 0,
                    watermark,
                    error: Some(message),
                })
            }
        }
    }

    async fn try_poll(&self, resource: &TrackedResource, token: Option<&str>) -> Result<Polled> {
        let full_name = resource.full_name.as_str();
        let Some(current) = self
            .storage
            .update_repository(full_name, |r| r.status = ResourceStatus::Checking)?
        else {
            return Ok(Polled::Removed);
        };

        let page = self.source.fetch_open_issues(&current.id(), token).await?;
        let issues = normalize(page.issues);
        let highest = issues.last().map(|i| i.number);

        let fresh: Vec<Issue> = match current.last_watermark {
            None => Vec::new(),
            Some(watermark) => issues.into_iter().filter(|i| i.number > watermark).collect(),
        };

        // The watermark is persisted before any alert goes out, so a crash
        // between the two can drop alerts but never repeat them.
        let now = Utc::now();
        let Some(updated) = self.storage.update_repository(full_name, |r| {
            r.advance_watermark(highest);
            r.status = ResourceStatus::Active;
            r.last_checked = Some(now);
            r.last_error = None;
        })?
        else {
            return Ok(Polled::Removed);
        };

        if current.needs_baseline() {
            tracing::debug!(repo = full_name, watermark = ?updated.last_watermark, "baseline recorded");
        }

        for issue in &fresh {
            if let Err(e) = self.dispatcher.dispatch(full_name, issue).await {
                tracing::warn!(repo = full_name, issue = issue.number, "alert failed: {e}");
            }
            let record = NotificationRecord::new(full_name, issue, now);
            if let Err(e) = self.storage.add_notification(record) {
                tracing::warn!(repo = full_name, issue = issue.number, "failed to log notification: {e}");
            }
        }
        if !fresh.is_empty() {
            tracing::info!(repo = full_name, new_issues = fresh.len(), "new issues");
        }

        Ok(Polled::Done(
            ResourceOutcome {
                full_name: full_name.to_string(),
                status: ResourceStatus::Active,
                new_issues: fresh.len() as u64,
                watermark: updated.last_watermark,
                error: None,
            },
            page.rate_limit,
        ))
    }
}

enum Polled {
    Done(ResourceOutcome, RateLimit),
    Failed(ResourceOutcome),
    Removed,
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
