// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote issue source backed by the GitHub REST API.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::env;
use crate::error::FetchError;
use crate::issue::Issue;
use crate::resource::ResourceId;

/// Issues requested per poll. Anything beyond the first page is not seen.
pub const PAGE_SIZE: u32 = 30;

/// Remaining-quota level below which a warning is logged.
pub const LOW_QUOTA_THRESHOLD: u32 = 10;

const ACCEPT_HEADER: &str = "application/vnd.github+json";

/// Quota telemetry reported alongside each response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    pub remaining: Option<u32>,
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimit {
    fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
        };
        let remaining = header("x-ratelimit-remaining").and_then(|v| v.parse().ok());
        let reset_at = header("x-ratelimit-reset")
            .and_then(|v| v.parse::<i64>().ok())
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single());
        RateLimit {
            remaining,
            reset_at,
        }
    }

    pub fn is_low(&self) -> bool {
        self.remaining.is_some_and(|r| r < LOW_QUOTA_THRESHOLD)
    }
}

/// One page of open issues, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuePage {
    pub issues: Vec<Issue>,
    pub rate_limit: RateLimit,
}

/// Outcome of checking a credential against the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialCheck {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Source of open issues for tracked repositories.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetch the newest open issues of `id`.
    async fn fetch_open_issues(
        &self,
        id: &ResourceId,
        token: Option<&str>,
    ) -> Result<IssuePage, FetchError>;

    /// Whether `id` exists and is visible with `token`.
    async fn resource_exists(&self, id: &ResourceId, token: Option<&str>)
        -> Result<bool, FetchError>;

    /// Check `token` by fetching the authenticated user.
    async fn validate_credential(&self, token: &str) -> Result<CredentialCheck, FetchError>;
}

#[derive(Deserialize)]
struct RawIssue {
    number: u64,
    title: String,
    html_url: String,
    #[serde(default)]
    labels: Vec<RawLabel>,
    #[serde(default)]
    pull_request: Option<Value>,
}

#[derive(Deserialize)]
struct RawLabel {
    name: String,
}

#[derive(Deserialize)]
struct RawUser {
    login: String,
    #[serde(default)]
    name: Option<String>,
}

impl From<RawIssue> for Issue {
    fn from(raw: RawIssue) -> Self {
        let labels = raw.labels.into_iter().map(|l| l.name).collect();
        let issue = Issue::new(raw.number, raw.title, raw.html_url, labels);
        if raw.pull_request.is_some() {
            issue.into_pull_request()
        } else {
            issue
        }
    }
}

/// HTTP client for `api.github.com` (or a compatible base URL).
#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubClient {
    /// Client targeting the base URL from the environment.
    pub fn new() -> Self {
        Self::with_base_url(env::api_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, token: Option<&str>) -> Result<reqwest::Response, FetchError> {
        let mut request = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header(ACCEPT, ACCEPT_HEADER)
            .header(USER_AGENT, concat!("gitbell/", env!("CARGO_PKG_VERSION")));
        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        request
            .send()
            .await
            .map_err(|e| FetchError::Transient(e.to_string()))
    }
}

/// Map a non-success status to the fetch error taxonomy.
fn status_error(status: StatusCode) -> FetchError {
    match status {
        StatusCode::NOT_FOUND => FetchError::NotFound,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
        other => FetchError::Transient(format!("unexpected status {other}")),
    }
}

#[async_trait]
impl IssueSource for GitHubClient {
    async fn fetch_open_issues(
        &self,
        id: &ResourceId,
        token: Option<&str>,
    ) -> Result<IssuePage, FetchError> {
        let path = format!(
            "/repos/{}/{}/issues?state=open&sort=created&direction=desc&per_page={PAGE_SIZE}",
            id.owner, id.name
        );
        let response = self.get(&path, token).await?;
        let rate_limit = RateLimit::from_headers(response.headers());

        if let Some(remaining) = rate_limit.remaining {
            tracing::debug!(repo = %id, remaining, "rate limit");
        }
        if rate_limit.is_low() {
            tracing::warn!(
                repo = %id,
                remaining = ?rate_limit.remaining,
                reset_at = ?rate_limit.reset_at,
                "GitHub API quota is running low"
            );
        }

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        let raw: Vec<RawIssue> = response
            .json()
            .await
            .map_err(|e| FetchError::Transient(format!("malformed issue list: {e}")))?;

        Ok(IssuePage {
            issues: raw.into_iter().map(Issue::from).collect(),
            rate_limit,
        })
    }

    async fn resource_exists(
        &self,
        id: &ResourceId,
        token: Option<&str>,
    ) -> Result<bool, FetchError> {
        let response = self
            .get(&format!("/repos/{}/{}", id.owner, id.name), token)
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        match status_error(status) {
            FetchError::NotFound => Ok(false),
            other => Err(other),
        }
    }

    async fn validate_credential(&self, token: &str) -> Result<CredentialCheck, FetchError> {
        let response = self.get("/user", Some(token)).await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(CredentialCheck::default());
        }
        if !status.is_success() {
            return Err(status_error(status));
        }
        let user: RawUser = response
            .json()
            .await
            .map_err(|e| FetchError::Transient(format!("malformed user response: {e}")))?;
        Ok(CredentialCheck {
            valid: true,
            login: Some(user.login),
            name: user.name,
        })
    }
}

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;
