// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for gb-core operations.

use thiserror::Error;

/// Failure talking to the remote issue source.
///
/// The variants decide how the engine reports a resource: all of them mark
/// the resource as errored for the current pass, and none are retried until
/// the next scheduled pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("repository not found")]
    NotFound,

    #[error("GitHub API rate limit exceeded\n  hint: add or rotate a token with 'gitbell config set token <TOKEN>'")]
    RateLimited,

    #[error("GitHub API request failed: {0}")]
    Transient(String),
}

/// All possible errors that can occur in gb-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid repository '{0}'\n  hint: use the form owner/name")]
    InvalidResource(String),

    #[error("repository already being monitored: {0}")]
    DuplicateResource(String),

    #[error("repository not tracked: {0}")]
    ResourceNotTracked(String),

    #[error("invalid check interval: {0}\n  hint: the interval is a whole number of minutes, at least 1")]
    InvalidInterval(i64),

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("state store error: {0}")]
    Store(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for gb-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
