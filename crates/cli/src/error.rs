// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use gb_core::FetchError;
use thiserror::Error;

/// All possible errors that can occur in the gbrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid repository '{0}'\n  hint: use the form owner/name, e.g. rust-lang/rust")]
    InvalidRepository(String),

    #[error("repository already being monitored: {0}")]
    AlreadyTracked(String),

    #[error("repository not tracked: {0}\n  hint: run 'gitbell list' to see monitored repositories")]
    NotTracked(String),

    #[error("repository not found on GitHub: {0}\n  hint: check the spelling, or use --no-verify for private repositories without a token")]
    RepositoryNotFound(String),

    #[error("invalid check interval: {0}\n  hint: the interval is a whole number of minutes, at least 1")]
    InvalidInterval(String),

    #[error("invalid theme '{0}'\n  hint: valid themes are: light, dark")]
    InvalidTheme(String),

    #[error("no token configured\n  hint: run 'gitbell config set token <TOKEN>' or pass one to 'gitbell token validate'")]
    NoToken,

    #[error("token rejected by GitHub\n  hint: create a new token at https://github.com/settings/tokens")]
    InvalidToken,

    #[error(transparent)]
    Remote(#[from] FetchError),

    #[error("daemon is not running\n  hint: start it with 'gitbell daemon start'")]
    DaemonNotRunning,

    #[error("check failed: {0}")]
    CheckFailed(String),

    #[error("export path cannot be empty")]
    ExportPathEmpty,

    #[error("{0}")]
    InvalidInput(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("state store error: {0}")]
    Store(String),

    #[error("corrupted data in state store: {0}")]
    CorruptedData(String),

    #[error("daemon error: {0}")]
    Daemon(String),
}

/// A specialized Result type for gbrs operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<gb_core::Error> for Error {
    fn from(e: gb_core::Error) -> Self {
        match e {
            gb_core::Error::InvalidResource(s) => Error::InvalidRepository(s),
            gb_core::Error::DuplicateResource(s) => Error::AlreadyTracked(s),
            gb_core::Error::ResourceNotTracked(s) => Error::NotTracked(s),
            gb_core::Error::InvalidInterval(n) => Error::InvalidInterval(n.to_string()),
            gb_core::Error::InvalidInput(s) => Error::InvalidInput(s),
            gb_core::Error::Fetch(e) => Error::Remote(e),
            gb_core::Error::Store(s) => Error::Store(s),
            gb_core::Error::Database(e) => Error::Store(e.to_string()),
            gb_core::Error::Io(e) => Error::Io(e),
            gb_core::Error::Json(e) => Error::Json(e),
            gb_core::Error::CorruptedData(s) => Error::CorruptedData(s),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
