// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! gb-core: Shared library for gitbell
//!
//! This crate provides the data model, state store, and GitHub client used by
//! both the gitbell CLI and the gitbelld daemon.

pub mod db;
pub mod env;
pub mod error;
pub mod export;
pub mod github;
pub mod history;
pub mod issue;
pub mod resource;
pub mod settings;
pub mod storage;
pub mod store;

pub use db::SqliteStore;
pub use error::{Error, FetchError, Result};
pub use export::ExportDocument;
pub use github::{CredentialCheck, GitHubClient, IssuePage, IssueSource, RateLimit};
pub use history::{NotificationRecord, RunStats};
pub use issue::Issue;
pub use resource::{ResourceId, ResourceStatus, TrackedResource};
pub use settings::Settings;
pub use storage::Storage;
pub use store::{MemoryStore, Partition, StateStore};
