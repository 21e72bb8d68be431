// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod check;
pub mod config;
pub mod daemon;
pub mod export;
pub mod history;
pub mod repo;
pub mod reset;
pub mod stats;
pub mod token;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use gb_core::db::DB_FILE_NAME;
use gb_core::{env, SqliteStore, Storage};

use crate::error::Result;

/// The state directory shared with gitbelld, created if missing.
pub fn state_dir() -> Result<PathBuf> {
    let dir = env::resolve_state_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Helper to open the state store from the current context.
pub fn open_storage() -> Result<(Storage, PathBuf)> {
    let dir = state_dir()?;
    let store = SqliteStore::open(&dir.join(DB_FILE_NAME))?;
    Ok((Storage::new(Arc::new(store)), dir))
}

/// Drive a GitHub request to completion on a single-threaded runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
