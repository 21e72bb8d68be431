// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use gb_core::Storage;

use crate::error::Result;

use super::open_storage;

/// Forget every repository, the notification history and the statistics.
/// Settings, including the token, are kept.
pub fn run() -> Result<()> {
    let (storage, _) = open_storage()?;
    run_impl(&storage, &mut std::io::stdout())
}

pub(crate) fn run_impl(storage: &Storage, out: &mut impl Write) -> Result<()> {
    let removed = storage.repositories()?.len();
    storage.clear_all()?;
    tracing::debug!(removed, "state reset");
    writeln!(
        out,
        "Removed {removed} repositories and cleared history and statistics. Settings were kept."
    )?;
    Ok(())
}

#[cfg(test)]
#[path = "reset_tests.rs"]
mod tests;
