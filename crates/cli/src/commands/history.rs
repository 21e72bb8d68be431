// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `gitbell history`: the notification log, newest first.

use std::io::Write;

use chrono::{DateTime, Utc};
use gb_core::{NotificationRecord, Storage};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::display::format_history_entry;
use crate::error::Result;

use super::open_storage;

#[derive(Serialize)]
struct HistoryOutputJson<'a> {
    notifications: &'a [NotificationRecord],
}

pub fn run(limit: Option<usize>, output: OutputFormat) -> Result<()> {
    let (storage, _) = open_storage()?;
    run_impl(&storage, limit, output, Utc::now(), &mut std::io::stdout())
}

pub(crate) fn run_impl(
    storage: &Storage,
    limit: Option<usize>,
    output: OutputFormat,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<()> {
    let records = storage.history(limit)?;

    match output {
        OutputFormat::Json => {
            let json = HistoryOutputJson {
                notifications: &records,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        OutputFormat::Text => {
            if records.is_empty() {
                writeln!(out, "No notifications yet.")?;
                return Ok(());
            }
            for record in &records {
                for line in format_history_entry(record, now) {
                    writeln!(out, "{line}")?;
                }
            }
        }
    }
    Ok(())
}

pub fn clear() -> Result<()> {
    let (storage, _) = open_storage()?;
    clear_impl(&storage, &mut std::io::stdout())
}

pub(crate) fn clear_impl(storage: &Storage, out: &mut impl Write) -> Result<()> {
    storage.clear_history()?;
    writeln!(out, "Notification history cleared.")?;
    Ok(())
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
