// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `gitbell export [PATH]`: repositories, settings without the token, and
//! statistics as one pretty-printed JSON document.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use gb_core::{ExportDocument, Storage};

use crate::error::{Error, Result};

use super::open_storage;

pub fn run(path: Option<&str>) -> Result<()> {
    if path.is_some_and(|p| p.trim().is_empty()) {
        return Err(Error::ExportPathEmpty);
    }
    let (storage, _) = open_storage()?;
    run_impl(&storage, path.map(Path::new), Utc::now(), &mut std::io::stdout())
}

pub(crate) fn run_impl(
    storage: &Storage,
    path: Option<&Path>,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<()> {
    let document = ExportDocument::build(storage, now)?;
    let json = document.to_pretty_json()?;

    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            writeln!(writer, "{json}")?;
            writer.flush()?;
            writeln!(
                out,
                "Exported {} repositories to {}",
                document.repositories.len(),
                path.display()
            )?;
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
