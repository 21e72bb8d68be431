// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `gitbell add`, `remove` and `list`.

use std::io::Write;

use chrono::{DateTime, Utc};
use gb_core::{GitHubClient, IssueSource, ResourceId, Storage, TrackedResource};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::display::format_resource_line;
use crate::error::{Error, Result};

use super::{block_on, open_storage};

#[derive(Serialize)]
struct ListOutputJson<'a> {
    repositories: &'a [TrackedResource],
}

pub fn add(repo: &str, no_verify: bool) -> Result<()> {
    let (storage, _) = open_storage()?;
    let id: ResourceId = repo.parse()?;

    if storage.repository(&id.full_name())?.is_some() {
        return Err(Error::AlreadyTracked(id.full_name()));
    }
    if !no_verify {
        let token = storage.settings()?.credential;
        let client = GitHubClient::new();
        block_on(verify(&client, &id, token.as_deref()))??;
    }

    add_impl(&storage, &id, &mut std::io::stdout())
}

/// Confirm the repository exists before tracking it.
pub(crate) async fn verify(
    source: &dyn IssueSource,
    id: &ResourceId,
    token: Option<&str>,
) -> Result<()> {
    let token = token.map(str::trim).filter(|t| !t.is_empty());
    if source.resource_exists(id, token).await? {
        Ok(())
    } else {
        Err(Error::RepositoryNotFound(id.full_name()))
    }
}

pub(crate) fn add_impl(storage: &Storage, id: &ResourceId, out: &mut impl Write) -> Result<()> {
    let resource = storage.add_repository(id)?;
    tracing::debug!(repo = %resource.full_name, "repository added");
    writeln!(out, "Now monitoring {}", resource.full_name)?;
    writeln!(
        out,
        "Existing open issues are recorded on the next check; only newer ones raise alerts."
    )?;
    Ok(())
}

pub fn remove(repo: &str) -> Result<()> {
    let (storage, _) = open_storage()?;
    remove_impl(&storage, repo, &mut std::io::stdout())
}

pub(crate) fn remove_impl(storage: &Storage, repo: &str, out: &mut impl Write) -> Result<()> {
    let id: ResourceId = repo.parse()?;
    let full_name = id.full_name();
    if !storage.remove_repository(&full_name)? {
        return Err(Error::NotTracked(full_name));
    }
    writeln!(out, "Stopped monitoring {full_name}")?;
    Ok(())
}

pub fn list(output: OutputFormat) -> Result<()> {
    let (storage, _) = open_storage()?;
    list_impl(&storage, output, Utc::now(), &mut std::io::stdout())
}

pub(crate) fn list_impl(
    storage: &Storage,
    output: OutputFormat,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<()> {
    let repositories = storage.repositories()?;

    match output {
        OutputFormat::Json => {
            let json = ListOutputJson {
                repositories: &repositories,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        OutputFormat::Text => {
            if repositories.is_empty() {
                writeln!(out, "No repositories monitored.")?;
                writeln!(out, "  hint: add one with 'gitbell add <owner/name>'")?;
                return Ok(());
            }
            let width = repositories
                .iter()
                .map(|r| r.full_name.len())
                .max()
                .unwrap_or(0);
            for resource in &repositories {
                writeln!(out, "{}", format_resource_line(resource, now, width))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "repo_tests.rs"]
mod tests;
