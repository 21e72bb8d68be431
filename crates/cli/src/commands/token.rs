// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `gitbell token validate`.

use std::io::Write;

use gb_core::{GitHubClient, IssueSource};

use crate::error::{Error, Result};

use super::{block_on, open_storage};

pub fn validate(token: Option<String>) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => {
            let (storage, _) = open_storage()?;
            storage.settings()?.credential.unwrap_or_default()
        }
    };
    let client = GitHubClient::new();
    block_on(validate_impl(&client, &token, &mut std::io::stdout()))?
}

pub(crate) async fn validate_impl(
    source: &dyn IssueSource,
    token: &str,
    out: &mut impl Write,
) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::NoToken);
    }

    let check = source.validate_credential(token).await?;
    if !check.valid {
        return Err(Error::InvalidToken);
    }

    match (check.login, check.name) {
        (Some(login), Some(name)) => writeln!(out, "Token is valid for {login} ({name}).")?,
        (Some(login), None) => writeln!(out, "Token is valid for {login}.")?,
        _ => writeln!(out, "Token is valid.")?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
