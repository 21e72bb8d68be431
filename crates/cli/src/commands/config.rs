// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `gitbell config show | set | unset`.
//!
//! Settings are written straight to the state store. A new interval is also
//! pushed to a running daemon so its timer is re-armed without a restart.

use std::io::Write;
use std::path::Path;

use gb_core::settings::{parse_switch, validate_interval};
use gb_core::{Settings, Storage};

use crate::cli::ConfigKey;
use crate::daemon::{self, DaemonClient};
use crate::error::{Error, Result};

use super::open_storage;

/// Themes accepted by `config set theme`.
pub const THEMES: &[&str] = &["light", "dark"];

pub fn show() -> Result<()> {
    let (storage, _) = open_storage()?;
    show_impl(&storage, &mut std::io::stdout())
}

pub(crate) fn show_impl(storage: &Storage, out: &mut impl Write) -> Result<()> {
    let settings = storage.settings()?;
    let token = settings
        .token()
        .map(mask_token)
        .unwrap_or_else(|| "(not set)".to_string());

    writeln!(out, "interval = {}", settings.check_interval_minutes)?;
    writeln!(out, "token = {token}")?;
    writeln!(out, "notifications = {}", on_off(settings.notifications_enabled))?;
    writeln!(out, "sound = {}", on_off(settings.sound_enabled))?;
    writeln!(out, "theme = {}", settings.theme)?;
    Ok(())
}

pub fn set(key: ConfigKey, value: &str) -> Result<()> {
    let (storage, dir) = open_storage()?;
    set_impl(&storage, &dir, key, value, &mut std::io::stdout())
}

pub(crate) fn set_impl(
    storage: &Storage,
    state_dir: &Path,
    key: ConfigKey,
    value: &str,
    out: &mut impl Write,
) -> Result<()> {
    let settings = match key {
        ConfigKey::Interval => {
            let minutes = value
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::InvalidInterval(value.to_string()))?;
            let minutes = validate_interval(minutes)?;
            storage.update_settings(|s| s.check_interval_minutes = minutes)?
        }
        ConfigKey::Token => {
            let token = value.trim();
            if token.is_empty() {
                return Err(Error::InvalidInput(
                    "token cannot be empty\n  hint: use 'gitbell config unset token' to remove it"
                        .to_string(),
                ));
            }
            storage.update_settings(|s| s.credential = Some(token.to_string()))?
        }
        ConfigKey::Notifications => {
            let enabled = parse_switch(value)?;
            storage.update_settings(|s| s.notifications_enabled = enabled)?
        }
        ConfigKey::Sound => {
            let enabled = parse_switch(value)?;
            storage.update_settings(|s| s.sound_enabled = enabled)?
        }
        ConfigKey::Theme => {
            let theme = value.trim().to_lowercase();
            if !THEMES.contains(&theme.as_str()) {
                return Err(Error::InvalidTheme(value.to_string()));
            }
            storage.update_settings(|s| s.theme = theme)?
        }
    };

    report(&settings, key, out)?;
    if key == ConfigKey::Interval {
        push_interval(state_dir, settings.check_interval_minutes, out)?;
    }
    Ok(())
}

pub fn unset(key: ConfigKey) -> Result<()> {
    let (storage, dir) = open_storage()?;
    unset_impl(&storage, &dir, key, &mut std::io::stdout())
}

/// Restore `key` to its default; for the token that means removing it.
pub(crate) fn unset_impl(
    storage: &Storage,
    state_dir: &Path,
    key: ConfigKey,
    out: &mut impl Write,
) -> Result<()> {
    let defaults = Settings::default();
    let settings = storage.update_settings(|s| match key {
        ConfigKey::Interval => s.check_interval_minutes = defaults.check_interval_minutes,
        ConfigKey::Token => s.credential = None,
        ConfigKey::Notifications => s.notifications_enabled = defaults.notifications_enabled,
        ConfigKey::Sound => s.sound_enabled = defaults.sound_enabled,
        ConfigKey::Theme => s.theme = defaults.theme.clone(),
    })?;

    report(&settings, key, out)?;
    if key == ConfigKey::Interval {
        push_interval(state_dir, settings.check_interval_minutes, out)?;
    }
    Ok(())
}

fn report(settings: &Settings, key: ConfigKey, out: &mut impl Write) -> Result<()> {
    match key {
        ConfigKey::Interval => writeln!(
            out,
            "Checking every {} minute(s).",
            settings.check_interval_minutes
        )?,
        ConfigKey::Token => match settings.token() {
            Some(token) => writeln!(out, "Token saved ({}).", mask_token(token))?,
            None => writeln!(out, "Token removed.")?,
        },
        ConfigKey::Notifications => writeln!(
            out,
            "Notifications {}.",
            on_off(settings.notifications_enabled)
        )?,
        ConfigKey::Sound => writeln!(out, "Sound {}.", on_off(settings.sound_enabled))?,
        ConfigKey::Theme => writeln!(out, "Theme set to {}.", settings.theme)?,
    }
    Ok(())
}

/// Re-arm a running daemon's timer. A stopped daemon picks the value up
/// from the store when it next starts.
fn push_interval(state_dir: &Path, minutes: u32, out: &mut impl Write) -> Result<()> {
    if daemon::detect_daemon(state_dir)?.is_none() {
        writeln!(out, "The daemon will use it when it next starts.")?;
        return Ok(());
    }

    let applied = DaemonClient::connect(&daemon::get_socket_path(state_dir))
        .and_then(|mut client| client.update_interval(i64::from(minutes)));
    match applied {
        Ok(()) => writeln!(out, "Daemon rescheduled.")?,
        Err(e) => {
            tracing::warn!("failed to reschedule daemon: {e}");
            writeln!(out, "warning: the running daemon did not apply it: {e}")?;
        }
    }
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Show only the last four characters of a token.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
