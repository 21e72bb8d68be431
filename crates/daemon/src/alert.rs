// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Platform alert backends.
//!
//! Exactly one [`Alerter`] is chosen at startup by [`detect`]. Each backend
//! reports what it can render through [`AlertCapabilities`]; the dispatcher
//! consults those flags instead of branching on the platform.

use std::fmt;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::{Error, Result};

/// Identifier of a raised alert.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertId(pub String);

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    Normal,
    High,
}

/// What became of an alert after it was shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The user clicked the alert or its button.
    Clicked(AlertId),
    /// The alert went away without a click.
    Closed(AlertId),
}

impl Activation {
    pub fn id(&self) -> &AlertId {
        match self {
            Activation::Clicked(id) | Activation::Closed(id) => id,
        }
    }
}

/// Optional presentation features a backend supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlertCapabilities {
    pub buttons: bool,
    pub require_interaction: bool,
    pub sound: bool,
}

/// A fully-resolved alert, ready for a backend to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub title: String,
    pub body: String,
    pub priority: Priority,
    /// Label of a single "open" button.
    pub button: Option<String>,
    pub require_interaction: bool,
    pub sound: bool,
}

/// A platform notification backend.
///
/// Backends with `buttons` report every alert they showed exactly once on
/// the activation channel they were built with, as clicked or closed.
#[async_trait]
pub trait Alerter: Send + Sync {
    fn capabilities(&self) -> AlertCapabilities;

    async fn show(&self, alert: &Alert) -> Result<()>;

    async fn clear(&self, id: &AlertId);
}

// ----------------------------------------------------------------------------
// freedesktop notify-send
// ----------------------------------------------------------------------------

/// First notify-send release with `--action` and `--wait`.
const ACTIONS_SINCE: (u32, u32, u32) = (0, 7, 9);

/// Action keys printed by notify-send when the alert is activated.
const VIEW_ACTION: &str = "view";
const DEFAULT_ACTION: &str = "default";

/// Parse the output of `notify-send --version`, e.g. `notify-send 0.8.3`.
pub fn parse_notify_send_version(output: &str) -> Option<(u32, u32, u32)> {
    let version = output.split_whitespace().last()?;
    let mut parts = version.split('.').map(|p| p.parse::<u32>().ok());
    let major = parts.next()??;
    let minor = parts.next().flatten().unwrap_or(0);
    let patch = parts.next().flatten().unwrap_or(0);
    Some((major, minor, patch))
}

/// Map the action key notify-send printed on exit to an [`Activation`].
pub fn activation_for(action: &str, id: AlertId) -> Activation {
    match action.trim() {
        VIEW_ACTION | DEFAULT_ACTION => Activation::Clicked(id),
        _ => Activation::Closed(id),
    }
}

/// `--urgency` value for `alert`. Supported by every notify-send release.
pub fn urgency(alert: &Alert) -> &'static str {
    if alert.priority == Priority::High || alert.require_interaction {
        "critical"
    } else {
        "normal"
    }
}

pub fn desktop_capabilities(version: Option<(u32, u32, u32)>) -> AlertCapabilities {
    let actions = version.is_some_and(|v| v >= ACTIONS_SINCE);
    AlertCapabilities {
        buttons: actions,
        require_interaction: actions,
        sound: true,
    }
}

pub struct DesktopAlerter {
    capabilities: AlertCapabilities,
    activations: UnboundedSender<Activation>,
}

impl DesktopAlerter {
    pub fn new(capabilities: AlertCapabilities, activations: UnboundedSender<Activation>) -> Self {
        Self {
            capabilities,
            activations,
        }
    }
}

#[async_trait]
impl Alerter for DesktopAlerter {
    fn capabilities(&self) -> AlertCapabilities {
        self.capabilities
    }

    async fn show(&self, alert: &Alert) -> Result<()> {
        let mut cmd = Command::new("notify-send");
        cmd.arg("--app-name=gitbell");
        cmd.arg(format!("--urgency={}", urgency(alert)));
        if alert.sound {
            cmd.arg("--hint=string:sound-name:message-new-instant");
        }

        let Some(label) = alert.button.as_deref() else {
            cmd.arg(&alert.title).arg(&alert.body);
            let status = cmd.status().await?;
            if !status.success() {
                return Err(Error::Alert(format!("notify-send exited with {status}")));
            }
            return Ok(());
        };

        cmd.arg("--wait")
            .arg(format!("--action={DEFAULT_ACTION}=Open"))
            .arg(format!("--action={VIEW_ACTION}={label}"))
            .arg(&alert.title)
            .arg(&alert.body)
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        let child = cmd.spawn()?;

        // notify-send blocks until the alert is closed and prints the chosen
        // action key, if any.
        let activations = self.activations.clone();
        let id = alert.id.clone();
        tokio::spawn(async move {
            let activation = match child.wait_with_output().await {
                Ok(output) => activation_for(&String::from_utf8_lossy(&output.stdout), id),
                Err(e) => {
                    tracing::debug!(alert = %id, "notify-send wait failed: {e}");
                    Activation::Closed(id)
                }
            };
            let _ = activations.send(activation);
        });
        Ok(())
    }

    async fn clear(&self, _id: &AlertId) {
        // notify-send closes the alert itself once it is activated.
    }
}

// ----------------------------------------------------------------------------
// macOS osascript
// ----------------------------------------------------------------------------

/// Quote `text` as an AppleScript string literal.
pub fn applescript_quote(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

pub struct AppleScriptAlerter;

#[async_trait]
impl Alerter for AppleScriptAlerter {
    fn capabilities(&self) -> AlertCapabilities {
        AlertCapabilities {
            sound: true,
            ..AlertCapabilities::default()
        }
    }

    async fn show(&self, alert: &Alert) -> Result<()> {
        let mut script = format!(
            "display notification {} with title {}",
            applescript_quote(&alert.body),
            applescript_quote(&alert.title)
        );
        if alert.sound {
            script.push_str(" sound name \"Glass\"");
        }
        let status = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .status()
            .await?;
        if !status.success() {
            return Err(Error::Alert(format!("osascript exited with {status}")));
        }
        Ok(())
    }

    async fn clear(&self, _id: &AlertId) {}
}

// ----------------------------------------------------------------------------
// Headless fallback
// ----------------------------------------------------------------------------

/// Writes alerts to the daemon log.
pub struct LogAlerter;

#[async_trait]
impl Alerter for LogAlerter {
    fn capabilities(&self) -> AlertCapabilities {
        AlertCapabilities::default()
    }

    async fn show(&self, alert: &Alert) -> Result<()> {
        tracing::info!(
            alert = %alert.id,
            priority = ?alert.priority,
            "{}: {}",
            alert.title,
            alert.body.replace('\n', " | ")
        );
        Ok(())
    }

    async fn clear(&self, _id: &AlertId) {}
}

async fn probe(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Pick the best available backend for this host.
pub async fn detect(activations: UnboundedSender<Activation>) -> Arc<dyn Alerter> {
    if cfg!(target_os = "macos") && probe("osascript", &["-e", "return"]).await.is_some() {
        tracing::info!("alerts via osascript");
        return Arc::new(AppleScriptAlerter);
    }
    if let Some(output) = probe("notify-send", &["--version"]).await {
        let version = parse_notify_send_version(&output);
        let capabilities = desktop_capabilities(version);
        tracing::info!(?version, ?capabilities, "alerts via notify-send");
        return Arc::new(DesktopAlerter::new(capabilities, activations));
    }
    tracing::info!("no desktop notifier found, alerts go to the log");
    Arc::new(LogAlerter)
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
