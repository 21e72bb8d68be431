// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Turns newly observed issues into platform alerts.
//!
//! The dispatcher owns the click-target map from alert id to issue URL. The
//! map lives only as long as the process; losing it on restart only breaks
//! click-through for alerts raised before the restart. Targets are kept only
//! for backends that report back, and each one is dropped when its alert is
//! clicked or closed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gb_core::{Issue, Storage};

use crate::alert::{Activation, Alert, AlertId, Alerter, Priority};
use crate::error::{Error, Result};

pub const VIEW_BUTTON: &str = "View issue";
pub const APPROACHABLE_LINE: &str = "Good first issue";

/// Opens an issue URL for the user.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Opens URLs with the system's default handler.
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}

pub fn alert_id(resource: &str, issue: &Issue) -> AlertId {
    AlertId(format!("issue-{resource}-{}", issue.number))
}

pub fn alert_body(issue: &Issue) -> String {
    let mut body = format!("#{}: {}", issue.number, issue.title);
    if !issue.labels.is_empty() {
        body.push_str("\nLabels: ");
        body.push_str(&issue.labels.join(", "));
    }
    if issue.is_approachable() {
        body.push('\n');
        body.push_str(APPROACHABLE_LINE);
    }
    body
}

pub struct Dispatcher {
    storage: Arc<Storage>,
    alerter: Arc<dyn Alerter>,
    opener: Arc<dyn UrlOpener>,
    targets: Mutex<HashMap<AlertId, String>>,
}

impl Dispatcher {
    pub fn new(
        storage: Arc<Storage>,
        alerter: Arc<dyn Alerter>,
        opener: Arc<dyn UrlOpener>,
    ) -> Self {
        Self {
            storage,
            alerter,
            opener,
            targets: Mutex::new(HashMap::new()),
        }
    }

    fn targets(&self) -> Result<std::sync::MutexGuard<'_, HashMap<AlertId, String>>> {
        self.targets
            .lock()
            .map_err(|_| Error::Alert("click-target map lock poisoned".into()))
    }

    /// Raise an alert for a new issue in `resource`.
    ///
    /// Returns `Ok(None)` when notifications are disabled.
    pub async fn dispatch(&self, resource: &str, issue: &Issue) -> Result<Option<AlertId>> {
        let settings = self.storage.settings()?;
        if !settings.notifications_enabled {
            tracing::debug!(repo = resource, issue = issue.number, "notifications disabled");
            return Ok(None);
        }

        let caps = self.alerter.capabilities();
        let approachable = issue.is_approachable();
        let alert = Alert {
            id: alert_id(resource, issue),
            title: format!("New issue in {resource}"),
            body: alert_body(issue),
            priority: if approachable {
                Priority::High
            } else {
                Priority::Normal
            },
            button: caps.buttons.then(|| VIEW_BUTTON.to_string()),
            require_interaction: caps.require_interaction && approachable,
            sound: caps.sound && settings.sound_enabled,
        };

        // Register before showing so a fast click always finds its target.
        // Backends without buttons never report back, so nothing is kept.
        if caps.buttons {
            self.targets()?.insert(alert.id.clone(), issue.url.clone());
        }
        if let Err(e) = self.alerter.show(&alert).await {
            self.targets()?.remove(&alert.id);
            return Err(e);
        }
        Ok(Some(alert.id))
    }

    /// Route a report from the alert backend.
    pub async fn handle(&self, activation: Activation) {
        tracing::debug!(alert = %activation.id(), ?activation, "alert reported back");
        match activation {
            Activation::Clicked(id) => {
                self.activate(&id).await;
            }
            Activation::Closed(id) => {
                self.forget(&id);
            }
        }
    }

    /// Drop the target of an alert that closed without a click.
    pub fn forget(&self, id: &AlertId) -> bool {
        match self.targets() {
            Ok(mut targets) => targets.remove(id).is_some(),
            Err(e) => {
                tracing::warn!("{e}");
                false
            }
        }
    }

    /// Handle a click or button press on alert `id`.
    ///
    /// Returns false for ids with no registered target.
    pub async fn activate(&self, id: &AlertId) -> bool {
        let url = match self.targets() {
            Ok(mut targets) => targets.remove(id),
            Err(e) => {
                tracing::warn!("{e}");
                None
            }
        };
        let Some(url) = url else {
            tracing::debug!(alert = %id, "activation for unknown alert");
            return false;
        };
        if let Err(e) = self.opener.open(&url) {
            tracing::warn!(%url, "failed to open issue: {e}");
        }
        self.alerter.clear(id).await;
        true
    }

    /// Number of alerts still awaiting activation.
    pub fn pending(&self) -> usize {
        self.targets().map(|t| t.len()).unwrap_or(0)
    }

    /// One-time greeting shown on the first daemon start.
    pub async fn welcome(&self) -> Result<()> {
        let alert = Alert {
            id: AlertId("welcome".into()),
            title: "gitbell is ready".into(),
            body: "Add a repository with 'gitbell add owner/name' to start watching for new issues."
                .into(),
            priority: Priority::Normal,
            button: None,
            require_interaction: false,
            sound: false,
        };
        self.alerter.show(&alert).await
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
