// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed access to the state store.
//!
//! [`Storage`] maps the domain types onto store keys and turns every
//! read-modify-write into a unit guarded by an in-process write lock, so two
//! updates from the same process never interleave. Writers in other
//! processes resolve by last-write-wins.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::history::{push_newest, NotificationRecord, RunStats};
use crate::resource::{ResourceId, TrackedResource};
use crate::settings::Settings;
use crate::store::{Partition, StateStore};

/// Synced key: `Vec<TrackedResource>`.
pub const REPOSITORIES_KEY: &str = "repositories";
/// Synced key: [`Settings`].
pub const SETTINGS_KEY: &str = "settings";
/// Local key: `Vec<NotificationRecord>`, newest first.
pub const HISTORY_KEY: &str = "notification_history";
/// Local key: [`RunStats`].
pub const STATS_KEY: &str = "stats";

/// Domain-level facade over a [`StateStore`].
pub struct Storage {
    store: Arc<dyn StateStore>,
    write_lock: Mutex<()>,
}

impl Storage {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn load<T: DeserializeOwned>(&self, partition: Partition, key: &str) -> Result<Option<T>> {
        match self.store.get(partition, key)? {
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                Error::CorruptedData(format!("unexpected shape under {partition}/{key}: {e}"))
            }),
            None => Ok(None),
        }
    }

    fn save<T: Serialize>(&self, partition: Partition, key: &str, value: &T) -> Result<()> {
        self.store.set(partition, key, serde_json::to_value(value)?)
    }

    fn locked(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| Error::Store("storage write lock poisoned".into()))
    }

    // ------------------------------------------------------------------
    // Repositories
    // ------------------------------------------------------------------

    pub fn repositories(&self) -> Result<Vec<TrackedResource>> {
        Ok(self
            .load(Partition::Synced, REPOSITORIES_KEY)?
            .unwrap_or_default())
    }

    pub fn repository(&self, full_name: &str) -> Result<Option<TrackedResource>> {
        Ok(self
            .repositories()?
            .into_iter()
            .find(|r| r.full_name == full_name))
    }

    /// Start tracking `id`. Fails if it is already tracked.
    pub fn add_repository(&self, id: &ResourceId) -> Result<TrackedResource> {
        let _guard = self.locked()?;
        let mut repositories = self.repositories()?;
        let full_name = id.full_name();
        if repositories.iter().any(|r| r.full_name == full_name) {
            return Err(Error::DuplicateResource(full_name));
        }
        let resource = TrackedResource::new(id, Utc::now());
        repositories.push(resource.clone());
        self.save(Partition::Synced, REPOSITORIES_KEY, &repositories)?;
        Ok(resource)
    }

    /// Stop tracking `full_name`. Returns false if it was not tracked.
    pub fn remove_repository(&self, full_name: &str) -> Result<bool> {
        let _guard = self.locked()?;
        let mut repositories = self.repositories()?;
        let before = repositories.len();
        repositories.retain(|r| r.full_name != full_name);
        if repositories.len() == before {
            return Ok(false);
        }
        self.save(Partition::Synced, REPOSITORIES_KEY, &repositories)?;
        Ok(true)
    }

    /// Apply `update` to the stored entry for `full_name`.
    ///
    /// Returns the updated entry, or `None` without writing when the
    /// repository is no longer tracked.
    pub fn update_repository<F>(&self, full_name: &str, update: F) -> Result<Option<TrackedResource>>
    where
        F: FnOnce(&mut TrackedResource),
    {
        let _guard = self.locked()?;
        let mut repositories = self.repositories()?;
        let Some(entry) = repositories.iter_mut().find(|r| r.full_name == full_name) else {
            return Ok(None);
        };
        update(entry);
        let updated = entry.clone();
        self.save(Partition::Synced, REPOSITORIES_KEY, &repositories)?;
        Ok(Some(updated))
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// True once settings have been written at least once.
    pub fn has_settings(&self) -> Result<bool> {
        Ok(self.store.get(Partition::Synced, SETTINGS_KEY)?.is_some())
    }

    pub fn settings(&self) -> Result<Settings> {
        Ok(self
            .load(Partition::Synced, SETTINGS_KEY)?
            .unwrap_or_default())
    }

    pub fn update_settings<F>(&self, update: F) -> Result<Settings>
    where
        F: FnOnce(&mut Settings),
    {
        let _guard = self.locked()?;
        let mut settings = self.settings()?;
        update(&mut settings);
        self.save(Partition::Synced, SETTINGS_KEY, &settings)?;
        Ok(settings)
    }

    // ------------------------------------------------------------------
    // Notification history
    // ------------------------------------------------------------------

    /// Most recent records first, optionally limited.
    pub fn history(&self, limit: Option<usize>) -> Result<Vec<NotificationRecord>> {
        let mut history: Vec<NotificationRecord> = self
            .load(Partition::Local, HISTORY_KEY)?
            .unwrap_or_default();
        if let Some(limit) = limit {
            history.truncate(limit);
        }
        Ok(history)
    }

    pub fn add_notification(&self, record: NotificationRecord) -> Result<()> {
        let _guard = self.locked()?;
        let mut history = self.history(None)?;
        push_newest(&mut history, record);
        self.save(Partition::Local, HISTORY_KEY, &history)
    }

    pub fn clear_history(&self) -> Result<()> {
        let _guard = self.locked()?;
        self.save(Partition::Local, HISTORY_KEY, &Vec::<NotificationRecord>::new())
    }

    // ------------------------------------------------------------------
    // Stats
    // ------------------------------------------------------------------

    pub fn stats(&self) -> Result<RunStats> {
        Ok(self.load(Partition::Local, STATS_KEY)?.unwrap_or_default())
    }

    pub fn update_stats<F>(&self, update: F) -> Result<RunStats>
    where
        F: FnOnce(&mut RunStats),
    {
        let _guard = self.locked()?;
        let mut stats = self.stats()?;
        update(&mut stats);
        self.save(Partition::Local, STATS_KEY, &stats)?;
        Ok(stats)
    }

    /// Clear repositories, history and stats. Settings are kept.
    pub fn clear_all(&self) -> Result<()> {
        let _guard = self.locked()?;
        self.save(
            Partition::Synced,
            REPOSITORIES_KEY,
            &Vec::<TrackedResource>::new(),
        )?;
        self.save(Partition::Local, HISTORY_KEY, &Vec::<NotificationRecord>::new())?;
        self.save(Partition::Local, STATS_KEY, &RunStats::default())
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
