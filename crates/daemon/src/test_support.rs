// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fakes shared by the daemon's unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gb_core::github::{CredentialCheck, IssuePage, IssueSource, RateLimit};
use gb_core::store::{MemoryStore, Partition, StateStore};
use gb_core::{Error as CoreError, FetchError, Issue, ResourceId, Storage};
use serde_json::Value;

use crate::alert::{Alert, AlertCapabilities, AlertId, Alerter};
use crate::dispatch::{Dispatcher, UrlOpener};
use crate::engine::Engine;
use crate::error::{Error, Result};

pub fn issue(number: u64, labels: &[&str]) -> Issue {
    Issue::new(
        number,
        format!("Issue {number}"),
        format!("https://github.com/octo/demo/issues/{number}"),
        labels.iter().map(|l| l.to_string()).collect(),
    )
}

/// Alerter that records what it was asked to show.
#[derive(Default)]
pub struct RecordingAlerter {
    pub caps: AlertCapabilities,
    pub shown: Mutex<Vec<Alert>>,
    pub cleared: Mutex<Vec<AlertId>>,
    pub fail: AtomicBool,
}

impl RecordingAlerter {
    pub fn with_caps(caps: AlertCapabilities) -> Self {
        Self {
            caps,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        let alerter = Self::default();
        alerter.fail.store(true, Ordering::SeqCst);
        alerter
    }

    pub fn shown(&self) -> Vec<Alert> {
        self.shown.lock().unwrap().clone()
    }
}

#[async_trait]
impl Alerter for RecordingAlerter {
    fn capabilities(&self) -> AlertCapabilities {
        self.caps
    }

    async fn show(&self, alert: &Alert) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Alert("platform refused".into()));
        }
        self.shown.lock().unwrap().push(alert.clone());
        Ok(())
    }

    async fn clear(&self, id: &AlertId) {
        self.cleared.lock().unwrap().push(id.clone());
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

type Response = std::result::Result<Vec<Issue>, FetchError>;

/// Issue source answering from a per-repository script.
///
/// Each call pops the next scripted response for the repository; the last
/// response repeats once the script is exhausted.
#[derive(Default)]
pub struct FakeSource {
    scripts: Mutex<HashMap<String, Vec<Response>>>,
    pub calls: AtomicUsize,
    pub tokens: Mutex<Vec<Option<String>>>,
    pub remaining: Mutex<Option<u32>>,
    /// Repository to delete from `storage` while its fetch is in flight.
    pub remove_during_fetch: Mutex<Option<(String, Arc<Storage>)>>,
}

impl FakeSource {
    pub fn respond(&self, full_name: &str, response: Response) {
        self.scripts
            .lock()
            .unwrap()
            .entry(full_name.to_string())
            .or_default()
            .push(response);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IssueSource for FakeSource {
    async fn fetch_open_issues(
        &self,
        id: &ResourceId,
        token: Option<&str>,
    ) -> std::result::Result<IssuePage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().unwrap().push(token.map(str::to_string));

        let full_name = id.full_name();
        if let Some((name, storage)) = self.remove_during_fetch.lock().unwrap().take() {
            if name == full_name {
                storage.remove_repository(&name).unwrap();
            }
        }

        let response = {
            let mut scripts = self.scripts.lock().unwrap();
            match scripts.get_mut(&full_name) {
                Some(script) if script.len() > 1 => script.remove(0),
                Some(script) => script[0].clone(),
                None => Ok(Vec::new()),
            }
        };
        response.map(|issues| IssuePage {
            issues,
            rate_limit: RateLimit {
                remaining: *self.remaining.lock().unwrap(),
                reset_at: None,
            },
        })
    }

    async fn resource_exists(
        &self,
        _id: &ResourceId,
        _token: Option<&str>,
    ) -> std::result::Result<bool, FetchError> {
        Ok(true)
    }

    async fn validate_credential(
        &self,
        _token: &str,
    ) -> std::result::Result<CredentialCheck, FetchError> {
        Ok(CredentialCheck::default())
    }
}

/// Store whose writes to one key can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    pub failing_key: Mutex<Option<String>>,
}

impl FlakyStore {
    pub fn fail_writes_to(&self, key: &str) {
        *self.failing_key.lock().unwrap() = Some(key.to_string());
    }
}

impl StateStore for FlakyStore {
    fn get(&self, partition: Partition, key: &str) -> gb_core::Result<Option<Value>> {
        self.inner.get(partition, key)
    }

    fn set(&self, partition: Partition, key: &str, value: Value) -> gb_core::Result<()> {
        if self.failing_key.lock().unwrap().as_deref() == Some(key) {
            return Err(CoreError::Store(format!("write to {key} rejected")));
        }
        self.inner.set(partition, key, value)
    }
}

/// An engine wired to fakes, with handles to each of them.
pub struct Harness {
    pub storage: Arc<Storage>,
    pub source: Arc<FakeSource>,
    pub alerter: Arc<RecordingAlerter>,
    pub opener: Arc<RecordingOpener>,
    pub engine: Arc<Engine>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_parts(Arc::new(MemoryStore::new()), RecordingAlerter::default())
    }

    pub fn with_parts(store: Arc<dyn StateStore>, alerter: RecordingAlerter) -> Self {
        let storage = Arc::new(Storage::new(store));
        let source = Arc::new(FakeSource::default());
        let alerter = Arc::new(alerter);
        let opener = Arc::new(RecordingOpener::default());
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::clone(&storage),
            alerter.clone(),
            opener.clone(),
        ));
        let engine = Arc::new(Engine::new(
            Arc::clone(&storage),
            source.clone(),
            dispatcher,
        ));
        Self {
            storage,
            source,
            alerter,
            opener,
            engine,
        }
    }

    pub fn track(&self, full_name: &str) {
        self.storage
            .add_repository(&full_name.parse().unwrap())
            .unwrap();
    }

    pub fn watermark(&self, full_name: &str) -> Option<u64> {
        self.storage
            .repository(full_name)
            .unwrap()
            .unwrap()
            .last_watermark
    }
}
