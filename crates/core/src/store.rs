// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Key-value state store contract.
//!
//! The store has no transaction primitive: each `set` replaces one key
//! wholesale and concurrent writers resolve by last-write-wins. Callers that
//! need read-modify-write semantics serialize themselves (see
//! [`Storage`](crate::storage::Storage)).

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{Error, Result};

/// Storage partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Small, user-level data: tracked repositories and settings.
    Synced,
    /// Larger, device-local data: notification history and stats.
    Local,
}

impl Partition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Synced => "synced",
            Partition::Local => "local",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Durable get/set mapping of JSON values.
pub trait StateStore: Send + Sync {
    fn get(&self, partition: Partition, key: &str) -> Result<Option<Value>>;
    fn set(&self, partition: Partition, key: &str, value: Value) -> Result<()>;
}

/// In-process store, used by tests and as a scratch store.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<(Partition, String), Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, partition: Partition, key: &str) -> Result<Option<Value>> {
        let values = self
            .values
            .lock()
            .map_err(|_| Error::Store("memory store lock poisoned".into()))?;
        Ok(values.get(&(partition, key.to_string())).cloned())
    }

    fn set(&self, partition: Partition, key: &str, value: Value) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| Error::Store("memory store lock poisoned".into()))?;
        values.insert((partition, key.to_string()), value);
        Ok(())
    }
}
