// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed state store.
//!
//! A single `kv` table keyed by `(partition, key)` holds JSON documents. The
//! daemon and the CLI open the same file; WAL mode plus a busy timeout let
//! them interleave without `SQLITE_BUSY` failures.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::store::{Partition, StateStore};

/// SQL schema for the state database.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    partition TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (partition, key)
);
"#;

/// Filename of the state database within the state directory.
pub const DB_FILE_NAME: &str = "state.db";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Key-value store persisted in SQLite.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::init(conn)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Store("database lock poisoned".into()))
    }
}

impl StateStore for SqliteStore {
    fn get(&self, partition: Partition, key: &str) -> Result<Option<Value>> {
        let conn = self.conn()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM kv WHERE partition = ?1 AND key = ?2",
                params![partition.as_str(), key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(text) => serde_json::from_str(&text).map(Some).map_err(|e| {
                Error::CorruptedData(format!("invalid JSON under {partition}/{key}: {e}"))
            }),
            None => Ok(None),
        }
    }

    fn set(&self, partition: Partition, key: &str, value: Value) -> Result<()> {
        let text = serde_json::to_string(&value)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv (partition, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(partition, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![partition.as_str(), key, text, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
