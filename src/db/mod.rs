//! Database module - key-value storage for JSON collections

use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

/// Storage keys, one JSON document each
pub const WORKOUTS_KEY: &str = "gymstack_workouts";
pub const EXERCISES_KEY: &str = "gymstack_custom_exercises";
pub const MUSCLES_KEY: &str = "gymstack_custom_muscle_groups";
pub const TEMPLATES_KEY: &str = "gymstack_templates";

/// String key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// SQLite-backed store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).with_context(|| format!("failed to open database {}", path))?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Self { conn: Connection::open_in_memory()? };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load a JSON collection; missing or unreadable data yields an empty one
pub fn load_collection<T, S>(store: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Error reading {} from storage: {:#}", key, e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Option<Vec<T>>>(&raw) {
        Ok(items) => {
            let items = items.unwrap_or_default();
            debug!("Loaded {} records from {}", items.len(), key);
            items
        }
        Err(e) => {
            warn!("Corrupted data under {}: {}", key, e);
            Vec::new()
        }
    }
}

/// Persist a JSON collection; failures are logged and swallowed
pub fn persist_collection<T, S>(store: &mut S, key: &str, items: &[T]) -> bool
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let json = match serde_json::to_string(items) {
        Ok(json) => json,
        Err(e) => {
            warn!("Error serializing {}: {}", key, e);
            return false;
        }
    };

    match store.set(key, &json) {
        Ok(()) => true,
        Err(e) => {
            warn!("Error writing {} to storage: {:#}", key, e);
            false
        }
    }
}
