//! String key/value backends for the local record store.
//!
//! [`KeyValueStore`] is the seam between the typed [`LocalStore`] and the
//! place records actually live. [`Database`] keeps them in the `kv_store`
//! SQLite table; [`MemoryStore`] keeps them in a map for tests and
//! throwaway sessions.
//!
//! [`LocalStore`]: crate::services::local_store::LocalStore

use std::collections::HashMap;
use std::sync::Mutex;

use rusqlite::{params, OptionalExtension};

use super::connection::Database;
use crate::types::errors::StorageError;

/// Raw string storage addressed by fixed keys.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl KeyValueStore for Database {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.connection()?;
        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StorageError::DatabaseError(e.to_string()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = chrono::Utc::now().timestamp_millis();
        self.connection()?
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.connection()?
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

/// In-memory backend. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}
