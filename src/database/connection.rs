//! SQLite database connection management for Nebula Nav.
//!
//! Provides the [`Database`] struct that wraps a `rusqlite::Connection`
//! and automatically runs schema migrations on open.

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::migrations;
use crate::types::errors::StorageError;

/// Core database wrapper providing SQLite connection management.
///
/// The connection sits behind a `Mutex` so one `Database` can be shared
/// between the UI-facing handler and detached sync tasks.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Opens (or creates) a SQLite database at the given file path and runs migrations.
    ///
    /// Parent directories are created when missing.
    ///
    /// # Errors
    /// `StorageError::IoError` if the parent directory cannot be created,
    /// `StorageError::DatabaseError` if opening or migrating fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::IoError(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens an in-memory SQLite database and runs migrations.
    ///
    /// Useful for testing; the database is discarded when the `Database` is dropped.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        migrations::run_all(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Locks and returns the underlying `rusqlite::Connection`.
    ///
    /// # Errors
    /// Returns `StorageError::Poisoned` if a previous holder panicked.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }
}
