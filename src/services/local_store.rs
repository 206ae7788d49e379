//! Local Store for Nebula Nav.
//!
//! Typed access to the four persisted records. Every getter fails open: a
//! missing record, a backend failure, or content that no longer parses all
//! yield the built-in default. The records are written independently, with
//! no atomicity across them.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::database::KeyValueStore;
use crate::types::errors::StorageError;
use crate::types::link::{default_links, Link};
use crate::types::site::SiteConfig;
use crate::types::sync::SyncConfig;

pub const LINKS_KEY: &str = "nebula_links";
pub const CONFIG_KEY: &str = "nebula_config";
pub const AUTH_KEY: &str = "nebula_auth";
pub const SYNC_KEY: &str = "nebula_sync";

/// Trait defining the typed record store.
pub trait LocalStoreTrait {
    fn get_links(&self) -> Vec<Link>;
    fn save_links(&self, links: &[Link]) -> Result<(), StorageError>;
    fn get_site_config(&self) -> SiteConfig;
    fn save_site_config(&self, config: &SiteConfig) -> Result<(), StorageError>;
    fn get_credential(&self) -> Option<String>;
    fn set_credential(&self, credential: &str) -> Result<(), StorageError>;
    fn has_credential_set(&self) -> bool;
    fn check_credential(&self, input: &str) -> bool;
    fn get_sync_config(&self) -> Option<SyncConfig>;
    fn save_sync_config(&self, config: &SyncConfig) -> Result<(), StorageError>;
    fn clear_sync_config(&self) -> Result<(), StorageError>;
}

/// Record store over any [`KeyValueStore`] backend. Cheap to clone.
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KeyValueStore>,
}

impl LocalStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Reads and parses a JSON record, or `None` when absent or unreadable.
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read local record");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "stored record is corrupt, using default");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        self.backend.set_item(key, &json).map_err(|e| {
            warn!(key, error = %e, "failed to save local record");
            e
        })?;
        debug!(key, bytes = json.len(), "saved local record");
        Ok(())
    }
}

impl LocalStoreTrait for LocalStore {
    /// Returns the saved links, or the seed links on a fresh or corrupt store.
    fn get_links(&self) -> Vec<Link> {
        self.read_json(LINKS_KEY).unwrap_or_else(default_links)
    }

    fn save_links(&self, links: &[Link]) -> Result<(), StorageError> {
        self.write_json(LINKS_KEY, links)
    }

    fn get_site_config(&self) -> SiteConfig {
        self.read_json(CONFIG_KEY).unwrap_or_default()
    }

    fn save_site_config(&self, config: &SiteConfig) -> Result<(), StorageError> {
        self.write_json(CONFIG_KEY, config)
    }

    /// The password is stored as a raw string, not JSON.
    fn get_credential(&self) -> Option<String> {
        match self.backend.get_item(AUTH_KEY) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(error = %e, "failed to read credential");
                None
            }
        }
    }

    fn set_credential(&self, credential: &str) -> Result<(), StorageError> {
        self.backend.set_item(AUTH_KEY, credential).map_err(|e| {
            warn!(error = %e, "failed to save credential");
            e
        })
    }

    fn has_credential_set(&self) -> bool {
        self.get_credential().is_some()
    }

    fn check_credential(&self, input: &str) -> bool {
        self.get_credential().as_deref() == Some(input)
    }

    fn get_sync_config(&self) -> Option<SyncConfig> {
        self.read_json(SYNC_KEY)
    }

    fn save_sync_config(&self, config: &SyncConfig) -> Result<(), StorageError> {
        self.write_json(SYNC_KEY, config)
    }

    fn clear_sync_config(&self) -> Result<(), StorageError> {
        self.backend.remove_item(SYNC_KEY)
    }
}
