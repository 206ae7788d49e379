//! Config Engine for Nebula Nav.
//!
//! Owns `config.json`. A missing file means defaults; a broken one is an
//! error the caller decides about. Edits address a field by dotted path
//! (`remote.timeout_secs`) and are checked against the typed [`AppConfig`]
//! before anything reaches disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::platform;
use crate::types::config::AppConfig;
use crate::types::errors::ConfigError;

/// Environment variable overriding the data directory (database, exports).
pub const DATA_DIR_ENV: &str = "NEBULA_NAV_DATA_DIR";

/// Trait defining the config engine interface.
pub trait ConfigEngineTrait {
    fn load(&mut self) -> Result<AppConfig, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn get_config(&self) -> &AppConfig;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), ConfigError>;
    fn reset(&mut self) -> Result<(), ConfigError>;
    fn config_path(&self) -> &Path;
}

pub struct ConfigEngine {
    path: PathBuf,
    config: AppConfig,
}

impl ConfigEngine {
    /// Engine for `path_override`, or `config.json` in the platform config dir.
    /// Starts from defaults until [`ConfigEngineTrait::load`] runs.
    pub fn new(path_override: Option<String>) -> Self {
        let path = match path_override {
            Some(p) => PathBuf::from(p),
            None => platform::get_config_dir().join("config.json"),
        };
        Self::with_config(path, AppConfig::default())
    }

    /// Engine over a config that is already in hand.
    pub fn with_config(path: impl Into<PathBuf>, config: AppConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    fn io_error(&self, action: &str, err: std::io::Error) -> ConfigError {
        ConfigError::IoError(format!("{} {}: {}", action, self.path.display(), err))
    }
}

/// Overwrites the field at `path` inside a JSON tree. Only fields that
/// already exist can be written, so typos surface as errors.
fn write_field(tree: &mut Value, path: &[&str], value: Value) -> bool {
    let Some((field, parents)) = path.split_last() else {
        return false;
    };
    let mut node = tree;
    for part in parents {
        node = match node.get_mut(*part) {
            Some(child) if child.is_object() => child,
            _ => return false,
        };
    }
    match node.as_object_mut() {
        Some(map) if map.contains_key(*field) => {
            map.insert(field.to_string(), value);
            true
        }
        _ => false,
    }
}

/// Directory holding the database and default exports.
///
/// `NEBULA_NAV_DATA_DIR` wins over the platform data directory.
pub fn data_dir() -> PathBuf {
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => platform::get_data_dir(),
    }
}

/// Resolves the database file for a config.
pub fn database_path(config: &AppConfig) -> PathBuf {
    match &config.storage.database_path {
        Some(path) => PathBuf::from(path),
        None => data_dir().join("nebula.db"),
    }
}

/// Resolves the directory for exported backup files.
pub fn export_dir(config: &AppConfig) -> PathBuf {
    match &config.backup.export_dir {
        Some(dir) => PathBuf::from(dir),
        None => data_dir().join("backups"),
    }
}

impl ConfigEngineTrait for ConfigEngine {
    fn load(&mut self) -> Result<AppConfig, ConfigError> {
        self.config = match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                ConfigError::SerializationError(format!("{}: {}", self.path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => AppConfig::default(),
            Err(e) => return Err(self.io_error("reading", e)),
        };
        Ok(self.config.clone())
    }

    fn save(&self) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(&self.config)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error("creating directory for", e))?;
        }
        fs::write(&self.path, text).map_err(|e| self.io_error("writing", e))
    }

    fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Sets one field, e.g. `set_value("remote.timeout_secs", json!(30))`, then saves.
    ///
    /// The edited tree must still deserialize as an `AppConfig`; otherwise
    /// nothing changes.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        let path: Vec<&str> = key.split('.').filter(|p| !p.is_empty()).collect();
        let mut tree = serde_json::to_value(&self.config)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        if !write_field(&mut tree, &path, value) {
            return Err(ConfigError::InvalidKey(key.to_string()));
        }
        self.config = serde_json::from_value(tree)
            .map_err(|e| ConfigError::InvalidValue(format!("{}: {}", key, e)))?;
        self.save()
    }

    fn reset(&mut self) -> Result<(), ConfigError> {
        self.config = AppConfig::default();
        self.save()
    }

    fn config_path(&self) -> &Path {
        &self.path
    }
}
