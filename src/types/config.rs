use serde::{Deserialize, Serialize};

/// Top-level application configuration, persisted as `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub remote: RemoteConfig,
    pub backup: BackupConfig,
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            remote: RemoteConfig::default(),
            backup: BackupConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

/// Where the local key-value database lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Explicit database file. Falls back to the platform data directory.
    pub database_path: Option<String>,
}

/// Remote blob host settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RemoteConfig {
    pub api_base_url: String,
    pub gist_file_name: String,
    pub gist_description: String,
    /// Request timeout. `None` leaves timeouts to the HTTP stack.
    pub timeout_secs: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            gist_file_name: "nebula_nav_data.json".to_string(),
            gist_description: "Nebula Nav Data Storage".to_string(),
            timeout_secs: None,
        }
    }
}

/// File export settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BackupConfig {
    /// Directory for exported backup files. Falls back to the data directory.
    pub export_dir: Option<String>,
}
