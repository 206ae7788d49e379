use serde::{Deserialize, Serialize};

use super::link::Link;
use super::site::SiteConfig;

/// The only envelope schema version this build reads or writes.
pub const BACKUP_VERSION: u32 = 1;

/// Versioned snapshot used for file export/import and as the remote sync payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEnvelope {
    pub version: u32,
    /// Creation time in epoch milliseconds. Hand-written files may omit it.
    #[serde(default)]
    pub date: i64,
    pub links: Vec<Link>,
    pub site_config: SiteConfig,
    /// The shared admin password, carried in plain text so a restore on another
    /// device also restores admin access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_check: Option<String>,
}
