//! Backup Codec for Nebula Nav.
//!
//! Encodes and decodes the versioned JSON envelope shared by file export,
//! file import, and the remote sync payload.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::backup::{BackupEnvelope, BACKUP_VERSION};
use crate::types::errors::BackupError;
use crate::types::link::Link;
use crate::types::site::SiteConfig;

/// Builds an envelope stamped with the current time.
///
/// The credential is embedded verbatim when one is set, so restoring the
/// envelope elsewhere also restores admin access.
pub fn build_envelope(links: &[Link], config: &SiteConfig, credential: Option<&str>) -> BackupEnvelope {
    BackupEnvelope {
        version: BACKUP_VERSION,
        date: Utc::now().timestamp_millis(),
        links: links.to_vec(),
        site_config: config.clone(),
        auth_check: credential.filter(|c| !c.is_empty()).map(str::to_string),
    }
}

/// Serializes an envelope as pretty JSON.
pub fn encode_envelope(envelope: &BackupEnvelope) -> String {
    // Plain data structs with string keys: serialization cannot fail.
    serde_json::to_string_pretty(envelope).unwrap_or_default()
}

/// Produces the envelope JSON for the given snapshot.
pub fn create_backup(links: &[Link], config: &SiteConfig, credential: Option<&str>) -> String {
    encode_envelope(&build_envelope(links, config, credential))
}

/// Parses and validates backup text. Returns `None` for anything malformed.
///
/// Rejects invalid JSON, a missing or non-array `links`, a missing
/// `siteConfig`, link entries that do not match the schema, duplicate link
/// ids, and any `version` other than the one this build writes.
pub fn process_backup(text: &str) -> Option<BackupEnvelope> {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "backup is not valid JSON");
            return None;
        }
    };
    decode_value(value)
}

/// Validates an already-parsed JSON value as an envelope.
pub fn decode_value(value: Value) -> Option<BackupEnvelope> {
    let obj = value.as_object()?;

    if !obj.get("links").map(Value::is_array).unwrap_or(false) {
        debug!("backup rejected: links missing or not an array");
        return None;
    }
    if obj.get("siteConfig").map(Value::is_null).unwrap_or(true) {
        debug!("backup rejected: siteConfig missing");
        return None;
    }
    match obj.get("version").and_then(Value::as_u64) {
        Some(v) if v == u64::from(BACKUP_VERSION) => {}
        other => {
            warn!(version = ?other, "backup rejected: unsupported version");
            return None;
        }
    }

    let envelope = match serde_json::from_value::<BackupEnvelope>(value) {
        Ok(envelope) => envelope,
        Err(e) => {
            debug!(error = %e, "backup rejected: schema mismatch");
            return None;
        }
    };

    let mut seen = HashSet::with_capacity(envelope.links.len());
    if let Some(dup) = envelope.links.iter().find(|l| !seen.insert(l.id.as_str())) {
        warn!(id = %dup.id, "backup rejected: duplicate link id");
        return None;
    }
    Some(envelope)
}

/// File name for an export made on the given date, e.g. `nebula-nav-backup-2026-10-18.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("nebula-nav-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Writes backup text into `dir` under a date-stamped name and returns the path.
///
/// # Errors
/// Returns `BackupError::IoError` if the directory or file cannot be written.
pub fn export_to_file(dir: &Path, backup_text: &str, at: DateTime<Utc>) -> Result<PathBuf, BackupError> {
    fs::create_dir_all(dir)
        .map_err(|e| BackupError::IoError(format!("Failed to create export directory: {}", e)))?;
    let path = dir.join(export_file_name(at.date_naive()));
    fs::write(&path, backup_text)
        .map_err(|e| BackupError::IoError(format!("Failed to write backup file: {}", e)))?;
    Ok(path)
}

/// Reads and decodes a backup file.
///
/// # Errors
/// `BackupError::IoError` when unreadable, `BackupError::InvalidFile` when malformed.
pub fn import_from_file(path: &Path) -> Result<BackupEnvelope, BackupError> {
    let text = fs::read_to_string(path)
        .map_err(|e| BackupError::IoError(format!("Failed to read backup file: {}", e)))?;
    process_backup(&text).ok_or(BackupError::InvalidFile)
}
