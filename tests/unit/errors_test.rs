use nebula_nav::types::errors::*;

// === StorageError Tests ===

#[test]
fn storage_error_display_variants() {
    assert_eq!(
        StorageError::DatabaseError("disk full".to_string()).to_string(),
        "Storage database error: disk full"
    );
    assert_eq!(
        StorageError::SerializationError("bad utf8".to_string()).to_string(),
        "Storage serialization error: bad utf8"
    );
    assert_eq!(
        StorageError::IoError("cannot create /x".to_string()).to_string(),
        "Storage I/O error: cannot create /x"
    );
    assert_eq!(StorageError::Poisoned.to_string(), "Storage lock poisoned");
}

// === LinkError Tests ===

#[test]
fn link_error_display_variants() {
    assert_eq!(LinkError::NotFound("42".to_string()).to_string(), "Link not found: 42");
    assert_eq!(
        LinkError::MissingField("url").to_string(),
        "Missing required field: url"
    );
}

// === CredentialError Tests ===

#[test]
fn credential_error_display_variants() {
    assert_eq!(CredentialError::Mismatch.to_string(), "Incorrect password");
    assert_eq!(CredentialError::Empty.to_string(), "Password cannot be empty");
}

// === RemoteError / SyncError Tests ===

#[test]
fn remote_error_display_variants() {
    assert_eq!(RemoteError::HttpStatus(404).to_string(), "Remote returned HTTP 404");
    assert_eq!(
        RemoteError::Unauthorized.to_string(),
        "Remote rejected the access token"
    );
}

#[test]
fn sync_error_wraps_remote_error_as_source() {
    let err: SyncError = RemoteError::NetworkError("timeout".to_string()).into();
    assert_eq!(err.to_string(), "Sync failed: Remote network error: timeout");

    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.source().is_some());
}

#[test]
fn sync_error_plain_variants_have_no_source() {
    let err: Box<dyn std::error::Error> = Box::new(SyncError::NotConfirmed);
    assert!(err.source().is_none());
    assert_eq!(SyncError::InvalidToken.to_string(), "Invalid GitHub token");
}

// === BackupError / ConfigError Tests ===

#[test]
fn backup_error_display_variants() {
    assert_eq!(BackupError::InvalidFile.to_string(), "Invalid backup file");
    assert_eq!(
        BackupError::IoError("denied".to_string()).to_string(),
        "Backup I/O error: denied"
    );
}

#[test]
fn config_error_display_variants() {
    assert_eq!(
        ConfigError::InvalidKey("remote.nope".to_string()).to_string(),
        "Invalid config key: remote.nope"
    );
    assert_eq!(
        ConfigError::InvalidValue("not a number".to_string()).to_string(),
        "Invalid config value: not a number"
    );
}
