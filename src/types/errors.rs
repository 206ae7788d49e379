use std::fmt;

// === StorageError ===

/// Errors raised by the persistent key-value backend.
#[derive(Debug)]
pub enum StorageError {
    /// Database operation failed.
    DatabaseError(String),
    /// The database file or its directory could not be prepared.
    IoError(String),
    /// A record could not be serialized for storage.
    SerializationError(String),
    /// The backend lock was poisoned by a panicking writer.
    Poisoned,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
            StorageError::IoError(msg) => write!(f, "Storage I/O error: {}", msg),
            StorageError::SerializationError(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
            StorageError::Poisoned => write!(f, "Storage lock poisoned"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::DatabaseError(err.to_string())
    }
}

// === LinkError ===

/// Errors related to link collection operations.
#[derive(Debug)]
pub enum LinkError {
    /// Link with the given ID was not found.
    NotFound(String),
    /// A required field was missing or blank.
    MissingField(&'static str),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::NotFound(id) => write!(f, "Link not found: {}", id),
            LinkError::MissingField(field) => write!(f, "Missing required field: {}", field),
        }
    }
}

impl std::error::Error for LinkError {}

// === CredentialError ===

/// Errors related to the admin password gate.
#[derive(Debug)]
pub enum CredentialError {
    /// The supplied password does not match the stored one.
    Mismatch,
    /// An empty password cannot be adopted.
    Empty,
    /// Persisting the password failed.
    StorageError(String),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::Mismatch => write!(f, "Incorrect password"),
            CredentialError::Empty => write!(f, "Password cannot be empty"),
            CredentialError::StorageError(msg) => {
                write!(f, "Credential storage error: {}", msg)
            }
        }
    }
}

impl std::error::Error for CredentialError {}

// === RemoteError ===

/// Errors raised by the remote blob host.
#[derive(Debug)]
pub enum RemoteError {
    /// The request never produced a response.
    NetworkError(String),
    /// The host answered with a non-success status.
    HttpStatus(u16),
    /// The response body could not be decoded.
    DecodeError(String),
    /// The token was rejected by the host.
    Unauthorized,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::NetworkError(msg) => write!(f, "Remote network error: {}", msg),
            RemoteError::HttpStatus(code) => write!(f, "Remote returned HTTP {}", code),
            RemoteError::DecodeError(msg) => write!(f, "Remote decode error: {}", msg),
            RemoteError::Unauthorized => write!(f, "Remote rejected the access token"),
        }
    }
}

impl std::error::Error for RemoteError {}

// === SyncError ===

/// Errors surfaced by the manual sync flows.
#[derive(Debug)]
pub enum SyncError {
    /// Sync has not been configured or is switched off.
    NotConfigured,
    /// The token failed the liveness check.
    InvalidToken,
    /// Restoring needs explicit confirmation from the user.
    NotConfirmed,
    /// The remote blob is missing or holds no valid envelope.
    NoRemoteData,
    /// The remote call failed.
    Remote(RemoteError),
    /// Writing the result locally failed.
    StorageError(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::NotConfigured => write!(f, "Cloud sync is not configured"),
            SyncError::InvalidToken => write!(f, "Invalid GitHub token"),
            SyncError::NotConfirmed => write!(f, "Restore requires confirmation"),
            SyncError::NoRemoteData => write!(f, "No valid data found in the cloud"),
            SyncError::Remote(err) => write!(f, "Sync failed: {}", err),
            SyncError::StorageError(msg) => write!(f, "Sync storage error: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Remote(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RemoteError> for SyncError {
    fn from(err: RemoteError) -> Self {
        SyncError::Remote(err)
    }
}

// === BackupError ===

/// Errors related to file-based backup export and import.
#[derive(Debug)]
pub enum BackupError {
    /// The file content is not a valid backup envelope.
    InvalidFile,
    /// An I/O error occurred while reading or writing the file.
    IoError(String),
    /// Applying the imported snapshot failed.
    StorageError(String),
}

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupError::InvalidFile => write!(f, "Invalid backup file"),
            BackupError::IoError(msg) => write!(f, "Backup I/O error: {}", msg),
            BackupError::StorageError(msg) => write!(f, "Backup storage error: {}", msg),
        }
    }
}

impl std::error::Error for BackupError {}

// === ConfigError ===

/// Errors related to configuration management.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the config file.
    IoError(String),
    /// Failed to serialize or deserialize the config.
    SerializationError(String),
    /// The provided config key is invalid.
    InvalidKey(String),
    /// The provided config value is invalid.
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::SerializationError(msg) => {
                write!(f, "Config serialization error: {}", msg)
            }
            ConfigError::InvalidKey(key) => write!(f, "Invalid config key: {}", key),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
