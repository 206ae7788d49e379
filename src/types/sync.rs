use serde::{Deserialize, Serialize};

/// Persisted remote sync settings. Absent until sync has been enabled once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    pub enabled: bool,
    pub github_token: String,
    pub gist_id: String,
    /// Epoch milliseconds of the last successful push or pull.
    pub last_sync: i64,
}

impl SyncConfig {
    /// Sync only runs when it is switched on and both remote coordinates are known.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.github_token.is_empty() && !self.gist_id.is_empty()
    }
}

/// Per-session state of the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message")]
pub enum SyncState {
    LocalOnly,
    Idle,
    InProgress,
    Error(String),
}

impl SyncState {
    pub fn label(&self) -> &'static str {
        match self {
            SyncState::LocalOnly => "local-only",
            SyncState::Idle => "idle",
            SyncState::InProgress => "in-progress",
            SyncState::Error(_) => "error",
        }
    }
}

/// Snapshot of sync status reported to the UI. Never carries the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub state: SyncState,
    pub enabled: bool,
    pub gist_id: Option<String>,
    pub last_sync: Option<i64>,
}
