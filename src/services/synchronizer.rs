//! Synchronizer for Nebula Nav.
//!
//! Moves whole snapshots between the local tier and the remote blob. There is
//! no merge and no timestamp comparison: every transfer overwrites the other
//! side completely.
//!
//! - startup: a detached, silent pull whose result overwrites local state
//!   (discarded if a local edit landed while it was in flight)
//! - local mutation: a detached push of the post-mutation snapshot
//! - enable: seeds the remote from local (create or update)
//! - restore: an awaited, confirmed pull that always overwrites local state

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::managers::dashboard_state::SharedState;
use crate::services::backup_codec;
use crate::services::gist_client::RemoteBlobService;
use crate::services::local_store::{LocalStore, LocalStoreTrait};
use crate::types::backup::BackupEnvelope;
use crate::types::errors::SyncError;
use crate::types::sync::{SyncConfig, SyncState, SyncStatus};

/// Trait defining the synchronization flows.
#[async_trait::async_trait]
pub trait SynchronizerTrait {
    fn status(&self) -> SyncStatus;
    /// Starts the silent startup pull. Returns whether a task was spawned.
    fn spawn_startup_pull(&self) -> bool;
    /// Starts a push of the current snapshot. Returns whether a task was spawned.
    fn push_after_mutation(&self) -> bool;
    async fn enable_sync(&self, token: &str, blob_id: Option<&str>) -> Result<SyncConfig, SyncError>;
    fn disable_sync(&self) -> Result<(), SyncError>;
    async fn restore_from_cloud(&self, confirmed: bool) -> Result<BackupEnvelope, SyncError>;
    /// Awaits every background task spawned so far.
    async fn wait_idle(&self);
}

/// Synchronizer over a local store, a remote blob service, and the shared UI state.
#[derive(Clone)]
pub struct Synchronizer {
    store: LocalStore,
    remote: Arc<dyn RemoteBlobService>,
    state: SharedState,
    sync_state: Arc<Mutex<SyncState>>,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl Synchronizer {
    pub fn new(store: LocalStore, remote: Arc<dyn RemoteBlobService>, state: SharedState) -> Self {
        let initial = match store.get_sync_config() {
            Some(cfg) if cfg.is_active() => SyncState::Idle,
            _ => SyncState::LocalOnly,
        };
        Self {
            store,
            remote,
            state,
            sync_state: Arc::new(Mutex::new(initial)),
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The persisted sync config, only when sync should actually run.
    pub fn active_config(&self) -> Option<SyncConfig> {
        self.store.get_sync_config().filter(SyncConfig::is_active)
    }

    /// Current links, site config and password as an envelope.
    pub fn snapshot_envelope(&self) -> BackupEnvelope {
        let (links, config) = match self.state.lock() {
            Ok(state) => state.snapshot(),
            Err(poisoned) => poisoned.into_inner().snapshot(),
        };
        let credential = self.store.get_credential();
        backup_codec::build_envelope(&links, &config, credential.as_deref())
    }

    fn set_state(&self, next: SyncState) {
        if let Ok(mut current) = self.sync_state.lock() {
            *current = next;
        }
    }

    fn current_generation(&self) -> Option<u64> {
        self.state.lock().ok().map(|s| s.generation())
    }

    /// Overwrites memory and the local store with a remote envelope.
    ///
    /// With `expected_generation` set, the envelope is dropped if any local
    /// edit happened since that generation was read. Returns whether it applied.
    /// The store writes run under the state lock, so an edit cannot slip in
    /// between the generation check and the write-through.
    fn apply_envelope(&self, envelope: &BackupEnvelope, expected_generation: Option<u64>) -> bool {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(_) => {
                warn!("dashboard state lock poisoned, remote data not applied");
                return false;
            }
        };
        if let Some(expected) = expected_generation {
            if state.generation() != expected {
                info!(
                    expected,
                    actual = state.generation(),
                    "discarding stale pull, local state changed while it was in flight"
                );
                return false;
            }
        }
        state.replace(envelope.links.clone(), envelope.site_config.clone());

        // Store failures are logged by the store and do not undo the in-memory overwrite.
        let _ = self.store.save_links(&envelope.links);
        let _ = self.store.save_site_config(&envelope.site_config);
        if let Some(secret) = envelope.auth_check.as_deref().filter(|s| !s.is_empty()) {
            let _ = self.store.set_credential(secret);
        }
        true
    }

    /// Refreshes `lastSync` if the config still points at the same blob.
    fn touch_last_sync(&self, gist_id: &str) {
        if let Some(mut cfg) = self.store.get_sync_config() {
            if cfg.gist_id == gist_id {
                cfg.last_sync = Utc::now().timestamp_millis();
                let _ = self.store.save_sync_config(&cfg);
            }
        }
    }

    /// Spawns onto the ambient Tokio runtime and tracks the handle for `wait_idle`.
    fn spawn_tracked<F>(&self, task: F) -> bool
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let rt = match Handle::try_current() {
            Ok(rt) => rt,
            Err(_) => {
                warn!("no async runtime available, background sync skipped");
                return false;
            }
        };
        let handle = rt.spawn(task);
        // If the lock is poisoned the task still runs, just untracked.
        if let Ok(mut pending) = self.pending.lock() {
            pending.retain(|h| !h.is_finished());
            pending.push(handle);
        }
        true
    }

    /// Silent pull on startup: failures are logged, never surfaced.
    pub async fn pull_silently(&self) {
        let Some(cfg) = self.active_config() else {
            return;
        };
        let Some(generation) = self.current_generation() else {
            return;
        };
        self.set_state(SyncState::InProgress);

        match self.remote.get(&cfg.github_token, &cfg.gist_id).await {
            Ok(Some(envelope)) => {
                if self.apply_envelope(&envelope, Some(generation)) {
                    info!(links = envelope.links.len(), "applied remote snapshot on startup");
                    self.touch_last_sync(&cfg.gist_id);
                }
                self.set_state(SyncState::Idle);
            }
            Ok(None) => {
                warn!(gist_id = %cfg.gist_id, "remote blob holds no valid snapshot, keeping local data");
                self.set_state(SyncState::Error("no valid data in remote blob".to_string()));
            }
            Err(e) => {
                warn!(error = %e, "auto-sync failed, keeping local data");
                self.set_state(SyncState::Error(e.to_string()));
            }
        }
    }
}

#[async_trait::async_trait]
impl SynchronizerTrait for Synchronizer {
    fn status(&self) -> SyncStatus {
        let state = self
            .sync_state
            .lock()
            .map(|s| s.clone())
            .unwrap_or(SyncState::LocalOnly);
        let cfg = self.store.get_sync_config();
        SyncStatus {
            state,
            enabled: cfg.as_ref().map(SyncConfig::is_active).unwrap_or(false),
            gist_id: cfg.as_ref().map(|c| c.gist_id.clone()),
            last_sync: cfg.as_ref().map(|c| c.last_sync),
        }
    }

    fn spawn_startup_pull(&self) -> bool {
        if self.active_config().is_none() {
            return false;
        }
        let this = self.clone();
        self.spawn_tracked(async move { this.pull_silently().await })
    }

    /// Pushes the current snapshot if sync is active. Never blocks the caller.
    fn push_after_mutation(&self) -> bool {
        let Some(cfg) = self.active_config() else {
            return false;
        };
        // Snapshot now, so the push carries exactly the post-mutation state.
        let envelope = self.snapshot_envelope();

        let this = self.clone();
        self.spawn_tracked(async move {
            this.set_state(SyncState::InProgress);
            match this.remote.update(&cfg.github_token, &cfg.gist_id, &envelope).await {
                Ok(()) => {
                    debug!(gist_id = %cfg.gist_id, "pushed local changes");
                    this.touch_last_sync(&cfg.gist_id);
                    this.set_state(SyncState::Idle);
                }
                Err(e) => {
                    warn!(error = %e, "background push failed");
                    this.set_state(SyncState::Error(e.to_string()));
                }
            }
        })
    }

    /// Validates the token, seeds the remote from local, then persists the config.
    ///
    /// An existing blob id is overwritten with local data; without one a new
    /// blob is created. Nothing is saved locally unless the remote call succeeds.
    async fn enable_sync(&self, token: &str, blob_id: Option<&str>) -> Result<SyncConfig, SyncError> {
        let token = token.trim();
        if token.is_empty() || !self.remote.validate_credential(token).await {
            return Err(SyncError::InvalidToken);
        }

        self.set_state(SyncState::InProgress);
        let envelope = self.snapshot_envelope();
        let blob_id = blob_id.map(str::trim).filter(|id| !id.is_empty());

        let result = match blob_id {
            Some(id) => self
                .remote
                .update(token, id, &envelope)
                .await
                .map(|()| id.to_string()),
            None => self.remote.create(token, &envelope).await,
        };

        let gist_id = match result {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "enabling sync failed");
                self.set_state(SyncState::Error(e.to_string()));
                return Err(SyncError::Remote(e));
            }
        };

        let cfg = SyncConfig {
            enabled: true,
            github_token: token.to_string(),
            gist_id,
            last_sync: Utc::now().timestamp_millis(),
        };
        self.store
            .save_sync_config(&cfg)
            .map_err(|e| SyncError::StorageError(e.to_string()))?;
        self.set_state(SyncState::Idle);
        info!(gist_id = %cfg.gist_id, "cloud sync enabled");
        Ok(cfg)
    }

    fn disable_sync(&self) -> Result<(), SyncError> {
        self.store
            .clear_sync_config()
            .map_err(|e| SyncError::StorageError(e.to_string()))?;
        self.set_state(SyncState::LocalOnly);
        info!("cloud sync disabled");
        Ok(())
    }

    /// Confirmed, awaited pull. Local state is untouched on any failure.
    async fn restore_from_cloud(&self, confirmed: bool) -> Result<BackupEnvelope, SyncError> {
        if !confirmed {
            return Err(SyncError::NotConfirmed);
        }
        let cfg = self.active_config().ok_or(SyncError::NotConfigured)?;
        self.set_state(SyncState::InProgress);

        match self.remote.get(&cfg.github_token, &cfg.gist_id).await {
            Ok(Some(envelope)) => {
                self.apply_envelope(&envelope, None);
                self.touch_last_sync(&cfg.gist_id);
                self.set_state(SyncState::Idle);
                info!(links = envelope.links.len(), "restored from cloud");
                Ok(envelope)
            }
            Ok(None) => {
                self.set_state(SyncState::Error("no valid data in remote blob".to_string()));
                Err(SyncError::NoRemoteData)
            }
            Err(e) => {
                warn!(error = %e, "restore from cloud failed");
                self.set_state(SyncState::Error(e.to_string()));
                Err(SyncError::Remote(e))
            }
        }
    }

    async fn wait_idle(&self) {
        loop {
            let batch: Vec<JoinHandle<()>> = match self.pending.lock() {
                Ok(mut pending) => pending.drain(..).collect(),
                Err(_) => return,
            };
            if batch.is_empty() {
                return;
            }
            for handle in batch {
                let _ = handle.await;
            }
        }
    }
}
