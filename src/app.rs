//! App Core for Nebula Nav.
//!
//! Central struct holding the in-memory dashboard state and the services
//! around it. Every mutation follows the same path: change memory, write
//! through to the local store, then hand a snapshot to the synchronizer.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::database::{Database, KeyValueStore};
use crate::managers::dashboard_state::{DashboardState, SharedState};
use crate::managers::link_manager::{LinkManager, LinkManagerTrait};
use crate::services::backup_codec;
use crate::services::config_engine::{self, ConfigEngine, ConfigEngineTrait};
use crate::services::credential_gate::{CredentialGate, LoginOutcome};
use crate::services::gist_client::{GistClient, RemoteBlobService};
use crate::services::local_store::{LocalStore, LocalStoreTrait};
use crate::services::synchronizer::{Synchronizer, SynchronizerTrait};
use crate::types::backup::BackupEnvelope;
use crate::types::config::AppConfig;
use crate::types::errors::{
    BackupError, ConfigError, CredentialError, LinkError, StorageError, SyncError,
};
use crate::types::link::{Link, LinkDraft};
use crate::types::site::SiteConfig;
use crate::types::sync::{SyncConfig, SyncStatus};

/// Central application struct.
pub struct App {
    settings: Mutex<ConfigEngine>,
    store: LocalStore,
    state: SharedState,
    synchronizer: Synchronizer,
    gate: CredentialGate,
}

impl App {
    /// Opens the SQLite store named by the loaded config and wires the Gist client.
    pub fn new(settings: ConfigEngine) -> Result<Self, Box<dyn std::error::Error>> {
        let config = settings.get_config().clone();
        let db_path = config_engine::database_path(&config);
        let db = Database::open(&db_path)?;
        let remote = GistClient::new(&config.remote)?;
        info!(path = %db_path.display(), "opened local store");
        Ok(Self::with_parts(Arc::new(db), Arc::new(remote), settings))
    }

    /// Builds an app over explicit backends. Loads local data immediately.
    pub fn with_parts(
        backend: Arc<dyn KeyValueStore>,
        remote: Arc<dyn RemoteBlobService>,
        settings: ConfigEngine,
    ) -> Self {
        let store = LocalStore::new(backend);
        let state = DashboardState::new(store.get_links(), store.get_site_config()).shared();
        let synchronizer = Synchronizer::new(store.clone(), remote, state.clone());
        let gate = CredentialGate::new(store.clone());
        Self {
            settings: Mutex::new(settings),
            store,
            state,
            synchronizer,
            gate,
        }
    }

    /// Kicks off the silent background pull when sync is configured.
    ///
    /// Local data is already loaded, so the caller can serve requests right away.
    pub fn startup(&self) -> bool {
        self.synchronizer.spawn_startup_pull()
    }

    /// Waits for in-flight background pushes and pulls to settle.
    pub async fn shutdown(&self) {
        self.synchronizer.wait_idle().await;
    }

    // Store writes happen while this guard is held, so a background pull can
    // never land between a local edit and its write-through.
    fn lock_state(&self) -> MutexGuard<'_, DashboardState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock_settings(&self) -> MutexGuard<'_, ConfigEngine> {
        match self.settings.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn persist_links(&self, links: &[Link]) {
        // Failures are logged by the store; in-memory state stays authoritative.
        let _ = self.store.save_links(links);
    }

    /// Runs a link edit, writes the result through, then pushes.
    fn mutate_links<T>(
        &self,
        edit: impl FnOnce(&mut LinkManager) -> Result<T, LinkError>,
    ) -> Result<T, LinkError> {
        let value = {
            let mut state = self.lock_state();
            let value = state.edit_links(edit)?;
            self.persist_links(state.links().list_links());
            value
        };
        self.synchronizer.push_after_mutation();
        Ok(value)
    }

    // ─── Browse ───

    pub fn links(&self) -> Vec<Link> {
        self.lock_state().links().list_links().to_vec()
    }

    pub fn categories(&self) -> Vec<String> {
        self.lock_state().links().categories()
    }

    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<Link> {
        self.lock_state().links().filter_links(query, category)
    }

    pub fn site_config(&self) -> SiteConfig {
        self.lock_state().site_config().clone()
    }

    // ─── Admin: links and site ───

    pub fn add_link(&self, draft: LinkDraft) -> Result<Link, LinkError> {
        let now = Utc::now().timestamp_millis();
        self.mutate_links(|links| links.add_link(draft, now))
    }

    pub fn update_link(&self, id: &str, draft: LinkDraft) -> Result<Link, LinkError> {
        self.mutate_links(|links| links.update_link(id, draft))
    }

    pub fn delete_link(&self, id: &str) -> Result<Link, LinkError> {
        self.mutate_links(|links| links.remove_link(id))
    }

    /// Replaces the site config wholesale.
    pub fn save_site_config(&self, config: SiteConfig) -> Result<(), StorageError> {
        let saved = {
            let mut state = self.lock_state();
            state.set_site_config(config.clone());
            self.store.save_site_config(&config)
        };
        self.synchronizer.push_after_mutation();
        saved
    }

    // ─── Credential gate ───

    pub fn is_first_run(&self) -> bool {
        self.gate.is_first_run()
    }

    /// Logs in, adopting the password on first run.
    ///
    /// Adoption counts as a mutation so the remote snapshot gains the secret.
    pub fn login(&self, password: &str) -> Result<LoginOutcome, CredentialError> {
        let outcome = {
            let mut state = self.lock_state();
            let outcome = self.gate.login(password)?;
            if outcome == LoginOutcome::Adopted {
                state.touch();
            }
            outcome
        };
        if outcome == LoginOutcome::Adopted {
            self.synchronizer.push_after_mutation();
        }
        Ok(outcome)
    }

    pub fn check_credential(&self, password: &str) -> bool {
        self.gate.check(password)
    }

    /// Changes the password and pushes at once, so a later restore elsewhere
    /// does not bring back the old one.
    pub fn change_password(&self, current: &str, new: &str) -> Result<(), CredentialError> {
        {
            let mut state = self.lock_state();
            self.gate.change(current, new)?;
            state.touch();
        }
        self.synchronizer.push_after_mutation();
        Ok(())
    }

    // ─── Sync ───

    pub fn sync_status(&self) -> SyncStatus {
        self.synchronizer.status()
    }

    pub async fn enable_sync(&self, token: &str, gist_id: Option<&str>) -> Result<SyncConfig, SyncError> {
        self.synchronizer.enable_sync(token, gist_id).await
    }

    pub fn disable_sync(&self) -> Result<(), SyncError> {
        self.synchronizer.disable_sync()
    }

    pub async fn restore_from_cloud(&self, confirmed: bool) -> Result<BackupEnvelope, SyncError> {
        self.synchronizer.restore_from_cloud(confirmed).await
    }

    // ─── File backup ───

    /// Envelope JSON for the current state, password included.
    pub fn export_backup(&self) -> String {
        backup_codec::encode_envelope(&self.synchronizer.snapshot_envelope())
    }

    /// Writes a date-stamped export into `dir` (or the configured export dir).
    pub fn export_backup_to_file(&self, dir: Option<&Path>) -> Result<PathBuf, BackupError> {
        let dir = match dir {
            Some(d) => d.to_path_buf(),
            None => config_engine::export_dir(self.lock_settings().get_config()),
        };
        let path = backup_codec::export_to_file(&dir, &self.export_backup(), Utc::now())?;
        info!(path = %path.display(), "exported backup");
        Ok(path)
    }

    /// Replaces links and site config from backup text, and the password when
    /// the backup carries one. Pushes when sync is active.
    pub fn import_backup(&self, text: &str) -> Result<BackupEnvelope, BackupError> {
        let envelope = backup_codec::process_backup(text).ok_or_else(|| {
            warn!("rejected invalid backup import");
            BackupError::InvalidFile
        })?;
        self.apply_import(&envelope)?;
        Ok(envelope)
    }

    pub fn import_backup_file(&self, path: &Path) -> Result<BackupEnvelope, BackupError> {
        let envelope = backup_codec::import_from_file(path)?;
        self.apply_import(&envelope)?;
        Ok(envelope)
    }

    fn apply_import(&self, envelope: &BackupEnvelope) -> Result<(), BackupError> {
        let to_backup_err = |e: StorageError| BackupError::StorageError(e.to_string());
        {
            let mut state = self.lock_state();
            state.replace(envelope.links.clone(), envelope.site_config.clone());
            state.touch();
            self.store.save_links(&envelope.links).map_err(to_backup_err)?;
            self.store
                .save_site_config(&envelope.site_config)
                .map_err(to_backup_err)?;
            if let Some(secret) = envelope.auth_check.as_deref().filter(|s| !s.is_empty()) {
                self.store.set_credential(secret).map_err(to_backup_err)?;
            }
        }
        info!(links = envelope.links.len(), "imported backup");
        self.synchronizer.push_after_mutation();
        Ok(())
    }

    // ─── Configuration ───

    pub fn config(&self) -> AppConfig {
        self.lock_settings().get_config().clone()
    }

    pub fn config_path(&self) -> PathBuf {
        self.lock_settings().config_path().to_path_buf()
    }

    /// Updates one config field by dotted key and saves the file.
    ///
    /// `backup.export_dir` applies at once; storage and remote settings are
    /// read on the next start.
    pub fn set_config_value(&self, key: &str, value: Value) -> Result<AppConfig, ConfigError> {
        let mut settings = self.lock_settings();
        settings.set_value(key, value)?;
        info!(key, "config updated");
        Ok(settings.get_config().clone())
    }

    pub fn reset_config(&self) -> Result<AppConfig, ConfigError> {
        let mut settings = self.lock_settings();
        settings.reset()?;
        info!("config reset to defaults");
        Ok(settings.get_config().clone())
    }
}
