//! Recording in-memory stand-in for the remote blob host.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use nebula_nav::services::gist_client::RemoteBlobService;
use nebula_nav::types::backup::BackupEnvelope;
use nebula_nav::types::errors::RemoteError;

pub const VALID_TOKEN: &str = "ghp_valid";
pub const NEW_BLOB_ID: &str = "gist-new";

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Validate(String),
    Create(BackupEnvelope),
    Update(String, BackupEnvelope),
    Get(String),
}

#[derive(Default)]
pub struct MockRemote {
    blob: Mutex<Option<BackupEnvelope>>,
    calls: Mutex<Vec<RemoteCall>>,
    failing: AtomicBool,
    /// When set, `get` snapshots the blob and then waits for a permit.
    get_gate: Mutex<Option<Arc<Semaphore>>>,
}

impl MockRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_blob(envelope: BackupEnvelope) -> Arc<Self> {
        let remote = Self::default();
        *remote.blob.lock().unwrap() = Some(envelope);
        Arc::new(remote)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Makes every `get` block until the returned semaphore gets a permit.
    pub fn gate_gets(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.get_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn blob(&self) -> Option<BackupEnvelope> {
        self.blob.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(String, BackupEnvelope)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RemoteCall::Update(id, env) => Some((id, env)),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: RemoteCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_failing(&self) -> Result<(), RemoteError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RemoteError::NetworkError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteBlobService for MockRemote {
    async fn validate_credential(&self, token: &str) -> bool {
        self.record(RemoteCall::Validate(token.to_string()));
        !self.failing.load(Ordering::SeqCst) && token == VALID_TOKEN
    }

    async fn create(&self, _token: &str, envelope: &BackupEnvelope) -> Result<String, RemoteError> {
        self.record(RemoteCall::Create(envelope.clone()));
        self.check_failing()?;
        *self.blob.lock().unwrap() = Some(envelope.clone());
        Ok(NEW_BLOB_ID.to_string())
    }

    async fn update(&self, _token: &str, blob_id: &str, envelope: &BackupEnvelope) -> Result<(), RemoteError> {
        self.record(RemoteCall::Update(blob_id.to_string(), envelope.clone()));
        self.check_failing()?;
        *self.blob.lock().unwrap() = Some(envelope.clone());
        Ok(())
    }

    async fn get(&self, _token: &str, blob_id: &str) -> Result<Option<BackupEnvelope>, RemoteError> {
        self.record(RemoteCall::Get(blob_id.to_string()));
        let snapshot = self.blob();
        let gate = self.get_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        self.check_failing()?;
        Ok(snapshot)
    }
}
