//! Remote Blob Service for Nebula Nav.
//!
//! [`RemoteBlobService`] is the contract the synchronizer consumes: a single
//! JSON document addressed by an opaque id. [`GistClient`] implements it on
//! top of the GitHub Gist REST API, storing the envelope as one named file
//! inside a private gist.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::services::backup_codec;
use crate::types::backup::BackupEnvelope;
use crate::types::config::RemoteConfig;
use crate::types::errors::RemoteError;

/// Trait defining the remote document store operations.
///
/// Every call may fail; callers treat any failure as "remote unavailable".
#[async_trait]
pub trait RemoteBlobService: Send + Sync {
    /// Liveness/auth check for a token. Never errors, only answers.
    async fn validate_credential(&self, token: &str) -> bool;
    /// Creates a new blob seeded with the envelope and returns its id.
    async fn create(&self, token: &str, envelope: &BackupEnvelope) -> Result<String, RemoteError>;
    /// Replaces the content of an existing blob.
    async fn update(&self, token: &str, blob_id: &str, envelope: &BackupEnvelope) -> Result<(), RemoteError>;
    /// Fetches a blob. `Ok(None)` when it is missing or holds no valid envelope.
    async fn get(&self, token: &str, blob_id: &str) -> Result<Option<BackupEnvelope>, RemoteError>;
}

/// GitHub Gist backed implementation of [`RemoteBlobService`].
pub struct GistClient {
    http: Client,
    api_base_url: String,
    file_name: String,
    description: String,
}

impl GistClient {
    /// Creates a client from the remote section of the app config.
    ///
    /// # Errors
    /// Returns `RemoteError::NetworkError` if the HTTP client cannot be built.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let mut builder = Client::builder()
            .user_agent(concat!("nebula-nav/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| RemoteError::NetworkError(e.to_string()))?;

        Ok(Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            file_name: config.gist_file_name.clone(),
            description: config.gist_description.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    fn auth_header(token: &str) -> String {
        format!("token {}", token)
    }
}

/// Request body for `POST /gists`: a private gist holding one file.
pub fn create_gist_body(description: &str, file_name: &str, envelope: &BackupEnvelope) -> Value {
    json!({
        "description": description,
        "public": false,
        "files": {
            file_name: { "content": backup_codec::encode_envelope(envelope) }
        }
    })
}

/// Request body for `PATCH /gists/{id}`: replaces only the data file.
pub fn update_gist_body(file_name: &str, envelope: &BackupEnvelope) -> Value {
    json!({
        "files": {
            file_name: { "content": backup_codec::encode_envelope(envelope) }
        }
    })
}

/// Pulls the envelope out of a `GET /gists/{id}` response.
///
/// Returns `None` when the data file is absent, empty, or not a valid envelope.
pub fn extract_envelope(gist: &Value, file_name: &str) -> Option<BackupEnvelope> {
    let content = gist
        .get("files")?
        .get(file_name)?
        .get("content")?
        .as_str()
        .filter(|c| !c.is_empty())?;
    backup_codec::process_backup(content)
}

fn status_error(status: StatusCode) -> RemoteError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Unauthorized,
        other => RemoteError::HttpStatus(other.as_u16()),
    }
}

#[async_trait]
impl RemoteBlobService for GistClient {
    async fn validate_credential(&self, token: &str) -> bool {
        match self
            .http
            .get(self.url("/user"))
            .header("Authorization", Self::auth_header(token))
            .send()
            .await
        {
            Ok(res) => res.status().is_success(),
            Err(e) => {
                warn!(error = %e, "token validation request failed");
                false
            }
        }
    }

    async fn create(&self, token: &str, envelope: &BackupEnvelope) -> Result<String, RemoteError> {
        let body = create_gist_body(&self.description, &self.file_name, envelope);
        let res = self
            .http
            .post(self.url("/gists"))
            .header("Authorization", Self::auth_header(token))
            .json(&body)
            .send()
            .await
            .map_err(|e| RemoteError::NetworkError(e.to_string()))?;

        if !res.status().is_success() {
            return Err(status_error(res.status()));
        }
        let json: Value = res
            .json()
            .await
            .map_err(|e| RemoteError::DecodeError(e.to_string()))?;
        let id = json
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| RemoteError::DecodeError("gist response has no id".to_string()))?;
        info!(gist_id = id, "created gist");
        Ok(id.to_string())
    }

    async fn update(&self, token: &str, blob_id: &str, envelope: &BackupEnvelope) -> Result<(), RemoteError> {
        let body = update_gist_body(&self.file_name, envelope);
        let res = self
            .http
            .patch(self.url(&format!("/gists/{}", blob_id)))
            .header("Authorization", Self::auth_header(token))
            .json(&body)
            .send()
            .await
            .map_err(|e| RemoteError::NetworkError(e.to_string()))?;

        if !res.status().is_success() {
            return Err(status_error(res.status()));
        }
        debug!(gist_id = blob_id, links = envelope.links.len(), "updated gist");
        Ok(())
    }

    async fn get(&self, token: &str, blob_id: &str) -> Result<Option<BackupEnvelope>, RemoteError> {
        let res = self
            .http
            .get(self.url(&format!("/gists/{}", blob_id)))
            .header("Authorization", Self::auth_header(token))
            .send()
            .await
            .map_err(|e| RemoteError::NetworkError(e.to_string()))?;

        if !res.status().is_success() {
            debug!(gist_id = blob_id, status = res.status().as_u16(), "gist fetch returned no data");
            return Ok(None);
        }
        let json: Value = res
            .json()
            .await
            .map_err(|e| RemoteError::DecodeError(e.to_string()))?;
        Ok(extract_envelope(&json, &self.file_name))
    }
}
