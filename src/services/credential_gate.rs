//! Credential Gate for Nebula Nav.
//!
//! A single shared password guarding the admin surface, compared by plain
//! equality. On first run there is nothing to compare against, so the first
//! submitted password is adopted as the secret.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::local_store::{LocalStore, LocalStoreTrait};
use crate::types::errors::CredentialError;

/// How a successful login was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginOutcome {
    /// No password existed; the submitted one is now the secret.
    Adopted,
    /// The submitted password matched the stored one.
    Verified,
}

pub struct CredentialGate {
    store: LocalStore,
}

impl CredentialGate {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// True when no password has been stored yet.
    pub fn is_first_run(&self) -> bool {
        !self.store.has_credential_set()
    }

    pub fn check(&self, input: &str) -> bool {
        self.store.check_credential(input)
    }

    pub fn login(&self, input: &str) -> Result<LoginOutcome, CredentialError> {
        if self.is_first_run() {
            self.adopt(input)?;
            info!("admin password set on first run");
            return Ok(LoginOutcome::Adopted);
        }
        if self.check(input) {
            Ok(LoginOutcome::Verified)
        } else {
            Err(CredentialError::Mismatch)
        }
    }

    /// Replaces the password after verifying the current one.
    ///
    /// Propagating the new password to the remote snapshot is the caller's job.
    pub fn change(&self, current: &str, new: &str) -> Result<(), CredentialError> {
        if !self.check(current) {
            return Err(CredentialError::Mismatch);
        }
        self.adopt(new)?;
        info!("admin password changed");
        Ok(())
    }

    fn adopt(&self, secret: &str) -> Result<(), CredentialError> {
        if secret.is_empty() {
            return Err(CredentialError::Empty);
        }
        self.store
            .set_credential(secret)
            .map_err(|e| CredentialError::StorageError(e.to_string()))
    }
}
