//! Unit tests for the Credential Gate (first-run adoption, login, change).

use std::sync::Arc;

use nebula_nav::database::MemoryStore;
use nebula_nav::services::credential_gate::{CredentialGate, LoginOutcome};
use nebula_nav::services::local_store::{LocalStore, LocalStoreTrait};
use nebula_nav::types::errors::CredentialError;

fn gate() -> (LocalStore, CredentialGate) {
    let store = LocalStore::new(Arc::new(MemoryStore::new()));
    (store.clone(), CredentialGate::new(store))
}

#[test]
fn test_first_login_adopts_password() {
    let (store, gate) = gate();
    assert!(gate.is_first_run());

    assert_eq!(gate.login("abcd").unwrap(), LoginOutcome::Adopted);
    assert!(!gate.is_first_run());
    assert!(gate.check("abcd"));
    assert!(!gate.check("xyz"));
    assert_eq!(store.get_credential().as_deref(), Some("abcd"));
}

#[test]
fn test_later_logins_verify() {
    let (_, gate) = gate();
    gate.login("abcd").unwrap();

    assert_eq!(gate.login("abcd").unwrap(), LoginOutcome::Verified);
    assert!(matches!(gate.login("xyz"), Err(CredentialError::Mismatch)));
}

#[test]
fn test_empty_password_is_not_adopted() {
    let (_, gate) = gate();
    assert!(matches!(gate.login(""), Err(CredentialError::Empty)));
    assert!(gate.is_first_run());
}

#[test]
fn test_change_requires_current_password() {
    let (_, gate) = gate();
    gate.login("old").unwrap();

    assert!(matches!(gate.change("wrong", "new"), Err(CredentialError::Mismatch)));
    assert!(gate.check("old"));

    gate.change("old", "new").unwrap();
    assert!(gate.check("new"));
    assert!(!gate.check("old"));
}

#[test]
fn test_change_to_empty_is_rejected() {
    let (_, gate) = gate();
    gate.login("old").unwrap();
    assert!(matches!(gate.change("old", ""), Err(CredentialError::Empty)));
    assert!(gate.check("old"));
}
