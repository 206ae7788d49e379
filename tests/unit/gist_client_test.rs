//! Unit tests for the Gist request/response shapes.
//!
//! These exercise the pure body builders and response parsing; no network.

use nebula_nav::services::backup_codec::build_envelope;
use nebula_nav::services::gist_client::{
    create_gist_body, extract_envelope, update_gist_body, GistClient,
};
use nebula_nav::types::config::RemoteConfig;
use nebula_nav::types::link::default_links;
use nebula_nav::types::site::SiteConfig;
use serde_json::json;

const FILE: &str = "nebula_nav_data.json";

#[test]
fn test_create_body_is_private_single_file() {
    let envelope = build_envelope(&default_links(), &SiteConfig::default(), Some("pw"));
    let body = create_gist_body("Nebula Nav Data Storage", FILE, &envelope);

    assert_eq!(body["description"], "Nebula Nav Data Storage");
    assert_eq!(body["public"], false);
    let content = body["files"][FILE]["content"].as_str().unwrap();
    assert!(content.contains("\"authCheck\": \"pw\""));
}

#[test]
fn test_update_body_touches_only_files() {
    let envelope = build_envelope(&[], &SiteConfig::default(), None);
    let body = update_gist_body(FILE, &envelope);
    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert!(body["files"][FILE]["content"].is_string());
}

#[test]
fn test_extract_envelope_from_gist_response() {
    let envelope = build_envelope(&default_links(), &SiteConfig::default(), None);
    // A PATCH body has the same `files` shape as a GET response.
    let gist = update_gist_body(FILE, &envelope);

    let extracted = extract_envelope(&gist, FILE).unwrap();
    assert_eq!(extracted.links, envelope.links);
}

#[test]
fn test_extract_envelope_missing_or_invalid() {
    assert!(extract_envelope(&json!({"files": {}}), FILE).is_none());
    assert!(extract_envelope(&json!({"files": {FILE: {"content": ""}}}), FILE).is_none());
    assert!(extract_envelope(&json!({"files": {FILE: {"content": "{\"links\":1}"}}}), FILE).is_none());
    assert!(extract_envelope(&json!({"files": {"other.json": {"content": "{}"}}}), FILE).is_none());
}

#[test]
fn test_client_builds_from_default_config() {
    let mut config = RemoteConfig::default();
    assert!(GistClient::new(&config).is_ok());
    config.timeout_secs = Some(5);
    assert!(GistClient::new(&config).is_ok());
}
