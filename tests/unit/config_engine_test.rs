//! Unit tests for the Config Engine: load/save, dot-notation updates, reset.

use nebula_nav::services::config_engine::{ConfigEngine, ConfigEngineTrait};
use nebula_nav::types::config::AppConfig;
use nebula_nav::types::errors::ConfigError;
use serde_json::json;
use tempfile::TempDir;

fn engine_in(tmp: &TempDir) -> ConfigEngine {
    let path = tmp.path().join("conf").join("config.json");
    ConfigEngine::new(Some(path.to_string_lossy().to_string()))
}

#[test]
fn test_load_missing_file_returns_defaults() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);
    let config = engine.load().unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.remote.gist_file_name, "nebula_nav_data.json");
    assert_eq!(config.remote.gist_description, "Nebula Nav Data Storage");
    assert_eq!(config.log_filter, "info");
}

#[test]
fn test_set_value_persists_and_reloads() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);
    engine.load().unwrap();
    engine.set_value("remote.timeout_secs", json!(15)).unwrap();
    engine.set_value("log_filter", json!("debug")).unwrap();

    let mut reloaded = engine_in(&tmp);
    let config = reloaded.load().unwrap();
    assert_eq!(config.remote.timeout_secs, Some(15));
    assert_eq!(config.log_filter, "debug");
}

#[test]
fn test_set_value_rejects_unknown_key() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);
    assert!(matches!(
        engine.set_value("remote.nope", json!(1)),
        Err(ConfigError::InvalidKey(_))
    ));
    assert!(matches!(engine.set_value("", json!(1)), Err(ConfigError::InvalidKey(_))));
}

#[test]
fn test_set_value_rejects_wrong_type() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);
    let result = engine.set_value("remote.timeout_secs", json!("soon"));
    assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    assert_eq!(engine.get_config().remote.timeout_secs, None);
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);
    let path = engine.config_path().to_path_buf();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"storage": {"database_path": "/tmp/x.db"}}"#).unwrap();

    let config = engine.load().unwrap();
    assert_eq!(config.storage.database_path.as_deref(), Some("/tmp/x.db"));
    assert_eq!(config.remote.api_base_url, "https://api.github.com");
}

#[test]
fn test_malformed_file_is_serialization_error() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);
    let path = engine.config_path().to_path_buf();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(engine.load(), Err(ConfigError::SerializationError(_))));
}

#[test]
fn test_reset_restores_defaults() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);
    engine.set_value("log_filter", json!("trace")).unwrap();
    engine.reset().unwrap();
    assert_eq!(engine.get_config(), &AppConfig::default());

    let mut reloaded = engine_in(&tmp);
    assert_eq!(reloaded.load().unwrap(), AppConfig::default());
}
