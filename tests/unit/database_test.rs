//! Unit tests for the Nebula Nav database layer (connection, migrations, kv backends).

use nebula_nav::database::migrations::{get_schema_version, run_all, CURRENT_SCHEMA_VERSION};
use nebula_nav::database::{Database, KeyValueStore};
use nebula_nav::types::errors::StorageError;
use tempfile::TempDir;

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_kv_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection().unwrap();

    let exists: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='kv_store'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists, "kv_store should exist after migrations");
    assert_eq!(get_schema_version(&conn), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection().unwrap();
    assert!(run_all(&conn).is_ok());
    assert!(run_all(&conn).is_ok());
    assert_eq!(get_schema_version(&conn), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_missing_key_reads_none() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get_item("nebula_links").unwrap(), None);
}

#[test]
fn test_remove_item() {
    let db = Database::open_in_memory().unwrap();
    db.set_item("nebula_sync", "{}").unwrap();
    db.remove_item("nebula_sync").unwrap();
    assert_eq!(db.get_item("nebula_sync").unwrap(), None);
    // Removing again is not an error
    db.remove_item("nebula_sync").unwrap();
}

#[test]
fn test_records_survive_reopen() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("nebula.db");

    {
        let db = Database::open(&path).unwrap();
        db.set_item("nebula_auth", "hunter2").unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_item("nebula_auth").unwrap(), Some("hunter2".to_string()));
}

#[test]
fn test_open_reports_unusable_parent_dir() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    match Database::open(blocker.join("nebula.db")) {
        Err(StorageError::IoError(msg)) => assert!(msg.contains("blocker")),
        Err(other) => panic!("expected IoError, got {}", other),
        Ok(_) => panic!("open should fail under a regular file"),
    }
}
