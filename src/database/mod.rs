//! Nebula Nav database layer.
//!
//! Provides SQLite connection management, schema migrations, and the
//! string key/value backends the local record store is built on.
//!
//! # Usage
//!
//! ```no_run
//! use nebula_nav::database::{Database, KeyValueStore};
//!
//! // Open a persistent database
//! let db = Database::open("nebula.db").expect("failed to open database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//!
//! db.set_item("nebula_config", r#"{"title":"Home","logoUrl":""}"#).unwrap();
//! ```

pub mod connection;
pub mod kv_store;
pub mod migrations;

pub use connection::Database;
pub use kv_store::{KeyValueStore, MemoryStore};
