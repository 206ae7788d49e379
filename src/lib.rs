//! Nebula Nav: a local-first personal link dashboard.
//!
//! Links and site branding live in a local SQLite key-value store and can be
//! backed up to, and synced through, a private GitHub Gist. This library
//! crate exposes all modules for use by the RPC binary and integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod services;
pub mod rpc_handler;
pub mod types;
