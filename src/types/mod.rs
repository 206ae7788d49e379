// Nebula Nav shared type definitions
// Each submodule defines types used across the application.

pub mod backup;
pub mod config;
pub mod errors;
pub mod link;
pub mod site;
pub mod sync;
