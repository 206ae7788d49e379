// Nebula Nav services
// Services provide persistence, the backup codec, the credential gate, remote sync and config.

pub mod backup_codec;
pub mod config_engine;
pub mod credential_gate;
pub mod gist_client;
pub mod local_store;
pub mod synchronizer;
