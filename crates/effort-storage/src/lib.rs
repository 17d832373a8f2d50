//! # effort-storage
//!
//! SQLite-backed model registry and on-disk artifact store.
//! One serialized writer connection plus a round-robin read pool;
//! artifacts are JSON blobs referenced by path and blake3 checksum.

pub mod artifacts;
pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use artifacts::ArtifactStore;
pub use connection::DatabaseManager;
pub use engine::RegistryEngine;
