//! Resolver Storage Layer
//!
//! Implements the `PersistenceGateway` trait over a single named snapshot
//! slot in a local key-value store.
//!
//! # Architecture
//!
//! - [`KeyValueStore`]: the slot abstraction (get / set / remove by key)
//! - [`SqliteKvStore`]: SQLite-backed slots for on-disk persistence
//! - [`MemoryKvStore`]: in-memory slots for tests and storage-less sessions
//! - [`SnapshotGateway`]: JSON snapshot encoding with per-field default merging
//!
//! # Examples
//!
//! ```no_run
//! use resolver_domain::traits::PersistenceGateway;
//! use resolver_store::{SnapshotGateway, SqliteKvStore};
//!
//! let store = SqliteKvStore::open("resolver.db").unwrap();
//! let gateway = SnapshotGateway::new(store);
//! let state = gateway.load();
//! ```

#![warn(missing_docs)]

mod gateway;
mod local;
mod memory;
mod snapshot;
mod sqlite;

pub use gateway::{SnapshotGateway, DEFAULT_SLOT_KEY};
pub use local::LocalStore;
pub use memory::MemoryKvStore;
pub use snapshot::{
    decode_snapshot, encode_snapshot, AuthorityDto, ObservationsDto, SelfDto, SnapshotDto, ThemeDto,
};
pub use sqlite::SqliteKvStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O error while preparing the database location
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage medium refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Trait for a local string key-value store
///
/// Each key names one slot holding one string value.
pub trait KeyValueStore {
    /// Error type for store operations
    type Error: std::fmt::Display;

    /// Read a slot, `None` when it was never written or has been removed
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write a slot, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove a slot; removing an absent slot is not an error
    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}
