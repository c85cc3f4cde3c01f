//! Local store selection with in-memory fallback

use std::path::Path;

use crate::{KeyValueStore, MemoryKvStore, SqliteKvStore, StoreError};

/// The slot store a session actually runs on
///
/// Normally SQLite on disk; in memory when the database cannot be opened,
/// so the session keeps working without persistence.
pub enum LocalStore {
    /// On-disk SQLite slots
    Sqlite(SqliteKvStore),

    /// Volatile slots
    Memory(MemoryKvStore),
}

impl LocalStore {
    /// Open the SQLite database at `path`, falling back to memory on failure
    pub fn open_or_memory<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match SqliteKvStore::open(path) {
            Ok(store) => LocalStore::Sqlite(store),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not open database, session will not be persisted"
                );
                LocalStore::Memory(MemoryKvStore::new())
            }
        }
    }

    /// Whether writes outlive the process
    pub fn is_persistent(&self) -> bool {
        matches!(self, LocalStore::Sqlite(_))
    }
}

impl KeyValueStore for LocalStore {
    type Error = StoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        match self {
            LocalStore::Sqlite(store) => store.get(key),
            LocalStore::Memory(store) => store.get(key).map_err(|never| match never {}),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        match self {
            LocalStore::Sqlite(store) => store.set(key, value),
            LocalStore::Memory(store) => store.set(key, value).map_err(|never| match never {}),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        match self {
            LocalStore::Sqlite(store) => store.remove(key),
            LocalStore::Memory(store) => store.remove(key).map_err(|never| match never {}),
        }
    }
}
