//! Persistence gateway over a single snapshot slot

use resolver_domain::traits::PersistenceGateway;
use resolver_domain::AppState;
use tracing::{debug, warn};

use crate::{decode_snapshot, encode_snapshot, KeyValueStore};

/// Name of the slot holding the session snapshot
pub const DEFAULT_SLOT_KEY: &str = "resolver-app-state";

/// Mirrors the session into one named slot of a [`KeyValueStore`]
///
/// Every failure is contained here: unreadable or malformed data loads as
/// defaults, and failed writes are logged and dropped. The in-memory state
/// stays the source of truth.
///
/// # Examples
///
/// ```
/// use resolver_domain::traits::PersistenceGateway;
/// use resolver_domain::AppState;
/// use resolver_store::{MemoryKvStore, SnapshotGateway};
///
/// let mut gateway = SnapshotGateway::new(MemoryKvStore::new());
/// assert_eq!(gateway.load(), AppState::default());
///
/// let state = AppState { user: Some("Ann".to_string()), ..AppState::default() };
/// gateway.save(&state);
/// assert_eq!(gateway.load(), state);
/// ```
pub struct SnapshotGateway<K> {
    store: K,
    key: String,
}

impl<K: KeyValueStore> SnapshotGateway<K> {
    /// Gateway over the default slot
    pub fn new(store: K) -> Self {
        Self::with_key(store, DEFAULT_SLOT_KEY)
    }

    /// Gateway over a named slot
    pub fn with_key(store: K, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Slot name
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying store
    pub fn store(&self) -> &K {
        &self.store
    }

    /// Underlying store, mutably
    pub fn store_mut(&mut self) -> &mut K {
        &mut self.store
    }

    /// Take back the underlying store
    pub fn into_inner(self) -> K {
        self.store
    }
}

impl<K: KeyValueStore> PersistenceGateway for SnapshotGateway<K> {
    fn load(&self) -> AppState {
        match self.store.get(&self.key) {
            Ok(Some(raw)) => {
                debug!(key = %self.key, bytes = raw.len(), "Loaded snapshot");
                decode_snapshot(&raw)
            }
            Ok(None) => {
                debug!(key = %self.key, "No snapshot stored, starting fresh");
                AppState::default()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Could not read snapshot, starting from defaults");
                AppState::default()
            }
        }
    }

    fn save(&mut self, state: &AppState) {
        let raw = match encode_snapshot(state) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Could not serialize snapshot, not saved");
                return;
            }
        };

        match self.store.set(&self.key, &raw) {
            Ok(()) => debug!(key = %self.key, bytes = raw.len(), "Saved snapshot"),
            Err(e) => warn!(key = %self.key, error = %e, "Could not write snapshot, continuing in memory"),
        }
    }

    fn clear(&mut self) {
        match self.store.remove(&self.key) {
            Ok(()) => debug!(key = %self.key, "Cleared snapshot"),
            Err(e) => warn!(key = %self.key, error = %e, "Could not clear snapshot"),
        }
    }
}
