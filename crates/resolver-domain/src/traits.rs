//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::AppState;

/// Trait for mirroring the session to persistent storage
///
/// Implemented by the infrastructure layer (resolver-store). Persistence is
/// best-effort: implementations recover from missing or corrupt data and
/// contain write failures instead of reporting them, so none of these
/// methods can fail.
pub trait PersistenceGateway {
    /// Read the stored session, or defaults when nothing usable is stored
    fn load(&self) -> AppState;

    /// Overwrite the stored session with `state`
    fn save(&mut self, state: &AppState);

    /// Erase the stored session entirely
    fn clear(&mut self);
}
