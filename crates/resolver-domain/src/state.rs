//! Session state - everything that survives a reload

use crate::{SelfId, SelfModel, Theme};

/// Maximum number of selves a board can hold
pub const MAX_SELVES: usize = 3;

/// Value of the id counter in a fresh session
///
/// Ids 1 and 2 are taken by the demo fixture.
pub const INITIAL_NEXT_ID: u64 = 3;

/// Largest id a stored session may carry (2^53 - 1)
///
/// Snapshots are JSON; ids above this cannot round-trip through readers
/// that hold numbers as doubles.
pub const MAX_SELF_ID: u64 = (1 << 53) - 1;

/// The whole session
///
/// Built from the persisted snapshot at startup and re-serialized in full
/// after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Display name of the user, `None` before onboarding
    pub user: Option<String>,

    /// Modeled selves, in creation order
    pub selves: Vec<SelfModel>,

    /// Free-text notes
    pub notes: String,

    /// Theme selection
    pub theme: Theme,

    /// Next id to hand out; never decreases within a session
    pub next_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            user: None,
            selves: Vec::new(),
            notes: String::new(),
            theme: Theme::default(),
            next_id: INITIAL_NEXT_ID,
        }
    }
}

impl AppState {
    /// Find a self by id
    pub fn find_self(&self, id: SelfId) -> Option<&SelfModel> {
        self.selves.iter().find(|s| s.id == id)
    }

    /// Find a self by id for mutation
    pub fn find_self_mut(&mut self, id: SelfId) -> Option<&mut SelfModel> {
        self.selves.iter_mut().find(|s| s.id == id)
    }

    /// Whether onboarding has happened
    pub fn is_onboarded(&self) -> bool {
        self.user.is_some()
    }

    /// Raise the counter above every stored id
    ///
    /// Returns true if the counter had to move.
    pub fn repair_next_id(&mut self) -> bool {
        let floor = self
            .selves
            .iter()
            .map(|s| s.id.value().saturating_add(1))
            .max()
            .unwrap_or(0);

        if self.next_id < floor {
            self.next_id = floor;
            true
        } else {
            false
        }
    }
}
