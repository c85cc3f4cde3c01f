//! The board: sole owner and mutator of session state

use resolver_domain::traits::PersistenceGateway;
use resolver_domain::{
    AppState, ObservationCategory, SelfId, SelfModel, Theme, INITIAL_NEXT_ID, MAX_SELF_ID,
    MAX_SELVES,
};
use resolver_gatekeeper::{sanitize_input, Gatekeeper, TextCategory};
use tracing::{debug, error, info, warn};

use crate::demo::{demo_selves, DEMO_NOTES, DEMO_USER};
use crate::BoardError;

/// A deletion waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    /// Self to be deleted
    pub id: SelfId,

    /// Its name, for the confirmation prompt
    pub name: String,

    /// Number of observations that will be lost with it
    pub observation_count: usize,
}

/// Session state plus the rules for changing it
///
/// Every operation validates and sanitizes its input before touching state.
/// Failed operations leave state untouched; successful ones mirror the whole
/// session through the gateway. Operations on a self return a fresh copy of
/// it, so callers never hold on to stale data.
///
/// # Examples
///
/// ```
/// use resolver_board::Board;
/// use resolver_domain::ObservationCategory;
/// use resolver_store::{MemoryKvStore, SnapshotGateway};
///
/// let mut board = Board::open(SnapshotGateway::new(MemoryKvStore::new()));
/// board.initialize_empty("Ann").unwrap();
///
/// let work = board.create_self("Work Me", "Manager", false).unwrap();
/// let work = board
///     .add_observation(work.id, ObservationCategory::Known, "I ship on time")
///     .unwrap();
/// assert_eq!(work.observations.known, vec!["I ship on time".to_string()]);
/// ```
pub struct Board<G: PersistenceGateway> {
    state: AppState,
    gateway: G,
    gatekeeper: Gatekeeper,
    pending_deletion: Option<SelfId>,
}

impl<G: PersistenceGateway> Board<G> {
    /// Load the stored session with the default gatekeeper
    pub fn open(gateway: G) -> Self {
        Self::with_gatekeeper(gateway, Gatekeeper::default_config())
    }

    /// Load the stored session with a custom gatekeeper
    pub fn with_gatekeeper(gateway: G, gatekeeper: Gatekeeper) -> Self {
        let state = gateway.load();
        debug!(
            onboarded = state.is_onboarded(),
            selves = state.selves.len(),
            next_id = state.next_id,
            "Opened board"
        );

        Self {
            state,
            gateway,
            gatekeeper,
            pending_deletion: None,
        }
    }

    /// Whole session
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// User name, `None` before onboarding
    pub fn user(&self) -> Option<&str> {
        self.state.user.as_deref()
    }

    /// Selves in creation order
    pub fn selves(&self) -> &[SelfModel] {
        &self.state.selves
    }

    /// Fresh copy of one self
    pub fn get_self(&self, id: SelfId) -> Option<SelfModel> {
        self.state.find_self(id).cloned()
    }

    /// Free-text notes
    pub fn notes(&self) -> &str {
        &self.state.notes
    }

    /// Theme selection
    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    /// Id the next created self will get
    pub fn next_id(&self) -> u64 {
        self.state.next_id
    }

    /// Whether another self fits
    pub fn can_add_more_selves(&self) -> bool {
        resolver_gatekeeper::can_add_more_selves(&self.state.selves)
    }

    /// Self awaiting deletion confirmation
    pub fn pending_deletion(&self) -> Option<SelfId> {
        self.pending_deletion
    }

    /// The gatekeeper in use
    pub fn gatekeeper(&self) -> &Gatekeeper {
        &self.gatekeeper
    }

    /// The persistence gateway
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Replace the session with the demo fixture
    ///
    /// The theme is kept. The id counter never drops below the first id
    /// after the fixture's own.
    pub fn initialize_with_demo_data(&mut self) {
        self.state.user = Some(DEMO_USER.to_string());
        self.state.selves = demo_selves();
        self.state.notes = DEMO_NOTES.to_string();
        self.state.next_id = self.state.next_id.max(INITIAL_NEXT_ID);
        self.state.repair_next_id();
        self.pending_deletion = None;

        info!(selves = self.state.selves.len(), "Initialized board with demo data");
        self.persist();
    }

    /// Start an empty board for `user_name`
    ///
    /// Clears selves and notes. The id counter is kept so ids are never
    /// handed out twice.
    pub fn initialize_empty(&mut self, user_name: &str) -> Result<(), BoardError> {
        let user = self
            .gatekeeper
            .admit(TextCategory::UserName, user_name)
            .map_err(|rejection| {
                warn!(reason = %rejection, "Rejected user name");
                BoardError::from(rejection)
            })?;

        self.state.user = Some(user);
        self.state.selves.clear();
        self.state.notes.clear();
        self.pending_deletion = None;

        info!("Initialized empty board");
        self.persist();
        Ok(())
    }

    /// Create a new self
    ///
    /// The name is always validated; the authority name only when the self
    /// does not point to itself. Every failing field is reported. Capacity is
    /// checked after validation.
    pub fn create_self(
        &mut self,
        name: &str,
        authority_name: &str,
        points_to_self: bool,
    ) -> Result<SelfModel, BoardError> {
        let name = self.gatekeeper.admit(TextCategory::SelfName, name);
        let authority = self.gatekeeper.admit_authority(authority_name, points_to_self);

        let (name, authority) = match (name, authority) {
            (Ok(name), Ok(authority)) => (name, authority),
            (name, authority) => {
                let rejections: Vec<_> = [name.err(), authority.err()].into_iter().flatten().collect();
                warn!(count = rejections.len(), "Rejected new self");
                return Err(BoardError::Invalid(rejections));
            }
        };

        if !self.can_add_more_selves() {
            warn!(max = MAX_SELVES, "Rejected new self, board is full");
            return Err(BoardError::CapacityReached { max: MAX_SELVES });
        }

        let raw_id = self.state.next_id;
        let next_id = match raw_id.checked_add(1) {
            Some(next_id) if raw_id <= MAX_SELF_ID => next_id,
            _ => {
                warn!(next_id = raw_id, "Rejected new self, id counter exhausted");
                return Err(BoardError::IdsExhausted);
            }
        };

        let id = SelfId::from_value(raw_id);
        self.state.next_id = next_id;

        let model = SelfModel::new(id, name, authority);
        self.state.selves.push(model.clone());

        info!(id = %id, points_to_self, "Created self");
        self.persist();
        Ok(model)
    }

    /// First phase of deletion: mark a self for removal
    ///
    /// Replaces any earlier pending request.
    pub fn request_delete(&mut self, id: SelfId) -> Result<PendingDeletion, BoardError> {
        let index = self.locate(id)?;
        let model = &self.state.selves[index];

        let pending = PendingDeletion {
            id,
            name: model.name.clone(),
            observation_count: model.observations.len(),
        };
        self.pending_deletion = Some(id);

        debug!(id = %id, "Deletion requested");
        Ok(pending)
    }

    /// Second phase of deletion: remove the requested self
    ///
    /// Returns the removed self. Its id is retired for good.
    pub fn confirm_delete(&mut self, id: SelfId) -> Result<SelfModel, BoardError> {
        if self.pending_deletion != Some(id) {
            warn!(id = %id, pending = ?self.pending_deletion, "Deletion confirmed without request");
            return Err(BoardError::DeletionNotRequested(id));
        }

        let index = self.locate(id)?;
        let removed = self.state.selves.remove(index);
        self.pending_deletion = None;

        info!(id = %id, "Deleted self");
        self.persist();
        Ok(removed)
    }

    /// Abandon a pending deletion, returning the id that was pending
    pub fn cancel_delete(&mut self) -> Option<SelfId> {
        let cancelled = self.pending_deletion.take();
        if let Some(id) = cancelled {
            debug!(id = %id, "Deletion cancelled");
        }
        cancelled
    }

    /// Rename a self
    pub fn rename_self(&mut self, id: SelfId, new_name: &str) -> Result<SelfModel, BoardError> {
        let index = self.locate(id)?;
        let name = self
            .gatekeeper
            .admit(TextCategory::SelfName, new_name)
            .map_err(|rejection| {
                warn!(id = %id, reason = %rejection, "Rejected rename");
                BoardError::from(rejection)
            })?;

        let model = &mut self.state.selves[index];
        model.name = name;
        let updated = model.clone();

        debug!(id = %id, "Renamed self");
        self.persist();
        Ok(updated)
    }

    /// Replace a self's authority
    pub fn set_authority(
        &mut self,
        id: SelfId,
        authority_name: &str,
        points_to_self: bool,
    ) -> Result<SelfModel, BoardError> {
        let index = self.locate(id)?;
        let authority = self
            .gatekeeper
            .admit_authority(authority_name, points_to_self)
            .map_err(|rejection| {
                warn!(id = %id, reason = %rejection, "Rejected authority");
                BoardError::from(rejection)
            })?;

        let model = &mut self.state.selves[index];
        model.authority = authority;
        let updated = model.clone();

        debug!(id = %id, points_to_self, "Updated authority");
        self.persist();
        Ok(updated)
    }

    /// Append an observation to one category of a self
    pub fn add_observation(
        &mut self,
        id: SelfId,
        category: ObservationCategory,
        text: &str,
    ) -> Result<SelfModel, BoardError> {
        let index = self.locate(id)?;
        let text = self
            .gatekeeper
            .admit(TextCategory::Observation, text)
            .map_err(|rejection| {
                warn!(id = %id, category = category.as_str(), reason = %rejection, "Rejected observation");
                BoardError::from(rejection)
            })?;

        let model = &mut self.state.selves[index];
        model.observations.get_mut(category).push(text);
        let updated = model.clone();

        debug!(id = %id, category = category.as_str(), "Added observation");
        self.persist();
        Ok(updated)
    }

    /// Remove the observation at `index` from one category of a self
    pub fn remove_observation(
        &mut self,
        id: SelfId,
        category: ObservationCategory,
        index: usize,
    ) -> Result<SelfModel, BoardError> {
        let position = self.locate(id)?;
        let model = &mut self.state.selves[position];
        let entries = model.observations.get_mut(category);

        if index >= entries.len() {
            let len = entries.len();
            error!(id = %id, category = category.as_str(), index, len, "Observation index out of range");
            return Err(BoardError::ObservationOutOfRange {
                id,
                category,
                index,
                len,
            });
        }

        entries.remove(index);
        let updated = model.clone();

        debug!(id = %id, category = category.as_str(), index, "Removed observation");
        self.persist();
        Ok(updated)
    }

    /// Replace the free-text notes
    ///
    /// Notes may be empty; dangerous fragments are stripped.
    pub fn set_notes(&mut self, text: &str) {
        self.state.notes = sanitize_input(text);
        debug!(chars = self.state.notes.chars().count(), "Updated notes");
        self.persist();
    }

    /// Change the theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
        debug!(theme = theme.as_str(), "Changed theme");
        self.persist();
    }

    /// Forget everything and erase the stored snapshot
    pub fn reset_all(&mut self) {
        self.state = AppState::default();
        self.pending_deletion = None;
        self.gateway.clear();
        info!("Reset board");
    }

    fn locate(&self, id: SelfId) -> Result<usize, BoardError> {
        self.state
            .selves
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| {
                error!(id = %id, "Operation on unknown self");
                BoardError::UnknownSelf(id)
            })
    }

    fn persist(&mut self) {
        self.gateway.save(&self.state);
    }
}
