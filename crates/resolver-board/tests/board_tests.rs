//! Integration tests for resolver-board
//!
//! Run with `RUST_LOG=debug cargo test -p resolver-board -- --nocapture` to
//! see the board's log output.

use proptest::prelude::*;
use resolver_board::{Board, BoardError};
use resolver_domain::traits::PersistenceGateway;
use resolver_domain::{AppState, ObservationCategory, Quadrant, SelfId, Theme};
use resolver_store::{KeyValueStore, MemoryKvStore, SnapshotGateway, SqliteKvStore, StoreError, DEFAULT_SLOT_KEY};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn memory_board() -> Board<SnapshotGateway<MemoryKvStore>> {
    init_tracing();
    Board::open(SnapshotGateway::new(MemoryKvStore::new()))
}

/// Slot store that rejects every operation
struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    type Error = StoreError;

    fn get(&self, _key: &str) -> Result<Option<String>, Self::Error> {
        Err(StoreError::Unavailable("disabled".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), Self::Error> {
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), Self::Error> {
        Err(StoreError::Unavailable("disabled".to_string()))
    }
}

#[test]
fn test_end_to_end_scenario() {
    let mut board = memory_board();
    board.initialize_empty("Ann").unwrap();

    let work = board.create_self("Work Me", "Manager", false).unwrap();
    let work = board
        .add_observation(work.id, ObservationCategory::Known, "I ship on time")
        .unwrap();

    assert_eq!(work.observations.known, vec!["I ship on time".to_string()]);
    assert_eq!(work.authority.name, "Manager");
    assert!(!work.authority.points_to_self);
    assert_eq!(work.observations.in_quadrant(Quadrant::Known), ["I ship on time".to_string()]);
    assert!(work.observations.in_quadrant(Quadrant::Unknown).is_empty());

    let work = board
        .remove_observation(work.id, ObservationCategory::Known, 0)
        .unwrap();
    assert!(work.observations.known.is_empty());

    // The persisted copy matches the in-memory state
    let stored = board.gateway().load();
    assert_eq!(&stored, board.state());
}

#[test]
fn test_fourth_self_rejected_without_mutation() {
    let mut board = memory_board();
    board.initialize_empty("Ann").unwrap();

    for name in ["One", "Two", "Three"] {
        board.create_self(name, "Boss", false).unwrap();
    }
    let before = board.state().clone();

    let error = board.create_self("Four", "Boss", false).unwrap_err();
    assert_eq!(error, BoardError::CapacityReached { max: 3 });
    assert_eq!(board.state(), &before);
    assert_eq!(board.gateway().load(), before);
}

#[test]
fn test_ids_never_reused() {
    let mut board = memory_board();
    board.initialize_empty("Ann").unwrap();

    let a = board.create_self("A", "", true).unwrap();
    let b = board.create_self("B", "", true).unwrap();
    assert!(b.id > a.id);

    board.request_delete(a.id).unwrap();
    board.confirm_delete(a.id).unwrap();

    let c = board.create_self("C", "", true).unwrap();
    assert!(c.id > b.id);
    assert_ne!(c.id, a.id);
}

#[test]
fn test_first_created_id_follows_counter() {
    init_tracing();
    let store = MemoryKvStore::with_slots([(DEFAULT_SLOT_KEY, r#"{"user":"Ann","selves":[],"nextId":5}"#)]);
    let mut board = Board::open(SnapshotGateway::new(store));

    let model = board.create_self("Work Me", "Manager", false).unwrap();
    assert_eq!(model.id, SelfId::from_value(5));
    assert_eq!(board.gateway().load().next_id, 6);
}

#[test]
fn test_two_phase_delete() {
    let mut board = memory_board();
    board.initialize_with_demo_data();
    let work = board.selves()[0].clone();

    assert_eq!(
        board.confirm_delete(work.id),
        Err(BoardError::DeletionNotRequested(work.id))
    );

    let pending = board.request_delete(work.id).unwrap();
    assert_eq!(pending.name, "Work Me");
    assert_eq!(pending.observation_count, 6);
    assert_eq!(board.selves().len(), 2);

    let removed = board.confirm_delete(work.id).unwrap();
    assert_eq!(removed, work);
    assert_eq!(board.get_self(work.id), None);
    assert_eq!(board.gateway().load().selves.len(), 1);
}

#[test]
fn test_failed_rename_leaves_state() {
    let mut board = memory_board();
    board.initialize_empty("Ann").unwrap();
    let a = board.create_self("Work Me", "Manager", false).unwrap();
    let before = board.state().clone();

    let error = board.rename_self(a.id, "Work<script>Me").unwrap_err();
    assert_eq!(error.to_string(), "Name contains invalid characters");
    assert!(board.rename_self(a.id, &"x".repeat(51)).is_err());
    assert_eq!(board.state(), &before);

    let renamed = board.rename_self(a.id, "  Job Me ").unwrap();
    assert_eq!(renamed.name, "Job Me");
    assert_eq!(board.get_self(a.id), Some(renamed));
}

#[test]
fn test_self_directed_authority_normalized() {
    let mut board = memory_board();
    board.initialize_empty("Ann").unwrap();

    let model = board.create_self("Parent Me", "My Values", true).unwrap();
    assert_eq!(model.authority.name, "Self");
    assert!(model.authority.points_to_self);
    assert_eq!(model.authority.external_name(), None);
}

#[test]
fn test_observation_rejections() {
    let mut board = memory_board();
    board.initialize_empty("Ann").unwrap();
    let a = board.create_self("A", "", true).unwrap();

    let error = board
        .add_observation(a.id, ObservationCategory::KnowableB, "   ")
        .unwrap_err();
    assert_eq!(error.to_string(), "Observation cannot be empty");

    let error = board
        .add_observation(a.id, ObservationCategory::KnowableB, &"y".repeat(501))
        .unwrap_err();
    assert_eq!(error.to_string(), "Observation must be 500 characters or less");

    // Only dangerous fragments: nothing left to store
    assert!(board
        .add_observation(a.id, ObservationCategory::KnowableB, "<script>x</script>")
        .is_err());

    let updated = board
        .add_observation(a.id, ObservationCategory::KnowableB, "I might <b>burn</b> out")
        .unwrap();
    assert_eq!(updated.observations.knowable_2, vec!["I might <b>burn</b> out".to_string()]);
}

#[test]
fn test_reset_erases_slot() {
    let mut board = memory_board();
    board.initialize_with_demo_data();
    board.set_theme(Theme::Colorblind);
    assert!(board.gateway().store().contains(DEFAULT_SLOT_KEY));

    board.reset_all();
    assert_eq!(board.state(), &AppState::default());
    assert!(!board.gateway().store().contains(DEFAULT_SLOT_KEY));
}

#[test]
fn test_session_survives_restart() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resolver.db");

    let expected = {
        let mut board = Board::open(SnapshotGateway::new(SqliteKvStore::open(&path).unwrap()));
        board.initialize_empty("Ann").unwrap();
        let work = board.create_self("Work Me", "Manager", false).unwrap();
        board
            .add_observation(work.id, ObservationCategory::KnowableA, "I could lead")
            .unwrap();
        board.set_notes("Talk to the team");
        board.set_theme(Theme::Dark);
        board.state().clone()
    };

    let board = Board::open(SnapshotGateway::new(SqliteKvStore::open(&path).unwrap()));
    assert_eq!(board.state(), &expected);
    assert_eq!(board.next_id(), 4);
}

#[test]
fn test_storage_failure_is_not_fatal() {
    init_tracing();
    let mut board = Board::open(SnapshotGateway::new(UnavailableStore));
    assert_eq!(board.state(), &AppState::default());

    board.initialize_empty("Ann").unwrap();
    let a = board.create_self("Work Me", "Manager", false).unwrap();
    board.add_observation(a.id, ObservationCategory::Known, "Still works").unwrap();
    board.reset_all();

    assert_eq!(board.state(), &AppState::default());
}

#[test]
fn test_legacy_snapshot_opens() {
    init_tracing();
    let store = MemoryKvStore::with_slots([(
        DEFAULT_SLOT_KEY,
        r#"{"user":"Demo User","selves":[{"id":1,"name":"Work Me","observations":{"known":[],"knowable_1":[],"knowable_2":[]},"authority":{"name":"My Manager","pointsToSelf":false}}],"chatMessages":[{"sender":"Lightward","text":"hi"}],"nextId":3}"#,
    )]);

    let mut board = Board::open(SnapshotGateway::new(store));
    assert_eq!(board.theme(), Theme::Light);
    assert_eq!(board.notes(), "");

    let created = board.create_self("Parent Me", "", true).unwrap();
    assert_eq!(created.id, SelfId::from_value(3));
}

#[test]
fn test_corrupt_id_in_snapshot_opens() {
    init_tracing();
    let store = MemoryKvStore::with_slots([(
        DEFAULT_SLOT_KEY,
        r#"{"user":"Ann","selves":[{"id":18446744073709551615,"name":"Corrupt","authority":{"name":"X","pointsToSelf":false}}],"nextId":3}"#,
    )]);

    let mut board = Board::open(SnapshotGateway::new(store));
    assert!(board.selves().is_empty());
    assert_eq!(board.user(), Some("Ann"));

    let created = board.create_self("Work Me", "Manager", false).unwrap();
    assert_eq!(created.id, SelfId::from_value(3));
}

#[test]
fn test_corrupt_counter_in_snapshot_opens() {
    init_tracing();
    let store = MemoryKvStore::with_slots([(
        DEFAULT_SLOT_KEY,
        r#"{"user":"Ann","selves":[],"nextId":18446744073709551615}"#,
    )]);

    let mut board = Board::open(SnapshotGateway::new(store));
    assert_eq!(board.next_id(), 3);

    let created = board.create_self("Work Me", "Manager", false).unwrap();
    assert_eq!(created.id, SelfId::from_value(3));
    assert_eq!(board.gateway().load().next_id, 4);
}

/// One step of a random editing session
#[derive(Debug, Clone)]
enum Step {
    Create { name: String, authority: String, own: bool },
    Rename { slot: usize, name: String },
    SetAuthority { slot: usize, authority: String, own: bool },
    AddObservation { slot: usize, category: usize, text: String },
    RemoveObservation { slot: usize, category: usize, index: usize },
    Delete { slot: usize },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    let name = "[A-Za-z][A-Za-z ]{0,12}";
    prop_oneof![
        (name, name, any::<bool>())
            .prop_map(|(name, authority, own)| Step::Create { name, authority, own }),
        (0usize..3, name).prop_map(|(slot, name)| Step::Rename { slot, name }),
        (0usize..3, name, any::<bool>())
            .prop_map(|(slot, authority, own)| Step::SetAuthority { slot, authority, own }),
        (0usize..3, 0usize..3, "[a-zA-Z0-9 .,!?']{1,40}")
            .prop_map(|(slot, category, text)| Step::AddObservation { slot, category, text }),
        (0usize..3, 0usize..3, 0usize..3)
            .prop_map(|(slot, category, index)| Step::RemoveObservation { slot, category, index }),
        (0usize..3).prop_map(|slot| Step::Delete { slot }),
    ]
}

fn target<G: PersistenceGateway>(board: &Board<G>, slot: usize) -> Option<SelfId> {
    board.selves().get(slot).map(|s| s.id)
}

fn category(n: usize) -> ObservationCategory {
    ObservationCategory::all()[n]
}

/// Apply a step, skipping it when it targets something that does not exist
fn apply<G: PersistenceGateway>(board: &mut Board<G>, step: Step) {

    match step {
        Step::Create { name, authority, own } => {
            let _ = board.create_self(&name, &authority, own);
        }
        Step::Rename { slot, name } => {
            if let Some(id) = target(board, slot) {
                let _ = board.rename_self(id, &name);
            }
        }
        Step::SetAuthority { slot, authority, own } => {
            if let Some(id) = target(board, slot) {
                let _ = board.set_authority(id, &authority, own);
            }
        }
        Step::AddObservation { slot, category: n, text } => {
            if let Some(id) = target(board, slot) {
                let _ = board.add_observation(id, category(n), &text);
            }
        }
        Step::RemoveObservation { slot, category: n, index } => {
            if let Some(model) = board.selves().get(slot).cloned() {
                if index < model.observations.get(category(n)).len() {
                    board.remove_observation(model.id, category(n), index).unwrap();
                }
            }
        }
        Step::Delete { slot } => {
            if let Some(id) = target(board, slot) {
                board.request_delete(id).unwrap();
                board.confirm_delete(id).unwrap();
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_edits_round_trip_through_storage(steps in prop::collection::vec(step_strategy(), 0..30)) {
        let mut board = Board::open(SnapshotGateway::new(MemoryKvStore::new()));
        board.initialize_empty("Ann").unwrap();

        for step in steps {
            apply(&mut board, step);
            prop_assert_eq!(&board.gateway().load(), board.state());
        }

        let store = board.gateway().store().clone();
        let reopened = Board::open(SnapshotGateway::new(store));
        prop_assert_eq!(reopened.state(), board.state());
    }

    #[test]
    fn prop_ids_strictly_increase(ops in prop::collection::vec(any::<bool>(), 1..40)) {
        let mut board = Board::open(SnapshotGateway::new(MemoryKvStore::new()));
        let mut last = 0;

        for create in ops {
            if create {
                match board.create_self("Some Me", "", true) {
                    Ok(model) => {
                        prop_assert!(model.id.value() > last);
                        last = model.id.value();
                    }
                    Err(e) => prop_assert_eq!(e, BoardError::CapacityReached { max: 3 }),
                }
            } else if let Some(id) = board.selves().first().map(|s| s.id) {
                board.request_delete(id).unwrap();
                board.confirm_delete(id).unwrap();
            }

            prop_assert!(board.selves().len() <= 3);
            prop_assert!(board.selves().iter().all(|s| s.id.value() < board.next_id()));
        }
    }

    #[test]
    fn prop_blank_names_never_create(name in "[ \t\n]{0,10}") {
        let mut board = Board::open(SnapshotGateway::new(MemoryKvStore::new()));
        let error = board.create_self(&name, "", true).unwrap_err();

        prop_assert!(error.is_rejection());
        prop_assert!(board.selves().is_empty());
        prop_assert_eq!(board.next_id(), 3);
    }

    #[test]
    fn prop_saved_state_round_trips(notes in "[a-zA-Z0-9 .,!?]{0,80}", dark in any::<bool>()) {
        let mut board = Board::open(SnapshotGateway::new(MemoryKvStore::new()));
        board.initialize_with_demo_data();
        board.set_notes(&notes);
        board.set_theme(if dark { Theme::Dark } else { Theme::Light });

        prop_assert_eq!(&board.gateway().load(), board.state());
    }
}
