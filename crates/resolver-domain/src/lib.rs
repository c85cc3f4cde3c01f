//! Resolver Domain Layer
//!
//! This crate contains the self-model data layer for Resolver, a personal
//! reflection journal. It has ZERO external dependencies and defines the
//! entities, constants, and trait interfaces that the other layers build on.
//!
//! ## Key Concepts
//!
//! - **Self**: one modeled role the user embodies ("Work Me", "Parent Me")
//! - **Observation**: a short statement filed under one awareness category
//! - **Quadrant**: Known, Knowable A, Knowable B, and the always-empty Unknown
//! - **Authority**: the named source that legitimizes a self's judgments
//! - **AppState**: the whole session, mirrored to persistent storage
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Validation and sanitization live in `resolver-gatekeeper`
//! - Persistence lives in `resolver-store`, behind [`traits::PersistenceGateway`]
//! - Mutation rules live in `resolver-board`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod authority;
pub mod observation;
pub mod self_model;
pub mod state;
pub mod theme;
pub mod traits;

// Re-exports for convenience
pub use authority::{Authority, SELF_AUTHORITY_NAME};
pub use observation::{ObservationCategory, Observations, Quadrant};
pub use self_model::{SelfId, SelfModel};
pub use state::{AppState, INITIAL_NEXT_ID, MAX_SELF_ID, MAX_SELVES};
pub use theme::Theme;
