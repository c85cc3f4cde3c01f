//! Resolver Board
//!
//! The self-model store: owns the session, applies every mutation through
//! the gatekeeper, and mirrors the result through a persistence gateway.
//!
//! # Overview
//!
//! The Board is responsible for:
//! - **Onboarding**: the demo fixture or an empty board for a named user
//! - **Selves**: creation (at most three, ids never reused), rename, authority, two-phase deletion
//! - **Observations**: adding and removing entries per awareness category
//! - **Session extras**: notes, theme, full reset
//!
//! # Usage
//!
//! ```no_run
//! use resolver_board::{open_board, ResolverConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ResolverConfig::load()?;
//! let mut board = open_board(&config);
//!
//! if board.user().is_none() {
//!     board.initialize_empty("Ann")?;
//! }
//! let work = board.create_self("Work Me", "Manager", false)?;
//! println!("Created self {}", work.id);
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Rejected input and a full board come back as [`BoardError`] values and
//! never change state. Storage trouble is handled by the gateway and never
//! reaches the caller.

#![warn(missing_docs)]

mod board;
mod config;
mod demo;
mod error;

pub use board::{Board, PendingDeletion};
pub use config::{open_board, ConfigError, ResolverConfig, StorageConfig};
pub use demo::{demo_selves, DEMO_NOTES, DEMO_USER};
pub use error::BoardError;
