//! Resolver Gatekeeper
//!
//! Checks and cleans every piece of user-supplied text before it can enter
//! the self-model.
//!
//! The Gatekeeper provides:
//! - Per-category validation (self name, authority name, observation, user name)
//! - Distinguishable rejection reasons with user-facing messages
//! - Sanitization of script/iframe blocks, `javascript:` and `on*=` handlers
//! - The self-count capacity check
//!
//! # Examples
//!
//! ```
//! use resolver_gatekeeper::{Gatekeeper, TextCategory};
//!
//! let gatekeeper = Gatekeeper::default_config();
//!
//! let name = gatekeeper.validate_self_name("  Work Me  ").unwrap();
//! assert_eq!(name, "Work Me");
//!
//! let rejection = gatekeeper.validate_self_name("Work<script>Me").unwrap_err();
//! assert_eq!(rejection.to_string(), "Name contains invalid characters");
//!
//! let text = gatekeeper.admit(TextCategory::Observation, "I ship on time").unwrap();
//! assert_eq!(text, "I ship on time");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod sanitizer;
mod validator;

pub use config::ValidationConfig;
pub use error::{Rejection, RejectionReason, TextCategory};
pub use sanitizer::sanitize_input;
pub use validator::{can_add_more_selves, Gatekeeper};
