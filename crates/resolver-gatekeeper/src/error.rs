//! Rejection types

use thiserror::Error;

/// Category of user-supplied text, each with its own rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextCategory {
    /// Name of a self
    SelfName,

    /// Name of an external authority
    AuthorityName,

    /// Observation text
    Observation,

    /// Name of the user
    UserName,
}

impl TextCategory {
    /// Whether the category restricts its character set
    pub fn is_name(&self) -> bool {
        matches!(self, TextCategory::SelfName | TextCategory::AuthorityName)
    }

    /// Subject used in rejection messages
    fn label(&self) -> &'static str {
        match self {
            TextCategory::SelfName => "Name",
            TextCategory::AuthorityName => "Authority name",
            TextCategory::Observation => "Observation",
            TextCategory::UserName => "User name",
        }
    }

    /// Subject used in the "required" message
    fn missing_label(&self) -> &'static str {
        match self {
            TextCategory::Observation => "Observation text",
            other => other.label(),
        }
    }
}

/// Why a value was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// No value was supplied at all
    Missing,

    /// Nothing left after trimming
    Empty,

    /// Longer than the category allows
    TooLong {
        /// Maximum accepted length
        max: usize,
    },

    /// Contains a character outside the allowed name set
    InvalidCharacters,
}

/// A validation rejection: user-correctable, never mutates state
///
/// `Display` renders the message shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render(.category, .reason))]
pub struct Rejection {
    /// Category that was being validated
    pub category: TextCategory,

    /// The specific reason
    pub reason: RejectionReason,
}

impl Rejection {
    /// Create a rejection
    pub fn new(category: TextCategory, reason: RejectionReason) -> Self {
        Self { category, reason }
    }
}

fn render(category: &TextCategory, reason: &RejectionReason) -> String {
    match reason {
        RejectionReason::Missing => format!("{} is required", category.missing_label()),
        RejectionReason::Empty => format!("{} cannot be empty", category.label()),
        RejectionReason::TooLong { max } => {
            format!("{} must be {} characters or less", category.label(), max)
        }
        RejectionReason::InvalidCharacters => {
            format!("{} contains invalid characters", category.label())
        }
    }
}
