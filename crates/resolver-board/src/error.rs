//! Error types for Board operations

use resolver_domain::{ObservationCategory, SelfId};
use resolver_gatekeeper::Rejection;
use thiserror::Error;

/// Errors that can occur during Board operations
///
/// `Invalid` and `CapacityReached` are user-correctable and expected. The
/// remaining variants mean the caller asked for something that cannot exist
/// and point to a bug in the calling layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// One or more values failed validation
    #[error("{}", join_messages(.0))]
    Invalid(Vec<Rejection>),

    /// The board already holds the maximum number of selves
    #[error("You can have at most {max} selves")]
    CapacityReached {
        /// Self count limit
        max: usize,
    },

    /// The id counter has run past the largest storable id
    #[error("No more selves can be created in this session")]
    IdsExhausted,

    /// No self with this id
    #[error("Unknown self: {0}")]
    UnknownSelf(SelfId),

    /// Index past the end of an observation list
    #[error("Observation {index} out of range for {} of self {id} (length {len})", .category.as_str())]
    ObservationOutOfRange {
        /// Self being edited
        id: SelfId,
        /// Category being edited
        category: ObservationCategory,
        /// Requested index
        index: usize,
        /// Current list length
        len: usize,
    },

    /// Deletion confirmed without a matching request
    #[error("Deletion of self {0} was not requested")]
    DeletionNotRequested(SelfId),
}

impl BoardError {
    /// Validation rejections carried by this error, empty for other kinds
    pub fn rejections(&self) -> &[Rejection] {
        match self {
            BoardError::Invalid(rejections) => rejections,
            _ => &[],
        }
    }

    /// Whether the error is a user-correctable rejection
    pub fn is_rejection(&self) -> bool {
        matches!(self, BoardError::Invalid(_) | BoardError::CapacityReached { .. })
    }
}

impl From<Rejection> for BoardError {
    fn from(rejection: Rejection) -> Self {
        BoardError::Invalid(vec![rejection])
    }
}

fn join_messages(rejections: &[Rejection]) -> String {
    rejections
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
