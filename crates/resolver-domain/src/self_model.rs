//! Self module - the roles a user models on their board

use std::fmt;

use crate::{Authority, Observations};

/// Identifier of a self, allocated from the session's monotonic counter
///
/// Ids are never reused: deleting a self retires its id for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelfId(u64);

impl SelfId {
    /// Wrap a raw id value
    ///
    /// This is primarily for storage layer deserialization.
    ///
    /// # Examples
    ///
    /// ```
    /// use resolver_domain::SelfId;
    ///
    /// let id = SelfId::from_value(7);
    /// assert_eq!(id.value(), 7);
    /// ```
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw id value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SelfId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One modeled self
///
/// Instances are owned by the board; callers receive clones and re-fetch by
/// id after every mutation instead of holding on to a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfModel {
    /// Unique identifier
    pub id: SelfId,

    /// Display name (1-50 characters, restricted character set)
    pub name: String,

    /// Observations bucketed by awareness category
    pub observations: Observations,

    /// Source of legitimacy for this self's judgments
    pub authority: Authority,
}

impl SelfModel {
    /// Create a self with no observations yet
    pub fn new(id: SelfId, name: String, authority: Authority) -> Self {
        Self {
            id,
            name,
            observations: Observations::default(),
            authority,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: id ordering matches the ordering of the raw counter values
        #[test]
        fn test_id_ordering_property(a: u64, b: u64) {
            let id_a = SelfId::from_value(a);
            let id_b = SelfId::from_value(b);

            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }
    }
}
