//! Authority module - who legitimizes a self's judgments

/// Name stored for every self-directed authority
pub const SELF_AUTHORITY_NAME: &str = "Self";

/// The named source of legitimacy for a self
///
/// When `points_to_self` is true the stored name is always
/// [`SELF_AUTHORITY_NAME`] and readers should not rely on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authority {
    /// Authority name (1-50 characters unless self-directed)
    pub name: String,

    /// Whether the self answers to itself
    pub points_to_self: bool,
}

impl Authority {
    /// An external authority such as "My Manager"
    pub fn external(name: String) -> Self {
        Self {
            name,
            points_to_self: false,
        }
    }

    /// A self-directed authority carrying the sentinel name
    pub fn self_directed() -> Self {
        Self {
            name: SELF_AUTHORITY_NAME.to_string(),
            points_to_self: true,
        }
    }

    /// Name of the external authority, `None` when self-directed
    pub fn external_name(&self) -> Option<&str> {
        if self.points_to_self {
            None
        } else {
            Some(&self.name)
        }
    }
}
