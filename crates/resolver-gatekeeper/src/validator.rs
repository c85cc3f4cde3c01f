//! Text validation logic

use resolver_domain::{Authority, SelfModel, MAX_SELVES};

use crate::{sanitize_input, Rejection, RejectionReason, TextCategory, ValidationConfig};

/// Punctuation allowed in self and authority names besides letters, digits and whitespace
const NAME_PUNCTUATION: &[char] = &['-', '_', '.', ',', '!', '?', '\'', '"', '(', ')'];

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || NAME_PUNCTUATION.contains(&c)
}

/// Whether another self fits on the board
pub fn can_add_more_selves(selves: &[SelfModel]) -> bool {
    selves.len() < MAX_SELVES
}

/// The Gatekeeper checks user text before it enters the model
///
/// Validation returns the trimmed value (case and inner whitespace kept) or
/// the first rule the value broke. `admit*` methods additionally sanitize
/// the accepted value.
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate raw input of a category
    ///
    /// `None` models input that was never supplied (a cancelled prompt).
    /// Checks run in order: missing, empty after trim, too long, and for
    /// name categories, the character set.
    pub fn validate(&self, category: TextCategory, input: Option<&str>) -> Result<String, Rejection> {
        let reject = |reason: RejectionReason| -> Result<String, Rejection> {
            Err(Rejection::new(category, reason))
        };

        let Some(raw) = input else {
            return reject(RejectionReason::Missing);
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return reject(RejectionReason::Empty);
        }

        let max = self.config.max_len(category);
        if trimmed.chars().count() > max {
            return reject(RejectionReason::TooLong { max });
        }

        if category.is_name() && !trimmed.chars().all(is_name_char) {
            return reject(RejectionReason::InvalidCharacters);
        }

        Ok(trimmed.to_string())
    }

    /// Validate a self name
    pub fn validate_self_name(&self, input: &str) -> Result<String, Rejection> {
        self.validate(TextCategory::SelfName, Some(input))
    }

    /// Validate an external authority name
    pub fn validate_authority_name(&self, input: &str) -> Result<String, Rejection> {
        self.validate(TextCategory::AuthorityName, Some(input))
    }

    /// Validate observation text
    pub fn validate_observation(&self, input: &str) -> Result<String, Rejection> {
        self.validate(TextCategory::Observation, Some(input))
    }

    /// Validate a user name
    pub fn validate_user_name(&self, input: &str) -> Result<String, Rejection> {
        self.validate(TextCategory::UserName, Some(input))
    }

    /// Validate, then sanitize
    ///
    /// A value that only consisted of stripped fragments is rejected as empty.
    pub fn admit(&self, category: TextCategory, input: &str) -> Result<String, Rejection> {
        let accepted = self.validate(category, Some(input))?;
        let clean = sanitize_input(&accepted);

        if clean.is_empty() {
            return Err(Rejection::new(category, RejectionReason::Empty));
        }

        Ok(clean)
    }

    /// Build an authority from form input
    ///
    /// A self-directed authority skips name validation entirely and always
    /// carries the sentinel name.
    pub fn admit_authority(&self, name: &str, points_to_self: bool) -> Result<Authority, Rejection> {
        if points_to_self {
            return Ok(Authority::self_directed());
        }

        self.admit(TextCategory::AuthorityName, name)
            .map(Authority::external)
    }
}
