//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

use crate::TextCategory;

/// Maximum lengths (in characters, after trimming) per text category
///
/// Can be loaded from the `[validation]` section of the config file.
///
/// ```toml
/// [validation]
/// self_name_max = 50
/// authority_name_max = 50
/// observation_max = 500
/// user_name_max = 100
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Longest accepted self name
    pub self_name_max: usize,

    /// Longest accepted authority name
    pub authority_name_max: usize,

    /// Longest accepted observation
    pub observation_max: usize,

    /// Longest accepted user name
    pub user_name_max: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            self_name_max: 50,
            authority_name_max: 50,
            observation_max: 500,
            user_name_max: 100,
        }
    }
}

impl ValidationConfig {
    /// Maximum length for a category
    pub fn max_len(&self, category: TextCategory) -> usize {
        match category {
            TextCategory::SelfName => self.self_name_max,
            TextCategory::AuthorityName => self.authority_name_max,
            TextCategory::Observation => self.observation_max,
            TextCategory::UserName => self.user_name_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert_eq!(config.max_len(TextCategory::SelfName), 50);
        assert_eq!(config.max_len(TextCategory::AuthorityName), 50);
        assert_eq!(config.max_len(TextCategory::Observation), 500);
        assert_eq!(config.max_len(TextCategory::UserName), 100);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ValidationConfig = serde_json::from_str(r#"{"observation_max": 280}"#).unwrap();
        assert_eq!(config.observation_max, 280);
        assert_eq!(config.self_name_max, 50);
    }
}
