//! Configuration file handling

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use resolver_gatekeeper::{Gatekeeper, ValidationConfig};
use resolver_store::{LocalStore, SnapshotGateway, DEFAULT_SLOT_KEY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Board;

/// Errors that can occur while reading or writing the config file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file is not valid TOML for this schema
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    /// No home directory to resolve the default location against
    #[error("Could not find home directory")]
    NoHomeDirectory,
}

/// Resolver configuration
///
/// Every section and field is optional in the file.
///
/// ```toml
/// [storage]
/// database_path = "~/.resolver/resolver.db"
/// slot_key = "resolver-app-state"
///
/// [validation]
/// self_name_max = 50
/// authority_name_max = 50
/// observation_max = 500
/// user_name_max = 100
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Where the session is persisted
    #[serde(default)]
    pub storage: StorageConfig,

    /// Length limits for user text
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file holding the snapshot slot; a leading `~/` means the home directory
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Name of the snapshot slot
    #[serde(default = "default_slot_key")]
    pub slot_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            slot_key: default_slot_key(),
        }
    }
}

impl StorageConfig {
    /// Database path with `~/` expanded
    pub fn resolved_database_path(&self) -> PathBuf {
        match (self.database_path.strip_prefix("~"), dirs::home_dir()) {
            (Ok(rest), Some(home)) => home.join(rest),
            _ => self.database_path.clone(),
        }
    }
}

impl ResolverConfig {
    /// Default location of the config file, `~/.resolver/config.toml`
    pub fn path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home.join(".resolver").join("config.toml"))
    }

    /// Load from the default location, or defaults if there is no file
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::path()?)
    }

    /// Load from `path`, or defaults if there is no file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::path()?)
    }

    /// Save to `path`, creating parent directories
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, contents)?;
        Ok(())
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("~/.resolver/resolver.db")
}

fn default_slot_key() -> String {
    DEFAULT_SLOT_KEY.to_string()
}

/// Open the board described by `config`
///
/// When the database cannot be opened the session runs in memory only.
pub fn open_board(config: &ResolverConfig) -> Board<SnapshotGateway<LocalStore>> {
    let store = LocalStore::open_or_memory(config.storage.resolved_database_path());
    let gateway = SnapshotGateway::with_key(store, config.storage.slot_key.clone());
    Board::with_gatekeeper(gateway, Gatekeeper::new(config.validation.clone()))
}
