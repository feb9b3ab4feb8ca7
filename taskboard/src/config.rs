//! Board configuration loaded with Figment
//!
//! Sources, later ones overriding earlier ones:
//! 1. Built-in defaults
//! 2. `taskboard.toml`, `taskboard.yaml`, `taskboard.json` in the given directory
//! 3. `TASKBOARD_*` environment variables (e.g. `TASKBOARD_STORAGE_KEY`)

use crate::types::Roster;
use chrono::Weekday;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Storage key the board has always been saved under
pub const DEFAULT_STORAGE_KEY: &str = "taskColumns";

/// Base name of configuration files
pub const CONFIG_FILE_STEM: &str = "taskboard";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration parsing failed
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] Box<figment::Error>),

    /// Configuration validation failed
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// No storage directory configured and no platform data directory
    #[error("unable to determine a storage directory")]
    NoStorageDir,
}

impl ConfigError {
    fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Settings for a board store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Directory for file-backed storage; platform data dir when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    /// Key the board blob is stored under
    pub storage_key: String,
    /// Team members tasks can be assigned to
    pub team_members: Roster,
    /// First day of the timeline week
    pub week_start: Weekday,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            team_members: Roster::default(),
            week_start: Weekday::Mon,
        }
    }
}

impl BoardConfig {
    /// Load configuration from defaults, config files in `dir`, and environment
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        debug!("Loading board configuration from {}", dir.display());

        let config: Self = Self::figment(dir).extract().map_err(Box::new)?;
        config.validate()?;

        debug!(
            storage_key = %config.storage_key,
            team_members = config.team_members.names().len(),
            "Loaded board configuration"
        );
        Ok(config)
    }

    /// Build the figment with all sources in precedence order
    fn figment(dir: &Path) -> Figment {
        let file = |ext: &str| {
            let path = dir.join(format!("{CONFIG_FILE_STEM}.{ext}"));
            trace!("Config file candidate: {}", path.display());
            path
        };

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file("toml")))
            .merge(Yaml::file(file("yaml")))
            .merge(Json::file(file("json")))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Check values the types cannot rule out
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::invalid("storage_key", "must not be empty"));
        }
        if self.team_members.names().is_empty() {
            return Err(ConfigError::invalid("team_members", "must not be empty"));
        }
        let mut seen = HashSet::new();
        for name in self.team_members.names() {
            if name.trim().is_empty() {
                return Err(ConfigError::invalid("team_members", "names must not be blank"));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::invalid(
                    "team_members",
                    format!("duplicate name '{name}'"),
                ));
            }
        }
        Ok(())
    }

    /// Set the storage directory
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Set the storage key
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the roster
    pub fn with_team_members(mut self, roster: Roster) -> Self {
        self.team_members = roster;
        self
    }

    /// Directory file storage should use
    pub fn resolved_storage_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_local_dir()
                .map(|d| d.join("taskboard"))
                .ok_or(ConfigError::NoStorageDir),
        }
    }
}
