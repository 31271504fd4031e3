//! Registry configuration
//!
//! Loaded from TOML, then overridden from `CAIRN_*` environment variables,
//! then validated. The root authority is read once when a [`Registry`] is
//! built and never changes afterwards.
//!
//! [`Registry`]: crate::Registry

use cairn_core::PrincipalId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding `registry.root_authority`
pub const ENV_ROOT_AUTHORITY: &str = "CAIRN_ROOT_AUTHORITY";
/// Environment variable overriding `logging.level`
pub const ENV_LOG_LEVEL: &str = "CAIRN_LOG_LEVEL";
/// Environment variable overriding `storage.snapshot_path`
pub const ENV_SNAPSHOT_PATH: &str = "CAIRN_SNAPSHOT_PATH";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this layout
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    /// A field holds an unacceptable value
    #[error("invalid config field '{field}': {reason}")]
    Invalid {
        /// Dotted field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// `[registry]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySection {
    /// Fixed system root authority reported by the metrics read path
    pub root_authority: PrincipalId,
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Default log filter directive
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `[storage]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSection {
    /// Where snapshots are loaded from and saved to, if anywhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

/// Complete registry configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry settings
    pub registry: RegistrySection,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSection,
    /// Snapshot settings
    #[serde(default)]
    pub storage: StorageSection,
}

impl RegistryConfig {
    /// Default configuration with the given root authority
    pub fn with_root_authority(root_authority: impl Into<PrincipalId>) -> Self {
        Self {
            registry: RegistrySection {
                root_authority: root_authority.into(),
            },
            ..Self::default()
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Override fields from `CAIRN_*` environment variables
    pub fn merge_with_env(&mut self) {
        self.merge_from(|key| std::env::var(key).ok());
    }

    /// Override fields from an arbitrary variable lookup
    pub fn merge_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(root) = lookup(ENV_ROOT_AUTHORITY) {
            self.registry.root_authority = PrincipalId::new(root);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(path) = lookup(ENV_SNAPSHOT_PATH) {
            self.storage.snapshot_path = Some(PathBuf::from(path));
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registry.root_authority.as_str().trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "registry.root_authority",
                reason: "must not be empty".to_string(),
            });
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid {
                field: "logging.level",
                reason: format!(
                    "unknown level '{}', expected one of {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
