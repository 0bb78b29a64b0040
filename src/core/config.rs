//! core::config
//!
//! Configuration schema and loading.
//!
//! # Format
//!
//! TOML, loaded from an explicit `--config` path with compiled-in defaults
//! pointing at the public Door43 catalog. Values are validated after
//! parsing.
//!
//! # Example
//!
//! ```toml
//! server = "https://git.door43.org"
//! organization = "Door43-Catalog"
//! resources = ["en_tn", "en_tw", "en_ta"]
//! validation_priority = "high"
//! font_scale = 100
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// How aggressively validation diagnostics gate the editing flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPriority {
    /// Surface notices but do not block saving.
    Low,
    /// Critical notices block saving until fixed.
    #[default]
    High,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the Gitea server hosting the resources.
    pub server: String,

    /// Organization holding the source-language catalog.
    pub organization: String,

    /// Source resource repositories offered for editing.
    pub resources: Vec<String>,

    /// Validation gating behavior.
    pub validation_priority: ValidationPriority,

    /// Editor font scale percentage.
    pub font_scale: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: "https://git.door43.org".to_string(),
            organization: "Door43-Catalog".to_string(),
            resources: [
                "en_ta", "en_tw", "en_twl", "en_tn", "en_tq", "en_obs", "en_obs-tq", "en_obs-tn",
                "en_obs-sn",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            validation_priority: ValidationPriority::High,
            font_scale: 100,
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, `Parse` if it
    /// is not valid TOML for this schema, or `InvalidValue` if a value
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.server.starts_with("http://") && !self.server.starts_with("https://") {
            return Err(ConfigError::InvalidValue(format!(
                "server must be an http(s) URL, got '{}'",
                self.server
            )));
        }
        if self.organization.is_empty() {
            return Err(ConfigError::InvalidValue(
                "organization cannot be empty".to_string(),
            ));
        }
        if self.resources.iter().any(String::is_empty) {
            return Err(ConfigError::InvalidValue(
                "resource names cannot be empty".to_string(),
            ));
        }
        if self.font_scale == 0 {
            return Err(ConfigError::InvalidValue(
                "font_scale must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
