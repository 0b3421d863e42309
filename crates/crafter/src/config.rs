//! Workspace configuration.
//!
//! Configuration is layered: bundled defaults (compiled in from
//! `crafter.toml`), then a user file in the home config directory, then a
//! `crafter.toml` in the current directory, with later layers taking
//! precedence.

use config::{Config, File, FileFormat};
use crafter_error::{ConfigError, CrafterResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Transform client settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TransformConfig {
    /// Model used for generation requests
    pub model: String,
    /// Base endpoint of the generative language API
    pub endpoint: String,
}

/// History store settings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Directory for persisted records. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// Top-level configuration for the crafter binary and library consumers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CrafterConfig {
    /// Transform client settings
    pub transform: TransformConfig,
    /// History store settings
    #[serde(default)]
    pub history: HistoryConfig,
}

impl CrafterConfig {
    /// Load configuration with precedence: current dir > home dir > bundled
    /// defaults.
    pub fn load() -> CrafterResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../crafter.toml");

        let mut builder = Config::builder()
            // Start with bundled defaults
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/crafter/crafter.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional, highest precedence)
        builder = builder.add_source(File::with_name("crafter").required(false));

        builder
            .build()
            .map_err(|e| {
                crafter_error::CrafterError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                crafter_error::CrafterError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// The directory history records live in.
    pub fn history_dir(&self) -> PathBuf {
        self.history.directory.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("crafter")
                .join("history")
        })
    }
}
