//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `MET6H_` environment variables (`__` separates nested keys,
//! e.g. `MET6H_LOCATION__LATITUDE`).
//!
//! Split into sub-modules by concern:
//! - `forecast`: location, Met.no client, update cadence, logging

mod forecast;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use forecast::{LocationConfig, LoggingAppConfig, MetNoAppConfig, UpdateAppConfig};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "met6h.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "MET6H";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Semantic configuration errors found by [`AppConfig::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("location.name must not be empty")]
    EmptyLocationName,

    #[error("location.latitude must be within -90..=90, got {0}")]
    LatitudeOutOfRange(String),

    #[error("location.longitude must be within -180..=180, got {0}")]
    LongitudeOutOfRange(String),

    #[error("metno.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("metno.user_agent must not be empty")]
    EmptyUserAgent,

    #[error("update.min_interval_minutes must be greater than zero")]
    ZeroInterval,

    #[error("update.min_interval_minutes ({min}) exceeds update.max_interval_minutes ({max})")]
    InvertedInterval { min: u64, max: u64 },
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub metno: MetNoAppConfig,

    #[serde(default)]
    pub update: UpdateAppConfig,

    #[serde(default)]
    pub logging: LoggingAppConfig,
}

impl AppConfig {
    /// Load configuration from `met6h.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(None)
    }

    /// Load configuration from an explicit file and the environment
    ///
    /// The file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or a source cannot be deserialized.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(Some(path))
    }

    fn build(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("update.min_interval_minutes", 40)?
            .set_default("update.max_interval_minutes", 49)?
            .set_default("logging.level", "info")?
            // Load from file
            .add_source(file)
            // Override with environment variables (e.g., MET6H_LOCATION__NAME)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(location = %config.location.name, "Configuration loaded");
        Ok(config)
    }

    /// Check semantic constraints the type system cannot express
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.location.name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyLocationName);
        }
        if !(-90.0..=90.0).contains(&self.location.latitude) {
            return Err(ConfigValidationError::LatitudeOutOfRange(
                self.location.latitude.to_string(),
            ));
        }
        if !(-180.0..=180.0).contains(&self.location.longitude) {
            return Err(ConfigValidationError::LongitudeOutOfRange(
                self.location.longitude.to_string(),
            ));
        }
        if self.metno.timeout_secs == 0 {
            return Err(ConfigValidationError::ZeroTimeout);
        }
        if self.metno.user_agent.trim().is_empty() {
            return Err(ConfigValidationError::EmptyUserAgent);
        }
        if self.update.min_interval_minutes == 0 {
            return Err(ConfigValidationError::ZeroInterval);
        }
        if self.update.min_interval_minutes > self.update.max_interval_minutes {
            return Err(ConfigValidationError::InvertedInterval {
                min: self.update.min_interval_minutes,
                max: self.update.max_interval_minutes,
            });
        }
        Ok(())
    }

    /// Render the effective configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
