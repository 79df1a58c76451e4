//! Logging initialization
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either the
//! human-readable or the JSON formatting layer.

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingAppConfig;

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured filter directive does not parse
    #[error("Invalid log filter '{filter}': {message}")]
    Filter { filter: String, message: String },

    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Map `-v` occurrences onto a filter directive, falling back to the configured level
#[must_use]
pub fn effective_level(config: &LoggingAppConfig, verbosity: u8) -> String {
    match verbosity {
        0 => config.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Build the filter: `RUST_LOG` wins, otherwise `directive`
///
/// # Errors
///
/// Returns `TelemetryError::Filter` if `directive` is not a valid filter.
pub fn build_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(directive).map_err(|e| TelemetryError::Filter {
        filter: directive.to_string(),
        message: e.to_string(),
    })
}

/// Initialize the global subscriber
///
/// Call once, early in `main`.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingAppConfig, verbosity: u8) -> Result<(), TelemetryError> {
    let directive = effective_level(config, verbosity);
    let env_filter = build_filter(&directive)?;

    if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    }

    info!(level = %directive, json = config.json, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_overrides_configured_level() {
        let config = LoggingAppConfig::default();
        assert_eq!(effective_level(&config, 0), "info");
        assert_eq!(effective_level(&config, 1), "debug");
        assert_eq!(effective_level(&config, 5), "trace");
    }

    #[test]
    fn filter_accepts_directives() {
        assert!(build_filter("info,integration_metno=debug").is_ok());
    }

    #[test]
    fn invalid_directive_is_reported() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(matches!(
            build_filter("integration_metno=loud"),
            Err(TelemetryError::Filter { .. })
        ));
    }

    #[test]
    fn second_init_fails() {
        let config = LoggingAppConfig::default();
        // Whichever call wins, at most one can install the global subscriber.
        let first = init_logging(&config, 0);
        let second = init_logging(&config, 0);
        assert!(first.is_err() || second.is_err());
    }
}
