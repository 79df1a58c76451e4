//! Forecast configurations: location, Met.no client, update cadence.

use std::time::Duration;

use domain::{GeoLocation, InvalidCoordinates, LocationName};
use integration_metno::MetNoConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::default_true;

// ==============================
// Location Configuration
// ==============================

/// The location the forecast is published for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// User-facing name; part of the entity id and display name
    #[serde(default = "default_location_name")]
    pub name: String,

    /// Latitude (-90.0 to 90.0)
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Longitude (-180.0 to 180.0)
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

impl LocationConfig {
    /// Convert to domain `GeoLocation` value object
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if either coordinate is out of range.
    pub fn to_geo_location(&self) -> Result<GeoLocation, InvalidCoordinates> {
        GeoLocation::new(self.latitude, self.longitude)
    }

    /// Convert to domain `LocationName` value object
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if the name is blank.
    pub fn to_location_name(&self) -> Result<LocationName, domain::DomainError> {
        LocationName::new(self.name.as_str())
    }
}

fn default_location_name() -> String {
    "Home".to_string()
}

const fn default_latitude() -> f64 {
    59.9139
}

const fn default_longitude() -> f64 {
    10.7522
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

// ==============================
// Met.no Configuration
// ==============================

/// Met.no Locationforecast client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetNoAppConfig {
    /// Locationforecast base URL
    #[serde(default = "default_metno_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_metno_timeout")]
    pub timeout_secs: u64,

    /// `User-Agent` identifying this client to Met.no
    #[serde(default = "default_metno_user_agent")]
    pub user_agent: String,
}

impl MetNoAppConfig {
    /// Convert to the integration crate's client configuration
    #[must_use]
    pub fn to_client_config(&self) -> MetNoConfig {
        MetNoConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            user_agent: self.user_agent.clone(),
        }
    }
}

fn default_metno_base_url() -> String {
    MetNoConfig::default().base_url
}

fn default_metno_timeout() -> u64 {
    MetNoConfig::default().timeout_secs
}

fn default_metno_user_agent() -> String {
    MetNoConfig::default().user_agent
}

impl Default for MetNoAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_metno_base_url(),
            timeout_secs: default_metno_timeout(),
            user_agent: default_metno_user_agent(),
        }
    }
}

// ==============================
// Update Configuration
// ==============================

/// Update cadence configuration
///
/// The refresh interval is drawn once per entity from
/// `[min_interval_minutes, max_interval_minutes]` so that many installations
/// do not hit Met.no in lockstep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppConfig {
    /// Lower bound of the refresh interval in minutes (inclusive)
    #[serde(default = "default_min_interval")]
    pub min_interval_minutes: u64,

    /// Upper bound of the refresh interval in minutes (inclusive)
    #[serde(default = "default_max_interval")]
    pub max_interval_minutes: u64,

    /// Run one update before the periodic task is scheduled
    #[serde(default = "default_true")]
    pub run_on_startup: bool,
}

impl UpdateAppConfig {
    /// Pick the refresh interval uniformly from the configured bounds
    #[must_use]
    pub fn pick_scan_interval(&self) -> Duration {
        self.pick_scan_interval_with(&mut rand::rng())
    }

    /// Same as [`Self::pick_scan_interval`] with a caller-provided generator
    pub fn pick_scan_interval_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let low = self.min_interval_minutes.min(self.max_interval_minutes);
        let high = self.min_interval_minutes.max(self.max_interval_minutes);
        let minutes = rng.random_range(low..=high);
        Duration::from_secs(minutes * 60)
    }
}

const fn default_min_interval() -> u64 {
    40
}

const fn default_max_interval() -> u64 {
    49
}

impl Default for UpdateAppConfig {
    fn default() -> Self {
        Self {
            min_interval_minutes: default_min_interval(),
            max_interval_minutes: default_max_interval(),
            run_on_startup: true,
        }
    }
}

// ==============================
// Logging Configuration
// ==============================

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingAppConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingAppConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
