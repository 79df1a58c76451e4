//! Six-hour forecast weather entity
//!
//! Publishes the forecast for one configured location. Every accessor is a
//! plain projection of the last successfully published snapshot; nothing is
//! recomputed here.

use std::{collections::BTreeMap, fmt, sync::Arc};

use arc_swap::ArcSwapOption;
use domain::{ForecastPeriod, ForecastSnapshot, GeoLocation, LocationName};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{error::ApplicationError, ports::ForecastPort};

/// Integration domain, used as the device identifier namespace
pub const DOMAIN: &str = "met_next_6_hours_forecast";

/// Display name prefix and device model
pub const NAME: &str = "Met.no next 6 hours forecast";

/// Attribution shown alongside the forecast
pub const ATTRIBUTION: &str =
    "Weather forecast from met.no, delivered by the Norwegian Meteorological Institute.";

/// Attribute key carrying the JSON text of the period list
pub const ATTR_FORECAST_JSON: &str = "forecast_json";

const MANUFACTURER: &str = "Met.no";
const CONFIGURATION_URL: &str = "https://www.met.no/en";

/// Native units of the published values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Units {
    pub temperature: &'static str,
    pub wind_speed: &'static str,
    pub precipitation: &'static str,
    pub pressure: &'static str,
}

impl Units {
    /// Units as reported by Met.no
    pub const NATIVE: Self = Self {
        temperature: "°C",
        wind_speed: "m/s",
        precipitation: "mm",
        pressure: "hPa",
    };
}

/// Static device metadata for the host's registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// `(domain, location name)` pairs
    pub identifiers: Vec<(String, String)>,
    pub entry_type: &'static str,
    pub name: String,
    pub manufacturer: &'static str,
    pub model: &'static str,
    pub configuration_url: &'static str,
}

/// State published after a successful update
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedForecast {
    /// The transformed forecast
    pub snapshot: ForecastSnapshot,
    /// JSON text of `snapshot.periods`
    pub forecast_json: String,
}

/// Weather entity exposing the next six-hour forecast periods
pub struct SixHoursWeather {
    location_name: LocationName,
    location: GeoLocation,
    forecast_port: Arc<dyn ForecastPort>,
    state: ArcSwapOption<PublishedForecast>,
}

impl fmt::Debug for SixHoursWeather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SixHoursWeather")
            .field("location_name", &self.location_name)
            .field("location", &self.location)
            .field("published", &self.state.load().is_some())
            .finish_non_exhaustive()
    }
}

impl SixHoursWeather {
    /// Create an entity with no published state
    pub fn new(
        location_name: LocationName,
        location: GeoLocation,
        forecast_port: Arc<dyn ForecastPort>,
    ) -> Self {
        Self {
            location_name,
            location,
            forecast_port,
            state: ArcSwapOption::empty(),
        }
    }

    pub const fn location_name(&self) -> &LocationName {
        &self.location_name
    }

    pub const fn location(&self) -> &GeoLocation {
        &self.location
    }

    /// Stable identifier, `six-hours-forecast-{location}`
    pub fn unique_id(&self) -> String {
        format!("six-hours-forecast-{}", self.location_name)
    }

    /// Display name, `Met.no next 6 hours forecast: {location}`
    pub fn name(&self) -> String {
        format!("{NAME}: {}", self.location_name)
    }

    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            identifiers: vec![(DOMAIN.to_string(), self.location_name.to_string())],
            entry_type: "service",
            name: self.name(),
            manufacturer: MANUFACTURER,
            model: NAME,
            configuration_url: CONFIGURATION_URL,
        }
    }

    pub const fn attribution(&self) -> &'static str {
        ATTRIBUTION
    }

    pub const fn native_units(&self) -> Units {
        Units::NATIVE
    }

    /// The period list is offered as the hourly forecast
    pub const fn supports_hourly_forecast(&self) -> bool {
        true
    }

    /// Every update is written to the host, even when values are unchanged
    pub const fn force_update(&self) -> bool {
        true
    }

    /// The last published state, if any update has succeeded
    pub fn published(&self) -> Option<Arc<PublishedForecast>> {
        self.state.load_full()
    }

    fn project<T>(&self, f: impl FnOnce(&PublishedForecast) -> T) -> Option<T> {
        self.state.load().as_deref().map(f)
    }

    pub fn temperature(&self) -> Option<f64> {
        self.project(|p| p.snapshot.current.temperature)
    }

    pub fn pressure(&self) -> Option<f64> {
        self.project(|p| p.snapshot.current.pressure)
    }

    pub fn humidity(&self) -> Option<f64> {
        self.project(|p| p.snapshot.current.humidity)
    }

    pub fn wind_speed(&self) -> Option<f64> {
        self.project(|p| p.snapshot.current.wind_speed)
    }

    pub fn wind_bearing(&self) -> Option<f64> {
        self.project(|p| p.snapshot.current.wind_bearing)
    }

    /// Normalized condition for the coming hour
    pub fn condition(&self) -> Option<String> {
        self.project(|p| p.snapshot.current.condition.clone())
            .flatten()
    }

    /// Ordered six-hour periods
    pub fn forecast(&self) -> Option<Vec<ForecastPeriod>> {
        self.project(|p| p.snapshot.periods.clone())
    }

    pub fn forecast_hourly(&self) -> Option<Vec<ForecastPeriod>> {
        self.forecast()
    }

    /// Extra attributes; empty until the first successful update
    pub fn extra_state_attributes(&self) -> BTreeMap<&'static str, String> {
        self.project(|p| BTreeMap::from([(ATTR_FORECAST_JSON, p.forecast_json.clone())]))
            .unwrap_or_default()
    }

    /// Check if the forecast service is available
    pub async fn is_available(&self) -> bool {
        self.forecast_port.is_available().await
    }

    /// Run one update cycle
    ///
    /// On success the whole published state is replaced in one store. On
    /// failure the previous state stays visible.
    ///
    /// # Errors
    ///
    /// Returns the port's error unchanged, or `ApplicationError::Internal` if
    /// the period list cannot be serialized.
    #[instrument(skip(self), fields(location = %self.location_name))]
    pub async fn update(&self) -> Result<(), ApplicationError> {
        let snapshot = self.forecast_port.fetch_snapshot(&self.location).await?;
        let forecast_json = snapshot
            .periods_json()
            .map_err(|e| ApplicationError::Internal(format!("Failed to serialize forecast: {e}")))?;

        debug!(periods = snapshot.periods.len(), "Publishing forecast");
        self.state.store(Some(Arc::new(PublishedForecast {
            snapshot,
            forecast_json,
        })));

        info!("{} updated", self.location_name);
        Ok(())
    }
}
