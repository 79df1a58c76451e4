//! Met.no data models
//!
//! Raw types for the Locationforecast 2.0 `complete` GeoJSON payload.
//! Instant readings are all optional here: Met.no may omit any of them on
//! any entry. The transform requires them only on the entries it reads.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Raw API response (a GeoJSON `Feature`)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub properties: Properties,
}

impl ApiResponse {
    /// The timeseries in provider order
    #[must_use]
    pub fn timeseries(&self) -> &[TimeseriesEntry] {
        &self.properties.timeseries
    }
}

/// Feature properties: metadata plus the timeseries
#[derive(Debug, Clone, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub meta: Option<Meta>,
    pub timeseries: Vec<TimeseriesEntry>,
}

/// Forecast metadata
#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    /// When the model run behind this forecast was published
    pub updated_at: DateTime<Utc>,
    /// Units per parameter name (e.g. `air_temperature` → `celsius`)
    #[serde(default)]
    pub units: HashMap<String, String>,
}

/// One sample point
#[derive(Debug, Clone, Deserialize)]
pub struct TimeseriesEntry {
    pub time: DateTime<Utc>,
    pub data: TimeseriesData,
}

/// Readings and summaries attached to a sample point
#[derive(Debug, Clone, Deserialize)]
pub struct TimeseriesData {
    pub instant: InstantData,
    #[serde(default)]
    pub next_1_hours: Option<NextHours>,
    #[serde(default)]
    pub next_6_hours: Option<NextSixHours>,
    #[serde(default)]
    pub next_12_hours: Option<NextHours>,
}

/// Wrapper around the instantaneous readings
#[derive(Debug, Clone, Deserialize)]
pub struct InstantData {
    #[serde(default)]
    pub details: InstantDetails,
}

/// Instantaneous readings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstantDetails {
    #[serde(default)]
    pub air_temperature: Option<f64>,
    #[serde(default)]
    pub air_pressure_at_sea_level: Option<f64>,
    #[serde(default)]
    pub relative_humidity: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub wind_from_direction: Option<f64>,
    #[serde(default)]
    pub cloud_area_fraction: Option<f64>,
    #[serde(default)]
    pub dew_point_temperature: Option<f64>,
    #[serde(default)]
    pub fog_area_fraction: Option<f64>,
    #[serde(default)]
    pub wind_speed_of_gust: Option<f64>,
    #[serde(default)]
    pub ultraviolet_index_clear_sky: Option<f64>,
}

/// Condition summary for a period
#[derive(Debug, Clone, Deserialize)]
pub struct Summary {
    /// Met.no weather symbol (e.g. `partlycloudy_day`)
    pub symbol_code: String,
}

/// One- and twelve-hour period block
#[derive(Debug, Clone, Deserialize)]
pub struct NextHours {
    pub summary: Summary,
    #[serde(default)]
    pub details: NextHourDetails,
}

/// Details for one- and twelve-hour periods
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextHourDetails {
    #[serde(default)]
    pub precipitation_amount: Option<f64>,
    #[serde(default)]
    pub probability_of_precipitation: Option<f64>,
}

/// Six-hour period block
#[derive(Debug, Clone, Deserialize)]
pub struct NextSixHours {
    pub summary: Summary,
    pub details: SixHourDetails,
}

/// Details for a six-hour period
#[derive(Debug, Clone, Deserialize)]
pub struct SixHourDetails {
    pub air_temperature_max: f64,
    pub air_temperature_min: f64,
    pub precipitation_amount: f64,
    #[serde(default)]
    pub probability_of_precipitation: Option<f64>,
}
