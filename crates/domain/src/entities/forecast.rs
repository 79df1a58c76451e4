//! Forecast entities
//!
//! A `ForecastSnapshot` is everything one update cycle produces: the current
//! conditions taken from the first timeseries entry and the ordered list of
//! six-hour forecast periods. Snapshots are replaced wholesale, never merged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format used for forecast periods (UTC with an explicit `+00:00` offset)
pub const ISO_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S+00:00";

/// Serde adapter writing `DateTime<Utc>` as `2024-01-01T06:00:00+00:00`
mod iso_offset {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::ISO_OFFSET_FORMAT;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(ISO_OFFSET_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}

/// One six-hour forecast window
///
/// Field names on the wire follow the weather entity's forecast keys
/// (`native_temperature`, `native_templow`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    /// Window start (UTC)
    #[serde(with = "iso_offset")]
    pub datetime: DateTime<Utc>,
    /// Normalized weather condition
    pub condition: String,
    /// Maximum air temperature in °C
    #[serde(rename = "native_temperature")]
    pub temperature_max: f64,
    /// Minimum air temperature in °C
    #[serde(rename = "native_templow")]
    pub temperature_min: f64,
    /// Precipitation amount in mm
    #[serde(rename = "native_precipitation")]
    pub precipitation: f64,
    /// Probability of precipitation in percent, when the provider reports it
    pub precipitation_probability: Option<f64>,
    /// Air pressure at sea level in hPa, at window start
    #[serde(rename = "native_pressure")]
    pub pressure: f64,
    /// Wind direction in degrees, at window start
    pub wind_bearing: f64,
    /// Wind speed in m/s, at window start
    #[serde(rename = "native_wind_speed")]
    pub wind_speed: f64,
}

impl ForecastPeriod {
    /// Window start formatted as `YYYY-MM-DDTHH:MM:SS+00:00`
    #[must_use]
    pub fn datetime_iso(&self) -> String {
        self.datetime.format(ISO_OFFSET_FORMAT).to_string()
    }
}

/// Instantaneous readings from the earliest timeseries entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Time of the reading
    pub time: DateTime<Utc>,
    /// Air temperature in °C
    pub temperature: f64,
    /// Air pressure at sea level in hPa
    pub pressure: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Wind direction in degrees
    pub wind_bearing: f64,
    /// Normalized condition for the next hour, if the provider sent one
    pub condition: Option<String>,
}

/// Result of one forecast update cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    /// Current conditions
    pub current: CurrentConditions,
    /// Six-hour periods in ascending order
    pub periods: Vec<ForecastPeriod>,
    /// The instant the snapshot was computed against
    pub fetched_at: DateTime<Utc>,
}

impl ForecastSnapshot {
    /// Serialize the period list to JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (non-finite floats).
    pub fn periods_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.periods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn period(hour: u32, probability: Option<f64>) -> ForecastPeriod {
        ForecastPeriod {
            datetime: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
            condition: "rainy".to_string(),
            temperature_max: 4.5,
            temperature_min: 1.2,
            precipitation: 3.1,
            precipitation_probability: probability,
            pressure: 1003.4,
            wind_bearing: 210.0,
            wind_speed: 6.2,
        }
    }

    fn snapshot(periods: Vec<ForecastPeriod>) -> ForecastSnapshot {
        ForecastSnapshot {
            current: CurrentConditions {
                time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                temperature: 2.0,
                pressure: 1004.0,
                humidity: 88.0,
                wind_speed: 5.0,
                wind_bearing: 200.0,
                condition: Some("cloudy".to_string()),
            },
            periods,
            fetched_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 5, 0).unwrap(),
        }
    }

    #[test]
    fn datetime_uses_explicit_offset() {
        assert_eq!(period(6, None).datetime_iso(), "2024-01-01T06:00:00+00:00");
    }

    #[test]
    fn serializes_with_entity_keys() {
        let json = serde_json::to_value(period(6, Some(40.0))).unwrap();
        assert_eq!(json["datetime"], "2024-01-01T06:00:00+00:00");
        assert_eq!(json["condition"], "rainy");
        assert_eq!(json["native_temperature"], 4.5);
        assert_eq!(json["native_templow"], 1.2);
        assert_eq!(json["native_precipitation"], 3.1);
        assert_eq!(json["precipitation_probability"], 40.0);
        assert_eq!(json["native_pressure"], 1003.4);
        assert_eq!(json["wind_bearing"], 210.0);
        assert_eq!(json["native_wind_speed"], 6.2);
    }

    #[test]
    fn missing_probability_serializes_as_null() {
        let json = serde_json::to_value(period(12, None)).unwrap();
        assert!(json["precipitation_probability"].is_null());
    }

    #[test]
    fn period_roundtrips_through_offset_format() {
        let original = period(18, Some(5.0));
        let json = serde_json::to_string(&original).unwrap();
        let back: ForecastPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn periods_json_is_an_ordered_array() {
        let snap = snapshot(vec![period(0, None), period(6, Some(10.0))]);
        let json = snap.periods_json().unwrap();
        assert!(json.starts_with('['));
        let first = json.find("2024-01-01T00:00:00+00:00").unwrap();
        let second = json.find("2024-01-01T06:00:00+00:00").unwrap();
        assert!(first < second);
    }
}
