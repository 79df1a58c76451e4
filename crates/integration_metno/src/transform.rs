//! Six-hour bucketing
//!
//! Turns the raw Met.no timeseries into the ordered list of six-hour forecast
//! periods plus current conditions. Pure apart from logging.

use chrono::{DateTime, Duration, Utc};
use domain::{CurrentConditions, ForecastPeriod, ForecastSnapshot};
use tracing::{debug, warn};

use crate::{
    client::MetNoError,
    conditions::ConditionMap,
    models::{ApiResponse, TimeseriesEntry},
};

/// Minimum spacing between consecutive forecast periods, in hours
pub const WINDOW_HOURS: i64 = 6;

/// Build a forecast snapshot from a raw response
///
/// Walks the timeseries once. Entries strictly before `now` are skipped, as are
/// entries less than [`WINDOW_HOURS`] after the last accepted one and entries
/// without a six-hour block. Every remaining entry becomes one period.
///
/// # Errors
///
/// - `MetNoError::EmptyTimeseries` if the response has no entries
/// - `MetNoError::UnorderedTimeseries` if a timestamp is earlier than its predecessor
/// - `MetNoError::MissingReading` if the first entry or a window-opening entry
///   lacks an instant reading it contributes
pub fn transform(
    response: &ApiResponse,
    now: DateTime<Utc>,
    conditions: &ConditionMap,
) -> Result<ForecastSnapshot, MetNoError> {
    let timeseries = response.timeseries();
    let first = timeseries.first().ok_or(MetNoError::EmptyTimeseries)?;

    if first.time > now {
        warn!(
            first = %first.time,
            now = %now,
            "Timeseries starts after the current time"
        );
    }
    let current = current_conditions(first, conditions)?;

    let window = Duration::hours(WINDOW_HOURS);
    let mut periods = Vec::new();
    let mut last_start: Option<DateTime<Utc>> = None;
    let mut previous = first.time;

    for entry in timeseries {
        if entry.time < previous {
            return Err(MetNoError::UnorderedTimeseries {
                previous,
                current: entry.time,
            });
        }
        previous = entry.time;

        if entry.time < now {
            continue;
        }
        if last_start.is_some_and(|start| entry.time < start + window) {
            continue;
        }
        let Some(six) = entry.data.next_6_hours.as_ref() else {
            debug!(time = %entry.time, "Entry has no six-hour summary, skipping");
            continue;
        };

        let instant = &entry.data.instant.details;
        let time = entry.time;
        periods.push(ForecastPeriod {
            datetime: entry.time,
            condition: conditions.normalize(&six.summary.symbol_code).to_string(),
            temperature_max: six.details.air_temperature_max,
            temperature_min: six.details.air_temperature_min,
            precipitation: six.details.precipitation_amount,
            precipitation_probability: six.details.probability_of_precipitation,
            pressure: reading(instant.air_pressure_at_sea_level, "air_pressure_at_sea_level", time)?,
            wind_bearing: reading(instant.wind_from_direction, "wind_from_direction", time)?,
            wind_speed: reading(instant.wind_speed, "wind_speed", time)?,
        });
        last_start = Some(entry.time);
    }

    debug!(periods = periods.len(), "Bucketed timeseries into six-hour periods");

    Ok(ForecastSnapshot {
        current,
        periods,
        fetched_at: now,
    })
}

fn reading(
    value: Option<f64>,
    field: &'static str,
    time: DateTime<Utc>,
) -> Result<f64, MetNoError> {
    value.ok_or(MetNoError::MissingReading { time, field })
}

fn current_conditions(
    entry: &TimeseriesEntry,
    conditions: &ConditionMap,
) -> Result<CurrentConditions, MetNoError> {
    let details = &entry.data.instant.details;
    let time = entry.time;
    Ok(CurrentConditions {
        time,
        temperature: reading(details.air_temperature, "air_temperature", time)?,
        pressure: reading(details.air_pressure_at_sea_level, "air_pressure_at_sea_level", time)?,
        humidity: reading(details.relative_humidity, "relative_humidity", time)?,
        wind_speed: reading(details.wind_speed, "wind_speed", time)?,
        wind_bearing: reading(details.wind_from_direction, "wind_from_direction", time)?,
        condition: entry
            .data
            .next_1_hours
            .as_ref()
            .map(|hour| conditions.normalize(&hour.summary.symbol_code).to_string()),
    })
}
