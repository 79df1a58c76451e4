//! Plain-text rendering of the published forecast

use std::fmt::Write;

use domain::{CurrentConditions, ForecastPeriod};

/// One line describing the current conditions
pub fn current_line(current: &CurrentConditions) -> String {
    format!(
        "Now ({}): {:.1} °C, {}, {:.1} hPa, {:.0} % humidity, wind {:.1} m/s from {:.0}°",
        current.time.format("%Y-%m-%d %H:%M UTC"),
        current.temperature,
        current.condition.as_deref().unwrap_or("unknown"),
        current.pressure,
        current.humidity,
        current.wind_speed,
        current.wind_bearing,
    )
}

/// One line per six-hour period
pub fn period_line(period: &ForecastPeriod) -> String {
    let mut line = format!(
        "{}  {:<22} {:>5.1} .. {:>5.1} °C  {:>4.1} mm",
        period.datetime.format("%a %d %b %H:%M"),
        period.condition,
        period.temperature_min,
        period.temperature_max,
        period.precipitation,
    );
    if let Some(probability) = period.precipitation_probability {
        let _ = write!(line, " ({probability:.0} %)");
    }
    let _ = write!(
        line,
        "  wind {:.1} m/s from {:.0}°",
        period.wind_speed, period.wind_bearing
    );
    line
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn period(probability: Option<f64>) -> ForecastPeriod {
        ForecastPeriod {
            datetime: Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap(),
            condition: "rainy".to_string(),
            temperature_max: 4.0,
            temperature_min: -1.5,
            precipitation: 2.5,
            precipitation_probability: probability,
            pressure: 1011.0,
            wind_bearing: 150.0,
            wind_speed: 4.1,
        }
    }

    #[test]
    fn current_line_shows_all_values() {
        let current = CurrentConditions {
            time: Utc.with_ymd_and_hms(2024, 1, 1, 5, 0, 0).unwrap(),
            temperature: 2.54,
            pressure: 1012.5,
            humidity: 77.0,
            wind_speed: 3.3,
            wind_bearing: 145.0,
            condition: Some("partlycloudy".to_string()),
        };

        let line = current_line(&current);
        assert!(line.starts_with("Now (2024-01-01 05:00 UTC): 2.5 °C, partlycloudy"));
        assert!(line.contains("77 % humidity"));
        assert!(line.ends_with("wind 3.3 m/s from 145°"));
    }

    #[test]
    fn current_line_without_condition() {
        let current = CurrentConditions {
            time: Utc.with_ymd_and_hms(2024, 1, 1, 5, 0, 0).unwrap(),
            temperature: 0.0,
            pressure: 1000.0,
            humidity: 50.0,
            wind_speed: 0.0,
            wind_bearing: 0.0,
            condition: None,
        };
        assert!(current_line(&current).contains("unknown"));
    }

    #[test]
    fn period_line_with_probability() {
        let line = period_line(&period(Some(40.0)));
        assert!(line.starts_with("Mon 01 Jan 06:00  rainy"));
        assert!(line.contains(" -1.5 ..   4.0 °C"));
        assert!(line.contains("2.5 mm (40 %)"));
    }

    #[test]
    fn period_line_without_probability() {
        let line = period_line(&period(None));
        assert!(!line.contains('%'));
        assert!(line.ends_with("wind 4.1 m/s from 150°"));
    }
}
