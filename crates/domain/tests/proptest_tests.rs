//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use chrono::{DateTime, TimeZone, Utc};
use domain::{ForecastPeriod, GeoLocation, LocationName};
use proptest::prelude::*;

// ============================================================================
// GeoLocation Property Tests
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }
    }
}

// ============================================================================
// LocationName Property Tests
// ============================================================================

mod location_name_tests {
    use super::*;

    proptest! {
        #[test]
        fn names_are_trimmed(
            pad_left in "[ \t]{0,4}",
            core in "[A-Za-z0-9][A-Za-z0-9 _-]{0,20}[A-Za-z0-9]",
            pad_right in "[ \t]{0,4}"
        ) {
            let name = LocationName::new(format!("{pad_left}{core}{pad_right}")).unwrap();
            prop_assert_eq!(name.as_str(), core.as_str());
        }

        #[test]
        fn whitespace_only_names_rejected(blank in "[ \t\n]{0,8}") {
            prop_assert!(LocationName::new(blank).is_err());
        }
    }
}

// ============================================================================
// ForecastPeriod Property Tests
// ============================================================================

mod forecast_period_tests {
    use super::*;

    fn period_at(datetime: DateTime<Utc>) -> ForecastPeriod {
        ForecastPeriod {
            datetime,
            condition: "sunny".to_string(),
            temperature_max: 20.0,
            temperature_min: 10.0,
            precipitation: 0.0,
            precipitation_probability: None,
            pressure: 1015.0,
            wind_bearing: 90.0,
            wind_speed: 2.0,
        }
    }

    proptest! {
        #[test]
        fn datetime_always_ends_with_utc_offset(secs in 0i64..4_102_444_800i64) {
            let dt = Utc.timestamp_opt(secs, 0).unwrap();
            let formatted = period_at(dt).datetime_iso();
            prop_assert!(formatted.ends_with("+00:00"));
            prop_assert_eq!(formatted.len(), "2024-01-01T00:00:00+00:00".len());
        }

        #[test]
        fn datetime_roundtrips_through_json(secs in 0i64..4_102_444_800i64) {
            let dt = Utc.timestamp_opt(secs, 0).unwrap();
            let json = serde_json::to_string(&period_at(dt)).unwrap();
            let back: ForecastPeriod = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back.datetime, dt);
        }
    }
}
