//! Domain entities - forecast data as published to the weather entity

mod forecast;

pub use forecast::{CurrentConditions, ForecastPeriod, ForecastSnapshot, ISO_OFFSET_FORMAT};
