//! Application services - Use case implementations

mod six_hours_weather;

pub use six_hours_weather::{
    ATTR_FORECAST_JSON, ATTRIBUTION, DOMAIN, DeviceInfo, NAME, PublishedForecast,
    SixHoursWeather, Units,
};
