//! Met.no weather integration
//!
//! Client for the Met.no Locationforecast 2.0 API (<https://api.met.no>).
//! Fetches the `complete` product for a coordinate and reshapes its hourly
//! timeseries into six-hour forecast periods.

pub mod client;
mod conditions;
mod models;
mod transform;

pub use client::{ForecastClient, MetNoClient, MetNoConfig, MetNoError};
pub use conditions::ConditionMap;
pub use models::{
    ApiResponse, InstantData, InstantDetails, Meta, NextHourDetails, NextHours, NextSixHours,
    Properties, SixHourDetails, Summary, TimeseriesData, TimeseriesEntry,
};
pub use transform::{WINDOW_HOURS, transform};
