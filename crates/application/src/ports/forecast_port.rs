//! Forecast service port
//!
//! Defines the interface the six-hour forecast entity uses to obtain a
//! fully transformed forecast snapshot.

use async_trait::async_trait;
use domain::{ForecastSnapshot, value_objects::GeoLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for forecast retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastPort: Send + Sync {
    /// Fetch and transform the forecast for a location
    ///
    /// One call is one update cycle: a single provider request followed by
    /// six-hour bucketing. Nothing is cached between calls.
    async fn fetch_snapshot(
        &self,
        location: &GeoLocation,
    ) -> Result<ForecastSnapshot, ApplicationError>;

    /// Check if the forecast service is available
    async fn is_available(&self) -> bool;
}
