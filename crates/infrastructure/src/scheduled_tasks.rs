//! Factory functions for scheduled tasks
//!
//! Provides pre-built task closures for the scheduler to run:
//! - Forecast refresh (every 40-49 minutes, picked at startup)

use std::sync::Arc;

use application::SixHoursWeather;
use futures::future::BoxFuture;
use tracing::{debug, error, info};

/// Task name for the forecast refresh
pub const FORECAST_REFRESH_TASK: &str = "forecast_refresh";

/// Create a forecast refresh task closure
///
/// Each run performs one update cycle on the entity. A failed cycle leaves the
/// previously published forecast in place.
pub fn create_forecast_refresh_task(
    weather: Arc<SixHoursWeather>,
) -> impl Fn() -> BoxFuture<'static, Result<(), String>> + Send + Sync + 'static {
    move || {
        let weather = Arc::clone(&weather);

        Box::pin(async move {
            debug!(location = %weather.location_name(), "Refreshing forecast");

            match weather.update().await {
                Ok(()) => {
                    info!(
                        location = %weather.location_name(),
                        periods = weather.forecast().map_or(0, |f| f.len()),
                        "Forecast refreshed"
                    );
                    Ok(())
                },
                Err(e) => {
                    error!(
                        location = %weather.location_name(),
                        error = %e,
                        "Forecast refresh failed, keeping previous forecast"
                    );
                    Err(format!("Forecast refresh failed: {e}"))
                },
            }
        })
    }
}
