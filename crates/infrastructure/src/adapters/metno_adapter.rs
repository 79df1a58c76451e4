//! Met.no adapter - Implements ForecastPort using integration_metno

use application::error::ApplicationError;
use application::ports::ForecastPort;
use async_trait::async_trait;
use chrono::Utc;
use domain::{ForecastSnapshot, value_objects::GeoLocation};
use integration_metno::{
    ConditionMap, ForecastClient, MetNoClient, MetNoConfig, MetNoError, transform,
};
use tracing::{debug, instrument, warn};

/// Adapter for the Met.no Locationforecast service
///
/// Fetches the raw document and runs the six-hour transform against the
/// current time. Each call is one independent update cycle.
pub struct MetNoForecastAdapter {
    client: Box<dyn ForecastClient>,
    conditions: ConditionMap,
}

impl std::fmt::Debug for MetNoForecastAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetNoForecastAdapter")
            .field("client", &"ForecastClient")
            .field("conditions", &self.conditions.len())
            .finish()
    }
}

impl MetNoForecastAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(MetNoConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: MetNoConfig) -> Result<Self, ApplicationError> {
        let client = MetNoClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client, using the default Met.no condition table
    pub fn with_client(client: impl ForecastClient + 'static) -> Self {
        Self {
            client: Box::new(client),
            conditions: ConditionMap::metno(),
        }
    }

    /// Replace the condition table
    #[must_use]
    pub fn with_conditions(mut self, conditions: ConditionMap) -> Self {
        self.conditions = conditions;
        self
    }

    /// Map integration error to application error
    fn map_error(err: MetNoError) -> ApplicationError {
        match err {
            MetNoError::NotFound { status } => {
                ApplicationError::NotFound(format!("Met.no returned HTTP {status}"))
            },
            MetNoError::ConnectionFailed(e) | MetNoError::RequestFailed(e) => {
                ApplicationError::ExternalService(e)
            },
            e @ (MetNoError::ParseError(_)
            | MetNoError::EmptyTimeseries
            | MetNoError::UnorderedTimeseries { .. }
            | MetNoError::MissingReading { .. }) => ApplicationError::InvalidData(e.to_string()),
        }
    }
}

#[async_trait]
impl ForecastPort for MetNoForecastAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn fetch_snapshot(
        &self,
        location: &GeoLocation,
    ) -> Result<ForecastSnapshot, ApplicationError> {
        let response = self
            .client
            .get_complete(location.latitude(), location.longitude())
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch forecast");
                Self::map_error(e)
            })?;

        let snapshot = transform(&response, Utc::now(), &self.conditions).map_err(|e| {
            warn!(error = %e, "Failed to transform forecast");
            Self::map_error(e)
        })?;

        debug!(periods = snapshot.periods.len(), "Retrieved six-hour forecast");
        Ok(snapshot)
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
