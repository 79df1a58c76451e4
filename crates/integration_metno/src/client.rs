//! Met.no Locationforecast client
//!
//! HTTP client for the Locationforecast 2.0 `complete` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::GeoLocation;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::ApiResponse;

/// Met.no client errors
#[derive(Debug, Error)]
pub enum MetNoError {
    /// The HTTP client could not be built
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request never produced a response
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The service answered with anything other than 200
    #[error("Met.no returned HTTP {status}")]
    NotFound {
        /// HTTP status code of the response
        status: u16,
    },

    /// The body was not a valid forecast document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The forecast document has no timeseries entries
    #[error("Forecast timeseries is empty")]
    EmptyTimeseries,

    /// A timeseries timestamp went backwards
    #[error("Timeseries out of order: {current} follows {previous}")]
    UnorderedTimeseries {
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    /// An entry that is read lacks an instant reading
    #[error("Entry at {time} has no {field}")]
    MissingReading {
        time: DateTime<Utc>,
        field: &'static str,
    },
}

/// Met.no client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetNoConfig {
    /// Locationforecast base URL (default: <https://api.met.no/weatherapi/locationforecast/2.0>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Client identifier sent as `User-Agent`; Met.no rejects anonymous clients
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://api.met.no/weatherapi/locationforecast/2.0".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "home-assistant-met-next-6-hours-forecast \
     https://github.com/toringer/home-assistant-met-next-6-hours-forecast"
        .to_string()
}

impl Default for MetNoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Forecast client trait for fetching raw Met.no data
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// Fetch the complete forecast document for a coordinate
    async fn get_complete(&self, latitude: f64, longitude: f64)
    -> Result<ApiResponse, MetNoError>;

    /// Check if the forecast service is reachable
    async fn is_healthy(&self) -> bool;
}

/// Met.no HTTP client implementation
#[derive(Debug)]
pub struct MetNoClient {
    client: Client,
    config: MetNoConfig,
}

impl MetNoClient {
    /// Create a new Met.no client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: MetNoConfig) -> Result<Self, MetNoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| MetNoError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, MetNoError> {
        Self::new(MetNoConfig::default())
    }

    /// The active configuration
    pub const fn config(&self) -> &MetNoConfig {
        &self.config
    }

    fn complete_url(&self) -> String {
        format!("{}/complete", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ForecastClient for MetNoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_complete(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ApiResponse, MetNoError> {
        let url = self.complete_url();
        debug!(url = %url, "Fetching complete forecast");

        let response = self
            .client
            .get(&url)
            .query(&[("lat", latitude), ("lon", longitude)])
            .send()
            .await
            .map_err(|e| MetNoError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Forecast request was not successful");
            return Err(MetNoError::NotFound {
                status: status.as_u16(),
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| MetNoError::ParseError(e.to_string()))?;

        debug!(
            entries = api_response.timeseries().len(),
            "Received forecast timeseries"
        );
        Ok(api_response)
    }

    async fn is_healthy(&self) -> bool {
        let probe = GeoLocation::oslo();
        self.get_complete(probe.latitude(), probe.longitude())
            .await
            .is_ok()
    }
}
