//! Integration tests for the Met.no client using wiremock
//!
//! These tests run the client against a mock HTTP server and then feed the
//! parsed document through the six-hour transform.

use chrono::{TimeZone, Utc};
use integration_metno::{
    ConditionMap, ForecastClient, MetNoClient, MetNoConfig, MetNoError, transform,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

const TEST_AGENT: &str = "met6h-tests https://example.org/met6h";

/// Sample `complete` document with hourly entries followed by six-hourly ones
fn sample_complete_response() -> serde_json::Value {
    let hourly = (0..=7).map(|hour| {
        serde_json::json!({
            "time": format!("2024-03-01T{hour:02}:00:00Z"),
            "data": {
                "instant": { "details": {
                    "air_pressure_at_sea_level": 1012.0,
                    "air_temperature": 3.0,
                    "relative_humidity": 81.5,
                    "wind_from_direction": 240.0,
                    "wind_speed": 5.1
                } },
                "next_1_hours": {
                    "summary": { "symbol_code": "partlycloudy_night" },
                    "details": { "precipitation_amount": 0.0 }
                },
                "next_6_hours": {
                    "summary": { "symbol_code": "lightrain" },
                    "details": {
                        "air_temperature_max": 4.2,
                        "air_temperature_min": 1.8,
                        "precipitation_amount": 1.3,
                        "probability_of_precipitation": 55.0
                    }
                }
            }
        })
    });
    let coarse = [12, 18].into_iter().map(|hour| {
        serde_json::json!({
            "time": format!("2024-03-01T{hour:02}:00:00Z"),
            "data": {
                "instant": { "details": {
                    "air_pressure_at_sea_level": 1009.0,
                    "air_temperature": 6.0,
                    "relative_humidity": 70.0,
                    "wind_from_direction": 200.0,
                    "wind_speed": 7.4
                } },
                "next_6_hours": {
                    "summary": { "symbol_code": "heavyrain" },
                    "details": {
                        "air_temperature_max": 6.5,
                        "air_temperature_min": 3.1,
                        "precipitation_amount": 9.0
                    }
                }
            }
        })
    });

    serde_json::json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [10.7522, 59.9139, 12] },
        "properties": {
            "meta": {
                "updated_at": "2024-03-01T00:10:00Z",
                "units": { "air_temperature": "celsius", "precipitation_amount": "mm" }
            },
            "timeseries": hourly.chain(coarse).collect::<Vec<_>>()
        }
    })
}

/// Create a test client configured to use the mock server
///
/// # Panics
///
/// Panics if the client cannot be created (should not happen in tests).
fn create_test_client(mock_server: &MockServer) -> MetNoClient {
    let config = MetNoConfig {
        base_url: mock_server.uri(),
        timeout_secs: 5,
        user_agent: TEST_AGENT.to_string(),
    };
    #[allow(clippy::expect_used)]
    MetNoClient::new(config).expect("Failed to create client")
}

/// Setup a mock for the /complete endpoint with the given response
async fn setup_complete_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/complete"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_get_complete_success() {
    let mock_server = MockServer::start().await;

    setup_complete_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_complete_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_complete(59.9139, 10.7522).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");

    let response = result.unwrap();
    assert_eq!(response.timeseries().len(), 10);
    assert!(response.properties.meta.is_some());
}

#[tokio::test]
async fn test_fetched_document_buckets_into_six_hour_periods() {
    let mock_server = MockServer::start().await;

    setup_complete_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_complete_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let response = client.get_complete(59.9139, 10.7522).await.unwrap();

    let now = Utc.with_ymd_and_hms(2024, 3, 1, 1, 0, 0).unwrap();
    let snapshot = transform(&response, now, &ConditionMap::metno()).unwrap();

    let starts: Vec<String> = snapshot.periods.iter().map(|p| p.datetime_iso()).collect();
    assert_eq!(
        starts,
        [
            "2024-03-01T01:00:00+00:00",
            "2024-03-01T07:00:00+00:00",
            "2024-03-01T18:00:00+00:00"
        ]
    );
    assert_eq!(snapshot.periods[0].condition, "rainy");
    assert_eq!(snapshot.periods[2].condition, "pouring");
    assert_eq!(snapshot.periods[2].precipitation_probability, None);
    assert_eq!(snapshot.current.condition.as_deref(), Some("partlycloudy"));
}

#[tokio::test]
async fn test_health_check_success() {
    let mock_server = MockServer::start().await;

    setup_complete_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_complete_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let is_healthy = client.is_healthy().await;

    assert!(is_healthy, "Expected health check to succeed");
}

// ============================================================================
// Error handling scenarios
// ============================================================================

#[tokio::test]
async fn test_not_found_status() {
    let mock_server = MockServer::start().await;

    setup_complete_mock(&mock_server, ResponseTemplate::new(404)).await;

    let client = create_test_client(&mock_server);
    let result = client.get_complete(59.9139, 10.7522).await;

    assert!(
        matches!(result, Err(MetNoError::NotFound { status: 404 })),
        "Expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error_is_reported_as_not_found() {
    let mock_server = MockServer::start().await;

    setup_complete_mock(
        &mock_server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_complete(59.9139, 10.7522).await;

    assert!(
        matches!(result, Err(MetNoError::NotFound { status: 500 })),
        "Expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn test_non_ok_success_status_is_rejected() {
    let mock_server = MockServer::start().await;

    setup_complete_mock(&mock_server, ResponseTemplate::new(203)).await;

    let client = create_test_client(&mock_server);
    let result = client.get_complete(59.9139, 10.7522).await;

    assert!(
        matches!(result, Err(MetNoError::NotFound { status: 203 })),
        "Expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;

    setup_complete_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("not valid json"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_complete(59.9139, 10.7522).await;

    assert!(
        matches!(result, Err(MetNoError::ParseError(_))),
        "Expected ParseError, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unreachable_server_is_request_failure() {
    let config = MetNoConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
        user_agent: TEST_AGENT.to_string(),
    };
    let client = MetNoClient::new(config).unwrap();

    let result = client.get_complete(59.9139, 10.7522).await;

    assert!(
        matches!(result, Err(MetNoError::RequestFailed(_))),
        "Expected RequestFailed, got: {result:?}"
    );
}

#[tokio::test]
async fn test_health_check_fails_on_server_error() {
    let mock_server = MockServer::start().await;

    setup_complete_mock(
        &mock_server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let is_healthy = client.is_healthy().await;

    assert!(!is_healthy, "Expected health check to fail");
}

// ============================================================================
// Request verification
// ============================================================================

#[tokio::test]
async fn test_request_contains_coordinates_and_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/complete"))
        .and(query_param("lat", "59.9139"))
        .and(query_param("lon", "10.7522"))
        .and(header("user-agent", TEST_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_complete_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_complete(59.9139, 10.7522).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn test_health_check_probes_oslo() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/complete"))
        .and(query_param("lat", "59.9139"))
        .and(query_param("lon", "10.7522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_complete_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(client.is_healthy().await);
}
