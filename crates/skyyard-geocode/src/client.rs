//! OpenCage geocoding API client.

use std::time::Duration;
use tracing::instrument;

use crate::error::GeocodeError;
use crate::types::{Coordinate, OpenCageResponse, OpenCageResult, Place, Suggestion};

const OPENCAGE_API_BASE: &str = "https://api.opencagedata.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Queries shorter than this (after trimming) never hit the provider.
const MIN_SUGGESTION_QUERY_LEN: usize = 3;

pub struct GeocodeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeocodeClient {
    pub fn new(api_key: &str) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: OPENCAGE_API_BASE.to_string(),
        })
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn new_with_base_url(api_key: &str, base_url: &str) -> Result<Self, GeocodeError> {
        let mut client = Self::new(api_key)?;
        client.base_url = base_url.to_string();
        Ok(client)
    }

    fn require_key(&self) -> Result<&str, GeocodeError> {
        if self.api_key.is_empty() || self.api_key.starts_with("YOUR_") {
            return Err(GeocodeError::MissingApiKey);
        }
        Ok(&self.api_key)
    }

    /// Forward-geocode a free-text query to a single place.
    ///
    /// Returns `Ok(None)` when the provider has no results for the query.
    #[instrument(skip(self), level = "info")]
    pub async fn lookup(&self, query: &str) -> Result<Option<Place>, GeocodeError> {
        let url = format!(
            "{}/geocode/v1/json?q={}&key={}&limit=1",
            self.base_url,
            urlencoding::encode(query),
            self.require_key()?,
        );

        let response = self.client.get(&url).send().await?;
        let body: OpenCageResponse = self.handle_response(response).await?;

        Ok(body.results.into_iter().next().map(place_from_result))
    }

    /// Reverse-geocode a coordinate pair by forwarding it as free text.
    #[instrument(skip(self), level = "info")]
    pub async fn reverse(&self, coordinate: Coordinate) -> Result<Option<Place>, GeocodeError> {
        self.lookup(&format!("{},{}", coordinate.lat, coordinate.lon))
            .await
    }

    /// Fetch live search suggestions for a partial query.
    ///
    /// Queries under three trimmed characters return an empty list without
    /// a network call.
    #[instrument(skip(self), level = "debug")]
    pub async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, GeocodeError> {
        let query = query.trim();
        if query.len() < MIN_SUGGESTION_QUERY_LEN {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/geocode/v1/json?q={}&key={}&limit=5",
            self.base_url,
            urlencoding::encode(query),
            self.require_key()?,
        );

        let response = self.client.get(&url).send().await?;
        let body: OpenCageResponse = self.handle_response(response).await?;

        Ok(body
            .results
            .into_iter()
            .map(|r| {
                let coordinate = Coordinate::new(r.geometry.lat, r.geometry.lng);
                let label = r.formatted.clone();
                let name = r
                    .components
                    .short_name()
                    .unwrap_or_else(|| r.formatted.clone());
                Suggestion {
                    label,
                    coordinate,
                    name,
                }
            })
            .collect())
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<OpenCageResponse, GeocodeError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| GeocodeError::Api {
                status: status.as_u16(),
                message: format!("JSON parse error: {}", e),
            })
        } else if status.as_u16() == 429 || status.as_u16() == 402 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            Err(GeocodeError::RateLimited(retry_after))
        } else {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("Geocode request failed: {} {}", status, message);
            Err(GeocodeError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn place_from_result(result: OpenCageResult) -> Place {
    let coordinate = Coordinate::new(result.geometry.lat, result.geometry.lng);
    let name = result.components.short_name().unwrap_or(result.formatted);
    Place { coordinate, name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sf_result() -> serde_json::Value {
        serde_json::json!({
            "geometry": {"lat": 37.7749, "lng": -122.4194},
            "formatted": "San Francisco, California, United States",
            "components": {
                "city": "San Francisco",
                "state": "California",
                "country": "United States"
            }
        })
    }

    #[tokio::test]
    async fn test_lookup_maps_first_result() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .and(query_param("q", "San Francisco"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [sf_result()]
            })))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("test_key", &mock_server.uri()).unwrap();
        let place = client.lookup("San Francisco").await.unwrap().unwrap();

        assert_eq!(place.name, "San Francisco");
        assert_eq!(place.coordinate.lat, 37.7749);
        assert_eq!(place.coordinate.lon, -122.4194);
    }

    #[tokio::test]
    async fn test_lookup_zero_results_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"results": []})),
            )
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("test_key", &mock_server.uri()).unwrap();
        let place = client.lookup("xyzzy nowhere").await.unwrap();

        assert!(place.is_none());
    }

    #[tokio::test]
    async fn test_lookup_without_key_is_config_error() {
        let client = GeocodeClient::new("YOUR_OPENCAGE_API_KEY").unwrap();
        let result = client.lookup("Seattle").await;
        assert!(matches!(result, Err(GeocodeError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_suggest_returns_five_at_most() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [sf_result(), sf_result()]
            })))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("test_key", &mock_server.uri()).unwrap();
        let suggestions = client.suggest("San Fr").await.unwrap();

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].label, "San Francisco, California, United States");
        assert_eq!(suggestions[0].name, "San Francisco");
    }

    #[tokio::test]
    async fn test_suggest_short_query_skips_network() {
        // No mock server mounted: a network call would fail the test.
        let client = GeocodeClient::new_with_base_url("test_key", "http://127.0.0.1:9").unwrap();
        let suggestions = client.suggest("  ab ").await.unwrap();
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .respond_with(ResponseTemplate::new(429).append_header("Retry-After", "30"))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("test_key", &mock_server.uri()).unwrap();
        let result = client.lookup("Seattle").await;

        assert!(matches!(result, Err(GeocodeError::RateLimited(30))));
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("test_key", &mock_server.uri()).unwrap();
        let result = client.lookup("Seattle").await;

        assert!(matches!(result, Err(GeocodeError::Api { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_reverse_forwards_coordinates_as_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .and(query_param("q", "37.7749,-122.4194"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [sf_result()]
            })))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("test_key", &mock_server.uri()).unwrap();
        let place = client
            .reverse(Coordinate::new(37.7749, -122.4194))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(place.name, "San Francisco");
    }
}
