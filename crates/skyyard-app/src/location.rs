//! Location acquisition: device position where the platform offers one,
//! falling back to the configured observing site, then to a neutral
//! "no location" outcome.

use thiserror::Error;

use skyyard_core::SiteConfig;
use skyyard_geocode::{Coordinate, GeocodeClient, Place};

/// Device positioning errors.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
}

/// Outcome of location acquisition. Failures are not errors: the home view
/// shows a neutral message and waits for a manual search.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationFix {
    Located(Place),
    Unavailable,
}

/// Single-shot device position read.
///
/// No platform positioning service is wired up yet; callers fall through
/// to the configured site.
pub async fn device_position() -> Result<Coordinate, LocationError> {
    Err(LocationError::ServiceUnavailable)
}

/// Resolve a coordinate into a named place, reverse-geocoding for the
/// display name and falling back to formatted coordinates.
async fn name_coordinate(coordinate: Coordinate, geocode: &GeocodeClient) -> Place {
    match geocode.reverse(coordinate).await {
        Ok(Some(place)) => place,
        Ok(None) => Place {
            coordinate,
            name: coordinate.to_string(),
        },
        Err(e) => {
            tracing::debug!("Reverse geocode failed: {}", e);
            Place {
                coordinate,
                name: coordinate.to_string(),
            }
        }
    }
}

/// Acquire a starting location: device position first, then the configured
/// site. Every failure path resolves to `Unavailable`.
pub async fn acquire(site: &SiteConfig, geocode: &GeocodeClient) -> LocationFix {
    match device_position().await {
        Ok(coordinate) => {
            tracing::info!("Device position: {}", coordinate);
            return LocationFix::Located(name_coordinate(coordinate, geocode).await);
        }
        Err(e) => tracing::debug!("Device position unavailable: {}", e),
    }

    if let Some((lat, lon)) = site.coordinate() {
        let coordinate = Coordinate::new(lat, lon);
        tracing::info!("Using configured site: {}", coordinate);
        return LocationFix::Located(name_coordinate(coordinate, geocode).await);
    }

    LocationFix::Unavailable
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_no_device_no_site_is_unavailable() {
        let geocode = GeocodeClient::new_with_base_url("key", "http://127.0.0.1:9").unwrap();
        let fix = acquire(&SiteConfig::default(), &geocode).await;
        assert_eq!(fix, LocationFix::Unavailable);
    }

    #[tokio::test]
    async fn test_configured_site_is_reverse_geocoded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{
                    "geometry": {"lat": 47.6062, "lng": -122.3321},
                    "formatted": "Seattle, Washington, United States",
                    "components": {"city": "Seattle", "state": "Washington"}
                }]
            })))
            .mount(&mock_server)
            .await;

        let geocode = GeocodeClient::new_with_base_url("key", &mock_server.uri()).unwrap();
        let site = SiteConfig {
            latitude: Some(47.6062),
            longitude: Some(-122.3321),
        };

        let fix = acquire(&site, &geocode).await;
        match fix {
            LocationFix::Located(place) => assert_eq!(place.name, "Seattle"),
            LocationFix::Unavailable => panic!("expected a located fix"),
        }
    }

    #[tokio::test]
    async fn test_geocode_failure_falls_back_to_coordinates() {
        // Geocode endpoint is unreachable; the site still resolves, with
        // formatted coordinates for a name.
        let geocode = GeocodeClient::new_with_base_url("key", "http://127.0.0.1:9").unwrap();
        let site = SiteConfig {
            latitude: Some(47.6062),
            longitude: Some(-122.3321),
        };

        let fix = acquire(&site, &geocode).await;
        match fix {
            LocationFix::Located(place) => assert_eq!(place.name, "47.61, -122.33"),
            LocationFix::Unavailable => panic!("expected a located fix"),
        }
    }
}
