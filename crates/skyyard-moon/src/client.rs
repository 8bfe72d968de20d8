//! AstronomyAPI moon-phase studio client.
//!
//! One authenticated POST per fetch. The rendering style is fixed; only
//! the observer (coordinates and local date) varies.

use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::error::MoonError;

const ASTRONOMY_API_BASE: &str = "https://api.astronomyapi.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct StudioResponse {
    data: StudioData,
}

#[derive(Debug, Deserialize)]
struct StudioData {
    #[serde(rename = "imageUrl")]
    image_url: String,
}

pub struct MoonClient {
    client: reqwest::Client,
    app_id: String,
    app_secret: String,
    base_url: String,
}

impl MoonClient {
    pub fn new(app_id: &str, app_secret: &str) -> Result<Self, MoonError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            app_id: app_id.to_string(),
            app_secret: app_secret.to_string(),
            base_url: ASTRONOMY_API_BASE.to_string(),
        })
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn new_with_base_url(
        app_id: &str,
        app_secret: &str,
        base_url: &str,
    ) -> Result<Self, MoonError> {
        let mut client = Self::new(app_id, app_secret)?;
        client.base_url = base_url.to_string();
        Ok(client)
    }

    fn require_credentials(&self) -> Result<(), MoonError> {
        let placeholder = |s: &str| s.is_empty() || s.starts_with("YOUR_");
        if placeholder(&self.app_id) || placeholder(&self.app_secret) {
            return Err(MoonError::MissingCredentials);
        }
        Ok(())
    }

    /// Request a rendered moon-phase image for an observer and local date,
    /// returning the provider's image URL.
    #[instrument(skip(self), level = "info")]
    pub async fn phase_image(
        &self,
        lat: f64,
        lon: f64,
        date: NaiveDate,
    ) -> Result<String, MoonError> {
        self.require_credentials()?;

        let url = format!("{}/api/v2/studio/moon-phase", self.base_url);

        let body = serde_json::json!({
            "style": {
                "moonStyle": "default",
                "backgroundStyle": "stars",
                "backgroundColor": "red",
                "headingColor": "white",
                "textColor": "white"
            },
            "format": "png",
            "observer": {
                "latitude": lat,
                "longitude": lon,
                "date": date.format("%Y-%m-%d").to_string(),
            },
            "view": { "type": "landscape-simple" },
        });

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.app_id, Some(&self.app_secret))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("Moon-phase request failed: {} {}", status, message);
            return Err(MoonError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: StudioResponse = response
            .json()
            .await
            .map_err(|e| MoonError::Decode(format!("JSON parse error: {}", e)))?;

        Ok(body.data.image_url)
    }
}
