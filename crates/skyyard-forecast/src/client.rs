//! NWS forecast API client.
//!
//! Forecasts are fetched in two steps: the point endpoint maps a
//! coordinate to a zone forecast URL, which then serves the period list.

use chrono::Local;
use std::time::Duration;
use tracing::instrument;

use crate::conditions::interpret;
use crate::error::ForecastError;
use crate::types::{ForecastPeriod, ForecastResponse, NightForecast, PointsResponse};

const NWS_API_BASE: &str = "https://api.weather.gov";
const REQUEST_TIMEOUT_SECS: u64 = 10;

// NWS rejects requests without a User-Agent.
const USER_AGENT: &str = "skyyard/0.1.0 (github.com/skyyard)";

pub struct ForecastClient {
    client: reqwest::Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new() -> Result<Self, ForecastError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: NWS_API_BASE.to_string(),
        })
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn new_with_base_url(base_url: &str) -> Result<Self, ForecastError> {
        let mut client = Self::new()?;
        client.base_url = base_url.to_string();
        Ok(client)
    }

    /// Fetch the period list for a coordinate and derive the evening
    /// forecast.
    ///
    /// `Ok(None)` means the provider answered but no period qualifies as
    /// this or a coming evening.
    #[instrument(skip(self), level = "info")]
    pub async fn night_forecast(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Option<NightForecast>, ForecastError> {
        let periods = self.fetch_periods(lat, lon).await?;
        let now = Local::now().fixed_offset();
        Ok(interpret(&periods, now))
    }

    /// Fetch the raw period list for a coordinate.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_periods(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<ForecastPeriod>, ForecastError> {
        let points_url = format!("{}/points/{},{}", self.base_url, lat, lon);

        let response = self.client.get(&points_url).send().await?;
        let points: PointsResponse = Self::handle_response(response).await?;

        let forecast_url = points.properties.forecast.ok_or_else(|| {
            ForecastError::Decode("point response carries no forecast URL".to_string())
        })?;

        let response = self.client.get(&forecast_url).send().await?;
        let forecast: ForecastResponse = Self::handle_response(response).await?;

        Ok(forecast.properties.periods)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ForecastError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ForecastError::Decode(format!("JSON parse error: {}", e)))
        } else {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("NWS request failed: {} {}", status, message);
            Err(ForecastError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
