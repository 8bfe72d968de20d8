//! Forecast error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("API error: {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response shape: {0}")]
    Decode(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ForecastError {
    /// User-friendly message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { status, .. } if *status >= 500 => {
                "The forecast service is having trouble. Try again later.".to_string()
            }
            Self::Api { .. } | Self::Decode(_) => "Unable to load forecast.".to_string(),
            Self::Network(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Whether this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Decode(_) => false,
        }
    }
}
