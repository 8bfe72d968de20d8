//! Geocoding error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("OpenCage API key not configured")]
    MissingApiKey,

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("API error: {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl GeocodeError {
    /// User-friendly message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingApiKey => {
                "Location search needs an OpenCage API key in the config.".to_string()
            }
            Self::RateLimited(secs) => {
                format!("Too many location lookups. Please wait {} seconds.", secs)
            }
            Self::Api { .. } => "Location lookup failed. Please try again.".to_string(),
            Self::Network(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Whether this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::Network(_))
    }
}
