//! Moon-phase client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoonError {
    #[error("AstronomyAPI credentials not configured")]
    MissingCredentials,

    #[error("API error: {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response shape: {0}")]
    Decode(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MoonError {
    /// User-friendly message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredentials => {
                "The moon-phase image needs AstronomyAPI credentials in the config.".to_string()
            }
            Self::Api { status, .. } if *status == 401 || *status == 403 => {
                "AstronomyAPI rejected the configured credentials.".to_string()
            }
            Self::Api { .. } | Self::Decode(_) => {
                "Unable to load the moon-phase image.".to_string()
            }
            Self::Network(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Whether this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
