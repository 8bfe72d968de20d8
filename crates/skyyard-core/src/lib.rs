//! Shared configuration and startup plumbing for Skyyard.

pub mod config;

pub use config::{AstronomyConfig, Config, GeocodingConfig, SiteConfig, ValidationResult};

use anyhow::Result;

/// Initialize tracing for the application.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Skyyard core initialized");
    Ok(())
}
