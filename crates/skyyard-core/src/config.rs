use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single configuration problem, tied to the field that caused it.
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Geocoding provider settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Moon-phase imaging provider settings
    #[serde(default)]
    pub astronomy: AstronomyConfig,

    /// Default observing site, used when no device position is available
    #[serde(default)]
    pub site: SiteConfig,
}

/// OpenCage geocoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// OpenCage API key
    /// Create at: https://opencagedata.com/dashboard
    pub api_key: String,
}

impl GeocodingConfig {
    /// Check if the key is configured (not a placeholder)
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.api_key.starts_with("YOUR_")
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("OPENCAGE_API_KEY")
                .unwrap_or_else(|_| "YOUR_OPENCAGE_API_KEY".to_string()),
        }
    }
}

/// AstronomyAPI credentials for moon-phase rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AstronomyConfig {
    /// Application ID
    /// Create at: https://astronomyapi.com/dashboard
    pub app_id: String,
    /// Application secret
    pub app_secret: String,
}

impl AstronomyConfig {
    /// Check if credentials are configured (not placeholders)
    pub fn is_configured(&self) -> bool {
        !self.app_id.is_empty()
            && !self.app_secret.is_empty()
            && !self.app_id.starts_with("YOUR_")
            && !self.app_secret.starts_with("YOUR_")
    }
}

impl Default for AstronomyConfig {
    fn default() -> Self {
        Self {
            app_id: std::env::var("ASTRONOMY_API_ID")
                .unwrap_or_else(|_| "YOUR_ASTRONOMY_API_ID".to_string()),
            app_secret: std::env::var("ASTRONOMY_API_SECRET")
                .unwrap_or_else(|_| "YOUR_ASTRONOMY_API_SECRET".to_string()),
        }
    }
}

/// Default observing site
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
}

impl SiteConfig {
    /// Returns the configured coordinate pair, if both halves are present.
    pub fn coordinate(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skyyard");

        Self {
            config_dir,
            geocoding: GeocodingConfig::default(),
            astronomy: AstronomyConfig::default(),
            site: SiteConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        // Provider credentials are only warnings: the app degrades to
        // placeholders when a provider is unavailable.
        if !self.geocoding.is_configured() {
            result.add_warning(
                "geocoding.api_key",
                "OpenCage API key not configured - location search will be unavailable",
            );
        }

        if !self.astronomy.is_configured() {
            result.add_warning(
                "astronomy",
                "AstronomyAPI credentials not configured - moon-phase image will be unavailable",
            );
        }

        if let Some(lat) = self.site.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                result.add_error("site.latitude", "Latitude must be between -90 and 90");
            }
        }
        if let Some(lon) = self.site.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                result.add_error("site.longitude", "Longitude must be between -180 and 180");
            }
        }
        if self.site.latitude.is_some() != self.site.longitude.is_some() {
            result.add_error(
                "site",
                "Both site.latitude and site.longitude must be set together",
            );
        }

        result
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skyyard");

        Ok(config_dir.join("config.toml"))
    }
}
