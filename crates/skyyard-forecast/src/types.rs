use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Qualitative estimate of a sky condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SkyQuality {
    Excellent,
    Fair,
    Poor,
    #[default]
    Unknown,
}

impl SkyQuality {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for SkyQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One NWS forecast period, as supplied by the provider. Read-only, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    /// Period label, e.g. "Tonight" or "Wednesday Night"
    pub name: String,
    /// Period start in the zone's local offset
    pub start_time: DateTime<FixedOffset>,
    /// Prose forecast the transparency estimate is derived from
    pub detailed_forecast: String,
    /// Free-form wind text, e.g. "10 to 15 mph"
    #[serde(default)]
    pub wind_speed: String,
    /// Provider icon URL
    #[serde(default)]
    pub icon: String,
}

/// Derived evening forecast. Ephemeral, recomputed on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightForecast {
    pub forecast: String,
    pub icon: String,
    /// Which reporting period this corresponds to ("Tonight", ...)
    pub forecast_day: String,
    pub seeing: SkyQuality,
    pub transparency: SkyQuality,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PointsProperties {
    pub forecast: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_deserializes_nws_shape() {
        let json = r#"{
            "name": "Tonight",
            "startTime": "2025-06-10T18:00:00-07:00",
            "detailedForecast": "Mostly clear, with a low around 55.",
            "windSpeed": "5 to 10 mph",
            "icon": "https://api.weather.gov/icons/land/night/few?size=medium"
        }"#;

        let period: ForecastPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.name, "Tonight");
        assert_eq!(period.wind_speed, "5 to 10 mph");
        assert_eq!(period.start_time.timezone().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn test_period_tolerates_missing_wind_and_icon() {
        let json = r#"{
            "name": "Tonight",
            "startTime": "2025-06-10T18:00:00-07:00",
            "detailedForecast": "Clear."
        }"#;

        let period: ForecastPeriod = serde_json::from_str(json).unwrap();
        assert!(period.wind_speed.is_empty());
        assert!(period.icon.is_empty());
    }

    #[test]
    fn test_sky_quality_labels() {
        assert_eq!(SkyQuality::Excellent.label(), "Excellent");
        assert_eq!(SkyQuality::Unknown.to_string(), "Unknown");
    }
}
