//! Location types and the OpenCage response shapes they are built from.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}, {:.2}", self.lat, self.lon)
    }
}

/// A resolved location with a short display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub coordinate: Coordinate,
    pub name: String,
}

/// A live search suggestion: full formatted address plus the short name
/// used once the suggestion is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub label: String,
    pub coordinate: Coordinate,
    pub name: String,
}

/// Parse a raw "lat,lon" entry typed into the search box.
///
/// Returns `None` unless the text splits on a comma into exactly two
/// numbers.
pub fn parse_coordinates(text: &str) -> Option<Coordinate> {
    let (lat, lon) = text.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    Some(Coordinate::new(lat, lon))
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenCageResponse {
    #[serde(default)]
    pub results: Vec<OpenCageResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenCageResult {
    pub geometry: OpenCageGeometry,
    #[serde(default)]
    pub formatted: String,
    pub components: OpenCageComponents,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenCageGeometry {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OpenCageComponents {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl OpenCageComponents {
    /// Short place name: first non-empty component, most specific first.
    /// Empty strings fall through to the next component.
    pub fn short_name(self) -> Option<String> {
        [
            self.city,
            self.town,
            self.village,
            self.county,
            self.state,
            self.country,
        ]
        .into_iter()
        .flatten()
        .find(|n| !n.is_empty())
    }
}
