//! National Weather Service forecasts for Skyyard.
//!
//! Two-step NWS client (point resolution, then period fetch) plus the
//! evening-period selection and the seeing/transparency estimates derived
//! from forecast text and wind speed.

pub mod client;
pub mod conditions;
pub mod error;
pub mod types;

pub use client::ForecastClient;
pub use conditions::{interpret, seeing_from_wind, select_evening_period, transparency_from_text};
pub use error::ForecastError;
pub use types::{ForecastPeriod, NightForecast, SkyQuality};
