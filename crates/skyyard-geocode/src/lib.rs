//! OpenCage geocoding for Skyyard.
//!
//! Forward lookup, live search suggestions, and reverse lookup of raw
//! coordinate pairs.

pub mod client;
pub mod error;
pub mod types;

pub use client::GeocodeClient;
pub use error::GeocodeError;
pub use types::{parse_coordinates, Coordinate, Place, Suggestion};
