//! AstronomyAPI moon-phase imagery for Skyyard.

pub mod client;
pub mod error;

pub use client::MoonClient;
pub use error::MoonError;
