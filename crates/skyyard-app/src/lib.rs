//! Skyyard application layer: location acquisition and the home-view
//! controller that orchestrates the provider clients.

pub mod home;
pub mod location;

pub use home::{FetchState, HomeController, HomeEvent, HomeState, RequestToken};
pub use location::{acquire, device_position, LocationError, LocationFix};
