use anyhow::Result;

use skyyard_app::home::{FetchState, HomeController, HomeEvent};
use skyyard_app::location;
use skyyard_core::Config;
use skyyard_forecast::ForecastClient;
use skyyard_geocode::GeocodeClient;
use skyyard_moon::MoonClient;

#[tokio::main]
async fn main() -> Result<()> {
    skyyard_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!("Skyyard started");

    let geocode = GeocodeClient::new(&config.geocoding.api_key)?;
    let forecast = ForecastClient::new()?;
    let moon = MoonClient::new(&config.astronomy.app_id, &config.astronomy.app_secret)?;

    let fix = location::acquire(&config.site, &geocode).await;

    let mut controller = HomeController::new(geocode, forecast, moon);
    controller.handle(HomeEvent::LocationAcquired(fix)).await;

    println!("Skyyard - What's In My Sky-Yard Tonight?");

    let state = controller.state();
    match &state.location {
        Some(place) => {
            println!("Location: {} ({})", place.name, place.coordinate);
        }
        None => {
            let status = state.status.as_deref().unwrap_or("Detecting location...");
            println!("Location: {}", status);
            println!("Set [site] latitude/longitude in the config file to pick a spot.");
            return Ok(());
        }
    }

    match &state.forecast {
        FetchState::Ready(forecast) => {
            println!("\nNWS Forecast for {}:", forecast.forecast_day);
            println!("  {}", forecast.forecast);
            println!("  Estimated Seeing: {}", forecast.seeing);
            println!("  Estimated Transparency: {}", forecast.transparency);
            println!("  (Based on NOAA forecast estimates; actual sky conditions may differ.)");
        }
        FetchState::Unavailable(message) => println!("\nForecast: {}", message),
        FetchState::Idle | FetchState::Loading => {}
    }

    match &state.moon_image {
        FetchState::Ready(url) => println!("\nMoon phase image: {}", url),
        FetchState::Unavailable(message) => println!("\nMoon phase: {}", message),
        FetchState::Idle | FetchState::Loading => {}
    }

    Ok(())
}
