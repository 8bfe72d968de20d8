//! Home-view controller.
//!
//! Owns all home-view state and mutates it only in response to discrete
//! events. Forecast and moon fetches are tagged with the location and
//! time-of-night they were issued for; a completion whose tag no longer
//! matches current state is dropped instead of clobbering newer data.

use chrono::{Local, Timelike};

use skyyard_forecast::{ForecastClient, ForecastError, NightForecast};
use skyyard_geocode::{parse_coordinates, Coordinate, GeocodeClient, Place, Suggestion};
use skyyard_moon::{MoonClient, MoonError};

use crate::location::LocationFix;

/// Message shown when neither device nor config yields a location.
const NO_LOCATION_MESSAGE: &str = "Permission denied or unavailable";

/// Message shown when a typed query resolves to nothing.
const NOT_FOUND_MESSAGE: &str = "Could not find location. Try coordinates like '37.77,-122.42'";

/// Placeholder when the provider answers but no evening period exists.
const NO_FORECAST_MESSAGE: &str = "Unable to load forecast.";

/// Rendering state of one fetched panel.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Ready(T),
    Unavailable(String),
}

impl<T> FetchState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Identity of an in-flight fetch: the location and hour it was issued
/// for, plus a sequence number so repeated fetches of the same inputs
/// still supersede each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestToken {
    pub coordinate: Coordinate,
    pub hour: u32,
    seq: u64,
}

/// All mutable home-view state.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub location: Option<Place>,
    /// Neutral status line (location errors, not-found notices)
    pub status: Option<String>,
    /// Selected time-of-night, hour 0-23
    pub hour: u32,
    pub search: String,
    pub suggestions: Vec<Suggestion>,
    pub forecast: FetchState<NightForecast>,
    pub moon_image: FetchState<String>,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            location: None,
            status: None,
            hour: Local::now().hour(),
            search: String::new(),
            suggestions: Vec::new(),
            forecast: FetchState::Idle,
            moon_image: FetchState::Idle,
        }
    }
}

/// Discrete inputs that may mutate home state.
#[derive(Debug, Clone)]
pub enum HomeEvent {
    /// Startup location acquisition finished
    LocationAcquired(LocationFix),
    /// Search box contents changed
    SearchEdited(String),
    /// A suggestion was clicked
    SuggestionChosen(Suggestion),
    /// Enter pressed in the search box
    SearchSubmitted(String),
    /// Time-of-night slider moved
    TimeChanged(u32),
}

pub struct HomeController {
    state: HomeState,
    geocode: GeocodeClient,
    forecast: ForecastClient,
    moon: MoonClient,
    seq: u64,
}

impl HomeController {
    pub fn new(geocode: GeocodeClient, forecast: ForecastClient, moon: MoonClient) -> Self {
        Self {
            state: HomeState::default(),
            geocode,
            forecast,
            moon,
            seq: 0,
        }
    }

    pub fn state(&self) -> &HomeState {
        &self.state
    }

    /// Single entry point for state transitions.
    pub async fn handle(&mut self, event: HomeEvent) {
        match event {
            HomeEvent::LocationAcquired(fix) => self.on_location_acquired(fix).await,
            HomeEvent::SearchEdited(text) => self.on_search_edited(text).await,
            HomeEvent::SuggestionChosen(suggestion) => {
                self.on_suggestion_chosen(suggestion).await
            }
            HomeEvent::SearchSubmitted(text) => self.on_search_submitted(text).await,
            HomeEvent::TimeChanged(hour) => self.on_time_changed(hour).await,
        }
    }

    async fn on_location_acquired(&mut self, fix: LocationFix) {
        match fix {
            LocationFix::Located(place) => self.set_location(place).await,
            LocationFix::Unavailable => {
                self.state.status = Some(NO_LOCATION_MESSAGE.to_string());
            }
        }
    }

    async fn on_search_edited(&mut self, text: String) {
        self.state.search = text.clone();

        match self.geocode.suggest(&text).await {
            Ok(suggestions) => self.state.suggestions = suggestions,
            Err(e) => {
                tracing::debug!("Suggestion lookup failed: {}", e);
                self.state.suggestions.clear();
            }
        }
    }

    async fn on_suggestion_chosen(&mut self, suggestion: Suggestion) {
        self.state.search = suggestion.label;
        self.state.suggestions.clear();
        self.set_location(Place {
            coordinate: suggestion.coordinate,
            name: suggestion.name,
        })
        .await;
    }

    async fn on_search_submitted(&mut self, text: String) {
        let text = text.trim().to_string();

        if let Some(coordinate) = parse_coordinates(&text) {
            self.state.suggestions.clear();
            self.set_location(Place {
                coordinate,
                name: coordinate.to_string(),
            })
            .await;
            return;
        }

        match self.geocode.lookup(&text).await {
            Ok(Some(place)) => {
                self.state.suggestions.clear();
                self.set_location(place).await;
            }
            Ok(None) => {
                self.state.status = Some(NOT_FOUND_MESSAGE.to_string());
            }
            Err(e) => {
                tracing::warn!("Location lookup failed: {}", e);
                self.state.status = Some(e.user_message());
            }
        }
    }

    async fn on_time_changed(&mut self, hour: u32) {
        self.state.hour = hour.min(23);
        if self.state.location.is_some() {
            self.refresh().await;
        }
    }

    async fn set_location(&mut self, place: Place) {
        self.state.status = None;
        self.state.location = Some(place);
        self.refresh().await;
    }

    /// Snapshot a token for the current location and hour. Fetch results
    /// are applied only while their token is still current.
    pub fn begin_fetch(&mut self) -> Option<RequestToken> {
        let place = self.state.location.as_ref()?;
        self.seq += 1;
        Some(RequestToken {
            coordinate: place.coordinate,
            hour: self.state.hour,
            seq: self.seq,
        })
    }

    fn is_current(&self, token: RequestToken) -> bool {
        token.seq == self.seq
            && self.state.hour == token.hour
            && self
                .state
                .location
                .as_ref()
                .is_some_and(|p| p.coordinate == token.coordinate)
    }

    /// Apply a finished forecast fetch, unless the token has gone stale.
    pub fn complete_forecast(
        &mut self,
        token: RequestToken,
        outcome: Result<Option<NightForecast>, ForecastError>,
    ) {
        if !self.is_current(token) {
            tracing::debug!("Dropping stale forecast result for {:?}", token);
            return;
        }

        self.state.forecast = match outcome {
            Ok(Some(forecast)) => FetchState::Ready(forecast),
            Ok(None) => FetchState::Unavailable(NO_FORECAST_MESSAGE.to_string()),
            Err(e) => {
                tracing::warn!("Forecast fetch failed: {}", e);
                FetchState::Unavailable(e.user_message())
            }
        };
    }

    /// Apply a finished moon-image fetch, unless the token has gone stale.
    pub fn complete_moon(&mut self, token: RequestToken, outcome: Result<String, MoonError>) {
        if !self.is_current(token) {
            tracing::debug!("Dropping stale moon result for {:?}", token);
            return;
        }

        self.state.moon_image = match outcome {
            Ok(url) => FetchState::Ready(url),
            Err(e) => {
                tracing::warn!("Moon-phase fetch failed: {}", e);
                FetchState::Unavailable(e.user_message())
            }
        };
    }

    /// Refetch forecast then moon image for the current location and hour.
    /// The two calls run one after another, not concurrently.
    pub async fn refresh(&mut self) {
        let Some(token) = self.begin_fetch() else {
            return;
        };

        self.state.forecast = FetchState::Loading;
        self.state.moon_image = FetchState::Loading;

        let outcome = self
            .forecast
            .night_forecast(token.coordinate.lat, token.coordinate.lon)
            .await;
        self.complete_forecast(token, outcome);

        let today = Local::now().date_naive();
        let outcome = self
            .moon
            .phase_image(token.coordinate.lat, token.coordinate.lon, today)
            .await;
        self.complete_moon(token, outcome);
    }
}
