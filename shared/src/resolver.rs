//! Weather resolution chain
//!
//! Strategies are tried in a fixed order until one yields a response:
//!
//! 1. manual location text (persisted), sent to the provider
//! 2. the device position (`"lat,lon"`), sent to the provider
//! 3. the backend endpoint without a location
//!
//! Without a provider key, every provider query goes to the backend with the
//! same `q`. A failed manual lookup moves on to the device position only when
//! the user asked for it; otherwise the backend gets one try with the manual
//! text and its failure is final.

use serde_json::Value;
use std::time::Duration;

use crate::error::{GeolocationError, WeatherError};
use crate::models::WeatherReading;
use crate::sequence::RequestSequencer;
use crate::storage::{PreferenceStore, Preferences};
use crate::types::GpsCoordinates;

/// How long to wait for a device position
pub const GEOLOCATION_TIMEOUT: Duration = Duration::from_millis(5000);

/// Transport for the two weather endpoints
#[allow(async_fn_in_trait)]
pub trait WeatherSource {
    /// Whether a provider key is configured
    fn has_provider(&self) -> bool;

    async fn fetch_provider(&self, query: &str) -> Result<Value, WeatherError>;

    async fn fetch_backend(&self, query: Option<&str>) -> Result<Value, WeatherError>;
}

/// Source of the device position
#[allow(async_fn_in_trait)]
pub trait Geolocator {
    async fn current_position(&self, timeout: Duration)
        -> Result<GpsCoordinates, GeolocationError>;
}

/// Geolocator for hosts that have no position source
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

impl Geolocator for NoGeolocation {
    async fn current_position(
        &self,
        _timeout: Duration,
    ) -> Result<GpsCoordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// What the user asked for
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherQuery {
    /// Trimmed, non-empty manual location
    pub location_text: Option<String>,
    /// Position already known; skips geolocation
    pub coordinates: Option<GpsCoordinates>,
    /// "Use my location" was pressed
    pub use_my_location: bool,
}

impl WeatherQuery {
    /// Query from the location field's text
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        Self {
            location_text: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            ..Self::default()
        }
    }

    /// "Use my location": no manual text, geolocation requested
    pub fn my_location() -> Self {
        Self {
            use_my_location: true,
            ..Self::default()
        }
    }

    pub fn with_coordinates(mut self, coordinates: GpsCoordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }
}

/// One step taken while resolving
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Provider(String),
    Backend(Option<String>),
    Geolocation,
}

/// Outcome of a lookup plus the steps taken, in order
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub outcome: Result<WeatherReading, WeatherError>,
    pub attempts: Vec<Attempt>,
}

impl Resolution {
    /// Number of backend requests made
    pub fn backend_calls(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| matches!(a, Attempt::Backend(_)))
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    pub geolocation_timeout: Duration,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            geolocation_timeout: GEOLOCATION_TIMEOUT,
        }
    }
}

struct Chain<'a, S> {
    source: &'a S,
    attempts: Vec<Attempt>,
}

impl<'a, S: WeatherSource> Chain<'a, S> {
    fn new(source: &'a S) -> Self {
        Self {
            source,
            attempts: Vec::new(),
        }
    }

    async fn primary(&mut self, query: &str) -> Result<Value, WeatherError> {
        if !self.source.has_provider() {
            return self.backend(Some(query)).await;
        }
        self.attempts.push(Attempt::Provider(query.to_string()));
        self.source.fetch_provider(query).await
    }

    async fn backend(&mut self, query: Option<&str>) -> Result<Value, WeatherError> {
        self.attempts.push(Attempt::Backend(query.map(str::to_string)));
        self.source.fetch_backend(query).await
    }

    fn finish(self, response: Result<Value, WeatherError>) -> Resolution {
        let outcome = response.and_then(WeatherReading::from_value);
        if let Err(e) = &outcome {
            tracing::warn!("Weather lookup failed: {}", e);
        }
        Resolution {
            outcome,
            attempts: self.attempts,
        }
    }
}

/// Resolve a query into a reading (or the error to show)
pub async fn resolve_weather<S, G, P>(
    source: &S,
    locator: &G,
    store: &P,
    query: &WeatherQuery,
    options: &ResolveOptions,
) -> Resolution
where
    S: WeatherSource,
    G: Geolocator,
    P: PreferenceStore + ?Sized,
{
    let mut chain = Chain::new(source);

    if let Some(text) = query.location_text.as_deref() {
        Preferences::new(store).save_weather_location(text);

        let err = match chain.primary(text).await {
            Ok(response) => return chain.finish(Ok(response)),
            Err(e) => e,
        };

        if !query.use_my_location {
            if !source.has_provider() {
                return chain.finish(Err(err));
            }
            tracing::warn!("Manual location weather failed, trying backend: {}", err);
            let response = chain.backend(Some(text)).await;
            return chain.finish(response);
        }
        tracing::warn!("Manual location weather failed, trying geolocation: {}", err);
    }

    let coordinates = match query.coordinates {
        Some(coordinates) => Some(coordinates),
        None => {
            chain.attempts.push(Attempt::Geolocation);
            match locator.current_position(options.geolocation_timeout).await {
                Ok(coordinates) => Some(coordinates),
                Err(e) => {
                    tracing::debug!("No device position ({}), using backend default", e);
                    None
                }
            }
        }
    };

    if let Some(coordinates) = coordinates {
        match chain.primary(&coordinates.to_query()).await {
            Ok(response) => return chain.finish(Ok(response)),
            Err(e) => tracing::warn!("Weather for {} failed, using backend default: {}", coordinates, e),
        }
    }

    let response = chain.backend(None).await;
    chain.finish(response)
}

/// Resolution with stale-result suppression
#[derive(Debug, Default)]
pub struct WeatherLookup {
    sequencer: RequestSequencer,
    options: ResolveOptions,
}

impl WeatherLookup {
    pub fn new(options: ResolveOptions) -> Self {
        Self {
            sequencer: RequestSequencer::new(),
            options,
        }
    }

    pub fn sequencer(&self) -> &RequestSequencer {
        &self.sequencer
    }

    /// Run a lookup. Returns `None` when a newer lookup was issued while
    /// this one was in flight; its result must not be shown.
    pub async fn run<S, G, P>(
        &self,
        source: &S,
        locator: &G,
        store: &P,
        query: &WeatherQuery,
    ) -> Option<Resolution>
    where
        S: WeatherSource,
        G: Geolocator,
        P: PreferenceStore + ?Sized,
    {
        let token = self.sequencer.issue();
        let resolution = resolve_weather(source, locator, store, query, &self.options).await;

        if self.sequencer.is_current(token) {
            Some(resolution)
        } else {
            tracing::debug!("Discarding superseded weather lookup #{}", token.value());
            None
        }
    }
}
