//! `farm-tools weather`

use clap::Args;
use shared::{
    Geolocator, GpsCoordinates, PreferenceStore, Preferences, WeatherLookup, WeatherQuery,
    WeatherSource,
};

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Default, Args)]
pub struct WeatherArgs {
    /// City or place name (default: last used)
    #[arg(long)]
    pub location: Option<String>,

    /// Ignore the saved location and use the device position
    #[arg(long)]
    pub use_my_location: bool,

    /// Device position as LAT,LON
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    pub coords: Option<GpsCoordinates>,
}

impl WeatherArgs {
    fn query(&self, saved_location: Option<String>) -> WeatherQuery {
        let text = match &self.location {
            Some(location) => location.clone(),
            None if self.use_my_location || self.coords.is_some() => String::new(),
            None => saved_location.unwrap_or_default(),
        };

        let mut query = WeatherQuery::from_input(&text);
        query.use_my_location = self.use_my_location;
        match self.coords {
            Some(coordinates) => query.with_coordinates(coordinates),
            None => query,
        }
    }
}

pub async fn run<S, G, P>(
    args: &WeatherArgs,
    lookup: &WeatherLookup,
    source: &S,
    locator: &G,
    store: &P,
) -> CliResult<String>
where
    S: WeatherSource,
    G: Geolocator,
    P: PreferenceStore + ?Sized,
{
    let query = args.query(Preferences::new(store).weather_location());
    tracing::info!(
        "Looking up weather for {}",
        query.location_text.as_deref().unwrap_or("current position")
    );

    let resolution = lookup
        .run(source, locator, store, &query)
        .await
        .ok_or(CliError::Superseded)?;
    tracing::debug!("Weather resolved after {:?}", resolution.attempts);

    let reading = resolution.outcome?;
    Ok(reading.to_string())
}
