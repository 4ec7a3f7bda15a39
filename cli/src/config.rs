//! Configuration for the farm-tools command line
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with FARM_TOOLS__ prefix
//!    (e.g. FARM_TOOLS__WEATHER__API_KEY)

use config::builder::{ConfigBuilder, DefaultState};
use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{GpsCoordinates, DEFAULT_PROVIDER_URL, GEOLOCATION_TIMEOUT};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CliError, CliResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Weather endpoints
    pub weather: WeatherConfig,

    /// Device position used in place of browser geolocation
    pub geolocation: GeolocationConfig,

    /// Preference storage
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// External provider base URL
    pub provider_url: String,

    /// Provider key; blank or missing sends every lookup to the backend
    #[serde(default)]
    pub api_key: Option<String>,

    /// Origin of the farming assistant backend
    pub backend_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeolocationConfig {
    pub timeout_ms: u64,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// JSON file holding saved preferences
    pub preferences_path: PathBuf,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FARM_TOOLS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Self::defaults(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FARM_TOOLS__ prefix)
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// `FARM_TOOLS__SECTION__KEY` variables
    fn environment() -> Environment {
        Environment::with_prefix("FARM_TOOLS")
            .separator("__")
            .try_parsing(true)
    }

    fn defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("weather.provider_url", DEFAULT_PROVIDER_URL)?
            .set_default("weather.backend_url", "http://localhost:5000")?
            .set_default("geolocation.timeout_ms", GEOLOCATION_TIMEOUT.as_millis() as i64)?
            .set_default("storage.preferences_path", ".farm-tools/preferences.json")
    }
}

impl GeolocationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The configured fixed position, if both halves are set
    pub fn fixed_position(&self) -> CliResult<Option<GpsCoordinates>> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => {
                let text = format!("{},{}", latitude, longitude);
                text.parse()
                    .map(Some)
                    .map_err(|e| CliError::Configuration(format!("geolocation: {}", e)))
            }
            (None, None) => Ok(None),
            _ => Err(CliError::Configuration(
                "geolocation.latitude and geolocation.longitude must be set together".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(overrides: &[(&str, &str)]) -> Config {
        let mut builder = Config::defaults("test").unwrap();
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value).unwrap();
        }
        builder.build().unwrap().try_deserialize().unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = build(&[]);
        assert_eq!(config.environment, "test");
        assert_eq!(config.weather.provider_url, "https://api.weatherapi.com/v1");
        assert_eq!(config.weather.backend_url, "http://localhost:5000");
        assert_eq!(config.weather.api_key, None);
        assert_eq!(config.geolocation.timeout(), Duration::from_millis(5000));
        assert_eq!(
            config.storage.preferences_path,
            PathBuf::from(".farm-tools/preferences.json")
        );
    }

    #[test]
    fn test_double_underscore_env_overrides() {
        let vars: config::Map<String, String> = [
            ("FARM_TOOLS__WEATHER__API_KEY", "abc"),
            ("FARM_TOOLS__GEOLOCATION__TIMEOUT_MS", "2500"),
            ("FARM_TOOLS_WEATHER__BACKEND_URL", "http://ignored"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config: Config = Config::defaults("test")
            .unwrap()
            .add_source(Config::environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.weather.api_key.as_deref(), Some("abc"));
        assert_eq!(config.geolocation.timeout(), Duration::from_millis(2500));
        assert_eq!(config.weather.backend_url, "http://localhost:5000");
    }

    #[test]
    fn test_fixed_position() {
        let config = build(&[("geolocation.latitude", "18.52"), ("geolocation.longitude", "73.85")]);
        assert_eq!(
            config.geolocation.fixed_position().unwrap(),
            Some(GpsCoordinates::new(18.52, 73.85))
        );
        assert_eq!(build(&[]).geolocation.fixed_position().unwrap(), None);
    }

    #[test]
    fn test_half_position_is_rejected() {
        let config = build(&[("geolocation.latitude", "18.52")]);
        assert!(matches!(
            config.geolocation.fixed_position(),
            Err(CliError::Configuration(_))
        ));
    }

    #[test]
    fn test_out_of_range_position_is_rejected() {
        let config = build(&[("geolocation.latitude", "95"), ("geolocation.longitude", "10")]);
        assert!(config.geolocation.fixed_position().is_err());
    }
}
