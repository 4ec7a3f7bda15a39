//! Error handling for the farm-tools command line

use shared::{StorageError, WeatherError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Weather lookup was superseded")]
    Superseded,

    #[error("{}", .0.user_message())]
    Weather(#[from] WeatherError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Configuration(err.to_string())
    }
}

/// Result type alias for command handlers
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_error_shows_user_message() {
        let err = CliError::from(WeatherError::Backend("HTTP 500".into()));
        assert_eq!(err.to_string(), "Unable to load weather");

        let err = CliError::from(WeatherError::UnexpectedFormat);
        assert_eq!(err.to_string(), "Unexpected weather format");
    }
}
