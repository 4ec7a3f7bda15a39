//! Error types for the Top Tools panel

use thiserror::Error;

/// Message shown when the last weather strategy fails
pub const LOAD_FAILED_MESSAGE: &str = "Unable to load weather";

/// Message shown for a response that matches neither known shape
pub const UNEXPECTED_FORMAT_MESSAGE: &str = "Unexpected weather format";

/// Weather lookup errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeatherError {
    #[error("Weather provider request failed: {0}")]
    Provider(String),

    #[error("Backend weather request failed: {0}")]
    Backend(String),

    #[error("Geolocation failed: {0}")]
    Geolocation(#[from] GeolocationError),

    #[error("Unexpected weather format")]
    UnexpectedFormat,
}

impl WeatherError {
    /// Text rendered inline in place of a reading
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::UnexpectedFormat => UNEXPECTED_FORMAT_MESSAGE,
            _ => LOAD_FAILED_MESSAGE,
        }
    }
}

/// Geolocation acquisition errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("geolocation is not supported")]
    Unsupported,

    #[error("permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("timed out")]
    Timeout,
}

impl GeolocationError {
    /// Map a `GeolocationPositionError.code` value
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::PositionUnavailable,
        }
    }
}

/// Preference storage errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage write failed: {0}")]
    Write(String),
}

/// Errors parsing a `"lat,lon"` pair
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateParseError {
    #[error("expected \"lat,lon\", got {0:?}")]
    Format(String),

    #[error("coordinates out of range: {latitude},{longitude}")]
    OutOfRange { latitude: f64, longitude: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            WeatherError::UnexpectedFormat.user_message(),
            "Unexpected weather format"
        );
        assert_eq!(
            WeatherError::Backend("503".into()).user_message(),
            "Unable to load weather"
        );
        assert_eq!(
            WeatherError::from(GeolocationError::Timeout).user_message(),
            "Unable to load weather"
        );
    }

    #[test]
    fn test_geolocation_codes() {
        assert_eq!(GeolocationError::from_code(1), GeolocationError::PermissionDenied);
        assert_eq!(GeolocationError::from_code(2), GeolocationError::PositionUnavailable);
        assert_eq!(GeolocationError::from_code(3), GeolocationError::Timeout);
    }
}
