//! Common types used across the panel

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoordinateParseError;

/// GPS coordinates as reported by a geolocation source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Location query understood by the weather provider (`"lat,lon"`)
    pub fn to_query(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GpsCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for GpsCoordinates {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| CoordinateParseError::Format(s.to_string()))?;

        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| CoordinateParseError::Format(s.to_string()))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| CoordinateParseError::Format(s.to_string()))?;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateParseError::OutOfRange {
                latitude,
                longitude,
            });
        }

        Ok(Self::new(latitude, longitude))
    }
}
