//! Device position for a terminal host

use shared::{GeolocationError, Geolocator, GpsCoordinates};
use std::time::Duration;

/// Position from configuration; without one, geolocation is unsupported
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredPosition {
    position: Option<GpsCoordinates>,
}

impl ConfiguredPosition {
    pub fn new(position: Option<GpsCoordinates>) -> Self {
        Self { position }
    }
}

impl Geolocator for ConfiguredPosition {
    async fn current_position(
        &self,
        _timeout: Duration,
    ) -> Result<GpsCoordinates, GeolocationError> {
        self.position.ok_or(GeolocationError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_position() {
        let fixed = ConfiguredPosition::new(Some(GpsCoordinates::new(18.52, 73.85)));
        let position = tokio_test::block_on(fixed.current_position(Duration::from_secs(5)));
        assert_eq!(position, Ok(GpsCoordinates::new(18.52, 73.85)));

        let none = ConfiguredPosition::default();
        let position = tokio_test::block_on(none.current_position(Duration::from_secs(5)));
        assert_eq!(position, Err(GeolocationError::Unsupported));
    }
}
