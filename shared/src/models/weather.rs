//! Weather reading models
//!
//! The external provider and the backend answer with different JSON shapes.
//! Both are normalized into [`WeatherReading`] as soon as a response arrives.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::WeatherError;
use crate::validation::format_measure;

/// Placeholder for a value the response did not carry
pub const MISSING_VALUE: &str = "—";

/// A current-conditions reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReading {
    pub temperature_c: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub precipitation: Precipitation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Precipitation as reported by the source
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Precipitation {
    /// Measured precipitation (provider)
    Millimetres(f64),
    /// Chance of rain (backend)
    ChancePercent(Option<f64>),
}

/// One labelled line of a rendered reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingRow {
    pub label: &'static str,
    pub value: String,
}

// ============================================================================
// Raw response shapes
// ============================================================================

/// Numeric field that tolerates strings and odd types
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Measure(Option<f64>);

impl<'de> Deserialize<'de> for Measure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let number = match &value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        };
        Ok(Measure(number))
    }
}

/// `current.json` response of the external provider
#[derive(Debug, Deserialize)]
struct ProviderResponse {
    current: ProviderCurrent,
    #[serde(default)]
    location: Value,
}

#[derive(Debug, Deserialize)]
struct ProviderCurrent {
    #[serde(default)]
    temp_c: Measure,
    #[serde(default)]
    temp: Measure,
    #[serde(default)]
    humidity: Measure,
    #[serde(default)]
    precip_mm: Measure,
    #[serde(default)]
    precipitation: Measure,
}

/// `/api/weather` response of the backend
#[derive(Debug, Deserialize)]
struct BackendResponse {
    temperature: Measure,
    #[serde(default)]
    humidity: Measure,
    #[serde(default)]
    rain_chance: Measure,
    #[serde(default)]
    location: Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawReading {
    Provider(ProviderResponse),
    Backend(BackendResponse),
}

impl From<RawReading> for WeatherReading {
    fn from(raw: RawReading) -> Self {
        match raw {
            RawReading::Provider(p) => WeatherReading {
                temperature_c: p.current.temp_c.0.or(p.current.temp.0),
                humidity_percent: p.current.humidity.0,
                precipitation: Precipitation::Millimetres(
                    p.current
                        .precip_mm
                        .0
                        .or(p.current.precipitation.0)
                        .unwrap_or(0.0),
                ),
                location: p
                    .location
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            RawReading::Backend(b) => WeatherReading {
                temperature_c: b.temperature.0,
                humidity_percent: b.humidity.0,
                precipitation: Precipitation::ChancePercent(b.rain_chance.0),
                location: b.location.as_str().map(str::to_string),
            },
        }
    }
}

// ============================================================================
// Normalized reading
// ============================================================================

impl WeatherReading {
    /// Normalize a response body. A provider shape (`current` object) wins
    /// over a backend shape (top-level `temperature`); anything else is
    /// [`WeatherError::UnexpectedFormat`].
    pub fn from_value(value: Value) -> Result<Self, WeatherError> {
        serde_json::from_value::<RawReading>(value)
            .map(WeatherReading::from)
            .map_err(|_| WeatherError::UnexpectedFormat)
    }

    pub fn from_json(body: &str) -> Result<Self, WeatherError> {
        let value: Value =
            serde_json::from_str(body).map_err(|_| WeatherError::UnexpectedFormat)?;
        Self::from_value(value)
    }

    /// Labelled display rows: temperature, humidity, precipitation
    pub fn rows(&self) -> [ReadingRow; 3] {
        let precipitation = match self.precipitation {
            Precipitation::Millimetres(mm) => ReadingRow {
                label: "Precipitation",
                value: format!("{} mm", format_measure(mm)),
            },
            Precipitation::ChancePercent(chance) => ReadingRow {
                label: "Rain chance",
                value: format!("{}%", display_or_missing(chance)),
            },
        };

        [
            ReadingRow {
                label: "Temperature",
                value: format!("{}°C", display_or_missing(self.temperature_c)),
            },
            ReadingRow {
                label: "Humidity",
                value: format!("{}%", display_or_missing(self.humidity_percent)),
            },
            precipitation,
        ]
    }
}

fn display_or_missing(value: Option<f64>) -> String {
    value
        .map(format_measure)
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

impl std::fmt::Display for WeatherReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(location) = &self.location {
            writeln!(f, "Location: {}", location)?;
        }
        let rows = self.rows();
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", row.label, row.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_shape() {
        let reading = WeatherReading::from_value(json!({
            "location": { "name": "Pune", "country": "India" },
            "current": { "temp_c": 31.4, "humidity": 48, "precip_mm": 0.2, "temp_f": 88.5 }
        }))
        .unwrap();

        assert_eq!(reading.temperature_c, Some(31.4));
        assert_eq!(reading.humidity_percent, Some(48.0));
        assert_eq!(reading.precipitation, Precipitation::Millimetres(0.2));
        assert_eq!(reading.location.as_deref(), Some("Pune"));
    }

    #[test]
    fn test_provider_alternate_field_names() {
        let reading = WeatherReading::from_value(json!({
            "current": { "temp": "27", "precipitation": 3 }
        }))
        .unwrap();

        assert_eq!(reading.temperature_c, Some(27.0));
        assert_eq!(reading.humidity_percent, None);
        assert_eq!(reading.precipitation, Precipitation::Millimetres(3.0));
    }

    #[test]
    fn test_provider_prefers_temp_c() {
        let reading = WeatherReading::from_value(json!({
            "current": { "temp_c": 20, "temp": 68 }
        }))
        .unwrap();
        assert_eq!(reading.temperature_c, Some(20.0));
    }

    #[test]
    fn test_provider_missing_precipitation_is_zero() {
        let reading = WeatherReading::from_value(json!({ "current": { "temp_c": 20 } })).unwrap();
        let rows = reading.rows();
        assert_eq!(rows[2].value, "0 mm");
        assert_eq!(rows[1].value, "—%");
    }

    #[test]
    fn test_backend_shape() {
        let reading = WeatherReading::from_value(json!({
            "temperature": 25, "humidity": 60, "rain_chance": 10, "location": "default"
        }))
        .unwrap();

        let rows = reading.rows();
        assert_eq!(rows[0], ReadingRow { label: "Temperature", value: "25°C".into() });
        assert_eq!(rows[1], ReadingRow { label: "Humidity", value: "60%".into() });
        assert_eq!(rows[2], ReadingRow { label: "Rain chance", value: "10%".into() });
        assert_eq!(reading.location.as_deref(), Some("default"));
    }

    #[test]
    fn test_backend_null_temperature_still_backend() {
        let reading = WeatherReading::from_value(json!({ "temperature": null })).unwrap();
        assert_eq!(reading.temperature_c, None);
        assert_eq!(reading.precipitation, Precipitation::ChancePercent(None));
    }

    #[test]
    fn test_unexpected_shapes() {
        for value in [json!({ "foo": 1 }), json!([1, 2]), json!("sunny"), json!({ "current": 5 })] {
            assert_eq!(
                WeatherReading::from_value(value),
                Err(WeatherError::UnexpectedFormat)
            );
        }
    }

    #[test]
    fn test_from_json_text() {
        assert!(WeatherReading::from_json(r#"{"temperature": 30}"#).is_ok());
        assert_eq!(
            WeatherReading::from_json("<html>"),
            Err(WeatherError::UnexpectedFormat)
        );
    }

    #[test]
    fn test_display_text() {
        let reading = WeatherReading {
            temperature_c: Some(25.0),
            humidity_percent: Some(60.0),
            precipitation: Precipitation::ChancePercent(Some(10.0)),
            location: None,
        };
        assert_eq!(
            reading.to_string(),
            "Temperature: 25°C\nHumidity: 60%\nRain chance: 10%"
        );
    }
}
