//! WebAssembly front end for the farming assistant's Top Tools panel
//!
//! On load the module binds the panel found in the page:
//! - Unit-cost estimator
//! - Weather lookup with provider, geolocation and backend fallbacks
//! - Saved estimator kind and weather location
//!
//! A few pure helpers are exported for scripts that only need the numbers.

mod controller;
mod dom;
mod fetch;
mod geolocation;
mod storage;

use shared::{decimal_to_f64, round2, WeatherReading};
use wasm_bindgen::prelude::*;

pub use controller::TopTools;

/// Initialize the WASM module and bind the panel once the DOM is parsed
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        dom::listen(&document, "DOMContentLoaded", |_| {
            controller::mount_current();
        });
    } else {
        controller::mount_current();
    }
}

/// Bind the panel again, e.g. after the page swapped its markup
#[wasm_bindgen]
pub fn mount_top_tools() -> bool {
    controller::mount_current()
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Amount needed for `area` hectares at `rate` per hectare, to 2 decimals
#[wasm_bindgen]
pub fn estimate_amount(area: f64, rate: f64) -> f64 {
    decimal_to_f64(round2(non_negative(area) * non_negative(rate)))
}

/// Cost of `amount` units at `price`; nothing without a positive price
#[wasm_bindgen]
pub fn estimate_cost(amount: f64, price: f64) -> Option<f64> {
    if !price.is_finite() || price <= 0.0 {
        return None;
    }
    Some(decimal_to_f64(round2(non_negative(amount) * price)))
}

/// Normalize a provider or backend weather response into a reading
#[wasm_bindgen]
pub fn normalize_weather(response_json: &str) -> Result<String, JsValue> {
    let reading =
        WeatherReading::from_json(response_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&reading)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize reading: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_amount() {
        assert_eq!(estimate_amount(2.0, 25.0), 50.0);
        assert_eq!(estimate_amount(1.333, 3.0), 4.0);
        assert_eq!(estimate_amount(-1.0, 25.0), 0.0);
        assert_eq!(estimate_amount(f64::NAN, 25.0), 0.0);
    }

    #[test]
    fn test_estimate_cost() {
        assert_eq!(estimate_cost(50.0, 40.0), Some(2000.0));
        assert_eq!(estimate_cost(2.5, 0.5), Some(1.25));
        assert_eq!(estimate_cost(50.0, 0.0), None);
        assert_eq!(estimate_cost(50.0, -2.0), None);
    }

    #[test]
    fn test_normalize_backend_weather() {
        let json = r#"{"temperature": 25, "humidity": 60, "rain_chance": 10}"#;
        let normalized = normalize_weather(json).unwrap();
        let reading: serde_json::Value = serde_json::from_str(&normalized).unwrap();
        assert_eq!(reading["temperature_c"], 25.0);
        assert_eq!(reading["humidity_percent"], 60.0);
        assert_eq!(reading["precipitation"]["kind"], "chance_percent");
        assert_eq!(reading["precipitation"]["value"], 10.0);
    }
}
