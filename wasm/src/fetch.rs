//! Weather requests through the browser's `fetch`

use serde_json::Value;
use shared::{WeatherEndpoints, WeatherError, WeatherSource, API_KEY_META_NAME};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Response};

use crate::dom::describe_js_error;

/// Provider and same-origin backend, keyed by the page's meta tag
pub struct BrowserWeatherSource {
    endpoints: WeatherEndpoints,
}

impl BrowserWeatherSource {
    /// Read the provider key from `<meta name="weatherapi-key">`
    pub fn from_document(document: &Document) -> Self {
        let api_key = document
            .query_selector(&format!("meta[name=\"{}\"]", API_KEY_META_NAME))
            .ok()
            .flatten()
            .and_then(|meta| meta.get_attribute("content"));

        Self {
            endpoints: WeatherEndpoints::same_origin(api_key.as_deref()),
        }
    }
}

fn encode(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

async fn get_json(url: &str) -> Result<Value, String> {
    let window = web_sys::window().ok_or("no window")?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| describe_js_error(&e))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| "fetch did not return a Response".to_string())?;

    if !response.ok() {
        return Err(format!("HTTP {} {}", response.status(), response.status_text()));
    }

    let text = response.text().map_err(|e| describe_js_error(&e))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|e| describe_js_error(&e))?
        .as_string()
        .unwrap_or_default();

    serde_json::from_str(&body).map_err(|e| format!("invalid JSON: {}", e))
}

impl WeatherSource for BrowserWeatherSource {
    fn has_provider(&self) -> bool {
        self.endpoints.has_provider()
    }

    async fn fetch_provider(&self, query: &str) -> Result<Value, WeatherError> {
        let request = self
            .endpoints
            .provider_request(query)
            .ok_or_else(|| WeatherError::Provider("no API key".to_string()))?;
        get_json(&request.to_url_with(encode))
            .await
            .map_err(WeatherError::Provider)
    }

    async fn fetch_backend(&self, query: Option<&str>) -> Result<Value, WeatherError> {
        let request = self.endpoints.backend_request(query);
        get_json(&request.to_url_with(encode))
            .await
            .map_err(WeatherError::Backend)
    }
}
