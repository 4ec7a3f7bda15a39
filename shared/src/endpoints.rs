//! Weather endpoints
//!
//! Builds the requests for the external provider (`current.json`) and the
//! backend (`/api/weather`). Hosts do their own query encoding.

/// Base URL of the external provider
pub const DEFAULT_PROVIDER_URL: &str = "https://api.weatherapi.com/v1";

/// Path of the backend weather endpoint
pub const BACKEND_WEATHER_PATH: &str = "/api/weather";

/// Name of the page meta tag carrying the provider key
pub const API_KEY_META_NAME: &str = "weatherapi-key";

/// A GET request: base URL plus unencoded query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    pub url: String,
    pub params: Vec<(&'static str, String)>,
}

impl WeatherRequest {
    /// Full URL with each parameter passed through `encode`
    pub fn to_url_with(&self, encode: impl Fn(&str) -> String) -> String {
        if self.params.is_empty() {
            return self.url.clone();
        }
        let query: Vec<String> = self
            .params
            .iter()
            .map(|(name, value)| format!("{}={}", name, encode(value)))
            .collect();
        format!("{}?{}", self.url, query.join("&"))
    }
}

/// Trim a configured key; blank means no key
pub fn normalize_api_key(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}

/// Where weather comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherEndpoints {
    provider_url: String,
    backend_url: String,
    api_key: Option<String>,
}

impl WeatherEndpoints {
    /// `backend_url` is the site origin (empty for same-origin requests)
    pub fn new(provider_url: &str, backend_url: &str, api_key: Option<&str>) -> Self {
        Self {
            provider_url: provider_url.trim_end_matches('/').to_string(),
            backend_url: backend_url.trim_end_matches('/').to_string(),
            api_key: normalize_api_key(api_key),
        }
    }

    /// Same-origin backend and the default provider
    pub fn same_origin(api_key: Option<&str>) -> Self {
        Self::new(DEFAULT_PROVIDER_URL, "", api_key)
    }

    /// Without a key every lookup goes to the backend
    pub fn has_provider(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn provider_request(&self, query: &str) -> Option<WeatherRequest> {
        let key = self.api_key.as_ref()?;
        Some(WeatherRequest {
            url: format!("{}/current.json", self.provider_url),
            params: vec![
                ("key", key.clone()),
                ("q", query.to_string()),
                ("aqi", "no".to_string()),
            ],
        })
    }

    pub fn backend_request(&self, query: Option<&str>) -> WeatherRequest {
        WeatherRequest {
            url: format!("{}{}", self.backend_url, BACKEND_WEATHER_PATH),
            params: query
                .map(|q| vec![("q", q.to_string())])
                .unwrap_or_default(),
        }
    }
}
