//! Weather API client for fetching current conditions
//!
//! Talks to the external provider (`current.json`) and to the farming
//! assistant backend (`/api/weather`). Responses are returned as raw JSON
//! and normalized by the shared resolver.

use reqwest::Client;
use serde_json::Value;
use shared::{WeatherEndpoints, WeatherError, WeatherRequest, WeatherSource};

use crate::config::WeatherConfig;
use crate::error::CliResult;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    endpoints: WeatherEndpoints,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> CliResult<Self> {
        let endpoints = WeatherEndpoints::new(
            &config.provider_url,
            &config.backend_url,
            config.api_key.as_deref(),
        );
        Self::with_endpoints(endpoints)
    }

    /// Create a new WeatherClient with explicit endpoints (for testing)
    ///
    /// Requests carry no timeout; a slow provider or backend is waited for.
    pub fn with_endpoints(endpoints: WeatherEndpoints) -> CliResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client, endpoints })
    }

    async fn get_json(&self, request: &WeatherRequest) -> Result<Value, String> {
        let response = self
            .client
            .get(&request.url)
            .query(&request.params)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("{} - {}", status, body));
        }

        response
            .json()
            .await
            .map_err(|e| format!("failed to parse response: {}", e))
    }
}

impl WeatherSource for WeatherClient {
    fn has_provider(&self) -> bool {
        self.endpoints.has_provider()
    }

    async fn fetch_provider(&self, query: &str) -> Result<Value, WeatherError> {
        let request = self
            .endpoints
            .provider_request(query)
            .ok_or_else(|| WeatherError::Provider("no API key configured".to_string()))?;
        tracing::debug!("Provider weather request for {}", query);
        self.get_json(&request).await.map_err(WeatherError::Provider)
    }

    async fn fetch_backend(&self, query: Option<&str>) -> Result<Value, WeatherError> {
        let request = self.endpoints.backend_request(query);
        tracing::debug!("Backend weather request ({})", query.unwrap_or("default"));
        self.get_json(&request).await.map_err(WeatherError::Backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;
    use tokio::time::{Duration, Instant};

    async fn serve(
        status: &'static str,
        body: &'static str,
    ) -> (String, mpsc::UnboundedReceiver<String>) {
        serve_after(Duration::ZERO, status, body).await
    }

    /// Serve one canned HTTP response per connection after `delay`,
    /// reporting each request line
    async fn serve_after(
        delay: Duration,
        status: &'static str,
        body: &'static str,
    ) -> (String, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let line = request.lines().next().unwrap_or_default().to_string();
                let _ = tx.send(line);

                tokio::time::sleep(delay).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (origin, rx)
    }

    fn client(origin: &str, key: Option<&str>) -> WeatherClient {
        let provider = format!("{}/v1", origin);
        WeatherClient::with_endpoints(WeatherEndpoints::new(&provider, origin, key)).unwrap()
    }

    #[tokio::test]
    async fn test_provider_request_carries_key_and_query() {
        let (origin, mut requests) =
            serve("200 OK", r#"{"current":{"temp_c":25,"humidity":60,"precip_mm":0.2}}"#).await;
        let client = client(&origin, Some("abc"));

        let body = client.fetch_provider("Pune").await.unwrap();
        assert_eq!(body["current"]["temp_c"], 25);
        assert_eq!(
            requests.recv().await.unwrap(),
            "GET /v1/current.json?key=abc&q=Pune&aqi=no HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_backend_request_without_query() {
        let (origin, mut requests) =
            serve("200 OK", r#"{"temperature":25,"humidity":60,"rain_chance":10}"#).await;
        let client = client(&origin, None);

        assert!(!client.has_provider());
        let body = client.fetch_backend(None).await.unwrap();
        assert_eq!(body["rain_chance"], 10);
        assert_eq!(requests.recv().await.unwrap(), "GET /api/weather HTTP/1.1");
    }

    #[tokio::test]
    async fn test_error_status_is_a_backend_failure() {
        let (origin, _requests) = serve("503 Service Unavailable", r#"{"error":"down"}"#).await;
        let client = client(&origin, None);

        let err = client.fetch_backend(Some("Pune")).await.unwrap_err();
        assert!(matches!(err, WeatherError::Backend(_)));
        assert_eq!(err.user_message(), "Unable to load weather");
    }

    #[tokio::test]
    async fn test_slow_backend_is_still_answered() {
        let delay = Duration::from_secs(16);
        let (origin, _requests) = serve_after(
            delay,
            "200 OK",
            r#"{"temperature":25,"humidity":60,"rain_chance":10}"#,
        )
        .await;
        let client = client(&origin, None);

        let started = Instant::now();
        let body = client.fetch_backend(None).await.unwrap();
        assert!(started.elapsed() >= delay);
        assert_eq!(body["temperature"], 25);
    }

    #[tokio::test]
    async fn test_provider_without_key_fails_fast() {
        let client = client("http://127.0.0.1:9", None);
        let err = client.fetch_provider("Pune").await.unwrap_err();
        assert!(matches!(err, WeatherError::Provider(_)));
    }
}
