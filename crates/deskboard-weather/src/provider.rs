//! OpenWeather client for current conditions and the 5-day forecast.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;

use deskboard_core::WeatherConfig;

use crate::types::{CurrentWeather, ForecastResponse, Location, WeatherError};

const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
    geo_url: String,
}

impl WeatherProvider {
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        geo_url: &str,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            geo_url: geo_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::new(
            config.resolved_api_key(),
            &config.base_url,
            &config.geo_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Current conditions at `location`.
    #[instrument(skip(self), fields(lat = location.lat, lon = location.lon))]
    pub async fn fetch_weather(&self, location: &Location) -> Result<CurrentWeather, WeatherError> {
        let url = format!("{}/weather", self.base_url);
        self.get_json("Weather fetch", &url, &coordinates(location))
            .await
    }

    /// 5-day forecast in 3-hour steps at `location`.
    #[instrument(skip(self), fields(lat = location.lat, lon = location.lon))]
    pub async fn fetch_forecast(
        &self,
        location: &Location,
    ) -> Result<ForecastResponse, WeatherError> {
        let url = format!("{}/forecast", self.base_url);
        self.get_json("Forecast fetch", &url, &coordinates(location))
            .await
    }

    pub(crate) fn geo_url(&self) -> &str {
        &self.geo_url
    }

    /// GET `url` with the API key appended and decode the JSON body.
    ///
    /// Any non-2xx status becomes `WeatherError::Upstream`; there are no retries.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("appid", api_key)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!("{} returned {}", operation, status);
            return Err(WeatherError::Upstream {
                operation,
                status: status.as_u16(),
                message: upstream_message(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("{} response: {}", operation, e)))
    }
}

fn coordinates(location: &Location) -> Vec<(&'static str, String)> {
    vec![
        ("lat", location.lat.to_string()),
        ("lon", location.lon.to_string()),
        ("units", UNITS.to_string()),
    ]
}

/// OpenWeather puts the reason in `{"message": ...}`; otherwise keep a
/// bounded slice of the raw body.
fn upstream_message(body: &str) -> String {
    const MAX: usize = 200;

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_prefers_json_message() {
        let body = r#"{"cod":401,"message":"Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."}"#;
        assert!(upstream_message(body).starts_with("Invalid API key"));
    }

    #[test]
    fn test_upstream_message_truncates_raw_body() {
        let body = "x".repeat(500);
        let message = upstream_message(&body);
        assert_eq!(message.len(), 203);
        assert!(message.ends_with("..."));
        assert_eq!(upstream_message("bad gateway"), "bad gateway");
    }

    #[test]
    fn test_from_config_trims_trailing_slash() {
        let config = WeatherConfig {
            api_key: Some("key".to_string()),
            base_url: "http://localhost:1234/data/2.5/".to_string(),
            geo_url: "http://localhost:1234/geo/1.0/".to_string(),
            timeout_secs: 5,
        };
        let provider = WeatherProvider::from_config(&config).unwrap();
        assert!(provider.has_api_key());
        assert_eq!(provider.base_url, "http://localhost:1234/data/2.5");
        assert_eq!(provider.geo_url(), "http://localhost:1234/geo/1.0");
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let provider = WeatherProvider::new(
            None,
            "http://127.0.0.1:9/data/2.5",
            "http://127.0.0.1:9/geo/1.0",
            Duration::from_secs(1),
        )
        .unwrap();

        let err = provider
            .fetch_weather(&Location::unnamed(1.0, 2.0))
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }
}
