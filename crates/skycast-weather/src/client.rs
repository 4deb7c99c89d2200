//! WeatherAPI.com client for current conditions.

use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

use crate::types::{ApiErrorBody, CurrentResponse, WeatherError, WeatherSnapshot};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(base_url: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch current conditions for a free-text location.
    ///
    /// The query goes to the service untouched; there is no retry.
    #[instrument(skip(self, api_key), level = "info")]
    pub async fn fetch_current(
        &self,
        api_key: &str,
        location_query: &str,
    ) -> Result<WeatherSnapshot, WeatherError> {
        if api_key.is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let url = format!("{}/current.json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("key", api_key), ("q", location_query)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            tracing::warn!("Weather API returned {}: {}", status, message);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CurrentResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        tracing::debug!(
            "Fetched {} ({}, {}): {}",
            parsed.location.name,
            parsed.location.region,
            parsed.location.country,
            parsed.current.temp_c
        );
        Ok(parsed.into())
    }
}
