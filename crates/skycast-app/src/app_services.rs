//! Shared services: the background runtime and the weather client.

use std::sync::Arc;

use skycast_core::{AppError, Config};
use skycast_weather::WeatherClient;

/// Owns the tokio runtime that network work runs on.
///
/// Drop this from a plain thread, never from inside an async context.
pub struct AppServices {
    runtime: tokio::runtime::Runtime,
    weather_client: Arc<WeatherClient>,
    api_key: Arc<str>,
}

impl AppServices {
    /// Build the runtime and the weather client from config
    ///
    /// # Errors
    ///
    /// `AppError::Io` if the runtime cannot start, `AppError::Weather` if the
    /// HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("skycast-tokio")
            .build()?;

        let weather_client = WeatherClient::new(&config.weather.api_base_url)?;

        let api_key = config.api_key().unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("No weather API key configured; fetches will fail");
        }

        tracing::info!(
            "Weather services initialized against {}",
            weather_client.base_url()
        );

        Ok(Self {
            runtime,
            weather_client: Arc::new(weather_client),
            api_key: Arc::from(api_key),
        })
    }

    pub fn runtime(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn weather_client(&self) -> Arc<WeatherClient> {
        self.weather_client.clone()
    }

    pub fn api_key(&self) -> Arc<str> {
        self.api_key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_configured_endpoint_and_key() {
        let mut config = Config::default();
        config.weather.api_base_url = "http://localhost:9/v1/".to_string();
        config.weather.api_key = Some("config-key".to_string());

        let services = AppServices::new(&config).unwrap();
        assert_eq!(services.weather_client().base_url(), "http://localhost:9/v1");
        assert!(!services.api_key().is_empty());
    }
}
