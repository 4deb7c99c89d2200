pub mod cities;
pub mod config;
pub mod error;
pub mod state;

pub use cities::CityList;
pub use config::{
    Config, SettingsConfig, ValidationResult, WeatherConfig, API_KEY_ENV, API_KEY_FIELD,
};
pub use error::{AppError, ConfigError, NotificationError, WeatherError};
pub use state::{reduce, Action, AppViewState, Effect, FetchOrigin, FetchTarget, ReduceEnv, Screen};

use anyhow::Result;

/// Initialize logging for the application
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!("SkyCast core initialized");
    Ok(())
}
