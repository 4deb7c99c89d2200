//! Weather service for SkyCast
//!
//! Fetches current conditions from WeatherAPI.com and synthesizes the
//! placeholder hourly/daily forecast lists shown under them.

pub mod client;
pub mod forecast;
pub mod types;

pub use client::{WeatherClient, DEFAULT_BASE_URL};
pub use forecast::{synthesize, synthesize_daily, synthesize_hourly, ForecastTab};
pub use types::*;
