use serde::{Deserialize, Serialize};

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert a Celsius reading into this unit
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    /// Format a Celsius reading for display, e.g. "20.0°C" or "68.0°F"
    pub fn format(self, celsius: f64) -> String {
        format!("{:.1}{}", self.from_celsius(celsius), self.symbol())
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }
}

/// `current.json` response body
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentResponse {
    pub location: ApiLocation,
    pub current: ApiCurrent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiLocation {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCurrent {
    pub temp_c: f64,
    pub condition: ApiCondition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCondition {
    pub text: String,
    pub icon: String,
}

/// Error body returned alongside non-2xx statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[allow(dead_code)]
    pub code: Option<i64>,
    pub message: String,
}

/// Current conditions for one location, as last fetched.
///
/// Built once from a successful response and never patched afterwards; a new
/// fetch replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_celsius: f64,
    pub condition_text: String,
    pub condition_icon: String,
}

impl WeatherSnapshot {
    /// Absolute icon URL. The API hands out protocol-relative paths.
    pub fn icon_url(&self) -> String {
        if self.condition_icon.is_empty() || self.condition_icon.starts_with("http") {
            self.condition_icon.clone()
        } else {
            format!("https:{}", self.condition_icon)
        }
    }
}

impl From<CurrentResponse> for WeatherSnapshot {
    fn from(resp: CurrentResponse) -> Self {
        Self {
            location_name: resp.location.name,
            region: resp.location.region,
            country: resp.location.country,
            latitude: resp.location.lat,
            longitude: resp.location.lon,
            temperature_celsius: resp.current.temp_c,
            condition_text: resp.current.condition.text,
            condition_icon: resp.current.condition.icon,
        }
    }
}

/// One synthesized forecast row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub label: String,
    pub condition_text: String,
    pub temperature_display: String,
}

/// Weather client errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Weather API key is not configured")]
    MissingApiKey,
}

impl WeatherError {
    /// Short message suitable for a status line
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) => "Unable to reach the weather service.",
            Self::Api { status, .. } if *status == 401 || *status == 403 => {
                "Weather API key is invalid. Check settings."
            }
            Self::Api { .. } => "Location not found. Check and try again.",
            Self::Parse(_) => "Received an unexpected response from the weather service.",
            Self::MissingApiKey => "Weather API key is missing. Check settings.",
        }
    }
}
