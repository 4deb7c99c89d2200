//! View state and the reducer that drives it.
//!
//! `AppViewState` is a plain value. Every user input or fetch completion is
//! an `Action`; `reduce` consumes the current state and returns the next one
//! together with the side effects the coordinator has to run. Nothing here
//! does I/O.

use chrono::{NaiveDateTime, Timelike};
use rand::RngCore;

use skycast_weather::{forecast, ForecastEntry, ForecastTab, TemperatureUnit, WeatherSnapshot};

use crate::cities::CityList;
use crate::config::Config;
use crate::error::NotificationError;

pub const LOADING_TEXT: &str = "Loading...";
pub const NOTIFICATION_TITLE: &str = "Current Weather";

/// Top-level screens reachable from the drawer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Locations,
    Settings,
    Help,
}

/// Display slot a fetch result is written to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FetchTarget {
    Home,
    City(String),
}

/// What started a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    User,
    NotificationToggle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetSearchQuery(String),
    SubmitSearch,
    Refresh,
    SelectTab(ForecastTab),
    ToggleUnit,
    ToggleAutoRefresh,
    ToggleCurrentLocation,
    ToggleTheme,
    SetNotifications(bool),
    Navigate(Screen),
    Back,
    ToggleDrawer,
    AddCity(String),
    RemoveCity(String),
    ToggleFavorite(String),
    FetchCity(String),
    FetchCompleted {
        target: FetchTarget,
        origin: FetchOrigin,
        result: Result<WeatherSnapshot, String>,
    },
    NotificationPermissionDenied,
    DismissToast,
}

/// Side effects requested by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch {
        target: FetchTarget,
        query: String,
        origin: FetchOrigin,
    },
    PostNotification {
        title: String,
        body: String,
    },
}

/// Inputs the reducer needs from outside: wall-clock time for forecast
/// labels and the random source for forecast conditions.
pub struct ReduceEnv<'a> {
    pub now: NaiveDateTime,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> ReduceEnv<'a> {
    pub fn new(now: NaiveDateTime, rng: &'a mut dyn RngCore) -> Self {
        Self { now, rng }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewState {
    pub screen: Screen,
    pub drawer_open: bool,
    pub tab: ForecastTab,
    pub unit: TemperatureUnit,
    pub auto_refresh: bool,
    pub current_location: bool,
    pub notifications: bool,
    pub dark_theme: bool,
    pub search_query: String,
    /// City the home screen shows
    pub city: String,
    pub snapshot: Option<WeatherSnapshot>,
    /// Text of the last failed home fetch, cleared by the next success
    pub fetch_error: Option<String>,
    pub forecast: Vec<ForecastEntry>,
    pub cities: CityList,
    /// One-shot message for a toast/snackbar
    pub toast: Option<String>,
}

impl AppViewState {
    pub fn new(city: impl Into<String>, now: NaiveDateTime) -> Self {
        Self {
            screen: Screen::Home,
            drawer_open: false,
            tab: ForecastTab::Hours,
            unit: TemperatureUnit::Celsius,
            auto_refresh: true,
            current_location: false,
            notifications: false,
            dark_theme: is_night(now),
            search_query: String::new(),
            city: city.into(),
            snapshot: None,
            fetch_error: None,
            forecast: Vec::new(),
            cities: CityList::new(),
            toast: None,
        }
    }

    /// Initial state seeded from config
    pub fn from_config(config: &Config, now: NaiveDateTime) -> Self {
        Self {
            unit: config.weather.temperature_unit,
            auto_refresh: config.settings.auto_refresh,
            current_location: config.settings.current_location,
            notifications: config.settings.notifications,
            ..Self::new(config.weather.default_city.trim(), now)
        }
    }

    /// Current temperature in the selected unit, computed at render time
    pub fn displayed_temperature(&self) -> Option<String> {
        self.snapshot
            .as_ref()
            .map(|s| self.unit.format(s.temperature_celsius))
    }

    /// Text block for the home weather card
    pub fn display_text(&self) -> String {
        if let Some(err) = &self.fetch_error {
            return err.clone();
        }
        match (&self.snapshot, self.displayed_temperature()) {
            (Some(s), Some(temp)) => {
                format!("{}\n{}\n{}", s.location_name, temp, s.condition_text)
            }
            _ => LOADING_TEXT.to_string(),
        }
    }

    pub fn icon_url(&self) -> Option<String> {
        self.snapshot.as_ref().map(WeatherSnapshot::icon_url)
    }

    fn home_fetch(&self, origin: FetchOrigin) -> Effect {
        Effect::Fetch {
            target: FetchTarget::Home,
            query: self.city.clone(),
            origin,
        }
    }

    fn regenerate_forecast(&mut self, env: &mut ReduceEnv<'_>) {
        if let Some(snapshot) = &self.snapshot {
            self.forecast = forecast::synthesize(self.tab, snapshot, env.now, &mut *env.rng);
        }
    }
}

fn is_night(now: NaiveDateTime) -> bool {
    (18..=23).contains(&now.hour())
}

/// Text shown for a failed fetch
pub fn error_text(message: &str) -> String {
    format!("Error: {}", message)
}

/// Apply `action` to `state`, returning the next state and its effects.
pub fn reduce(
    mut state: AppViewState,
    action: Action,
    env: &mut ReduceEnv<'_>,
) -> (AppViewState, Vec<Effect>) {
    let mut effects = Vec::new();

    match action {
        Action::SetSearchQuery(query) => state.search_query = query,
        Action::SubmitSearch => {
            state.city = state.search_query.trim().to_string();
            effects.push(state.home_fetch(FetchOrigin::User));
        }
        Action::Refresh => effects.push(state.home_fetch(FetchOrigin::User)),
        Action::SelectTab(tab) => {
            state.tab = tab;
            state.regenerate_forecast(env);
        }
        // Forecast rows are always Celsius
        Action::ToggleUnit => state.unit = state.unit.toggled(),
        Action::ToggleAutoRefresh => state.auto_refresh = !state.auto_refresh,
        Action::ToggleCurrentLocation => state.current_location = !state.current_location,
        Action::ToggleTheme => state.dark_theme = !state.dark_theme,
        Action::SetNotifications(enabled) => {
            let was_enabled = state.notifications;
            state.notifications = enabled;
            if enabled && !was_enabled {
                effects.push(state.home_fetch(FetchOrigin::NotificationToggle));
            }
        }
        Action::Navigate(screen) => {
            state.screen = screen;
            state.drawer_open = false;
        }
        Action::Back => {
            state.screen = Screen::Home;
            state.drawer_open = false;
        }
        Action::ToggleDrawer => state.drawer_open = !state.drawer_open,
        Action::AddCity(name) => {
            state.cities.add_city(&name);
        }
        Action::RemoveCity(name) => {
            state.cities.remove_city(&name);
        }
        Action::ToggleFavorite(name) => {
            state.cities.toggle_favorite(&name);
        }
        Action::FetchCity(name) => effects.push(Effect::Fetch {
            query: name.clone(),
            target: FetchTarget::City(name),
            origin: FetchOrigin::User,
        }),
        Action::FetchCompleted {
            target,
            origin,
            result,
        } => apply_completion(&mut state, target, origin, result, env, &mut effects),
        Action::NotificationPermissionDenied => {
            state.notifications = false;
            state.toast = Some(NotificationError::PermissionDenied.user_message().to_string());
        }
        Action::DismissToast => state.toast = None,
    }

    tracing::debug!(screen = ?state.screen, effects = effects.len(), "Reduced action");
    (state, effects)
}

fn apply_completion(
    state: &mut AppViewState,
    target: FetchTarget,
    origin: FetchOrigin,
    result: Result<WeatherSnapshot, String>,
    env: &mut ReduceEnv<'_>,
    effects: &mut Vec<Effect>,
) {
    match (target, result) {
        (FetchTarget::Home, Ok(snapshot)) => {
            let notify = origin == FetchOrigin::NotificationToggle && state.notifications;
            if notify {
                effects.push(Effect::PostNotification {
                    title: NOTIFICATION_TITLE.to_string(),
                    body: format!(
                        "{}, {}",
                        snapshot.condition_text,
                        state.unit.format(snapshot.temperature_celsius)
                    ),
                });
            }
            state.snapshot = Some(snapshot);
            state.fetch_error = None;
            state.regenerate_forecast(env);
        }
        // Snapshot and forecast stay as they were
        (FetchTarget::Home, Err(message)) => state.fetch_error = Some(error_text(&message)),
        // A city removed while its fetch was in flight gets nothing back
        (FetchTarget::City(name), Ok(snapshot)) => {
            let text = TemperatureUnit::Celsius.format(snapshot.temperature_celsius);
            state.cities.set_city_weather(&name, text);
        }
        (FetchTarget::City(name), Err(message)) => {
            state.cities.set_city_weather(&name, error_text(&message));
        }
    }
}
