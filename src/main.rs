use std::time::Duration;

use anyhow::Result;
use skycast_app::{AppServices, Coordinator, LogNotifier};
use skycast_core::{Action, AppError, AppViewState, ConfigError, API_KEY_FIELD};

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

fn main() -> Result<()> {
    skycast_core::init()?;

    let (config, validation) = skycast_core::Config::load_validated()?;
    if let Some(warning) = validation.warning_for(API_KEY_FIELD) {
        let err = AppError::from(ConfigError::MissingSetting(warning.field.clone()));
        tracing::error!("{}", err);
        anyhow::bail!("{} {}", err.user_message(), warning.message);
    }

    let services = AppServices::new(&config).map_err(|e| {
        tracing::error!("{}", e);
        let message = e.user_message();
        anyhow::Error::new(e).context(message)
    })?;
    let now = chrono::Local::now().naive_local();
    let mut app = Coordinator::from_services(
        &services,
        AppViewState::from_config(&config, now),
        Box::new(LogNotifier),
    );

    tracing::info!("SkyCast started");

    match std::env::args().nth(1) {
        Some(city) => {
            app.dispatch(Action::SetSearchQuery(city));
            app.dispatch(Action::SubmitSearch);
        }
        None => app.dispatch(Action::Refresh),
    }

    if !app.pump_until_idle(FETCH_TIMEOUT) {
        println!("Weather service did not answer in time.");
    }

    let state = app.state();
    println!("{}", state.display_text());
    if let Some(icon) = state.icon_url() {
        println!("Icon: {}", icon);
    }
    println!();
    for entry in &state.forecast {
        println!(
            "{:<12} {:<24} {}",
            entry.label, entry.condition_text, entry.temperature_display
        );
    }

    // The coordinator holds a runtime handle; release it before the runtime.
    drop(app);
    drop(services);

    Ok(())
}
