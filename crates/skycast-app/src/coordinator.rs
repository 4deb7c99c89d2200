//! Foreground coordinator.
//!
//! Owns the view state, feeds actions through the reducer and executes the
//! resulting effects. Fetches run on the background runtime and report back
//! over an mpsc channel; only `pump` applies their results, so the view state
//! is never touched from another thread.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use skycast_core::{reduce, Action, AppViewState, Effect, NotificationError, ReduceEnv};
use skycast_weather::WeatherClient;

use crate::app_services::AppServices;
use crate::notifications::{NotificationDispatcher, Notifier};
use crate::services::{request_weather_fetch, FetchRequest, WeatherServiceMessage};

type Clock = Box<dyn Fn() -> NaiveDateTime + Send>;

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub struct Coordinator {
    state: AppViewState,
    runtime: tokio::runtime::Handle,
    client: Arc<WeatherClient>,
    api_key: Arc<str>,
    tx: Sender<WeatherServiceMessage>,
    rx: Receiver<WeatherServiceMessage>,
    in_flight: usize,
    notifications: NotificationDispatcher,
    rng: Box<dyn RngCore + Send>,
    clock: Clock,
}

impl Coordinator {
    pub fn new(
        runtime: tokio::runtime::Handle,
        client: Arc<WeatherClient>,
        api_key: Arc<str>,
        initial: AppViewState,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        Self {
            state: initial,
            runtime,
            client,
            api_key,
            tx,
            rx,
            in_flight: 0,
            notifications: NotificationDispatcher::new(notifier),
            rng: Box::new(StdRng::from_entropy()),
            clock: Box::new(local_now),
        }
    }

    pub fn from_services(
        services: &AppServices,
        initial: AppViewState,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self::new(
            services.runtime(),
            services.weather_client(),
            services.api_key(),
            initial,
            notifier,
        )
    }

    /// Replace the forecast random source (e.g. a seeded one in tests)
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Replace the wall clock used for forecast labels
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn state(&self) -> &AppViewState {
        &self.state
    }

    /// Number of fetches launched but not yet applied
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Run one action through the reducer and execute its effects
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "Dispatching");
        let now = (self.clock)();
        let mut env = ReduceEnv::new(now, &mut *self.rng);
        let (next, effects) = reduce(self.state.clone(), action, &mut env);
        self.state = next;

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Fetch {
                target,
                query,
                origin,
            } => {
                self.in_flight += 1;
                request_weather_fetch(
                    &self.tx,
                    &self.runtime,
                    self.client.clone(),
                    self.api_key.clone(),
                    FetchRequest {
                        target,
                        origin,
                        query,
                    },
                );
            }
            Effect::PostNotification { title, body } => {
                if let Err(NotificationError::PermissionDenied) =
                    self.notifications.post(&title, &body)
                {
                    tracing::warn!("Notification permission denied");
                    self.dispatch(Action::NotificationPermissionDenied);
                }
            }
        }
    }

    fn apply(&mut self, message: WeatherServiceMessage) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let WeatherServiceMessage::FetchDone {
            target,
            origin,
            result,
        } = message;
        self.dispatch(Action::FetchCompleted {
            target,
            origin,
            result,
        });
    }

    /// Apply every completed fetch without blocking. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.apply(message);
            applied += 1;
        }
        applied
    }

    /// Block until no fetch is in flight or `timeout` passes.
    /// Returns true if everything completed.
    pub fn pump_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(message) => self.apply(message),
                Err(RecvTimeoutError::Timeout) => {
                    tracing::warn!("{} weather fetch(es) still pending", self.in_flight);
                    return false;
                }
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }
}
