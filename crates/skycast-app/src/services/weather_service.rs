//! Weather backend: async weather fetching.
//! All network work runs off the foreground thread; results sent via mpsc.

use std::sync::Arc;

use skycast_core::{FetchOrigin, FetchTarget};
use skycast_weather::{WeatherClient, WeatherSnapshot};

/// Messages sent from async operations back to the foreground
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of fetching current conditions. Errors carry display text.
    FetchDone {
        target: FetchTarget,
        origin: FetchOrigin,
        result: Result<WeatherSnapshot, String>,
    },
}

/// Everything a spawned fetch needs
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub target: FetchTarget,
    pub origin: FetchOrigin,
    pub query: String,
}

/// Spawn a fetch on `runtime`.
/// Sends exactly one `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &std::sync::mpsc::Sender<WeatherServiceMessage>,
    runtime: &tokio::runtime::Handle,
    client: Arc<WeatherClient>,
    api_key: Arc<str>,
    request: FetchRequest,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        let FetchRequest {
            target,
            origin,
            query,
        } = request;

        let result = client
            .fetch_current(&api_key, &query)
            .await
            .map_err(|e| {
                tracing::warn!("Weather fetch for {:?} failed: {}", query, e);
                e.to_string()
            });

        if result.is_ok() {
            tracing::info!("Fetched weather for {:?}", query);
        }

        if tx
            .send(WeatherServiceMessage::FetchDone {
                target,
                origin,
                result,
            })
            .is_err()
        {
            tracing::debug!("Foreground gone, dropping weather result for {:?}", query);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_without_key_reports_through_channel() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        let client = Arc::new(WeatherClient::new("http://127.0.0.1:1").unwrap());

        request_fetch(
            &tx,
            runtime.handle(),
            client,
            Arc::from(""),
            FetchRequest {
                target: FetchTarget::Home,
                origin: FetchOrigin::User,
                query: "Aqtobe".into(),
            },
        );

        let WeatherServiceMessage::FetchDone { target, result, .. } =
            rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
        assert_eq!(target, FetchTarget::Home);
        assert!(result.unwrap_err().contains("API key"));
    }
}
