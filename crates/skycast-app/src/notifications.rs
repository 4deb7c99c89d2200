//! Local notification surface.
//!
//! Platform shells implement `Notifier`; the dispatcher makes sure the
//! channel exists before the first post and always reuses the same
//! notification id, so each post replaces the previous one.

use skycast_core::NotificationError;

pub const CHANNEL_ID: &str = "weather_channel";
pub const CHANNEL_NAME: &str = "Weather Updates";
pub const NOTIFICATION_ID: u32 = 1;

pub trait Notifier: Send {
    fn create_channel(&mut self, id: &str, name: &str) -> Result<(), NotificationError>;

    fn post(
        &mut self,
        channel_id: &str,
        notification_id: u32,
        title: &str,
        body: &str,
    ) -> Result<(), NotificationError>;
}

/// Notifier that writes to the log. Used when no platform surface exists.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn create_channel(&mut self, id: &str, name: &str) -> Result<(), NotificationError> {
        tracing::debug!("Notification channel {} ({}) ready", id, name);
        Ok(())
    }

    fn post(
        &mut self,
        channel_id: &str,
        notification_id: u32,
        title: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        tracing::info!(channel_id, notification_id, "{}: {}", title, body);
        Ok(())
    }
}

pub struct NotificationDispatcher {
    notifier: Box<dyn Notifier>,
    channel_ready: bool,
}

impl NotificationDispatcher {
    pub fn new(notifier: Box<dyn Notifier>) -> Self {
        Self {
            notifier,
            channel_ready: false,
        }
    }

    /// Post (or replace) the weather notification.
    ///
    /// The channel is created on first use. A failed creation is retried on
    /// the next post.
    pub fn post(&mut self, title: &str, body: &str) -> Result<(), NotificationError> {
        if !self.channel_ready {
            self.notifier.create_channel(CHANNEL_ID, CHANNEL_NAME)?;
            self.channel_ready = true;
        }
        self.notifier.post(CHANNEL_ID, NOTIFICATION_ID, title, body)
    }
}
