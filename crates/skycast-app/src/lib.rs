pub mod app_services;
pub mod coordinator;
pub mod notifications;
pub mod services;

pub use app_services::AppServices;
pub use coordinator::Coordinator;
pub use notifications::{LogNotifier, NotificationDispatcher, Notifier};
