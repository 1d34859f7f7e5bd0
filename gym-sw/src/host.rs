//! Platform capabilities the receiver needs from its host
//!
//! A browser binding implements these over `registration.showNotification`
//! and `clients`; tests use in-memory fakes.

use crate::error::HostResult;
use async_trait::async_trait;

/// Display options for a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
}

/// A window client controlled by the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClient {
    pub id: String,
    pub url: String,
    pub focused: bool,
}

/// A notification the user interacted with
pub trait Notification: Send + Sync {
    fn title(&self) -> &str;

    fn close(&self);
}

#[async_trait]
pub trait WorkerHost: Send + Sync {
    /// Resolves once the notification is displayed
    async fn show_notification(&self, title: &str, options: NotificationOptions)
    -> HostResult<()>;

    /// Window clients, including uncontrolled ones
    async fn window_clients(&self) -> HostResult<Vec<WindowClient>>;

    /// Whether `open_window` is available on this platform
    fn can_open_window(&self) -> bool;

    async fn open_window(&self, url: &str) -> HostResult<()>;
}
