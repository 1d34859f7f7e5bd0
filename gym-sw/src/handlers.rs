//! `push` and `notificationclick` handlers
//!
//! The two handlers share nothing but configuration. Each returns only after
//! the host has finished the work it asked for, so the host can hold the
//! event open until then.

use crate::config::WorkerConfig;
use crate::error::HostResult;
use crate::host::{Notification, NotificationOptions, WorkerHost};
use shared::models::NotificationPayload;

/// Show a notification for an incoming push message.
///
/// Missing or malformed data falls back to the default title and body.
pub async fn on_push<H>(host: &H, config: &WorkerConfig, data: Option<&[u8]>) -> HostResult<()>
where
    H: WorkerHost + ?Sized,
{
    let payload = NotificationPayload::from_push_data(data);
    tracing::debug!(title = %payload.title, has_data = data.is_some(), "Push received");

    let options = NotificationOptions {
        body: payload.body,
        icon: config.icon.clone(),
        badge: config.badge.clone(),
    };
    host.show_notification(&payload.title, options).await
}

/// Close the clicked notification and open the root page.
///
/// Existing windows are listed but never focused; a new one is opened when
/// the host supports it.
pub async fn on_notification_click<H>(
    host: &H,
    config: &WorkerConfig,
    notification: &dyn Notification,
) -> HostResult<()>
where
    H: WorkerHost + ?Sized,
{
    notification.close();

    let clients = host.window_clients().await?;
    tracing::debug!(title = notification.title(), clients = clients.len(), "Notification clicked");

    if host.can_open_window() {
        host.open_window(&config.root_url).await?;
    }
    Ok(())
}
