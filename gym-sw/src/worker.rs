//! Event dispatch

use crate::config::WorkerConfig;
use crate::error::HostResult;
use crate::handlers::{on_notification_click, on_push};
use crate::host::{Notification, WorkerHost};
use std::sync::Arc;

/// Events delivered to the worker by its host
pub enum WorkerEvent {
    Push { data: Option<Vec<u8>> },
    NotificationClick(Arc<dyn Notification>),
}

impl std::fmt::Debug for WorkerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Push { data } => f
                .debug_struct("Push")
                .field("len", &data.as_ref().map(Vec::len))
                .finish(),
            Self::NotificationClick(n) => f.debug_tuple("NotificationClick").field(&n.title()).finish(),
        }
    }
}

pub struct ServiceWorker<H> {
    host: H,
    config: WorkerConfig,
}

impl<H: WorkerHost> ServiceWorker<H> {
    pub fn new(host: H, config: WorkerConfig) -> Self {
        Self { host, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Run the handler for `event` to completion
    pub async fn dispatch(&self, event: WorkerEvent) -> HostResult<()> {
        let result = match &event {
            WorkerEvent::Push { data } => on_push(&self.host, &self.config, data.as_deref()).await,
            WorkerEvent::NotificationClick(notification) => {
                on_notification_click(&self.host, &self.config, notification.as_ref()).await
            }
        };
        if let Err(e) = &result {
            tracing::warn!(event = ?event, error = %e, "Worker event failed");
        }
        result
    }
}
