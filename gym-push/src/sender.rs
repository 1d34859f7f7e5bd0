//! One-shot notification delivery

use crate::error::PushResult;
use async_trait::async_trait;
use shared::models::{NotificationPayload, PushSubscription};

/// Delivers one encrypted, VAPID-signed message to a push service
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &NotificationPayload,
    ) -> PushResult<()>;
}

/// Sends a notification to a single subscription, exactly once.
///
/// No retries: a failed attempt is logged and returned to the caller.
pub struct PushSender<T> {
    transport: T,
}

impl<T: PushTransport> PushSender<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn send_once(
        &self,
        subscription: &PushSubscription,
        payload: &NotificationPayload,
    ) -> PushResult<()> {
        match self.transport.send(subscription, payload).await {
            Ok(()) => {
                tracing::info!(endpoint = %subscription.endpoint, title = %payload.title, "Push notification sent");
                Ok(())
            }
            Err(e) => {
                tracing::error!(endpoint = %subscription.endpoint, error = %e, "Push notification failed");
                Err(e)
            }
        }
    }
}
