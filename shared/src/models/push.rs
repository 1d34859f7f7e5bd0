//! Push Models
//!
//! Wire shapes shared by the push sender and the service worker receiver.

use serde::{Deserialize, Serialize};

pub const DEFAULT_NOTIFICATION_TITLE: &str = "Notification";
pub const DEFAULT_NOTIFICATION_BODY: &str = "You have a new message.";

/// Browser-issued push subscription (`PushSubscription.toJSON()`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushSubscription {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
}

/// Subscription encryption keys, Base64url encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    /// User agent public key (uncompressed P-256 point)
    pub p256dh: String,
    /// 16-byte authentication secret
    pub auth: String,
}

/// Notification payload carried inside a push message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_body")]
    pub body: String,
}

fn default_title() -> String {
    DEFAULT_NOTIFICATION_TITLE.to_string()
}

fn default_body() -> String {
    DEFAULT_NOTIFICATION_BODY.to_string()
}

impl NotificationPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Decode push event data.
    ///
    /// Missing data is treated as an empty object. Malformed data is
    /// tolerated as well: the receiver must always show something.
    pub fn from_push_data(data: Option<&[u8]>) -> Self {
        data.and_then(|bytes| serde_json::from_slice(bytes).ok())
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for NotificationPayload {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TITLE, DEFAULT_NOTIFICATION_BODY)
    }
}
