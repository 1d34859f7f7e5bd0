//! Push sender configuration

use shared::models::{NotificationPayload, PushSubscription};
use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Four weeks, the common push-service maximum
pub const DEFAULT_TTL_SECS: u32 = 2_419_200;
pub const DEFAULT_SUBSCRIPTION_PATH: &str = "subscription.json";

const DEMO_TITLE: &str = "Hello User!";
const DEMO_BODY: &str = "Here is a notification just for you.";

#[derive(Debug, Clone)]
pub struct PushConfig {
    /// Contact URI sent as the VAPID `sub` claim (`mailto:` or `https:`)
    pub vapid_subject: String,
    /// Base64url, 65-byte uncompressed P-256 point
    pub vapid_public_key: String,
    /// Base64url, 32-byte scalar
    pub vapid_private_key: String,
    /// Target subscription
    pub subscription: PushSubscription,
    /// Message to deliver (`PUSH_TITLE` / `PUSH_BODY`)
    pub payload: NotificationPayload,
    /// How long the push service may queue the message (seconds)
    pub ttl: u32,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl PushConfig {
    /// Load configuration from environment variables
    ///
    /// The subscription is taken from `PUSH_SUBSCRIPTION` (inline JSON) or
    /// else read from the file at `PUSH_SUBSCRIPTION_PATH`.
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, BoxError> {
        let required = |key: &str| -> Result<String, BoxError> {
            var(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| format!("{key} must be set").into())
        };

        let subscription_json = match var("PUSH_SUBSCRIPTION").filter(|v| !v.is_empty()) {
            Some(json) => json,
            None => {
                let path = PathBuf::from(
                    var("PUSH_SUBSCRIPTION_PATH")
                        .unwrap_or_else(|| DEFAULT_SUBSCRIPTION_PATH.into()),
                );
                std::fs::read_to_string(&path).map_err(|e| {
                    format!("failed to read subscription file {}: {e}", path.display())
                })?
            }
        };
        let subscription: PushSubscription = serde_json::from_str(&subscription_json)
            .map_err(|e| format!("invalid push subscription JSON: {e}"))?;

        Ok(Self {
            vapid_subject: required("VAPID_SUBJECT")?,
            vapid_public_key: required("VAPID_PUBLIC_KEY")?,
            vapid_private_key: required("VAPID_PRIVATE_KEY")?,
            subscription,
            payload: NotificationPayload::new(
                var("PUSH_TITLE").unwrap_or_else(|| DEMO_TITLE.into()),
                var("PUSH_BODY").unwrap_or_else(|| DEMO_BODY.into()),
            ),
            ttl: var("PUSH_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_SECS),
            timeout: var("PUSH_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}
