//! Push delivery error types

use thiserror::Error;

/// Push delivery error type
#[derive(Debug, Error)]
pub enum PushError {
    /// VAPID key pair could not be decoded or does not match
    #[error("Invalid VAPID key: {0}")]
    InvalidVapidKey(String),

    /// Subscription endpoint or keys are malformed
    #[error("Invalid subscription: {0}")]
    InvalidSubscription(String),

    /// Payload does not fit in a single aes128gcm record
    #[error("Payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Payload encryption failed
    #[error("Encryption failed: {0}")]
    Encryption(&'static str),

    /// Transport failure talking to the push service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Push service reports the subscription expired or was unsubscribed (404/410)
    #[error("Subscription is gone (HTTP {status})")]
    SubscriptionGone { status: u16 },

    /// Push service refused the message
    #[error("Push service rejected message (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for push operations
pub type PushResult<T> = Result<T, PushError>;
