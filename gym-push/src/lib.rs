//! Gym Push - one-shot Web Push notifications
//!
//! Messages are encrypted with `aes128gcm` (RFC 8291) and identified with
//! VAPID (RFC 8292), so any standards-compliant push service accepts them.

pub mod client;
pub mod config;
pub mod ece;
pub mod error;
pub mod sender;
pub mod vapid;

pub use client::WebPushClient;
pub use config::PushConfig;
pub use error::{PushError, PushResult};
pub use sender::{PushSender, PushTransport};
pub use vapid::VapidSigner;
