//! Gym SW - push receiver logic for the gym web app's service worker
//!
//! Host-agnostic: the platform (notifications, window clients) is reached
//! through [`WorkerHost`], so the handlers run unchanged under a browser
//! binding or an in-memory test host.

pub mod config;
pub mod error;
pub mod handlers;
pub mod host;
pub mod worker;

pub use config::WorkerConfig;
pub use error::{HostError, HostResult};
pub use handlers::{on_notification_click, on_push};
pub use host::{Notification, NotificationOptions, WindowClient, WorkerHost};
pub use worker::{ServiceWorker, WorkerEvent};
