//! Host error type

use thiserror::Error;

/// Failure reported by the service worker host
///
/// Produced by [`WorkerHost`](crate::host::WorkerHost) implementations; the
/// browser bindings live outside this crate and map rejected promises onto
/// these variants. Handlers only propagate them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Notification permission not granted
    #[error("Notification permission denied")]
    PermissionDenied,

    /// Showing the notification failed
    #[error("Failed to show notification: {0}")]
    ShowNotification(String),

    /// Opening a window failed
    #[error("Failed to open window {url}: {reason}")]
    OpenWindow { url: String, reason: String },

    /// Client enumeration failed
    #[error("Failed to list window clients: {0}")]
    Clients(String),
}

pub type HostResult<T> = Result<T, HostError>;
