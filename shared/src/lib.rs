//! Shared types for GymDesk
//!
//! Member records, push wire types and the unified error/response
//! system used across the workspace crates.

pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{MemberRecord, NotificationPayload, PushSubscription, Row, Sex};
