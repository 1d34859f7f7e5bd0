//! Data models
//!
//! Shared between the member API server, the push sender and the
//! service worker receiver.

pub mod member;
pub mod push;

// Re-exports
pub use member::*;
pub use push::*;
