//! Gym Sheets - member store backed by a Google spreadsheet
//!
//! The spreadsheet is the system of record for members. Rows of the
//! configured range (`Members!A2:F` by default) map positionally onto
//! [`MemberRecord`](shared::MemberRecord)s.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod store;

pub use client::GoogleSheetsClient;
pub use config::SheetsConfig;
pub use error::{SheetsError, SheetsResult};
pub use store::{MemberStore, RowStore};

use std::sync::Arc;

/// Build a [`MemberStore`] talking to Google Sheets
pub fn connect(config: &SheetsConfig) -> SheetsResult<MemberStore> {
    let client = GoogleSheetsClient::new(config)?;
    Ok(MemberStore::new(Arc::new(client), config.range.clone()))
}
