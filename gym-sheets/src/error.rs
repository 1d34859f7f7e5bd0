//! Member store error types

use shared::error::{AppError, ErrorCode};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the spreadsheet adapter.
///
/// Vendor failures are passed through as-is; nothing here is retried.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Service-account key file could not be read
    #[error("Failed to read service account key {}: {source}", path.display())]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key file parsed but is unusable
    #[error("Invalid service account key: {0}")]
    InvalidKey(String),

    /// Token endpoint refused the assertion
    #[error("Token request rejected: {0}")]
    Auth(String),

    /// Assertion could not be signed
    #[error("Token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Transport failure talking to Google
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Sheets API answered with a non-success status
    #[error("Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Adapter misconfigured (bad base URL and the like)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SheetsError {
    /// True when the failure is about credentials rather than the sheet itself
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            SheetsError::KeyFile { .. }
                | SheetsError::InvalidKey(_)
                | SheetsError::Auth(_)
                | SheetsError::Token(_)
        ) || matches!(self, SheetsError::Api { status: 401 | 403, .. })
    }
}

/// Result type for member store operations
pub type SheetsResult<T> = Result<T, SheetsError>;

impl From<SheetsError> for AppError {
    fn from(err: SheetsError) -> Self {
        let code = match &err {
            e if e.is_auth() => ErrorCode::SheetsAuthFailed,
            SheetsError::Api { status: 400, .. } => ErrorCode::SheetsRangeInvalid,
            SheetsError::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            SheetsError::Serialization(_) => ErrorCode::InternalError,
            SheetsError::Config(_) => ErrorCode::ConfigError,
            _ => ErrorCode::SheetsUnavailable,
        };

        let app = AppError::with_message(code, err.to_string());
        match err {
            SheetsError::Api { status, .. } => app.with_detail("status", status),
            _ => app,
        }
    }
}
