//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound => StatusCode::NOT_FOUND,

            // 502 Bad Gateway (an upstream vendor failed us)
            Self::SheetsAuthFailed | Self::SheetsUnavailable => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            Self::InternalError | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            Self::ValidationFailed | Self::InvalidRequest | Self::SheetsRangeInvalid => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}
