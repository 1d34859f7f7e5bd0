//! Service-account authentication (OAuth 2.0 JWT bearer grant)
//!
//! Flow: sign an RS256 assertion with the key file's private key, POST it to
//! the key's `token_uri`, use the returned access token as a bearer token.

use crate::error::{SheetsError, SheetsResult};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
/// Google caps assertion lifetime at one hour
const ASSERTION_TTL_SECS: i64 = 3600;

/// The subset of a Google service-account JSON key we use
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Claims of the signed assertion
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

impl ServiceAccountKey {
    /// Read and parse a key file
    pub fn from_file(path: &Path) -> SheetsResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| SheetsError::KeyFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> SheetsResult<Self> {
        let key: Self = serde_json::from_str(raw)
            .map_err(|e| SheetsError::InvalidKey(e.to_string()))?;
        if key.client_email.is_empty() {
            return Err(SheetsError::InvalidKey("client_email is empty".into()));
        }
        if !key.private_key.contains("PRIVATE KEY") {
            return Err(SheetsError::InvalidKey(
                "private_key is not a PEM private key".into(),
            ));
        }
        Ok(key)
    }

    /// Sign the JWT assertion for `scope`, issued at `now` (unix seconds)
    pub fn assertion(&self, scope: &str, now: i64) -> SheetsResult<String> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: scope.to_string(),
            aud: self.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_TTL_SECS,
        };

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())?;
        Ok(jsonwebtoken::encode(&header, &claims, &key)?)
    }

    /// Exchange a fresh assertion for an access token
    pub async fn fetch_access_token(
        &self,
        http: &reqwest::Client,
        scope: &str,
    ) -> SheetsResult<String> {
        let assertion = self.assertion(scope, chrono::Utc::now().timestamp())?;

        let response = http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let reason = match serde_json::from_str::<TokenErrorResponse>(&text) {
                Ok(body) => match body.error_description {
                    Some(desc) => format!("{}: {desc}", body.error),
                    None => body.error,
                },
                Err(_) => format!("HTTP {status}: {text}"),
            };
            tracing::warn!(client_email = %self.client_email, %status, "Token request rejected");
            return Err(SheetsError::Auth(reason));
        }

        let token: TokenResponse = response.json().await?;
        tracing::debug!(client_email = %self.client_email, "Access token obtained");
        Ok(token.access_token)
    }
}
