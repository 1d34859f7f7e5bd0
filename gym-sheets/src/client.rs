//! Google Sheets REST client (values API, no SDK dependency)

use crate::auth::ServiceAccountKey;
use crate::config::SheetsConfig;
use crate::error::{SheetsError, SheetsResult};
use crate::store::RowStore;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use shared::models::Row;
use std::path::PathBuf;

/// `valueInputOption` that makes Sheets parse text as if typed into a cell
const USER_ENTERED: &str = "USER_ENTERED";

/// Body of `spreadsheets.values.get` and `spreadsheets.values.update`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    major_dimension: Option<String>,
    /// Absent when the range is empty
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    message: String,
}

/// Production [`RowStore`] backed by the Sheets v4 values API.
///
/// Every call authenticates from scratch: the key file is read, an assertion
/// is signed and exchanged for an access token.
#[derive(Debug, Clone)]
pub struct GoogleSheetsClient {
    http: Client,
    spreadsheet_id: String,
    key_path: PathBuf,
    scope: String,
    api_base_url: String,
}

impl GoogleSheetsClient {
    /// Create a new client from configuration
    pub fn new(config: &SheetsConfig) -> SheetsResult<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            http,
            spreadsheet_id: config.spreadsheet_id.clone(),
            key_path: config.key_path.clone(),
            scope: config.scope.clone(),
            api_base_url: config.api_base_url.clone(),
        })
    }

    async fn access_token(&self) -> SheetsResult<String> {
        let key = ServiceAccountKey::from_file(&self.key_path)?;
        key.fetch_access_token(&self.http, &self.scope).await
    }

    /// `{base}/spreadsheets/{id}/values/{range}` with the range percent-encoded
    fn values_url(&self, range: &str) -> SheetsResult<Url> {
        let mut url = Url::parse(&self.api_base_url)
            .map_err(|e| SheetsError::Config(format!("invalid API base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| SheetsError::Config("API base URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(["spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        Ok(url)
    }

    /// Turn a non-success response into [`SheetsError::Api`]
    async fn check(response: reqwest::Response) -> SheetsResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        let message = serde_json::from_str::<GoogleErrorBody>(&text)
            .map(|body| body.error.message)
            .unwrap_or(text);
        Err(SheetsError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Render a cell as text. Formatted values already arrive as strings.
fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RowStore for GoogleSheetsClient {
    async fn get_rows(&self, range: &str) -> SheetsResult<Vec<Row>> {
        let token = self.access_token().await?;
        let url = self.values_url(range)?;

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let body: ValueRange = Self::check(response).await?.json().await?;

        tracing::debug!(range, rows = body.values.len(), "Rows fetched");
        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn put_rows(&self, range: &str, rows: &[Row]) -> SheetsResult<()> {
        let token = self.access_token().await?;
        let mut url = self.values_url(range)?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", USER_ENTERED);

        let body = ValueRange {
            range: Some(range.to_string()),
            major_dimension: Some("ROWS".to_string()),
            values: rows
                .iter()
                .map(|row| row.iter().cloned().map(serde_json::Value::String).collect())
                .collect(),
        };

        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;

        tracing::debug!(range, rows = rows.len(), "Rows written");
        Ok(())
    }
}
