//! Spreadsheet adapter configuration

use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Range holding member rows (row 1 is the header, never touched)
pub const DEFAULT_MEMBERS_RANGE: &str = "Members!A2:F";
/// Read/write access to spreadsheets
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// Where the member sheet lives and how to authenticate against it
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Spreadsheet ID (the long token in the sheet URL)
    pub spreadsheet_id: String,

    /// A1 range holding member rows
    pub range: String,

    /// Path to the service-account JSON key
    pub key_path: PathBuf,

    /// OAuth scope requested for the access token
    pub scope: String,

    /// Sheets API base URL
    pub api_base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl SheetsConfig {
    /// Create a configuration with the default range, scope and endpoint
    pub fn new(spreadsheet_id: impl Into<String>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            range: DEFAULT_MEMBERS_RANGE.to_string(),
            key_path: key_path.into(),
            scope: SPREADSHEETS_SCOPE.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: 30,
        }
    }

    /// Load configuration from environment variables
    ///
    /// `SHEETS_SPREADSHEET_ID` is required; everything else has a default.
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, BoxError> {
        let spreadsheet_id = var("SHEETS_SPREADSHEET_ID")
            .filter(|s| !s.is_empty())
            .ok_or("SHEETS_SPREADSHEET_ID must be set")?;
        let key_path =
            var("GOOGLE_SERVICE_ACCOUNT_KEY").unwrap_or_else(|| "credentials.json".into());

        let mut config = Self::new(spreadsheet_id, key_path);
        if let Some(range) = var("SHEETS_RANGE") {
            config = config.with_range(range);
        }
        if let Some(url) = var("SHEETS_API_BASE_URL") {
            config = config.with_api_base_url(url);
        }
        if let Some(timeout) = var("SHEETS_TIMEOUT_SECS").and_then(|t| t.parse().ok()) {
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }

    /// Set the A1 range
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    /// Set the API base URL (tests point this at a local mock)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = SheetsConfig::new("sheet-id", "/run/secrets/sa.json");
        assert_eq!(config.range, "Members!A2:F");
        assert_eq!(config.scope, SPREADSHEETS_SCOPE);
        assert_eq!(config.api_base_url, "https://sheets.googleapis.com/v4");
        assert_eq!(config.key_path, PathBuf::from("/run/secrets/sa.json"));
    }

    #[test]
    fn test_builders() {
        let config = SheetsConfig::new("id", "key.json")
            .with_range("Staff!A2:C")
            .with_api_base_url("http://127.0.0.1:9000/v4")
            .with_timeout(5);
        assert_eq!(config.range, "Staff!A2:C");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/v4");
        assert_eq!(config.timeout, 5);
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = SheetsConfig::from_lookup(lookup(&[("SHEETS_SPREADSHEET_ID", "1AbC")])).unwrap();
        assert_eq!(config.spreadsheet_id, "1AbC");
        assert_eq!(config.key_path, PathBuf::from("credentials.json"));
        assert_eq!(config.range, DEFAULT_MEMBERS_RANGE);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars = [
            ("SHEETS_SPREADSHEET_ID", "1AbC"),
            ("GOOGLE_SERVICE_ACCOUNT_KEY", "/run/secrets/sa.json"),
            ("SHEETS_RANGE", "Members!A2:F500"),
            ("SHEETS_API_BASE_URL", "http://127.0.0.1:9000/v4"),
            ("SHEETS_TIMEOUT_SECS", "5"),
        ];
        let config = SheetsConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.key_path, PathBuf::from("/run/secrets/sa.json"));
        assert_eq!(config.range, "Members!A2:F500");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/v4");
        assert_eq!(config.timeout, 5);
    }

    #[test]
    fn test_from_lookup_ignores_bad_timeout() {
        let vars = [("SHEETS_SPREADSHEET_ID", "1AbC"), ("SHEETS_TIMEOUT_SECS", "soon")];
        let config = SheetsConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_missing_spreadsheet_id_is_an_error() {
        let err = SheetsConfig::from_lookup(lookup(&[("SHEETS_SPREADSHEET_ID", "")])).unwrap_err();
        assert!(err.to_string().contains("SHEETS_SPREADSHEET_ID"));

        assert!(SheetsConfig::from_lookup(lookup(&[])).is_err());
    }
}
