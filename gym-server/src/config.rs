//! Member API server configuration

use gym_sheets::SheetsConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Origins allowed by CORS; empty allows any
    pub cors_origins: Vec<String>,
    /// Member spreadsheet
    pub sheets: SheetsConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let sheets = SheetsConfig::from_env()?;
        Self::require_key_file(&sheets, &environment)?;

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            environment,
            sheets,
        })
    }

    /// The service-account key must exist up front in non-development
    /// environments; in development it is only read on first request.
    fn require_key_file(sheets: &SheetsConfig, environment: &str) -> Result<(), BoxError> {
        if environment != "development" && !sheets.key_path.is_file() {
            return Err(format!(
                "service account key {} must exist in {environment} environment",
                sheets.key_path.display()
            )
            .into());
        }
        Ok(())
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
