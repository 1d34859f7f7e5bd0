//! Application state for gym-server

use crate::config::Config;
use gym_sheets::MemberStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Members table (Google Sheets in production)
    pub members: MemberStore,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, BoxError> {
        let members = gym_sheets::connect(&config.sheets)?;
        tracing::info!(range = members.range(), "Member store ready");
        Ok(Self { members })
    }

    #[cfg(test)]
    pub fn with_store(members: MemberStore) -> Self {
        Self { members }
    }
}
