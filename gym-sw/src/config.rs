//! Receiver configuration

pub const DEFAULT_ICON: &str = "/icons/icon-192x192.png";
pub const DEFAULT_BADGE: &str = "/icons/badge-72x72.png";
pub const DEFAULT_ROOT_URL: &str = "/";

/// Fixed notification assets and the page opened on click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    pub icon: String,
    pub badge: String,
    pub root_url: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            icon: DEFAULT_ICON.to_string(),
            badge: DEFAULT_BADGE.to_string(),
            root_url: DEFAULT_ROOT_URL.to_string(),
        }
    }
}

impl WorkerConfig {
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = badge.into();
        self
    }

    pub fn with_root_url(mut self, url: impl Into<String>) -> Self {
        self.root_url = url.into();
        self
    }
}
