use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://mars.udacity.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("mars-realestate/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the realestate API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Root of the web service; `realestate` is resolved against it
    pub base_url: String,
    /// Total request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
