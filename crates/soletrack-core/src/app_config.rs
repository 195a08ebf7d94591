use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the scraper service, loaded from `SOLETRACK_*`
/// environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Upper bound on a single product-page fetch, in seconds.
    pub fetch_timeout_secs: u64,
    /// User-agent sent to retailer storefronts. Defaults to a desktop
    /// browser string; retailer pages serve degraded markup to obvious bots.
    pub fetch_user_agent: String,
}
