use std::net::SocketAddr;
use std::path::PathBuf;

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

/// Nearest-facility result size when neither the caller nor the env sets one.
pub const DEFAULT_LOCATOR_LIMIT: usize = 3;

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub facilities_path: PathBuf,
    /// Generative-text service credential. `None` puts the advisor in standby mode.
    pub advisor_api_key: Option<String>,
    pub advisor_model: String,
    pub advisor_base_url: String,
    pub advisor_timeout_secs: u64,
    pub advisor_temperature: f32,
    pub locator_default_limit: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("facilities_path", &self.facilities_path)
            .field(
                "advisor_api_key",
                &self.advisor_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("advisor_model", &self.advisor_model)
            .field("advisor_base_url", &self.advisor_base_url)
            .field("advisor_timeout_secs", &self.advisor_timeout_secs)
            .field("advisor_temperature", &self.advisor_temperature)
            .field("locator_default_limit", &self.locator_default_limit)
            .finish()
    }
}
