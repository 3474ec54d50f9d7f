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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Credential for the external extraction service.
    pub agent_api_key: String,
    /// Base URL of the external extraction service API.
    pub agent_base_url: String,
    /// Model identifier sent with each extraction request.
    pub agent_model: String,
    /// Hard wall-clock deadline for one agent analysis.
    pub agent_timeout_secs: u64,
    /// Maximum age of a cached profile before it is treated as absent.
    pub cache_ttl_secs: u64,
    pub scrape_timeout_secs: u64,
    pub scrape_user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("agent_api_key", &"[redacted]")
            .field("agent_base_url", &self.agent_base_url)
            .field("agent_model", &self.agent_model)
            .field("agent_timeout_secs", &self.agent_timeout_secs)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("scrape_timeout_secs", &self.scrape_timeout_secs)
            .field("scrape_user_agent", &self.scrape_user_agent)
            .finish()
    }
}
