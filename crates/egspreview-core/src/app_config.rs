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
    /// Command endpoint of the anti-bot bypass relay.
    pub relay_url: String,
    /// Session name carried on every relay command.
    pub relay_session: String,
    pub graphql_url: String,
    /// Product detail API base; the product id is appended as a path segment.
    pub product_api_url: String,
    pub product_country: String,
    pub user_agent: String,
    /// Outbound request deadline. `None` means requests may wait indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            // Relay URLs commonly embed credentials in the userinfo part.
            .field("relay_url", &"[redacted]")
            .field("relay_session", &self.relay_session)
            .field("graphql_url", &self.graphql_url)
            .field("product_api_url", &self.product_api_url)
            .field("product_country", &self.product_country)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
