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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Root of the upstream API; always ends with `/`.
    pub api_base_url: String,
    /// Pre-issued bearer token forwarded verbatim. No login flow is performed.
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Upper bound on tags fetched at once. `1` means strictly sequential.
    pub max_concurrent_tags: usize,
    pub inter_request_delay_ms: u64,
    pub hashtags_path: Option<PathBuf>,
    pub out_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("api_base_url", &self.api_base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_concurrent_tags", &self.max_concurrent_tags)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("hashtags_path", &self.hashtags_path)
            .field("out_path", &self.out_path)
            .finish()
    }
}
