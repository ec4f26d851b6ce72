use crate::checker::LayoutVariant;
use serde::Deserialize;

/// Main configuration structure for Fragment-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub checker: CheckerConfig,
    pub marketplace: MarketplaceConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Checker behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CheckerConfig {
    /// Maximum number of concurrent status fetches per batch
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of usernames accepted in one batch
    #[serde(rename = "max-batch-size", default = "default_max_batch_size")]
    pub max_batch_size: u32,
}

/// Marketplace endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceConfig {
    /// Base URL of the marketplace (e.g., "https://fragment.com")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Page layout served by the marketplace, which selects both the lookup
    /// URL shape and the classification strategy
    #[serde(default = "default_layout")]
    pub layout: LayoutVariant,
}

/// Outbound request identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Full User-Agent header value sent with every marketplace request
    #[serde(default = "default_user_agent")]
    pub header: String,
}

/// HTTP API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the API server to
    #[serde(rename = "bind-addr", default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            header: default_user_agent(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

fn default_concurrency() -> u32 {
    10
}

fn default_request_timeout_secs() -> u64 {
    20
}

fn default_max_batch_size() -> u32 {
    500
}

fn default_layout() -> LayoutVariant {
    LayoutVariant::Table
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36"
        .to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}
