use crate::config::types::{CheckerConfig, Config, MarketplaceConfig, ServerConfig, UserAgentConfig};
use crate::ConfigError;
use std::net::IpAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_checker_config(&config.checker)?;
    validate_marketplace_config(&config.marketplace)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates checker configuration
fn validate_checker_config(config: &CheckerConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.max_batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "max_batch_size must be >= 1, got {}",
            config.max_batch_size
        )));
    }

    Ok(())
}

/// Validates the marketplace endpoint configuration
fn validate_marketplace_config(config: &MarketplaceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|_| ConfigError::InvalidUrl(config.base_url.clone()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            config.base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must have a host, got '{}'",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates the user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.header.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent header cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.bind_addr.parse::<IpAddr>().is_err() {
        return Err(ConfigError::Validation(format!(
            "bind-addr must be a valid IP address, got '{}'",
            config.bind_addr
        )));
    }

    if config.port == 0 {
        return Err(ConfigError::Validation(
            "server port must be nonzero".to_string(),
        ));
    }

    Ok(())
}
