//! Fragment-Scout: a batch username status checker for the Fragment marketplace
//!
//! This crate checks the marketplace status of Telegram-style usernames by
//! fetching their Fragment listing pages concurrently and classifying the
//! returned markup into a fixed status taxonomy.

pub mod checker;
pub mod config;
pub mod server;
pub mod status;

use thiserror::Error;

/// Main error type for Fragment-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Fragment-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checker::{
    build_http_client, check_usernames, classify, fetch_status_page, FetchFailure, FetchOutcome,
    LayoutVariant,
};
pub use config::Config;
pub use status::UsernameStatus;
