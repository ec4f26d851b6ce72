//! HTTP API for Fragment-Scout
//!
//! Exposes the batch check endpoint and a health probe:
//! - `POST /check` - check a list of usernames, returns a username→status map
//! - `GET /status` - liveness probe
//!
//! The server owns the shared HTTP client for the process and hands it to the
//! checker per batch.

mod handlers;

pub use handlers::{CheckRequest, ErrorResponse, HealthResponse};

use crate::checker::build_http_client;
use crate::config::Config;
use crate::Result;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    /// Shared HTTP client; holds the marketplace connection pool
    pub client: reqwest::Client,

    /// Process configuration
    pub config: Arc<Config>,
}

/// Builds the API router with all routes attached
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(handlers::health))
        .route("/check", post(handlers::check))
        .with_state(state)
}

/// Runs the API server until the process is stopped
///
/// Builds the process-wide HTTP client, binds the configured address, and
/// serves the router.
pub async fn serve(config: Config) -> Result<()> {
    let timeout = Duration::from_secs(config.checker.request_timeout_secs);
    let client = build_http_client(&config.user_agent, timeout)?;

    let addr = format!("{}:{}", config.server.bind_addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on {}", addr);

    let state = AppState {
        client,
        config: Arc::new(config),
    };

    axum::serve(listener, router(state)).await?;
    Ok(())
}
