//! HTTP fetcher for marketplace lookup pages
//!
//! This module handles all outbound HTTP requests for the checker, including:
//! - Building the shared HTTP client with browser-like headers
//! - Constructing the lookup URL for each layout variant
//! - Issuing one GET per username (no retries)
//! - Classifying transport and HTTP failures

use crate::checker::classifier::LayoutVariant;
use crate::config::{MarketplaceConfig, UserAgentConfig};
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Transport-level failure classification for one fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// The request exceeded its deadline
    Timeout,

    /// Upstream answered with an anti-automation response (HTTP 403/429)
    Blocked,

    /// DNS, connection, or TLS-level failure
    TransportError,
}

/// Result of one fetch attempt
#[derive(Debug)]
pub enum FetchOutcome {
    /// A response body to hand to the classifier. Carries the HTTP status so
    /// callers can log it; any non-blocked status is classified, including
    /// 404 pages, which may still carry a parseable results structure.
    Body {
        /// The raw page markup
        html: String,
        /// HTTP status code of the response
        status: u16,
    },

    /// The fetch failed before producing a classifiable body
    Failure(FetchFailure),
}

/// Builds the shared HTTP client used for all marketplace requests
///
/// The client carries a browser-like user agent, follows redirects, applies
/// the fixed per-request timeout, and negotiates HTTP/2 via ALPN. One client
/// is built per process and shared across all workers; it holds the
/// connection pool and default headers, never per-username state.
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `timeout` - Per-request timeout applied to every fetch
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header.clone())
        .timeout(timeout)
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the lookup URL for a username under the given layout
///
/// The username is inserted through the URL encoder, so arbitrary
/// caller-supplied strings cannot alter the request path or query structure.
pub fn lookup_url(
    marketplace: &MarketplaceConfig,
    username: &str,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&marketplace.base_url)?;

    match marketplace.layout {
        LayoutVariant::Table => {
            url.set_path("/");
            url.query_pairs_mut().append_pair("query", username);
        }
        LayoutVariant::SinglePage => {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().extend(["username", username]);
            }
        }
    }

    Ok(url)
}

/// Fetches the marketplace lookup page for one username
///
/// Issues exactly one GET request. Failures are values, never errors:
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | Transport timeout | `Failure(Timeout)` |
/// | DNS / connection / TLS failure | `Failure(TransportError)` |
/// | HTTP 403 or 429 | `Failure(Blocked)` |
/// | Any other HTTP status | `Body` (classified regardless of status) |
///
/// Safe to call concurrently from many workers sharing one client.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `marketplace` - Marketplace endpoint configuration
/// * `username` - The normalized username to look up
pub async fn fetch_status_page(
    client: &Client,
    marketplace: &MarketplaceConfig,
    username: &str,
) -> FetchOutcome {
    let url = match lookup_url(marketplace, username) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(username = %username, error = %e, "failed to build lookup URL");
            return FetchOutcome::Failure(FetchFailure::TransportError);
        }
    };

    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();

            if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
                return FetchOutcome::Failure(FetchFailure::Blocked);
            }

            match response.text().await {
                Ok(html) => FetchOutcome::Body {
                    html,
                    status: status.as_u16(),
                },
                Err(e) => FetchOutcome::Failure(classify_transport_error(&e)),
            }
        }
        Err(e) => FetchOutcome::Failure(classify_transport_error(&e)),
    }
}

fn classify_transport_error(error: &reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout
    } else {
        FetchFailure::TransportError
    }
}
