//! Username checking pipeline
//!
//! This module contains the core of Fragment-Scout: the fetcher that
//! retrieves marketplace lookup pages, the pure classifier that turns markup
//! into statuses, and the worker pool that bounds how many lookups are in
//! flight at once. `check_usernames` ties the three together for one batch.

mod classifier;
mod fetcher;
mod pool;

pub use classifier::{classify, LayoutVariant};
pub use fetcher::{build_http_client, fetch_status_page, lookup_url, FetchFailure, FetchOutcome};
pub use pool::run_batch;

use crate::config::Config;
use crate::status::UsernameStatus;
use reqwest::Client;
use std::collections::{HashMap, HashSet};

/// Checks the marketplace status of a batch of usernames
///
/// Usernames are trimmed, lowercased, and deduplicated before entering the
/// pipeline; entries that are empty after trimming are dropped. Each unique
/// username is fetched exactly once under the configured concurrency ceiling
/// and classified into a `UsernameStatus`.
///
/// The returned map always covers every surviving username — per-username
/// failures are represented as ordinary status values (`timeout`,
/// `cf_blocked`, `error`), never as missing entries or errors.
///
/// # Arguments
///
/// * `client` - The shared HTTP client (owns the connection pool)
/// * `config` - Checker and marketplace configuration
/// * `usernames` - Raw usernames as submitted by the caller
pub async fn check_usernames(
    client: &Client,
    config: &Config,
    usernames: &[String],
) -> HashMap<String, UsernameStatus> {
    let normalized = normalize_usernames(usernames);
    tracing::info!(
        submitted = usernames.len(),
        unique = normalized.len(),
        concurrency = config.checker.concurrency,
        "starting batch check"
    );

    let client = client.clone();
    let marketplace = config.marketplace.clone();

    run_batch(
        normalized,
        config.checker.concurrency as usize,
        move |username| {
            let client = client.clone();
            let marketplace = marketplace.clone();
            async move {
                let status = match fetch_status_page(&client, &marketplace, &username).await {
                    FetchOutcome::Body { html, status } => {
                        tracing::debug!(username = %username, http_status = status, "classifying page");
                        classify(marketplace.layout, &html, &username)
                    }
                    FetchOutcome::Failure(FetchFailure::Timeout) => UsernameStatus::Timeout,
                    FetchOutcome::Failure(FetchFailure::Blocked) => UsernameStatus::CfBlocked,
                    FetchOutcome::Failure(FetchFailure::TransportError) => UsernameStatus::Error,
                };
                tracing::debug!(username = %username, status = %status, "username checked");
                status
            }
        },
    )
    .await
}

/// Normalizes raw usernames for the pipeline
///
/// Trims whitespace, lowercases, drops entries that end up empty, and
/// deduplicates while preserving first-seen order.
pub fn normalize_usernames(usernames: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();

    for raw in usernames {
        let username = raw.trim().to_lowercase();
        if username.is_empty() {
            tracing::warn!("skipping username that is empty after trimming");
            continue;
        }
        if seen.insert(username.clone()) {
            normalized.push(username);
        }
    }

    normalized
}
