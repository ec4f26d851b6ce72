//! Worker pool for bounded-concurrency batch processing
//!
//! This module drives a batch of usernames through the per-username check
//! pipeline while keeping at most a fixed number of pipelines in flight.
//! Every username gets exactly one recorded result; one username's failure
//! never blocks or aborts its siblings.

use crate::status::UsernameStatus;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Runs the per-username task for every username under a concurrency ceiling
///
/// All tasks are spawned eagerly; a shared counting semaphore admits at most
/// `concurrency` of them into the pipeline at once. The permit is held by an
/// RAII guard, so it is released on every exit path, including a panicking
/// task, and effective concurrency never shrinks over the life of the batch.
///
/// A task that panics is recorded as `UsernameStatus::Error` for its
/// username; sibling tasks are unaffected.
///
/// # Arguments
///
/// * `usernames` - Normalized, deduplicated usernames to process
/// * `concurrency` - Maximum simultaneous in-flight pipelines
/// * `task` - The per-username pipeline (fetch + classify)
///
/// # Returns
///
/// A map with exactly one entry per input username. Completion order is
/// arbitrary; the map is unordered but complete.
pub async fn run_batch<F, Fut>(
    usernames: Vec<String>,
    concurrency: usize,
    task: F,
) -> HashMap<String, UsernameStatus>
where
    F: Fn(String) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = UsernameStatus> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let mut handles = Vec::with_capacity(usernames.len());
    for username in usernames {
        let semaphore = Arc::clone(&semaphore);
        let task = task.clone();
        let name = username.clone();

        let handle = tokio::spawn(async move {
            // The semaphore is never closed, so acquisition only fails if the
            // batch is torn down; record an error result in that case.
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return UsernameStatus::Error,
            };
            task(name).await
        });

        handles.push((username, handle));
    }

    let mut results = HashMap::with_capacity(handles.len());
    for (username, handle) in handles {
        let status = match handle.await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(username = %username, error = %e, "check task failed");
                UsernameStatus::Error
            }
        };
        results.insert(username, status);
    }

    results
}
