// src/checker/dispatch.rs
// =============================================================================
// Runs many probes at once through a bounded worker pool.
//
// How it works:
// 1. Validate the config and build one shared HTTP client (this is the only
//    step that can fail for the whole batch)
// 2. Drop blank URLs
// 3. Feed the URLs through for_each_concurrent(pool_size, ...), so at most
//    pool_size probes are ever in flight; the rest wait for a free slot
// 4. Each probe runs as its own tokio task and pushes its result into the
//    shared Aggregator
// 5. Return once every task has finished
//
// One probe failing (timeout, refused connection, even a panic) never
// affects the others. There is no fail-fast.
//
// Rust concepts:
// - Arc: shared ownership of the Aggregator across tasks
// - tokio::spawn: run a probe on any runtime worker thread
// - JoinHandle: wait for a task and notice if it panicked
// =============================================================================

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use super::aggregate::Aggregator;
use super::probe::{build_client, probe, ProbeOutcome, ProbeResult};
use crate::config::ProbeConfig;

/// Errors that stop a batch before any probe is sent.
///
/// Per-URL failures are never reported here; they live in
/// `ProbeResult::error_message`.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The pool needs at least one slot
    #[error("pool size must be at least 1 (got {0})")]
    InvalidPoolSize(usize),

    /// Timeouts must be positive and finite
    #[error("timeout must be a positive number of seconds (got {0})")]
    InvalidTimeout(f64),

    /// The shared HTTP client could not be created
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

// Probes every URL and returns one result per non-blank URL
//
// Parameters:
//   urls: anything iterable of strings (Vec<String>, &[&str], ...)
//   config: pool size and per-probe timeout
//
// Returns: results in completion order, which is effectively random.
// Sort them yourself if you need a stable order.
pub async fn probe_all<I, S>(urls: I, config: &ProbeConfig) -> Result<Vec<ProbeResult>, DispatchError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    probe_all_with(urls, config, |client, url| async move { probe(&client, &url).await }).await
}

// Same as probe_all, with the per-URL check passed in
//
// `check` runs inside its own tokio task, once per URL. Whatever it returns
// goes into the results; if it panics, the URL gets a TransportError instead.
async fn probe_all_with<I, S, F, Fut>(
    urls: I,
    config: &ProbeConfig,
    check: F,
) -> Result<Vec<ProbeResult>, DispatchError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(Client, String) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = ProbeResult> + Send + 'static,
{
    config.validate()?;
    let client = build_client(config.timeout)?;

    let urls = normalize_urls(urls);
    let total = urls.len();
    info!(
        "Probing {} URL(s) with {} worker(s), {:.3}s timeout",
        total,
        config.pool_size,
        config.timeout.as_secs_f64()
    );

    let aggregator = Arc::new(Aggregator::with_capacity(total));
    let batch_start = Instant::now();

    // for_each_concurrent is the pool: it never polls more than pool_size
    // of these futures at once, and only resolves when all are done
    stream::iter(urls)
        .for_each_concurrent(config.pool_size, |url| {
            let client = client.clone();
            let aggregator = Arc::clone(&aggregator);
            let check = check.clone();

            async move {
                let task_start = Instant::now();
                let worker_aggregator = Arc::clone(&aggregator);
                let worker_url = url.clone();

                let handle = tokio::spawn(async move {
                    let result = check(client, worker_url).await;
                    log_result(&result);
                    worker_aggregator.insert(result);
                });

                // A panicking probe never reached insert(), so record it here
                if let Err(e) = handle.await {
                    warn!("Probe task for {} did not finish: {}", url, e);
                    let outcome = ProbeOutcome::TransportError {
                        message: format!("probe task failed: {e}"),
                    };
                    aggregator.insert(ProbeResult::new(url, outcome, task_start.elapsed()));
                }
            }
        })
        .await;

    let results = match Arc::try_unwrap(aggregator) {
        Ok(aggregator) => aggregator.into_results(),
        Err(shared) => shared.take_all(),
    };

    info!(
        "Finished {} probe(s) in {:.3}s",
        results.len(),
        batch_start.elapsed().as_secs_f64()
    );

    Ok(results)
}

// Trims every URL and drops the ones that end up empty
pub(crate) fn normalize_urls<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    urls.into_iter()
        .map(|url| url.as_ref().trim().to_string())
        .filter(|url| !url.is_empty())
        .collect()
}

fn log_result(result: &ProbeResult) {
    match result.status_code() {
        Some(status) if result.error_message().is_empty() => {
            debug!("{} -> {} in {:.3}s", result.url(), status, result.response_time_secs())
        }
        _ => debug!(
            "{} -> failed in {:.3}s: {}",
            result.url(),
            result.response_time_secs(),
            result.error_message()
        ),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why for_each_concurrent and not buffer_unordered?
//    - Both cap how many futures run at once
//    - buffer_unordered hands results back to the caller one by one
//    - Here the workers push into the Aggregator themselves, so there is
//      nothing to hand back and for_each_concurrent fits
//
// 2. Why spawn inside the pool?
//    - Without tokio::spawn all probes would be polled by one task
//    - Spawning lets the runtime spread them across worker threads
//    - Awaiting the JoinHandle keeps the slot busy until the probe is done,
//      so the pool size is still the real limit
//
// 3. What is Arc::try_unwrap?
//    - It takes the value out of an Arc if we hold the last reference
//    - Every task has finished by then, so it normally succeeds
// -----------------------------------------------------------------------------
