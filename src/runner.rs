//! Cycle runner — one fetch-then-trim pass per scheduled wake.
//!
//! Runs once immediately, then sleeps the configured interval, forever.
//! There is never more than one cycle in flight; a pass that overruns the
//! interval simply delays the next wake. A cycle-level failure (login or
//! first-page fetch) either halts the loop or is retried at the next wake,
//! per `halt_on_cycle_error`.

use std::collections::HashSet;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::store::PostStore;
use crate::timeline::fetch::fetch_history;
use crate::timeline::trim::{trim_history, TrimReport};
use crate::twitter::TwitterClient;

/// One full fetch-then-trim pass against an authenticated store.
pub async fn run_cycle<S: PostStore>(
    store: &S,
    retention_count: usize,
    exclusions: &HashSet<u64>,
) -> Result<TrimReport> {
    let history = fetch_history(store).await?;
    tracing::info!(total = history.len(), "fetched post history");
    Ok(trim_history(store, &history, retention_count, exclusions).await)
}

/// Periodically trim the timeline until interrupted.
///
/// Returns only when a cycle fails and `halt_on_cycle_error` is set.
pub async fn run_trim_loop(client: &TwitterClient, config: &Config) -> Result<()> {
    let exclusions = config.exclusion_set();
    let interval = Duration::from_secs(config.interval_secs);
    tracing::info!(
        retention = config.max_tweets_keep,
        excluded = exclusions.len(),
        interval_secs = config.interval_secs,
        "trim loop started"
    );

    loop {
        match run_once(client, config, &exclusions).await {
            Ok(report) => tracing::info!(
                attempted = report.attempted,
                deleted = report.deleted,
                skipped = report.skipped,
                failed = report.failed,
                "trim cycle complete"
            ),
            Err(e) if config.halt_on_cycle_error => {
                tracing::error!(error = %e, "trim cycle failed, halting");
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(error = %e, "trim cycle failed, will retry at next wake");
            }
        }
        tokio::time::sleep(interval).await;
    }
}

/// Session scope: authenticate, run one cycle, drop the session.
async fn run_once(
    client: &TwitterClient,
    config: &Config,
    exclusions: &HashSet<u64>,
) -> Result<TrimReport> {
    let session = client.login().await?;
    run_cycle(&session, config.max_tweets_keep, exclusions).await
}
