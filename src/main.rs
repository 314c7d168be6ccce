//! Whittle — unattended timeline pruner.
//!
//! Startup: load config from the file named by `WHITTLE_CONFIG` → build
//! the API client → run the trim loop (first cycle immediately, then one
//! per interval). Ctrl-c terminates cleanly; a cycle failure only stops
//! the process when `halt_on_cycle_error` is set.

use whittle::config::Config;
use whittle::runner;
use whittle::twitter::TwitterClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "whittle=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        retention = config.max_tweets_keep,
        ignored = config.ignore_list.len(),
        interval_secs = config.interval_secs,
        "configuration loaded"
    );

    let client = TwitterClient::new(&config);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupt received, shutting down");
            Ok(())
        }
        result = runner::run_trim_loop(&client, &config) => {
            result.map_err(anyhow::Error::from)
        }
    }
}
