//! AIS sentry utility

use std::cmp;
use std::collections::HashSet;

use ais_sentry::config::AppConfig;
use ais_sentry::errors::AisSentryError;
use ais_sentry::forward::Forwarder;
use ais_sentry::state::VesselTable;
use ais_sentry::stream::{ingest, FeedClient};
use ais_sentry::{token, watchlist};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), AisSentryError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration, preferring environment variables and config files
    let config = AppConfig::load()?;

    let watchlist = watchlist::load(&config.watchlist.path);

    let feed = FeedClient::new(&config.feed)?;
    let forwarder = Forwarder::new(&config.sink)?;
    let mut table = VesselTable::new();

    // Setup signal handling for graceful shutdown
    let shutdown_signal = signal::ctrl_c();

    tokio::select! {
        result = run_sentry(&config, &feed, &forwarder, &mut table, &watchlist) => {
            info!("AIS sentry completed: {:?}", result);
            result?;
        }
        _ = shutdown_signal => {
            info!("Received shutdown signal");
        }
    }

    Ok(())
}

/// Supervise the streaming session, reconnecting with bounded backoff.
///
/// A clean upstream close and a transport error both restart the session;
/// they differ only in what gets logged. The backoff doubles per failed
/// cycle up to the configured maximum and resets once a session ends
/// cleanly. Only the first token fetch is fatal — the process cannot do
/// anything without credentials — while later refresh failures fall back
/// to the previous token and retry on the next cycle.
async fn run_sentry(
    config: &AppConfig,
    feed: &FeedClient,
    forwarder: &Forwarder,
    table: &mut VesselTable,
    watchlist: &HashSet<String>,
) -> Result<(), AisSentryError> {
    let token_client = reqwest::Client::new();
    let mut token = token::fetch(&token_client, &config.credentials).await?;
    let mut backoff = config.feed.reconnect_initial_backoff;

    loop {
        match run_session(feed, &token, table, watchlist, forwarder).await {
            Ok(()) => {
                info!("Upstream closed the feed stream, reconnecting in {:?}", backoff);
                backoff = config.feed.reconnect_initial_backoff;
            }
            Err(e) => {
                error!("Feed session failed: {}, reconnecting in {:?}", e, backoff);
                backoff = cmp::min(backoff * 2, config.feed.reconnect_max_backoff);
            }
        }

        tokio::time::sleep(backoff).await;

        match token::fetch(&token_client, &config.credentials).await {
            Ok(fresh) => token = fresh,
            Err(e) => warn!("Token refresh failed, reusing previous token: {}", e),
        }
    }
}

async fn run_session(
    feed: &FeedClient,
    token: &str,
    table: &mut VesselTable,
    watchlist: &HashSet<String>,
    forwarder: &Forwarder,
) -> Result<(), AisSentryError> {
    let source = feed.open(token).await?;
    tokio::pin!(source);
    ingest(source, table, watchlist, forwarder).await
}
