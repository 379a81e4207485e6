//! Streaming connection to the AIS feed and the per-record ingest loop.

use std::collections::HashSet;

use chrono::Utc;
use futures::{StreamExt, TryStreamExt};
use reqwest::Client;
use serde::Serialize;
use tokio::io::AsyncRead;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{error, info, warn};

use crate::{
    classify::classify,
    config::FeedConfig,
    errors::AisSentryError,
    forward::{Forwarder, FORWARD_CATEGORY},
    models::VesselReport,
    state::VesselTable,
};

/// Upper bound on one feed line; full-model records stay well below this.
const MAX_LINE_LENGTH: usize = 16 * 1024;

/// Request body selecting full-model, non-downsampled delivery.
///
/// Country filtering is done client-side by the classification rule, so
/// the request carries no country filter.
#[derive(Serialize)]
struct StreamArgs {
    #[serde(rename = "modelType")]
    model_type: &'static str,
    #[serde(rename = "Downsample")]
    downsample: bool,
}

/// HTTP client for the combined AIS feed
pub struct FeedClient {
    client: Client,
    url: String,
}

impl FeedClient {
    pub fn new(config: &FeedConfig) -> Result<Self, AisSentryError> {
        config.validate()?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Open the streaming connection and return its body as an `AsyncRead`.
    ///
    /// The response is a continuous sequence of newline-delimited JSON
    /// records; pass the reader to [`ingest`] to consume it.
    pub async fn open(&self, token: &str) -> Result<impl AsyncRead, AisSentryError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(token)
            .json(&StreamArgs {
                model_type: "Full",
                downsample: false,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AisSentryError::FeedRequest {
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }

        info!("Connected to AIS feed, streaming");

        let stream = response
            .bytes_stream()
            .map(|result| result.map_err(std::io::Error::other))
            .into_async_read();

        Ok(tokio_util::compat::FuturesAsyncReadCompatExt::compat(
            stream,
        ))
    }
}

/// Consume one feed stream to completion.
///
/// Records are processed strictly in arrival order, one at a time: each
/// line is parsed, applied to the state table, classified, and forwarded
/// on a match. A malformed line or a failed forward is logged and skipped;
/// neither stops the stream. Returns `Ok(())` when the upstream closes the
/// stream cleanly and an error on a transport or framing failure — the
/// caller restarts either way.
pub async fn ingest(
    source: impl AsyncRead + Unpin,
    table: &mut VesselTable,
    watchlist: &HashSet<String>,
    forwarder: &Forwarder,
) -> Result<(), AisSentryError> {
    let codec = LinesCodec::new_with_max_length(MAX_LINE_LENGTH);
    let mut lines = FramedRead::new(source, codec);

    while let Some(line) = lines.next().await {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let report: VesselReport = match serde_json::from_str(&line) {
            Ok(report) => report,
            Err(e) => {
                warn!("Skipping malformed record: {}", e);
                continue;
            }
        };

        let country_code = report.country_code.clone();
        let state = table.apply(&report, Utc::now());

        if let Some(reason) = classify(&state.mmsi, country_code.as_deref(), watchlist) {
            info!(mmsi = %state.mmsi, reason = reason.describe(), "Forwarding vessel update");
            if let Err(e) = forwarder.send(state, FORWARD_CATEGORY).await {
                error!(mmsi = %state.mmsi, "Failed to forward vessel update: {}", e);
            }
        }
    }

    Ok(())
}
