//! Alert forwarding to the downstream sink.

use reqwest::Client;

use crate::{config::SinkConfig, errors::AisSentryError, models::VesselState};

/// Category tag attached to every forwarded vessel update
pub const FORWARD_CATEGORY: &str = "ships";

/// Client for the downstream alerting endpoint
///
/// Delivery is best effort: one POST per matched record, no retries,
/// and no acknowledgment beyond the HTTP status. Failures are for the
/// caller to log and move past.
pub struct Forwarder {
    client: Client,
    url: String,
}

impl Forwarder {
    pub fn new(config: &SinkConfig) -> Result<Self, AisSentryError> {
        config.validate()?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Serialize a vessel state and POST it to the sink.
    ///
    /// The body is form-encoded with two fields: `json_data` carrying
    /// the JSON text of the state (timestamps as RFC 3339 UTC) and
    /// `type` carrying the category tag.
    pub async fn send(&self, vessel: &VesselState, category: &str) -> Result<(), AisSentryError> {
        let json_data = serde_json::to_string(vessel)?;
        let response = self
            .client
            .post(&self.url)
            .form(&[("json_data", json_data.as_str()), ("type", category)])
            .send()
            .await?;
        response.error_for_status()?;
        Ok(())
    }
}
