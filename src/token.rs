//! Bearer token acquisition.

use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::{config::CredentialConfig, errors::AisSentryError};

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange client credentials for a bearer token.
///
/// One blocking exchange per call; there is no refresh handling here.
/// The supervisor fetches a fresh token before each stream connection,
/// so a token only has to outlive a single session.
pub async fn fetch(client: &Client, config: &CredentialConfig) -> Result<String, AisSentryError> {
    let params = [
        ("client_id", config.client_id.as_str()),
        ("scope", config.scope.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("grant_type", "client_credentials"),
    ];

    let response = client
        .post(&config.token_url)
        .form(&params)
        .send()
        .await
        .map_err(|e| AisSentryError::TokenError(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AisSentryError::TokenError(format!(
            "identity provider returned {status}: {body}"
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| AisSentryError::TokenError(format!("malformed token response: {e}")))?;

    info!("Access token obtained successfully");
    Ok(token.access_token)
}
