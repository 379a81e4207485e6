//! Errors for the AIS sentry
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AisSentryError {
    #[error("HTTP request failed")]
    HttpError(#[from] reqwest::Error),

    #[error("Feed request rejected with status {status}: {body}")]
    FeedRequest {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Token exchange failed: {0}")]
    TokenError(String),

    #[error("Stream framing error")]
    FramingError(#[from] tokio_util::codec::LinesCodecError),

    #[error("Serialization error")]
    SerdeError(#[from] serde_json::Error),

    #[error("Configuration error")]
    ConfigError(#[from] config::ConfigError),

    #[error("IO error")]
    IoError(#[from] std::io::Error),

    #[error("Configuration invalid: {message}")]
    ConfigurationError { message: String },
}
