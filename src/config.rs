//! Application configuration

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_with::serde_as;

use crate::errors::AisSentryError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub credentials: CredentialConfig,
    pub feed: FeedConfig,
    pub sink: SinkConfig,
    pub watchlist: WatchlistConfig,
}

/// Client-credentials grant parameters for the feed's identity provider
#[derive(Debug, Deserialize, Clone)]
pub struct CredentialConfig {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
}

#[serde_as]
#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    pub url: String,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: Duration,
    /// Maximum silence between stream chunks before the connection is
    /// considered dead and the reconnect path takes over.
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_read_timeout")]
    pub read_timeout: Duration,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_initial_backoff")]
    pub reconnect_initial_backoff: Duration,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_max_backoff")]
    pub reconnect_max_backoff: Duration,
}

#[serde_as]
#[derive(Debug, Deserialize, Clone)]
pub struct SinkConfig {
    pub url: String,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_sink_timeout")]
    pub timeout: Duration,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WatchlistConfig {
    pub path: PathBuf,
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_read_timeout() -> Duration {
    Duration::from_secs(90)
}

fn default_initial_backoff() -> Duration {
    Duration::from_secs(1)
}

fn default_max_backoff() -> Duration {
    Duration::from_secs(60)
}

fn default_sink_timeout() -> Duration {
    Duration::from_secs(30)
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("AISSENTRY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl FeedConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), AisSentryError> {
        if self.url.is_empty() {
            return Err(AisSentryError::ConfigurationError {
                message: "Feed URL cannot be empty".to_string(),
            });
        }
        if self.reconnect_initial_backoff.is_zero() {
            return Err(AisSentryError::ConfigurationError {
                message: "Reconnect backoff must be greater than zero".to_string(),
            });
        }
        if self.reconnect_max_backoff < self.reconnect_initial_backoff {
            return Err(AisSentryError::ConfigurationError {
                message: "Maximum reconnect backoff must not be below the initial backoff"
                    .to_string(),
            });
        }
        Ok(())
    }
}

impl SinkConfig {
    pub fn validate(&self) -> Result<(), AisSentryError> {
        if self.url.is_empty() {
            return Err(AisSentryError::ConfigurationError {
                message: "Sink URL cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_config() {
        env::set_var("AISSENTRY__CREDENTIALS__TOKEN_URL", "http://localhost/token");
        env::set_var("AISSENTRY__CREDENTIALS__CLIENT_ID", "client");
        env::set_var("AISSENTRY__CREDENTIALS__CLIENT_SECRET", "secret");
        env::set_var("AISSENTRY__CREDENTIALS__SCOPE", "ais");
        env::set_var("AISSENTRY__FEED__URL", "http://localhost/stream");
        env::set_var("AISSENTRY__FEED__READ_TIMEOUT", "45");
        env::set_var("AISSENTRY__SINK__URL", "http://localhost/receive");
        env::set_var("AISSENTRY__WATCHLIST__PATH", "/tmp/shadowfleet.json");

        let config = AppConfig::load().unwrap();
        assert_eq!(config.credentials.client_id, "client");
        assert_eq!(config.feed.url, "http://localhost/stream");
        assert_eq!(config.feed.read_timeout, Duration::from_secs(45));
        assert_eq!(config.feed.connect_timeout, default_connect_timeout());
        assert_eq!(config.sink.url, "http://localhost/receive");
        assert_eq!(config.sink.timeout, default_sink_timeout());
        assert_eq!(config.watchlist.path, PathBuf::from("/tmp/shadowfleet.json"));
    }

    #[test]
    fn test_feed_config_validate() {
        let config = FeedConfig {
            url: "http://localhost/stream".to_string(),
            connect_timeout: default_connect_timeout(),
            read_timeout: default_read_timeout(),
            reconnect_initial_backoff: default_initial_backoff(),
            reconnect_max_backoff: default_max_backoff(),
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_feed_config_validate_empty_url() {
        let config = FeedConfig {
            url: String::new(),
            connect_timeout: default_connect_timeout(),
            read_timeout: default_read_timeout(),
            reconnect_initial_backoff: default_initial_backoff(),
            reconnect_max_backoff: default_max_backoff(),
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_feed_config_validate_backoff_ordering() {
        let config = FeedConfig {
            url: "http://localhost/stream".to_string(),
            connect_timeout: default_connect_timeout(),
            read_timeout: default_read_timeout(),
            reconnect_initial_backoff: Duration::from_secs(30),
            reconnect_max_backoff: Duration::from_secs(5),
        };

        assert!(config.validate().is_err());
    }
}
