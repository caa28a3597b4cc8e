use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_URL: &str = "http://localhost:8888";
const DEFAULT_RECONNECT_DELAY_MS: u64 = 1000;

/// CLI configuration (from apps/cli/config.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    pub reconnect_delay_ms: u64,
}

impl WatchConfig {
    /// `None` when reconnecting is switched off
    pub fn reconnect_delay(&self) -> Option<Duration> {
        match self.reconnect_delay_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl Config {
    /// Load configuration from config.toml
    /// Uses CARGO_MANIFEST_DIR so the path is consistent regardless of where
    /// the binary is run from.
    /// A missing file falls back to the defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var("TODO_CONFIG")
            .unwrap_or_else(|_| format!("{}/config.toml", env!("CARGO_MANIFEST_DIR")));

        Self::build(config::File::with_name(&config_path).required(false))
    }

    /// Parse configuration from a TOML string
    pub fn parse(toml: &str) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from_str(toml, config::FileFormat::Toml))
    }

    fn build<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .set_default("server.url", DEFAULT_URL)?
            .set_default("watch.reconnect_delay_ms", DEFAULT_RECONNECT_DELAY_MS)?
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}
