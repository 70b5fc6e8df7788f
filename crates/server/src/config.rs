//! Server configuration from environment variables.
//!
//! Loading falls back to development defaults for the bind address and the
//! fetch timeout. The summarizer backend is optional: it counts as
//! configured once an endpoint or an API key is present in the environment,
//! and requests asking for a summary without one are rejected up front.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

use missive_core::{FetchConfig, SummarizerConfig};
use url::Url;

/// Environment variable names. Public so tests and deploy tooling can refer
/// to them.
pub const ENV_BIND_ADDR: &str = "MISSIVE_BIND_ADDR";
pub const ENV_FETCH_TIMEOUT: &str = "MISSIVE_FETCH_TIMEOUT";
pub const ENV_SUMMARIZER_URL: &str = "MISSIVE_SUMMARIZER_URL";
pub const ENV_SUMMARIZER_MODEL: &str = "MISSIVE_SUMMARIZER_MODEL";
pub const ENV_SUMMARIZER_API_KEY: &str = "MISSIVE_SUMMARIZER_API_KEY";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_FETCH_TIMEOUT: u64 = 15;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    fetch_timeout: u64,
    summarizer_url: Option<String>,
    summarizer_model: Option<String>,
    summarizer_api_key: Option<String>,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let fetch_timeout = match env::var(ENV_FETCH_TIMEOUT) {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue { field: ENV_FETCH_TIMEOUT, reason: e.to_string() })?,
            Err(_) => DEFAULT_FETCH_TIMEOUT,
        };

        let summarizer_url = env::var(ENV_SUMMARIZER_URL).ok();
        if let Some(raw) = &summarizer_url {
            Url::parse(raw)
                .map_err(|e| ConfigError::InvalidValue { field: ENV_SUMMARIZER_URL, reason: e.to_string() })?;
        }

        Ok(Self {
            bind_addr,
            fetch_timeout,
            summarizer_url,
            summarizer_model: env::var(ENV_SUMMARIZER_MODEL).ok(),
            summarizer_api_key: env::var(ENV_SUMMARIZER_API_KEY).ok(),
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    /// Fetch settings handed to the extraction pipeline.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig { timeout: self.fetch_timeout, ..Default::default() }
    }

    /// Summarizer settings, or `None` when no backend is configured.
    ///
    /// An endpoint without a key covers local inference servers; a key
    /// without an endpoint targets the default hosted API.
    pub fn summarizer_config(&self) -> Option<SummarizerConfig> {
        if self.summarizer_url.is_none() && self.summarizer_api_key.is_none() {
            return None;
        }

        let mut config = SummarizerConfig { api_key: self.summarizer_api_key.clone(), ..Default::default() };
        if let Some(endpoint) = self.summarizer_url.clone() {
            config.endpoint = endpoint;
        }
        if let Some(model) = self.summarizer_model.clone() {
            config.model = model;
        }
        Some(config)
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
