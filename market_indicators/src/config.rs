//! Runtime configuration.
//!
//! Configuration is a small TOML document with three optional sections:
//!
//! ```toml
//! [provider]
//! base_url = "https://query1.finance.yahoo.com"
//! timeout_secs = 30
//!
//! [fetch]
//! timeout_secs = 45
//!
//! [indicators]
//! rsi_window = 14
//! vwap_window = 14
//! ```
//!
//! Every field has a default, so an empty document is a valid configuration.
//! [`Config::from_env`] reads the file named by `MARKET_INDICATORS_CONFIG` and
//! falls back to the defaults when the variable is unset.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use shared_utils::env::get_optional_env_var;
use thiserror::Error;
use tracing::debug;

use crate::indicators::IndicatorParams;

/// Environment variable holding the path of the TOML config file.
pub const CONFIG_ENV_VAR: &str = "MARKET_INDICATORS_CONFIG";

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; market_indicators)";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub provider: ProviderConfig,
    pub fetch: FetchConfig,
    pub indicators: IndicatorParams,
}

/// HTTP settings for the market data provider.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// Scheme and host of the chart API, without a trailing path.
    pub base_url: String,
    /// Per-request HTTP timeout. `None` disables it.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: Some(DEFAULT_PROVIDER_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Settings for the fetch step as a whole.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Deadline for the provider call, on top of the HTTP timeout.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match get_optional_env_var(CONFIG_ENV_VAR) {
            Some(path) => load_config_path(path),
            None => {
                debug!("{CONFIG_ENV_VAR} not set, using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.provider.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "provider.base_url must be an http(s) URL, got {url:?}"
            )));
        }
        if self.fetch.timeout_secs == Some(0) || self.provider.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid("timeouts must be at least 1 second".into()));
        }
        self.indicators
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Parses and validates a configuration document.
pub fn load_config_str(s: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Reads, parses and validates a configuration file.
pub fn load_config_path(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loading config");
    load_config_str(&s)
}
