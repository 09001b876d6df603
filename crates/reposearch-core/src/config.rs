//! Configuration model.
//!
//! Loaded from `config.toml` by the infrastructure `ConfigService`. Every
//! field has a default, so a missing or partial file is always usable.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = concat!("reposearch/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Base URL of the search API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// `User-Agent` header sent with every search request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Page size requested from the API. The API default is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    /// Directory for the key-value store. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            per_page: None,
            storage_dir: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set (e.g. `"info"`, `"reposearch=debug"`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily-rolling log files. Console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
