//! Unified path management for reposearch files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/reposearch/         # Config directory
//! └── config.toml               # Application configuration
//!
//! ~/.local/share/reposearch/    # Data directory
//! └── store/                    # Key-value store (one JSON file per key)
//!     └── recent_searches.json
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "reposearch";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
    /// Platform data directory could not be determined.
    DataDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
            PathError::DataDirNotFound => write!(f, "Cannot find data directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for reposearch_core::SearchError {
    fn from(err: PathError) -> Self {
        reposearch_core::SearchError::config(err.to_string())
    }
}

/// Resolves platform directories for reposearch.
pub struct AppPaths;

impl AppPaths {
    /// Returns the configuration directory (e.g. `~/.config/reposearch/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the data directory (e.g. `~/.local/share/reposearch/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::DataDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default key-value store directory.
    pub fn store_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("store"))
    }
}
