//! Configuration service implementation.
//!
//! Loads [`SearchConfig`] from `~/.config/reposearch/config.toml` (or an
//! explicit path). A missing file is created with defaults; an unreadable or
//! invalid file falls back to defaults with a warning.

use crate::paths::AppPaths;
use reposearch_core::config::SearchConfig;
use reposearch_core::error::Result;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; `None` resolves via [`AppPaths`].
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<SearchConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the platform default config file.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading `path` instead of the platform default.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> SearchConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match self.load_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load config, using defaults");
                SearchConfig::default()
            }
        };

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(AppPaths::config_file()?),
        }
    }

    fn load_config(&self) -> Result<SearchConfig> {
        let path = self.config_path()?;

        if !path.exists() {
            let default_config = SearchConfig::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, toml::to_string_pretty(&default_config)?)?;
            tracing::info!(path = %path.display(), "Created default config file");
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(&path)?;
        let config: SearchConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
