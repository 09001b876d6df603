//! Composition root.
//!
//! Wires the concrete gateway, store and repository into a
//! [`SearchController`] and loads the stored recency list.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use reposearch_core::config::SearchConfig;
use reposearch_core::recent::RecentSearchRepository;
use reposearch_core::search::SearchGateway;
use reposearch_core::storage::KeyValueStore;
use reposearch_infrastructure::{
    AppPaths, ConfigService, GithubSearchGateway, InMemoryKeyValueStore, JsonFileKeyValueStore,
    KvRecentSearchRepository,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::controller::SearchController;
use crate::session::UiEffect;

pub struct AppBootstrap {
    pub config: SearchConfig,
    pub controller: Arc<SearchController>,
    /// Host side of the effect channel.
    pub effects: UnboundedReceiver<UiEffect>,
}

/// Builds a ready-to-use controller from the loaded configuration.
pub async fn bootstrap(config_service: &ConfigService) -> Result<AppBootstrap> {
    let config = config_service.get_config();

    let gateway: Arc<dyn SearchGateway> = Arc::new(GithubSearchGateway::from_config(&config));
    let store = open_store(&config)?;
    let recent_repository: Arc<dyn RecentSearchRepository> =
        Arc::new(KvRecentSearchRepository::new(store));

    let (effect_tx, effect_rx) = mpsc::unbounded_channel();
    let controller = Arc::new(SearchController::new(gateway, recent_repository, effect_tx));
    controller.load_recents().await;

    tracing::info!(api_base_url = %config.api_base_url, "[Bootstrap] Search controller ready");

    Ok(AppBootstrap {
        config,
        controller,
        effects: effect_rx,
    })
}

/// Opens the file store, or an in-memory one when no data dir is known.
fn open_store(config: &SearchConfig) -> Result<Arc<dyn KeyValueStore>> {
    let dir: Option<PathBuf> = match &config.storage_dir {
        Some(dir) => Some(dir.clone()),
        None => match AppPaths::store_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                tracing::warn!(error = %e, "[Bootstrap] No data directory, recent searches will not survive restart");
                None
            }
        },
    };

    match dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create store directory {}", dir.display()))?;
            tracing::debug!(path = %dir.display(), "[Bootstrap] Using file store");
            Ok(Arc::new(JsonFileKeyValueStore::new(dir)))
        }
        None => Ok(Arc::new(InMemoryKeyValueStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DisplayMode;
    use reposearch_core::recent::SearchRecord;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir) -> ConfigService {
        let store_dir = dir.path().join("store");
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            format!(
                "api_base_url = \"http://127.0.0.1:1\"\nstorage_dir = {:?}\n",
                store_dir.display().to_string()
            ),
        )
        .unwrap();
        ConfigService::with_path(config_path)
    }

    #[tokio::test]
    async fn test_bootstrap_creates_store_and_loads_recents() {
        let dir = TempDir::new().unwrap();
        let service = write_config(&dir);

        let store_dir = dir.path().join("store");
        let seeded = KvRecentSearchRepository::new(Arc::new(JsonFileKeyValueStore::new(&store_dir)));
        assert!(
            seeded
                .save_all(&[SearchRecord::new("tokio", chrono::Utc::now())])
                .await
        );

        let app = bootstrap(&service).await.unwrap();
        assert_eq!(app.config.api_base_url, "http://127.0.0.1:1");
        assert!(store_dir.is_dir());

        let view = app.controller.view().await;
        assert_eq!(view.mode, DisplayMode::Browsing);
        assert_eq!(view.recents.len(), 1);
        assert_eq!(view.recents[0].keyword, "tokio");
    }
}
