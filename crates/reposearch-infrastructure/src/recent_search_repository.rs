//! Recent search repository backed by a key-value store.
//!
//! The whole list lives under a single key as a JSON array of
//! `{ "keyword": ..., "date": <RFC 3339> }` objects. Every write replaces the
//! full list; there is no patching and no schema versioning.

use async_trait::async_trait;
use reposearch_core::recent::{RecentSearchRepository, RecentSearches, SearchRecord};
use reposearch_core::storage::KeyValueStore;
use std::sync::Arc;

/// Well-known storage key holding the serialized recency list.
pub const RECENT_SEARCHES_KEY: &str = "recent_searches";

/// [`RecentSearchRepository`] over any [`KeyValueStore`].
///
/// Failures are logged and swallowed: reads degrade to an empty list, writes
/// report `false`, clears report nothing.
#[derive(Clone)]
pub struct KvRecentSearchRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvRecentSearchRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RecentSearchRepository for KvRecentSearchRepository {
    async fn load(&self) -> Vec<SearchRecord> {
        let raw = match self.store.get(RECENT_SEARCHES_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load recent searches");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<SearchRecord>>(&raw) {
            Ok(records) => {
                let recents = RecentSearches::from_records(records);
                tracing::debug!(count = recents.len(), "Loaded recent searches");
                recents.records().to_vec()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored recent searches are malformed, treating as empty");
                Vec::new()
            }
        }
    }

    async fn save_all(&self, records: &[SearchRecord]) -> bool {
        let json = match serde_json::to_string(records) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize recent searches");
                return false;
            }
        };

        match self.store.set(RECENT_SEARCHES_KEY, json).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, count = records.len(), "Failed to save recent searches");
                false
            }
        }
    }

    async fn clear(&self) {
        if let Err(e) = self.store.remove(RECENT_SEARCHES_KEY).await {
            tracing::error!(error = %e, "Failed to clear recent searches");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;
    use chrono::{TimeZone, Utc};
    use reposearch_core::error::{Result, SearchError};

    // Store whose every operation fails
    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(SearchError::io("disk unavailable"))
        }

        async fn set(&self, _key: &str, _value: String) -> Result<()> {
            Err(SearchError::io("disk full"))
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Err(SearchError::io("read-only"))
        }
    }

    fn record(keyword: &str, secs: i64) -> SearchRecord {
        SearchRecord::new(keyword, Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap())
    }

    #[tokio::test]
    async fn test_load_empty_store() {
        let repo = KvRecentSearchRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repo = KvRecentSearchRepository::new(store.clone());

        let records = vec![record("tokio", 2), record("serde", 1)];
        assert!(repo.save_all(&records).await);
        assert_eq!(repo.load().await, records);

        // Written as a plain JSON array under the well-known key
        let raw = store.get(RECENT_SEARCHES_KEY).await.unwrap().unwrap();
        assert!(raw.starts_with(r#"[{"keyword":"tokio","date":""#));
    }

    #[tokio::test]
    async fn test_load_accepts_millisecond_iso_dates() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store
            .set(
                RECENT_SEARCHES_KEY,
                r#"[{"keyword":"react","date":"2024-05-01T09:30:00.000Z"}]"#.to_string(),
            )
            .await
            .unwrap();

        let repo = KvRecentSearchRepository::new(store);
        let loaded = repo.load().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].keyword, "react");
    }

    #[tokio::test]
    async fn test_load_malformed_data_is_empty() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store
            .set(RECENT_SEARCHES_KEY, "{\"not\": \"a list\"}".to_string())
            .await
            .unwrap();

        let repo = KvRecentSearchRepository::new(store);
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_sorts_newest_first() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repo = KvRecentSearchRepository::new(store);
        repo.save_all(&[record("old", 1), record("new", 5)]).await;

        let keywords: Vec<String> = repo.load().await.into_iter().map(|r| r.keyword).collect();
        assert_eq!(keywords, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_clear_then_reload_is_empty() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repo = KvRecentSearchRepository::new(store.clone());
        repo.save_all(&[record("a", 1)]).await;

        repo.clear().await;

        let reloaded = KvRecentSearchRepository::new(store);
        assert!(reloaded.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let repo = KvRecentSearchRepository::new(Arc::new(BrokenStore));
        assert!(repo.load().await.is_empty());
        assert!(!repo.save_all(&[record("a", 1)]).await);
        repo.clear().await;
    }
}
