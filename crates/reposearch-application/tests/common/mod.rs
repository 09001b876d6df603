#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reposearch_application::{SearchController, SessionEvent, UiEffect};
use reposearch_core::recent::RecentSearchRepository;
use reposearch_core::search::{RepositoryOwner, ResultItem, SearchGateway, SearchResponse};
use reposearch_core::storage::KeyValueStore;
use reposearch_infrastructure::{InMemoryKeyValueStore, KvRecentSearchRepository};
use tokio::sync::Notify;
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn item(id: u64) -> ResultItem {
    ResultItem {
        id,
        name: format!("repo-{id}"),
        description: None,
        owner: RepositoryOwner {
            login: "owner".to_string(),
            avatar_url: format!("https://avatars.example/{id}"),
        },
        html_url: format!("https://github.com/owner/repo-{id}"),
    }
}

pub fn response(ids: &[u64], total_count: u64) -> SearchResponse {
    SearchResponse {
        items: ids.iter().copied().map(item).collect(),
        total_count,
    }
}

/// Gateway answering from a script keyed by `(keyword, page)`.
///
/// Unscripted requests return `None`. When holding is enabled, every call
/// for a page after the first waits on `release` before answering.
#[derive(Default)]
pub struct ScriptedGateway {
    responses: Mutex<HashMap<(String, u32), SearchResponse>>,
    calls: Mutex<Vec<(String, u32)>>,
    hold_next_pages: Mutex<bool>,
    pub release: Notify,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, keyword: &str, page: u32, response: SearchResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert((keyword.to_string(), page), response);
    }

    pub fn hold_next_pages(&self) {
        *self.hold_next_pages.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchGateway for ScriptedGateway {
    async fn search(&self, keyword: &str, page: u32) -> Option<SearchResponse> {
        self.calls.lock().unwrap().push((keyword.to_string(), page));
        let hold = page > 1 && *self.hold_next_pages.lock().unwrap();
        if hold {
            self.release.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .get(&(keyword.to_string(), page))
            .cloned()
    }
}

pub struct Harness {
    pub controller: SearchController,
    pub gateway: Arc<ScriptedGateway>,
    pub store: Arc<dyn KeyValueStore>,
    pub effects: UnboundedReceiver<UiEffect>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryKeyValueStore::new()))
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        let gateway = Arc::new(ScriptedGateway::new());
        let repository: Arc<dyn RecentSearchRepository> =
            Arc::new(KvRecentSearchRepository::new(store.clone()));
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller: SearchController::new(gateway.clone(), repository, tx),
            gateway,
            store,
            effects: rx,
        }
    }

    pub fn repository(&self) -> KvRecentSearchRepository {
        KvRecentSearchRepository::new(self.store.clone())
    }

    /// Types `keyword` and submits it at `now`.
    pub async fn search(&self, keyword: &str, now: DateTime<Utc>) {
        self.controller
            .dispatch_at(SessionEvent::TextChanged(keyword.to_string()), now)
            .await;
        self.controller.dispatch_at(SessionEvent::Submit, now).await;
    }

    pub fn drain_effects(&mut self) -> Vec<UiEffect> {
        let mut effects = Vec::new();
        while let Ok(effect) = self.effects.try_recv() {
            effects.push(effect);
        }
        effects
    }

    pub async fn result_ids(&self) -> Vec<u64> {
        self.controller
            .snapshot()
            .await
            .results()
            .items
            .iter()
            .map(|i| i.id)
            .collect()
    }
}
