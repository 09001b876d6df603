pub mod config_service;
pub mod paths;
pub mod recent_search_repository;
pub mod search;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::AppPaths;
pub use crate::recent_search_repository::{KvRecentSearchRepository, RECENT_SEARCHES_KEY};
pub use crate::search::GithubSearchGateway;
pub use crate::storage::{InMemoryKeyValueStore, JsonFileKeyValueStore};
