//! Recent searches: the persisted, newest-first list of past keywords.

pub mod model;
pub mod repository;

pub use model::{RECENT_DISPLAY_LIMIT, RecentSearches, SearchRecord};
pub use repository::RecentSearchRepository;
