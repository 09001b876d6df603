//! Recent search repository trait.

use async_trait::async_trait;

use crate::recent::model::SearchRecord;

/// Repository for the persisted recency list.
///
/// Persistence is best effort: implementations log failures instead of
/// returning them, and callers never roll back the in-memory list when a
/// write fails.
#[async_trait]
pub trait RecentSearchRepository: Send + Sync {
    /// Loads the stored list, newest first.
    ///
    /// Returns an empty list when nothing is stored or the stored data cannot
    /// be read or parsed.
    async fn load(&self) -> Vec<SearchRecord>;

    /// Replaces the stored list with `records`. Returns `false` on write failure.
    async fn save_all(&self, records: &[SearchRecord]) -> bool;

    /// Removes the stored list.
    async fn clear(&self);
}
