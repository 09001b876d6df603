//! Search gateway trait definition.

use async_trait::async_trait;

use crate::search::model::{FIRST_PAGE, SearchResponse};

/// Remote paginated search endpoint.
///
/// "No result" is a value, not an error: implementations return `None` for a
/// blank keyword (before any network activity), for transport failures and
/// for non-success responses, logging the reason.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// Fetches one page (1-based) of results for `keyword`.
    async fn search(&self, keyword: &str, page: u32) -> Option<SearchResponse>;

    /// Fetches the first page of results for `keyword`.
    async fn search_first_page(&self, keyword: &str) -> Option<SearchResponse> {
        self.search(keyword, FIRST_PAGE).await
    }
}
