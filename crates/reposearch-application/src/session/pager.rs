//! Result pagination.
//!
//! The pager owns the accumulated [`ResultPage`] and both loading flags. Each
//! fetch is split into `begin_*` (under the session lock, returns a ticket)
//! and `complete_*` (folds the response back in). Tickets carry the generation
//! they were issued under; a new first-page search or a reset bumps the
//! generation so late responses for an abandoned keyword are dropped.

use reposearch_core::search::{FIRST_PAGE, ResultPage, SearchResponse};
use serde::{Deserialize, Serialize};

/// Fraction of the visible length from the end of the list at which the
/// next page is requested.
pub const END_REACHED_THRESHOLD: f64 = 0.5;

/// Identifies one outbound fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTicket {
    pub generation: u64,
    pub keyword: String,
    pub page: u32,
}

/// Scroll position of the result list, in any consistent unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub offset: f64,
    /// Visible length of the list.
    pub viewport_length: f64,
    /// Total length of the list content.
    pub content_length: f64,
}

impl ScrollMetrics {
    /// True when the unscrolled remainder is within `threshold` visible lengths.
    pub fn should_load_more(&self, threshold: f64) -> bool {
        if self.viewport_length <= 0.0 {
            return false;
        }
        let remaining = self.content_length - (self.offset + self.viewport_length);
        remaining <= threshold * self.viewport_length
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultPager {
    results: ResultPage,
    first_page_loading: bool,
    next_page_loading: bool,
    generation: u64,
}

impl ResultPager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &ResultPage {
        &self.results
    }

    pub fn is_first_page_loading(&self) -> bool {
        self.first_page_loading
    }

    pub fn is_next_page_loading(&self) -> bool {
        self.next_page_loading
    }

    /// Starts a page-1 fetch for `keyword`.
    ///
    /// Previous results are cleared now rather than when the response arrives,
    /// and any in-flight next-page fetch is orphaned.
    pub fn begin_first_page(&mut self, keyword: &str) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.results = ResultPage {
            keyword: keyword.to_string(),
            ..ResultPage::empty()
        };
        self.first_page_loading = true;
        self.next_page_loading = false;

        FetchTicket {
            generation: self.generation,
            keyword: keyword.to_string(),
            page: FIRST_PAGE,
        }
    }

    /// Applies a page-1 response. Returns `false` if the ticket was stale.
    pub fn complete_first_page(
        &mut self,
        ticket: &FetchTicket,
        response: Option<SearchResponse>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                keyword = %ticket.keyword,
                ticket_generation = ticket.generation,
                generation = self.generation,
                "Discarding stale first-page response"
            );
            return false;
        }

        self.first_page_loading = false;
        match response {
            Some(response) => {
                self.results = ResultPage::first(ticket.keyword.clone(), response);
            }
            None => {
                tracing::warn!(keyword = %ticket.keyword, "First page returned no result");
            }
        }
        true
    }

    /// Starts a fetch for the page after the current cursor.
    ///
    /// Returns `None` (changing nothing) while another next-page fetch or a
    /// first-page fetch is in flight, or when there are no results.
    pub fn begin_next_page(&mut self) -> Option<FetchTicket> {
        if self.next_page_loading || self.first_page_loading || self.results.is_empty() {
            return None;
        }

        self.next_page_loading = true;
        Some(FetchTicket {
            generation: self.generation,
            keyword: self.results.keyword.clone(),
            page: self.results.page + 1,
        })
    }

    /// Applies a next-page response. Returns `false` if the ticket was stale.
    ///
    /// The cursor only advances when the response is present, so a failed
    /// page is requested again on the next trigger.
    pub fn complete_next_page(
        &mut self,
        ticket: &FetchTicket,
        response: Option<SearchResponse>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                keyword = %ticket.keyword,
                page = ticket.page,
                "Discarding stale next-page response"
            );
            return false;
        }

        self.next_page_loading = false;
        match response {
            Some(response) => self.results.append(ticket.page, response),
            None => {
                tracing::warn!(keyword = %ticket.keyword, page = ticket.page, "Next page returned no result");
            }
        }
        true
    }

    /// Drops all results and orphans every in-flight fetch.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.results = ResultPage::empty();
        self.first_page_loading = false;
        self.next_page_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reposearch_core::search::{RepositoryOwner, ResultItem};

    fn item(id: u64) -> ResultItem {
        ResultItem {
            id,
            name: format!("repo-{id}"),
            description: None,
            owner: RepositoryOwner {
                login: "owner".to_string(),
                avatar_url: "https://a/owner".to_string(),
            },
            html_url: format!("https://github.com/owner/repo-{id}"),
        }
    }

    fn response(ids: &[u64], total_count: u64) -> SearchResponse {
        SearchResponse {
            items: ids.iter().copied().map(item).collect(),
            total_count,
        }
    }

    fn ids(pager: &ResultPager) -> Vec<u64> {
        pager.results().items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_first_page_clears_results_immediately() {
        let mut pager = ResultPager::new();
        let ticket = pager.begin_first_page("foo");
        pager.complete_first_page(&ticket, Some(response(&[1, 2], 2)));

        pager.begin_first_page("bar");
        assert!(pager.results().is_empty());
        assert!(pager.is_first_page_loading());
        assert_eq!(pager.results().keyword, "bar");
    }

    #[test]
    fn test_first_page_failure_clears_flag() {
        let mut pager = ResultPager::new();
        let ticket = pager.begin_first_page("foo");
        assert!(pager.complete_first_page(&ticket, None));
        assert!(!pager.is_first_page_loading());
        assert!(pager.results().is_empty());
    }

    #[test]
    fn test_append_in_page_order() {
        let mut pager = ResultPager::new();
        let first = pager.begin_first_page("foo");
        pager.complete_first_page(&first, Some(response(&[1, 2], 2)));

        let next = pager.begin_next_page().unwrap();
        assert_eq!(next.page, 2);
        assert_eq!(next.keyword, "foo");
        assert!(pager.is_next_page_loading());

        pager.complete_next_page(&next, Some(response(&[3], 2)));
        assert_eq!(ids(&pager), vec![1, 2, 3]);
        assert_eq!(pager.results().total_count, 2);
        assert_eq!(pager.results().page, 2);
        assert!(!pager.is_next_page_loading());
    }

    #[test]
    fn test_next_page_noop_without_results() {
        let mut pager = ResultPager::new();
        assert!(pager.begin_next_page().is_none());
        assert!(!pager.is_next_page_loading());
    }

    #[test]
    fn test_next_page_noop_while_in_flight() {
        let mut pager = ResultPager::new();
        let first = pager.begin_first_page("foo");
        pager.complete_first_page(&first, Some(response(&[1], 10)));

        assert!(pager.begin_next_page().is_some());
        assert!(pager.begin_next_page().is_none());
    }

    #[test]
    fn test_failed_next_page_keeps_cursor() {
        let mut pager = ResultPager::new();
        let first = pager.begin_first_page("foo");
        pager.complete_first_page(&first, Some(response(&[1], 10)));

        let next = pager.begin_next_page().unwrap();
        pager.complete_next_page(&next, None);
        assert_eq!(pager.results().page, 1);
        assert_eq!(ids(&pager), vec![1]);

        let retry = pager.begin_next_page().unwrap();
        assert_eq!(retry.page, 2);
    }

    #[test]
    fn test_stale_next_page_is_discarded() {
        let mut pager = ResultPager::new();
        let first = pager.begin_first_page("foo");
        pager.complete_first_page(&first, Some(response(&[1], 10)));
        let stale = pager.begin_next_page().unwrap();

        let second = pager.begin_first_page("bar");
        pager.complete_first_page(&second, Some(response(&[9], 1)));

        assert!(!pager.complete_next_page(&stale, Some(response(&[2], 10))));
        assert_eq!(ids(&pager), vec![9]);
        assert_eq!(pager.results().keyword, "bar");
    }

    #[test]
    fn test_stale_first_page_does_not_clear_newer_flag() {
        let mut pager = ResultPager::new();
        let old = pager.begin_first_page("foo");
        let _new = pager.begin_first_page("bar");

        assert!(!pager.complete_first_page(&old, Some(response(&[1], 1))));
        assert!(pager.is_first_page_loading());
        assert!(pager.results().is_empty());
    }

    #[test]
    fn test_reset_orphans_in_flight_fetch() {
        let mut pager = ResultPager::new();
        let ticket = pager.begin_first_page("foo");
        pager.reset();

        assert!(!pager.complete_first_page(&ticket, Some(response(&[1], 1))));
        assert!(pager.results().is_empty());
        assert!(!pager.is_first_page_loading());
    }

    #[test]
    fn test_scroll_proximity_trigger() {
        let near_end = ScrollMetrics {
            offset: 1_250.0,
            viewport_length: 800.0,
            content_length: 2_400.0,
        };
        assert!(near_end.should_load_more(END_REACHED_THRESHOLD));

        let far = ScrollMetrics {
            offset: 0.0,
            viewport_length: 800.0,
            content_length: 2_400.0,
        };
        assert!(!far.should_load_more(END_REACHED_THRESHOLD));

        let short_content = ScrollMetrics {
            offset: 0.0,
            viewport_length: 800.0,
            content_length: 300.0,
        };
        assert!(short_content.should_load_more(END_REACHED_THRESHOLD));

        let unmeasured = ScrollMetrics {
            offset: 0.0,
            viewport_length: 0.0,
            content_length: 0.0,
        };
        assert!(!unmeasured.should_load_more(END_REACHED_THRESHOLD));
    }
}
