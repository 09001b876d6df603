//! Render snapshot of the search screen.
//!
//! A [`SessionView`] is everything a host needs to draw one frame. It is
//! rebuilt from [`SessionState`] after every `Refresh` effect.

use reposearch_core::recent::SearchRecord;
use reposearch_core::search::ResultItem;
use serde::{Deserialize, Serialize};

use super::state::{DisplayMode, SessionState};

/// One row of the recents panel or the autocomplete list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentRow {
    pub keyword: String,
    /// Local `MM. DD.` label.
    pub date_label: String,
}

impl From<&SearchRecord> for RecentRow {
    fn from(record: &SearchRecord) -> Self {
        Self {
            keyword: record.keyword.clone(),
            date_label: record.short_date(),
        }
    }
}

/// One row of the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub owner_login: String,
    pub avatar_url: String,
}

impl From<&ResultItem> for ResultRow {
    fn from(item: &ResultItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description_or_placeholder().to_string(),
            owner_login: item.owner.login.clone(),
            avatar_url: item.owner.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub mode: DisplayMode,
    pub input: String,
    pub show_clear_button: bool,
    pub show_cancel_button: bool,
    /// Populated only in `Browsing`.
    pub recents: Vec<RecentRow>,
    /// Populated only in `Autocompleting`.
    pub suggestions: Vec<RecentRow>,
    /// Populated only in `ShowingResults`.
    pub results: Vec<ResultRow>,
    /// Header label above the result list, e.g. "1,234 repositories found".
    pub summary: Option<String>,
    pub show_footer_loader: bool,
}

impl From<&SessionState> for SessionView {
    fn from(state: &SessionState) -> Self {
        let mode = state.display_mode();
        let (results, summary) = if mode == DisplayMode::ShowingResults {
            let page = state.results();
            (
                page.items.iter().map(ResultRow::from).collect(),
                Some(page.summary_label()),
            )
        } else {
            (Vec::new(), None)
        };

        Self {
            mode,
            input: state.input().to_string(),
            show_clear_button: state.shows_clear_button(),
            show_cancel_button: state.shows_cancel_button(),
            recents: state.visible_recents().iter().map(RecentRow::from).collect(),
            suggestions: state.suggestions().into_iter().map(RecentRow::from).collect(),
            results,
            summary,
            show_footer_loader: state.shows_footer_loader(),
        }
    }
}
