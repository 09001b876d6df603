//! Search session state machine.
//!
//! `SessionState` is the single owner of everything the search screen shows.
//! Transitions are synchronous and pure apart from the commands they return;
//! the controller runs those commands and folds fetch completions back in.

use chrono::{DateTime, Utc};
use reposearch_core::autocomplete;
use reposearch_core::recent::{RecentSearches, SearchRecord};
use reposearch_core::search::{ResultPage, SearchResponse};
use serde::{Deserialize, Serialize};

use super::event::{Command, SessionEvent, TapRegion};
use super::pager::{END_REACHED_THRESHOLD, FetchTicket, ResultPager};

/// What the search screen currently shows. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Unfocused with no results: the recent-searches panel.
    Browsing,
    /// Focused with no results: filtered suggestions.
    Autocompleting,
    /// First page in flight: full-panel loader.
    LoadingFirstPage,
    /// Result list, with a trailing loader while a later page is in flight.
    ShowingResults,
}

impl DisplayMode {
    /// Derives the mode from the session flags.
    pub fn derive(focused: bool, has_results: bool, first_page_loading: bool) -> Self {
        if first_page_loading {
            DisplayMode::LoadingFirstPage
        } else if has_results {
            DisplayMode::ShowingResults
        } else if focused {
            DisplayMode::Autocompleting
        } else {
            DisplayMode::Browsing
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    input: String,
    focused: bool,
    recents: RecentSearches,
    /// Bumped on every change to `recents`; zero until the first one.
    recents_revision: u64,
    pager: ResultPager,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn recents(&self) -> &RecentSearches {
        &self.recents
    }

    pub fn recents_revision(&self) -> u64 {
        self.recents_revision
    }

    pub fn results(&self) -> &ResultPage {
        self.pager.results()
    }

    pub fn pager(&self) -> &ResultPager {
        &self.pager
    }

    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode::derive(
            self.focused,
            !self.pager.results().is_empty(),
            self.pager.is_first_page_loading(),
        )
    }

    /// Recent searches for the recents panel; empty outside `Browsing`.
    pub fn visible_recents(&self) -> &[SearchRecord] {
        match self.display_mode() {
            DisplayMode::Browsing => self.recents.display(),
            _ => &[],
        }
    }

    /// Autocomplete suggestions; empty outside `Autocompleting`.
    pub fn suggestions(&self) -> Vec<&SearchRecord> {
        match self.display_mode() {
            DisplayMode::Autocompleting => autocomplete::filter(&self.input, self.recents.records()),
            _ => Vec::new(),
        }
    }

    /// Trailing loader inside the result list.
    pub fn shows_footer_loader(&self) -> bool {
        self.display_mode() == DisplayMode::ShowingResults && self.pager.is_next_page_loading()
    }

    pub fn shows_clear_button(&self) -> bool {
        self.focused && !self.input.is_empty()
    }

    pub fn shows_cancel_button(&self) -> bool {
        self.focused
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    /// Applies one event and returns the work it requires.
    pub fn apply(&mut self, event: SessionEvent, now: DateTime<Utc>) -> Vec<Command> {
        match event {
            SessionEvent::FocusGained => {
                self.focused = true;
                Vec::new()
            }
            SessionEvent::FocusLost => {
                self.focused = false;
                Vec::new()
            }
            SessionEvent::TextChanged(text) => {
                self.input = text;
                Vec::new()
            }
            SessionEvent::Submit => self.submit(now),
            SessionEvent::Cancel => {
                self.input.clear();
                self.focused = false;
                self.pager.reset();
                vec![Command::DismissKeyboard]
            }
            SessionEvent::ClearText => {
                self.input.clear();
                Vec::new()
            }
            SessionEvent::SelectRecent(keyword) => {
                self.input = keyword;
                self.submit(now)
            }
            SessionEvent::RemoveRecent(keyword) => {
                if !self.recents.remove(&keyword) {
                    tracing::debug!(keyword = %keyword, "Removed keyword was not in recent searches");
                }
                vec![self.persist_command()]
            }
            SessionEvent::ClearAllRecents => {
                self.recents.clear();
                vec![Command::ClearRecents {
                    revision: self.bump_recents_revision(),
                }]
            }
            SessionEvent::BackgroundTap(region) => {
                if self.display_mode() == DisplayMode::ShowingResults && region != TapRegion::Header
                {
                    Vec::new()
                } else {
                    vec![Command::DismissKeyboard]
                }
            }
            SessionEvent::Scrolled(metrics) => {
                if metrics.should_load_more(END_REACHED_THRESHOLD) {
                    self.end_reached()
                } else {
                    Vec::new()
                }
            }
            SessionEvent::EndReached => self.end_reached(),
            SessionEvent::SelectResult(id) => match self.pager.results().find(id) {
                Some(item) => vec![Command::OpenPage(item.page_link())],
                None => {
                    tracing::debug!(id, "Selected result is not displayed");
                    Vec::new()
                }
            },
            SessionEvent::RecentsLoaded(records) => {
                if self.recents_revision > 0 {
                    tracing::debug!(
                        count = records.len(),
                        "Ignoring stored recent searches, list already changed"
                    );
                } else {
                    self.recents = RecentSearches::from_records(records);
                }
                Vec::new()
            }
        }
    }

    /// Folds a first-page response back in. Returns `false` if it was stale.
    pub fn complete_first_page(
        &mut self,
        ticket: &FetchTicket,
        response: Option<SearchResponse>,
    ) -> bool {
        self.pager.complete_first_page(ticket, response)
    }

    /// Folds a next-page response back in. Returns `false` if it was stale.
    pub fn complete_next_page(
        &mut self,
        ticket: &FetchTicket,
        response: Option<SearchResponse>,
    ) -> bool {
        self.pager.complete_next_page(ticket, response)
    }

    fn submit(&mut self, now: DateTime<Utc>) -> Vec<Command> {
        let keyword = self.input.trim().to_string();
        if !self.recents.record(&keyword, now) {
            return Vec::new();
        }

        tracing::info!(keyword = %keyword, "Search submitted");
        let ticket = self.pager.begin_first_page(&keyword);
        vec![self.persist_command(), Command::FetchFirstPage(ticket)]
    }

    fn bump_recents_revision(&mut self) -> u64 {
        self.recents_revision += 1;
        self.recents_revision
    }

    /// Snapshot of the list after a change, tagged with a fresh revision.
    fn persist_command(&mut self) -> Command {
        Command::PersistRecents {
            revision: self.bump_recents_revision(),
            records: self.recents.records().to_vec(),
        }
    }

    fn end_reached(&mut self) -> Vec<Command> {
        match self.pager.begin_next_page() {
            Some(ticket) => vec![Command::FetchNextPage(ticket)],
            None => Vec::new(),
        }
    }
}
