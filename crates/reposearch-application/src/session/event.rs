use reposearch_core::recent::SearchRecord;
use reposearch_core::search::PageLink;
use serde::{Deserialize, Serialize};

use super::pager::{FetchTicket, ScrollMetrics};

/// Part of the screen a background tap landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapRegion {
    /// Title and search bar area.
    Header,
    /// Everything below the search bar.
    Content,
}

/// Inbound events consumed by the session state machine.
///
/// Platform focus changes arrive as their own events and may interleave
/// with submits in any order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Keyboard shown / input focused.
    FocusGained,
    /// Keyboard hidden / input blurred.
    FocusLost,
    TextChanged(String),
    Submit,
    Cancel,
    /// The "x" affordance inside the search bar.
    ClearText,
    SelectRecent(String),
    RemoveRecent(String),
    ClearAllRecents,
    BackgroundTap(TapRegion),
    Scrolled(ScrollMetrics),
    EndReached,
    /// A result row was tapped.
    SelectResult(u64),
    /// The stored recency list finished loading. Ignored once the list has
    /// been changed in this session, so only meaningful at startup.
    RecentsLoaded(Vec<SearchRecord>),
}

/// Work requested by a transition. The controller executes these.
///
/// Recency writes carry the revision of the list they snapshot. Revisions
/// increase with every change, so a writer can drop a snapshot older than
/// one already stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Write the full recency list back to storage.
    PersistRecents {
        revision: u64,
        records: Vec<SearchRecord>,
    },
    /// Remove the stored recency list.
    ClearRecents { revision: u64 },
    FetchFirstPage(FetchTicket),
    FetchNextPage(FetchTicket),
    DismissKeyboard,
    OpenPage(PageLink),
}

/// Effects the host platform must carry out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum UiEffect {
    /// Session state changed; re-render from a fresh view.
    Refresh,
    DismissKeyboard,
    /// Open the page viewer with this link.
    OpenPage(PageLink),
}
