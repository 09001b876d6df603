//! Search session: events, pagination, the state machine and its view.

pub mod event;
pub mod pager;
pub mod state;
pub mod view;

pub use event::{Command, SessionEvent, TapRegion, UiEffect};
pub use pager::{END_REACHED_THRESHOLD, FetchTicket, ResultPager, ScrollMetrics};
pub use state::{DisplayMode, SessionState};
pub use view::{RecentRow, ResultRow, SessionView};
