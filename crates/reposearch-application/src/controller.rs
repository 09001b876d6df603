//! Search controller.
//!
//! Owns the [`SessionState`] behind an async mutex and carries out the
//! commands each transition returns: persistence through the
//! [`RecentSearchRepository`], fetches through the [`SearchGateway`], and
//! platform effects through an unbounded [`UiEffect`] channel.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reposearch_core::recent::RecentSearchRepository;
use reposearch_core::search::SearchGateway;
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;

use crate::session::{Command, FetchTicket, SessionEvent, SessionState, SessionView, UiEffect};

/// Drives one search screen.
///
/// # Concurrency
///
/// The state lock is only held while applying an event or folding a
/// response back in, never across a gateway or repository call. Callers may
/// therefore run several [`dispatch`](Self::dispatch) futures at once (for
/// example a scroll trigger while a page is still loading); duplicate
/// fetches are rejected by the pager and stale responses by their ticket.
/// Recency writes are serialized and a snapshot older than the last one
/// written is dropped, so storage converges on the in-memory list.
pub struct SearchController {
    state: Mutex<SessionState>,
    gateway: Arc<dyn SearchGateway>,
    recent_repository: Arc<dyn RecentSearchRepository>,
    /// Revision of the last recency snapshot handed to the repository.
    written_revision: Mutex<u64>,
    effect_sender: UnboundedSender<UiEffect>,
}

impl SearchController {
    pub fn new(
        gateway: Arc<dyn SearchGateway>,
        recent_repository: Arc<dyn RecentSearchRepository>,
        effect_sender: UnboundedSender<UiEffect>,
    ) -> Self {
        Self {
            state: Mutex::new(SessionState::new()),
            gateway,
            recent_repository,
            written_revision: Mutex::new(0),
            effect_sender,
        }
    }

    /// Reads the stored recency list into the session.
    pub async fn load_recents(&self) {
        let records = self.recent_repository.load().await;
        self.dispatch(SessionEvent::RecentsLoaded(records)).await;
    }

    /// Applies `event` at the current time and runs the resulting commands.
    pub async fn dispatch(&self, event: SessionEvent) {
        self.dispatch_at(event, Utc::now()).await;
    }

    /// Applies `event` as if it happened at `now`.
    pub async fn dispatch_at(&self, event: SessionEvent, now: DateTime<Utc>) {
        let commands = {
            let mut state = self.state.lock().await;
            state.apply(event, now)
        };
        self.emit(UiEffect::Refresh);

        for command in commands {
            self.run(command).await;
        }
    }

    /// Clone of the current session state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Render snapshot of the current session state.
    pub async fn view(&self) -> SessionView {
        SessionView::from(&*self.state.lock().await)
    }

    async fn run(&self, command: Command) {
        match command {
            Command::PersistRecents { revision, records } => {
                let mut written = self.written_revision.lock().await;
                if revision <= *written {
                    tracing::debug!(revision, written = *written, "Skipping outdated recent searches snapshot");
                    return;
                }
                if !self.recent_repository.save_all(&records).await {
                    tracing::warn!(count = records.len(), "Recent searches were not persisted");
                }
                *written = revision;
            }
            Command::ClearRecents { revision } => {
                let mut written = self.written_revision.lock().await;
                if revision <= *written {
                    tracing::debug!(revision, written = *written, "Skipping outdated clear of recent searches");
                    return;
                }
                self.recent_repository.clear().await;
                *written = revision;
            }
            Command::FetchFirstPage(ticket) => self.fetch_first_page(ticket).await,
            Command::FetchNextPage(ticket) => self.fetch_next_page(ticket).await,
            Command::DismissKeyboard => self.emit(UiEffect::DismissKeyboard),
            Command::OpenPage(link) => self.emit(UiEffect::OpenPage(link)),
        }
    }

    async fn fetch_first_page(&self, ticket: FetchTicket) {
        let response = self.gateway.search(&ticket.keyword, ticket.page).await;
        let applied = self.state.lock().await.complete_first_page(&ticket, response);
        if applied {
            self.emit(UiEffect::Refresh);
        }
    }

    async fn fetch_next_page(&self, ticket: FetchTicket) {
        let response = self.gateway.search(&ticket.keyword, ticket.page).await;
        let applied = self.state.lock().await.complete_next_page(&ticket, response);
        if applied {
            self.emit(UiEffect::Refresh);
        }
    }

    fn emit(&self, effect: UiEffect) {
        // Receiver gone means the host shut down; nothing left to notify.
        let _ = self.effect_sender.send(effect);
    }
}
