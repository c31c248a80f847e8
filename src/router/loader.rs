use tracing::{debug, warn};

use crate::document::DocumentSurface;
use crate::error::{AppError, AppResult};
use crate::event::NavReason;
use crate::route::PageId;

use super::core::Router;
use super::fetch::PageFetcher;
use super::history::BrowserHistory;
use super::markup::extract_content_region;
use super::sequencer::NavigationOutcome;

impl<S, F, H> Router<S, F, H>
where
    S: DocumentSurface,
    F: PageFetcher,
    H: BrowserHistory,
{
    /// Fetches `page` and swaps its content region in. Any failure becomes a
    /// full navigation to `page`; nothing is retried.
    ///
    /// This bypasses the transition guard. Hosts normally go through
    /// [`Router::navigate_to`] or [`Router::on_history_pop`].
    pub async fn load_content(&self, page: &PageId, push_history: bool) -> NavigationOutcome {
        let reason = if push_history {
            NavReason::Programmatic
        } else {
            NavReason::History
        };
        self.load(page, push_history, reason).await
    }

    pub(super) async fn load(
        &self,
        page: &PageId,
        push_history: bool,
        reason: NavReason,
    ) -> NavigationOutcome {
        match self.swap_content(page, push_history).await {
            Ok(content) => {
                self.announce(page.clone(), reason, Some(&content));
                NavigationOutcome::Completed(page.clone())
            }
            Err(err) => {
                warn!(page = %page, error = %err, "In-page load failed, navigating directly");
                self.fall_back(page)
            }
        }
    }

    /// Returns the new region markup. The live region is untouched unless the
    /// fetch and extraction both succeed.
    async fn swap_content(&self, page: &PageId, push_history: bool) -> AppResult<String> {
        let markup = self.fetcher.fetch(page).await?;
        let region_id = self.config.content_region_id.as_str();
        let inner = extract_content_region(&markup, region_id)
            .ok_or_else(|| AppError::missing_content_region(page.as_str(), region_id))?;

        self.surface.borrow_mut().replace_content(inner)?;
        // A back/forward move during the load already moved the cursor;
        // pushing now would truncate the entry it landed on.
        let history_moved = self.session.borrow().has_pending_history_sync();
        if push_history && !history_moved {
            self.history.borrow_mut().push(page);
        } else if push_history {
            debug!(page = %page, "History entry skipped, back/forward pending");
        }
        self.session.borrow_mut().record_swap(page.clone());
        self.store.set_last_visited_page(page);
        self.surface.borrow_mut().scroll_to_top();
        debug!(page = %page, push_history, "Content swapped");
        Ok(inner.to_string())
    }

    pub(super) fn fall_back(&self, page: &PageId) -> NavigationOutcome {
        self.surface.borrow_mut().assign_location(page);
        NavigationOutcome::FullReload(page.clone())
    }

    /// Browser back/forward signal. The history cursor has already moved, so
    /// a signal that lands mid-transition is deferred rather than dropped.
    pub async fn on_history_pop(&self) -> NavigationOutcome {
        if !self.session.borrow_mut().begin_transition() {
            self.session.borrow_mut().defer_history_sync();
            debug!("History move deferred until the transition finishes");
            return NavigationOutcome::Deferred;
        }
        let outcome = self.reconcile_history().await;
        self.settle().await;
        outcome
    }

    /// Brings the content in line with the history location. Caller holds
    /// the transition.
    async fn reconcile_history(&self) -> NavigationOutcome {
        let path = self.history.borrow().current_path();
        let page = self.routes.resolve_location(&path);
        self.surface
            .borrow_mut()
            .set_active_nav(self.routes.nav_target(&page));

        if *self.session.borrow().current_page() == page {
            return NavigationOutcome::SamePage;
        }
        self.load(&page, false, NavReason::History).await
    }

    /// Ends the current transition, first replaying any history move that
    /// arrived while it ran.
    pub(super) async fn settle(&self) {
        loop {
            {
                let mut session = self.session.borrow_mut();
                if !session.take_pending_history_sync() {
                    session.finish_transition();
                    return;
                }
            }
            let outcome = self.reconcile_history().await;
            debug!(?outcome, "Deferred history move reconciled");
        }
    }
}
