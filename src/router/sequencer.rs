use tracing::debug;

use crate::document::{ContentClass, DocumentSurface};
use crate::event::{KeyInput, NavReason};
use crate::nav::{ClickDecision, ClickElement, classify_click};
use crate::route::PageId;

use super::core::Router;
use super::fetch::PageFetcher;
use super::history::BrowserHistory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Content swapped in place.
    Completed(PageId),
    /// Target already shown; nothing fetched, no history entry.
    SamePage,
    /// A transition was already in flight.
    Dropped,
    /// Back/forward arrived mid-transition; reconciled once it finishes.
    Deferred,
    /// The in-page swap failed and the browser was sent to the page instead.
    FullReload(PageId),
}

impl NavigationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickResult {
    pub decision: ClickDecision,
    /// `None` when the router left the click alone.
    pub outcome: Option<NavigationOutcome>,
}

impl ClickResult {
    pub fn prevents_default(&self) -> bool {
        self.decision.prevents_default()
    }
}

impl<S, F, H> Router<S, F, H>
where
    S: DocumentSurface,
    F: PageFetcher,
    H: BrowserHistory,
{
    pub async fn navigate_to(&self, target: impl Into<PageId>) -> NavigationOutcome {
        self.navigate(target.into(), NavReason::Programmatic).await
    }

    /// Fade out, swap, fade in. At most one of these runs at a time.
    pub(super) async fn navigate(&self, target: PageId, reason: NavReason) -> NavigationOutcome {
        {
            let mut session = self.session.borrow_mut();
            if session.is_transitioning() {
                debug!(page = %target, "Navigation dropped, transition in flight");
                return NavigationOutcome::Dropped;
            }
            if *session.current_page() == target {
                debug!(page = %target, "Already on page");
                return NavigationOutcome::SamePage;
            }
            session.begin_transition();
        }

        let outcome = if self.surface.borrow().has_content_region() {
            {
                let mut surface = self.surface.borrow_mut();
                surface.remove_content_class(ContentClass::Visible);
                surface.remove_content_class(ContentClass::FadeIn);
                surface.add_content_class(ContentClass::FadeOut);
            }
            tokio::time::sleep(self.config.transition_duration()).await;
            self.load(&target, true, reason).await
        } else {
            self.fall_back(&target)
        };

        if outcome.is_completed() {
            let mut surface = self.surface.borrow_mut();
            surface.add_content_class(ContentClass::FadeIn);
            surface.add_content_class(ContentClass::Visible);
            surface.remove_content_class(ContentClass::FadeOut);
            surface.set_active_nav(self.routes.nav_target(&target));
        }

        self.settle().await;
        outcome
    }

    pub fn intercept(&self, path: &[ClickElement]) -> ClickDecision {
        classify_click(path, self.session.borrow().current_page())
    }

    /// Acts on a decision from [`Router::intercept`].
    pub async fn follow(&self, decision: &ClickDecision) -> Option<NavigationOutcome> {
        match decision {
            ClickDecision::Navigate { page, via } => Some(self.navigate(page.clone(), *via).await),
            ClickDecision::SamePage(_) => Some(NavigationOutcome::SamePage),
            ClickDecision::Ignore(_) | ClickDecision::NotNavigation => None,
        }
    }

    pub async fn handle_click(&self, path: &[ClickElement]) -> ClickResult {
        let decision = self.intercept(path);
        let outcome = self.follow(&decision).await;
        ClickResult { decision, outcome }
    }

    /// The document-level key listener. Offers the key to the modules of the
    /// current page only.
    pub fn handle_key(&self, key: &KeyInput) -> bool {
        let page = self.current_page();
        let modules = self.registry.borrow().modules_for(&page);
        let consumed = modules
            .iter()
            .any(|module| module.borrow_mut().on_key(key, &self.store));
        debug!(page = %page, ?key, consumed, "Key dispatched");
        consumed
    }
}
