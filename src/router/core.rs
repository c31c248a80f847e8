use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::info;

use crate::config::RouterConfig;
use crate::document::{ContentClass, DocumentSurface};
use crate::event::{NavReason, PageLoaded};
use crate::lifecycle::{ListenerId, PageContext, PageRegistry, SharedModule};
use crate::route::{PageId, RouteTable};
use crate::store::Store;

use super::fetch::PageFetcher;
use super::history::BrowserHistory;
use super::state::NavSession;

/// In-page router for one document. All browser access goes through the
/// `S`/`F`/`H` seams; the session record lives here, not in a global.
pub struct Router<S, F, H> {
    pub(super) config: RouterConfig,
    pub(super) routes: RouteTable,
    pub(super) store: Rc<Store>,
    pub(super) session: RefCell<NavSession>,
    pub(super) surface: RefCell<S>,
    pub(super) history: RefCell<H>,
    pub(super) fetcher: F,
    pub(super) registry: RefCell<PageRegistry>,
}

impl<S, F, H> Router<S, F, H>
where
    S: DocumentSurface,
    F: PageFetcher,
    H: BrowserHistory,
{
    /// Attaches to a freshly loaded document: derives the current page from
    /// the location, highlights it, records it and shows the content region
    /// without a fade-in.
    pub fn new(
        config: RouterConfig,
        routes: RouteTable,
        store: Rc<Store>,
        mut surface: S,
        fetcher: F,
        history: H,
    ) -> Self {
        let current = routes.resolve_location(&history.current_path());
        surface.set_active_nav(routes.nav_target(&current));
        surface.add_content_class(ContentClass::Visible);
        store.set_last_visited_page(&current);
        info!(page = %current, "Router attached");

        Self {
            config,
            routes,
            store,
            session: RefCell::new(NavSession::new(current)),
            surface: RefCell::new(surface),
            history: RefCell::new(history),
            fetcher,
            registry: RefCell::new(PageRegistry::new()),
        }
    }

    pub fn register(&self, module: SharedModule) -> ListenerId {
        self.registry.borrow_mut().register(module)
    }

    pub fn subscribe(&self, callback: impl FnMut(&PageLoaded) + 'static) -> ListenerId {
        self.registry.borrow_mut().subscribe(callback)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.registry.borrow_mut().unsubscribe(id)
    }

    /// Announces the initial page to everything registered so far. Call once,
    /// after the page modules are registered.
    pub fn start(&self) -> usize {
        let content = self.surface.borrow().content_markup();
        self.announce(self.current_page(), NavReason::Initial, content.as_deref())
    }

    pub fn current_page(&self) -> PageId {
        self.session.borrow().current_page().clone()
    }

    pub fn is_transitioning(&self) -> bool {
        self.session.borrow().is_transitioning()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn last_visited_page(&self) -> Option<PageId> {
        self.store.last_visited_page()
    }

    pub fn surface(&self) -> Ref<'_, S> {
        self.surface.borrow()
    }

    pub fn history(&self) -> Ref<'_, H> {
        self.history.borrow()
    }

    /// Mutable access for the host, e.g. to move the history cursor before
    /// reporting a back/forward signal.
    pub fn with_history<R>(&self, apply: impl FnOnce(&mut H) -> R) -> R {
        apply(&mut self.history.borrow_mut())
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub(super) fn announce(&self, page: PageId, reason: NavReason, content: Option<&str>) -> usize {
        let event = PageLoaded { page, reason };
        let ctx = PageContext {
            event: &event,
            store: &self.store,
            content,
        };
        // The registry is not borrowed while listeners run; one removed by an
        // earlier listener in this round is skipped.
        let targets = self.registry.borrow().targets(&event.page);
        let mut delivered = 0;
        for target in &targets {
            if !self.registry.borrow().contains(target.id()) {
                continue;
            }
            target.deliver(&ctx);
            delivered += 1;
        }
        info!(page = %event.page, ?reason, delivered, "Page loaded");
        delivered
    }
}
