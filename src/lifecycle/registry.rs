use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::event::{KeyInput, PageLoaded};
use crate::route::PageId;
use crate::store::Store;

/// What a module sees when its route becomes active.
pub struct PageContext<'a> {
    pub event: &'a PageLoaded,
    pub store: &'a Store,
    /// Content-region markup after the swap.
    pub content: Option<&'a str>,
}

/// A per-page feature that re-initializes whenever one of its routes loads.
pub trait PageModule {
    fn name(&self) -> &'static str;

    /// Routes this module owns. Notifications for other routes never reach it.
    fn routes(&self) -> Vec<PageId>;

    fn on_page_loaded(&mut self, ctx: &PageContext<'_>);

    /// Key press while one of the module's routes is active. Returns whether
    /// the key was consumed.
    fn on_key(&mut self, key: &KeyInput, store: &Store) -> bool {
        let _ = (key, store);
        false
    }
}

pub type SharedModule = Rc<RefCell<dyn PageModule>>;

type SharedObserver = Rc<RefCell<dyn FnMut(&PageLoaded)>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct ModuleEntry {
    id: ListenerId,
    routes: Vec<PageId>,
    module: SharedModule,
}

struct ObserverEntry {
    id: ListenerId,
    callback: SharedObserver,
}

/// One listener picked for a notification. Targets are collected before
/// delivery, so listeners may register or unsubscribe while being called.
#[derive(Clone)]
pub enum DispatchTarget {
    Module(ListenerId, SharedModule),
    Observer(ListenerId, SharedObserver),
}

impl DispatchTarget {
    pub fn id(&self) -> ListenerId {
        match self {
            Self::Module(id, _) | Self::Observer(id, _) => *id,
        }
    }

    pub fn deliver(&self, ctx: &PageContext<'_>) {
        match self {
            Self::Module(_, module) => module.borrow_mut().on_page_loaded(ctx),
            Self::Observer(_, callback) => (*callback.borrow_mut())(ctx.event),
        }
    }
}

/// Route-scoped fan-out for Page-Loaded notifications and key presses.
#[derive(Default)]
pub struct PageRegistry {
    modules: Vec<ModuleEntry>,
    observers: Vec<ObserverEntry>,
    next_id: u64,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module` for the routes it declares. Registering the same
    /// module instance again returns the existing id instead of duplicating it.
    pub fn register(&mut self, module: SharedModule) -> ListenerId {
        let routes = module.borrow().routes();
        self.register_for(routes, module)
    }

    pub fn register_for(&mut self, routes: Vec<PageId>, module: SharedModule) -> ListenerId {
        if let Some(existing) = self
            .modules
            .iter_mut()
            .find(|entry| Rc::ptr_eq(&entry.module, &module))
        {
            existing.routes = routes;
            return existing.id;
        }

        let id = self.allocate_id();
        debug!(module = module.borrow().name(), ?routes, "Registered page module");
        self.modules.push(ModuleEntry { id, routes, module });
        id
    }

    /// Observes every notification regardless of route.
    pub fn subscribe(&mut self, callback: impl FnMut(&PageLoaded) + 'static) -> ListenerId {
        let id = self.allocate_id();
        self.observers.push(ObserverEntry {
            id,
            callback: Rc::new(RefCell::new(callback)),
        });
        id
    }

    /// Removes a module or observer. Returns false for unknown ids.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.modules.len() + self.observers.len();
        self.modules.retain(|entry| entry.id != id);
        self.observers.retain(|entry| entry.id != id);
        before != self.modules.len() + self.observers.len()
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.modules.iter().any(|entry| entry.id == id)
            || self.observers.iter().any(|entry| entry.id == id)
    }

    /// Modules owning `page`, in registration order.
    pub fn modules_for(&self, page: &PageId) -> Vec<SharedModule> {
        self.modules
            .iter()
            .filter(|entry| entry.routes.contains(page))
            .map(|entry| entry.module.clone())
            .collect()
    }

    /// Everything a notification for `page` reaches: the modules owning the
    /// route first, then every observer.
    pub fn targets(&self, page: &PageId) -> Vec<DispatchTarget> {
        let modules = self
            .modules
            .iter()
            .filter(|entry| entry.routes.contains(page))
            .map(|entry| DispatchTarget::Module(entry.id, entry.module.clone()));
        let observers = self
            .observers
            .iter()
            .map(|entry| DispatchTarget::Observer(entry.id, entry.callback.clone()));
        modules.chain(observers).collect()
    }

    fn allocate_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }
}
