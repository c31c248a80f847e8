use tracing::info;

use crate::lifecycle::{PageContext, PageModule};
use crate::route::{INDEX_PAGE, PageId};
use crate::store::Store;

/// Landing page: the birthday modal greets a visitor once per browser session.
#[derive(Debug, Default)]
pub struct Home {
    modal_open: bool,
}

impl Home {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// The "enter" action. Returns false when the modal was not showing.
    pub fn close_modal(&mut self, store: &Store) -> bool {
        if !self.modal_open {
            return false;
        }
        self.modal_open = false;
        store.mark_birthday_modal_seen();
        info!("Birthday modal dismissed");
        true
    }
}

impl PageModule for Home {
    fn name(&self) -> &'static str {
        "home"
    }

    fn routes(&self) -> Vec<PageId> {
        vec![PageId::new(INDEX_PAGE)]
    }

    fn on_page_loaded(&mut self, ctx: &PageContext<'_>) {
        self.modal_open = !ctx.store.birthday_modal_seen();
    }
}
