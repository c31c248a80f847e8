use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::event::KeyInput;
use crate::lifecycle::{PageContext, PageModule};
use crate::route::{MESSAGE_PAGE, PageId};
use crate::router::count_elements_with_attr;
use crate::store::Store;

const REVEAL_ATTR: &str = "data-reveal";

/// The love letter. Paragraphs reveal as they scroll into view and the
/// closing modal appears once every paragraph has been read.
#[derive(Debug, Default)]
pub struct Message {
    total: usize,
    revealed: BTreeSet<usize>,
    modal_open: bool,
    modal_shown: bool,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn revealed(&self) -> usize {
        self.revealed.len()
    }

    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.revealed.len() as f64 / self.total as f64
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Paragraph `index` entered the viewport. Returns false for repeats and
    /// out-of-range indices.
    pub fn reveal(&mut self, index: usize, store: &Store) -> bool {
        if index >= self.total || !self.revealed.insert(index) {
            return false;
        }
        store.save_message_progress(self.progress());
        debug!(index, revealed = self.revealed.len(), total = self.total, "Paragraph revealed");

        if self.revealed.len() == self.total && !self.modal_shown {
            self.modal_shown = true;
            self.modal_open = true;
            info!("Letter finished");
        }
        true
    }

    pub fn close_modal(&mut self) -> bool {
        std::mem::take(&mut self.modal_open)
    }
}

impl PageModule for Message {
    fn name(&self) -> &'static str {
        "message"
    }

    fn routes(&self) -> Vec<PageId> {
        vec![PageId::new(MESSAGE_PAGE)]
    }

    fn on_page_loaded(&mut self, ctx: &PageContext<'_>) {
        *self = Self {
            total: count_elements_with_attr(ctx.content.unwrap_or_default(), REVEAL_ATTR),
            ..Self::default()
        };
    }

    fn on_key(&mut self, key: &KeyInput, _store: &Store) -> bool {
        *key == KeyInput::Escape && self.close_modal()
    }
}
