use tracing::{debug, info};

use crate::event::KeyInput;
use crate::lifecycle::{PageContext, PageModule};
use crate::route::{PageId, SURPRISE_PAGE};
use crate::store::Store;

/// Kisses needed before "continue" unlocks.
pub const MIN_KISSES: u32 = 5;

const KISSES_PER_MESSAGE: u32 = 3;

const KISS_MESSAGES: [&str; 8] = [
    "Keep tapping to send more love!",
    "You're doing great!",
    "So much love!",
    "My heart is overflowing!",
    "You're the sweetest!",
    "I feel so loved!",
    "Never stop!",
    "Best birthday ever!",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurpriseStage {
    Wrapped,
    Revealed,
    Cake,
    Message,
}

/// Fired once when the gift box opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Celebration {
    /// No earlier visit had opened the box.
    pub first_time: bool,
}

#[derive(Debug)]
pub struct Surprise {
    stage: SurpriseStage,
    opened: bool,
    kisses: u32,
}

impl Default for Surprise {
    fn default() -> Self {
        Self {
            stage: SurpriseStage::Wrapped,
            opened: false,
            kisses: 0,
        }
    }
}

impl Surprise {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> SurpriseStage {
        self.stage
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// Click on the gift box. Only the first click after a page load opens
    /// it; repeats return `None` so the celebration never fires twice.
    pub fn open_gift(&mut self, store: &Store) -> Option<Celebration> {
        if self.opened {
            debug!("Gift box already open");
            return None;
        }
        self.opened = true;
        self.stage = SurpriseStage::Revealed;

        let first_time = !store.surprise_seen();
        store.mark_surprise_seen();
        info!(first_time, "Gift box opened");
        Some(Celebration { first_time })
    }

    /// Dismisses the reveal and brings up the cake.
    pub fn close_reveal(&mut self) -> bool {
        if self.stage != SurpriseStage::Revealed {
            return false;
        }
        self.stage = SurpriseStage::Cake;
        true
    }

    pub fn kiss(&mut self, store: &Store) -> u32 {
        self.kisses = store.add_kiss();
        self.kisses
    }

    pub fn kisses(&self) -> u32 {
        self.kisses
    }

    pub fn can_continue(&self) -> bool {
        self.kisses >= MIN_KISSES
    }

    pub fn kiss_message(&self) -> &'static str {
        let index = usize::try_from(self.kisses / KISSES_PER_MESSAGE)
            .unwrap_or(usize::MAX)
            .min(KISS_MESSAGES.len() - 1);
        KISS_MESSAGES[index]
    }

    /// Leaves the cake for the final message once enough kisses were sent.
    pub fn continue_to_message(&mut self) -> bool {
        if self.stage != SurpriseStage::Cake || !self.can_continue() {
            return false;
        }
        self.stage = SurpriseStage::Message;
        true
    }
}

impl PageModule for Surprise {
    fn name(&self) -> &'static str {
        "surprise"
    }

    fn routes(&self) -> Vec<PageId> {
        vec![PageId::new(SURPRISE_PAGE)]
    }

    fn on_page_loaded(&mut self, ctx: &PageContext<'_>) {
        *self = Self {
            kisses: ctx.store.kiss_count(),
            ..Self::default()
        };
    }

    fn on_key(&mut self, key: &KeyInput, _store: &Store) -> bool {
        *key == KeyInput::Escape && self.close_reveal()
    }
}
