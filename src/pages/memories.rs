use tracing::debug;

use crate::event::KeyInput;
use crate::lifecycle::{PageContext, PageModule};
use crate::route::{MEMORIES_PAGE, PageId};
use crate::router::attribute_values;
use crate::store::Store;

const MEDIA_TYPE_ATTR: &str = "data-type";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            v if v.eq_ignore_ascii_case("image") => Some(Self::Image),
            v if v.eq_ignore_ascii_case("video") => Some(Self::Video),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaItem {
    pub index: usize,
    pub kind: MediaKind,
}

/// Photo and video gallery with a single lightbox.
#[derive(Debug, Default)]
pub struct Memories {
    items: Vec<MediaKind>,
    lightbox: Option<MediaItem>,
}

impl Memories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[MediaKind] {
        &self.items
    }

    pub fn lightbox(&self) -> Option<MediaItem> {
        self.lightbox
    }

    /// Opens item `index` in the lightbox, replacing whatever it showed.
    pub fn open(&mut self, index: usize) -> Option<MediaItem> {
        let kind = *self.items.get(index)?;
        let item = MediaItem { index, kind };
        self.lightbox = Some(item);
        debug!(index, ?kind, "Lightbox opened");
        Some(item)
    }

    pub fn close(&mut self) -> bool {
        self.lightbox.take().is_some()
    }
}

impl PageModule for Memories {
    fn name(&self) -> &'static str {
        "memories"
    }

    fn routes(&self) -> Vec<PageId> {
        vec![PageId::new(MEMORIES_PAGE)]
    }

    fn on_page_loaded(&mut self, ctx: &PageContext<'_>) {
        self.lightbox = None;
        self.items = attribute_values(ctx.content.unwrap_or_default(), MEDIA_TYPE_ATTR)
            .into_iter()
            .filter_map(MediaKind::parse)
            .collect();
    }

    fn on_key(&mut self, key: &KeyInput, _store: &Store) -> bool {
        *key == KeyInput::Escape && self.close()
    }
}
