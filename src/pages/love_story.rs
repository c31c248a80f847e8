use tracing::debug;

use crate::lifecycle::{PageContext, PageModule};
use crate::route::{LOVE_STORY_PAGE, PageId};
use crate::router::attribute_values;
use crate::store::Store;

const CARD_ID_ATTR: &str = "data-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineCard {
    pub id: String,
    pub open: bool,
}

/// Timeline of shared moments. Open cards survive reloads.
#[derive(Debug, Default)]
pub struct LoveStory {
    cards: Vec<TimelineCard>,
}

impl LoveStory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[TimelineCard] {
        &self.cards
    }

    /// Flips card `id`. `None` when the page has no such card.
    pub fn toggle(&mut self, id: &str, store: &Store) -> Option<bool> {
        let card = self.cards.iter_mut().find(|card| card.id == id)?;
        card.open = store.toggle_timeline_card(id);
        Some(card.open)
    }
}

impl PageModule for LoveStory {
    fn name(&self) -> &'static str {
        "love-story"
    }

    fn routes(&self) -> Vec<PageId> {
        vec![PageId::new(LOVE_STORY_PAGE)]
    }

    fn on_page_loaded(&mut self, ctx: &PageContext<'_>) {
        let open = ctx.store.open_timeline_cards();
        self.cards = attribute_values(ctx.content.unwrap_or_default(), CARD_ID_ATTR)
            .into_iter()
            .filter(|id| !id.is_empty())
            .map(|id| TimelineCard {
                id: id.to_string(),
                open: open.iter().any(|stored| stored == id),
            })
            .collect();
        debug!(cards = self.cards.len(), restored = open.len(), "Timeline ready");
    }
}

#[cfg(test)]
mod tests {
    use super::LoveStory;
    use crate::event::{NavReason, PageLoaded};
    use crate::lifecycle::{PageContext, PageModule};
    use crate::route::PageId;
    use crate::store::Store;

    const TIMELINE: &str = r#"
        <div class="timeline-item" data-id="first-date"><div class="timeline-card">Coffee</div></div>
        <div class="timeline-item" data-id="first-trip"><div class="timeline-card">Lisbon</div></div>
    "#;

    fn load(story: &mut LoveStory, store: &Store) {
        let event = PageLoaded {
            page: PageId::new("love-story.html"),
            reason: NavReason::Link,
        };
        story.on_page_loaded(&PageContext {
            event: &event,
            store,
            content: Some(TIMELINE),
        });
    }

    #[test]
    fn toggled_cards_are_restored_on_the_next_visit() {
        let store = Store::in_memory();
        let mut story = LoveStory::new();
        load(&mut story, &store);
        assert!(story.cards().iter().all(|card| !card.open));

        assert_eq!(story.toggle("first-trip", &store), Some(true));
        assert_eq!(story.toggle("missing", &store), None);

        let mut revisit = LoveStory::new();
        load(&mut revisit, &store);
        let open: Vec<_> = revisit
            .cards()
            .iter()
            .filter(|card| card.open)
            .map(|card| card.id.as_str())
            .collect();
        assert_eq!(open, vec!["first-trip"]);

        assert_eq!(revisit.toggle("first-trip", &store), Some(false));
        assert!(store.open_timeline_cards().is_empty());
    }
}
