use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::event::{KeyInput, NavReason, PageLoaded};
use crate::lifecycle::{ListenerId, PageContext, PageModule};
use crate::pages::{Celebration, SitePages};
use crate::route::{
    INDEX_PAGE, MEMORIES_PAGE, MESSAGE_PAGE, PageId, QUESTIONS_PAGE, SURPRISE_PAGE,
};
use crate::store::Store;

use super::super::NavigationOutcome;
use super::{INITIAL_MARKUP, body_for, router_at, site_fetcher};

type Seen = Rc<RefCell<Vec<(PageLoaded, Option<String>)>>>;

/// Records what it saw when notified, including the content at that moment.
struct Recorder {
    routes: Vec<PageId>,
    seen: Seen,
}

impl PageModule for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn routes(&self) -> Vec<PageId> {
        self.routes.clone()
    }

    fn on_page_loaded(&mut self, ctx: &PageContext<'_>) {
        self.seen
            .borrow_mut()
            .push((ctx.event.clone(), ctx.content.map(str::to_string)));
    }

    fn on_key(&mut self, key: &KeyInput, _store: &Store) -> bool {
        *key == KeyInput::Enter
    }
}

fn recorder(routes: &[&str]) -> (Rc<RefCell<Recorder>>, Seen) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let module = Rc::new(RefCell::new(Recorder {
        routes: routes.iter().map(|page| PageId::new(*page)).collect(),
        seen: seen.clone(),
    }));
    (module, seen)
}

#[test]
fn start_announces_the_initial_page_with_its_content() {
    let router = router_at("/index.html", site_fetcher());
    let (module, seen) = recorder(&[INDEX_PAGE]);
    router.register(module);

    assert_eq!(router.start(), 1);
    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0.reason, NavReason::Initial);
    assert_eq!(seen[0].1.as_deref(), Some(INITIAL_MARKUP));
}

#[tokio::test(start_paused = true)]
async fn exactly_one_notification_per_successful_swap() {
    let fetcher = site_fetcher().with_response(MESSAGE_PAGE, 404, "");
    let router = router_at("/index.html", fetcher);
    let count = Rc::new(RefCell::new(0usize));
    let sink = count.clone();
    router.subscribe(move |_| *sink.borrow_mut() += 1);

    let (completed, dropped) = tokio::join!(
        router.navigate_to(MEMORIES_PAGE),
        router.navigate_to(QUESTIONS_PAGE)
    );
    assert!(completed.is_completed());
    assert_eq!(dropped, NavigationOutcome::Dropped);
    assert_eq!(router.navigate_to(MEMORIES_PAGE).await, NavigationOutcome::SamePage);
    assert_eq!(
        router.navigate_to(MESSAGE_PAGE).await,
        NavigationOutcome::FullReload(PageId::new(MESSAGE_PAGE))
    );
    assert!(router.navigate_to(QUESTIONS_PAGE).await.is_completed());

    assert_eq!(*count.borrow(), 2);
}

#[tokio::test(start_paused = true)]
async fn listeners_see_the_final_content_of_the_new_page() {
    let router = router_at("/index.html", site_fetcher());
    let (module, seen) = recorder(&[MEMORIES_PAGE, QUESTIONS_PAGE]);
    router.register(module);

    router.navigate_to(MEMORIES_PAGE).await;
    router.navigate_to(INDEX_PAGE).await;
    router.navigate_to(QUESTIONS_PAGE).await;

    let seen = seen.borrow();
    let pages: Vec<_> = seen.iter().map(|(event, _)| event.page.clone()).collect();
    assert_eq!(
        pages,
        vec![PageId::new(MEMORIES_PAGE), PageId::new(QUESTIONS_PAGE)]
    );
    assert_eq!(seen[0].1, Some(body_for(MEMORIES_PAGE)));
    assert_eq!(seen[1].1, Some(body_for(QUESTIONS_PAGE)));
}

#[tokio::test(start_paused = true)]
async fn unsubscribed_modules_stop_hearing_navigations() {
    let router = router_at("/index.html", site_fetcher());
    let (module, seen) = recorder(&[MEMORIES_PAGE]);
    let id = router.register(module);

    router.navigate_to(MEMORIES_PAGE).await;
    assert!(router.unsubscribe(id));
    router.navigate_to(INDEX_PAGE).await;
    router.navigate_to(MEMORIES_PAGE).await;

    assert_eq!(seen.borrow().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn one_shot_observer_unsubscribes_itself_while_notified() {
    let router = Rc::new(router_at("/index.html", site_fetcher()));
    let own_id: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
    let one_shot_calls = Rc::new(Cell::new(0usize));
    let steady_calls = Rc::new(Cell::new(0usize));

    let handle = Rc::downgrade(&router);
    let (slot, calls) = (own_id.clone(), one_shot_calls.clone());
    let id = router.subscribe(move |_| {
        calls.set(calls.get() + 1);
        if let (Some(router), Some(id)) = (handle.upgrade(), slot.get()) {
            assert!(router.unsubscribe(id));
        }
    });
    own_id.set(Some(id));
    let calls = steady_calls.clone();
    router.subscribe(move |_| calls.set(calls.get() + 1));

    assert!(router.navigate_to(MEMORIES_PAGE).await.is_completed());
    assert!(router.navigate_to(INDEX_PAGE).await.is_completed());

    assert_eq!(one_shot_calls.get(), 1);
    assert_eq!(steady_calls.get(), 2);
    assert!(!router.unsubscribe(id));
}

#[tokio::test(start_paused = true)]
async fn listener_removed_earlier_in_the_round_is_skipped() {
    let router = Rc::new(router_at("/index.html", site_fetcher()));
    let victim: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
    let victim_calls = Rc::new(Cell::new(0usize));

    let handle = Rc::downgrade(&router);
    let slot = victim.clone();
    let delivered_first = router.subscribe(move |_| {
        if let (Some(router), Some(id)) = (handle.upgrade(), slot.get()) {
            router.unsubscribe(id);
        }
    });
    let calls = victim_calls.clone();
    victim.set(Some(router.subscribe(move |_| calls.set(calls.get() + 1))));

    assert!(router.navigate_to(MEMORIES_PAGE).await.is_completed());

    assert_eq!(victim_calls.get(), 0);
    assert!(router.unsubscribe(delivered_first));
}

#[tokio::test(start_paused = true)]
async fn keys_reach_only_the_current_pages_modules() {
    let router = router_at("/index.html", site_fetcher());
    let (module, _seen) = recorder(&[MEMORIES_PAGE]);
    router.register(module);

    assert!(!router.handle_key(&KeyInput::Enter));
    router.navigate_to(MEMORIES_PAGE).await;
    assert!(router.handle_key(&KeyInput::Enter));
    assert!(!router.handle_key(&KeyInput::Escape));
}

#[tokio::test(start_paused = true)]
async fn gift_box_opens_once_and_records_the_surprise() {
    let router = router_at("/index.html", site_fetcher());
    let pages = SitePages::new(Vec::new());
    pages.register_all(&router);
    router.start();

    assert!(router.navigate_to(SURPRISE_PAGE).await.is_completed());
    assert!(!router.store().surprise_seen());

    let first = pages.surprise.borrow_mut().open_gift(router.store());
    let second = pages.surprise.borrow_mut().open_gift(router.store());

    assert_eq!(first, Some(Celebration { first_time: true }));
    assert_eq!(second, None);
    assert!(router.store().surprise_seen());
    assert!(router.handle_key(&KeyInput::Escape));
}
