use std::rc::Rc;

use crate::config::RouterConfig;
use crate::document::MemoryDocument;
use crate::route::{
    INDEX_PAGE, LOVE_STORY_PAGE, MEMORIES_PAGE, MESSAGE_PAGE, QUESTIONS_PAGE, RouteTable,
    SURPRISE_PAGE,
};
use crate::store::Store;

use super::{MemoryFetcher, MemoryHistory, Router};

mod notifications;

type TestRouter = Router<MemoryDocument, MemoryFetcher, MemoryHistory>;

const INITIAL_MARKUP: &str = "<h1>initial</h1>";

fn page_markup(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body>
  <nav class="bottom-nav"><a class="nav-item" id="nav-home" data-page="index.html">Home</a></nav>
  <main id="page-content" class="page">{body}</main>
</body>
</html>"#
    )
}

fn body_for(page: &str) -> String {
    format!("<h1>{page}</h1>")
}

/// Every site page, each with a distinct body.
fn site_fetcher() -> MemoryFetcher {
    [
        INDEX_PAGE,
        LOVE_STORY_PAGE,
        QUESTIONS_PAGE,
        MEMORIES_PAGE,
        SURPRISE_PAGE,
        MESSAGE_PAGE,
    ]
    .into_iter()
    .fold(MemoryFetcher::new(), |fetcher, page| {
        fetcher.with_page(page, page_markup(&body_for(page)))
    })
}

fn router_with(document: MemoryDocument, fetcher: MemoryFetcher, location: &str) -> TestRouter {
    Router::new(
        RouterConfig::default(),
        RouteTable::site(),
        Rc::new(Store::in_memory()),
        document,
        fetcher,
        MemoryHistory::new(location),
    )
}

fn router_at(location: &str, fetcher: MemoryFetcher) -> TestRouter {
    let document = MemoryDocument::for_routes(INITIAL_MARKUP, &RouteTable::site());
    router_with(document, fetcher, location)
}
