use std::collections::HashSet;

use crate::error::{AppError, AppResult};

use super::PageId;

pub const INDEX_PAGE: &str = "index.html";
pub const LOVE_STORY_PAGE: &str = "love-story.html";
pub const QUESTIONS_PAGE: &str = "questions.html";
pub const MEMORIES_PAGE: &str = "memories.html";
pub const SURPRISE_PAGE: &str = "surprise.html";
pub const MESSAGE_PAGE: &str = "message.html";

const SITE_ROUTES: [(&str, &str); 6] = [
    (INDEX_PAGE, "nav-home"),
    (LOVE_STORY_PAGE, "nav-story"),
    (QUESTIONS_PAGE, "nav-questions"),
    (MEMORIES_PAGE, "nav-memories"),
    (SURPRISE_PAGE, "nav-surprise"),
    (MESSAGE_PAGE, "nav-message"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub page: PageId,
    /// `id` of the nav item highlighted while this route is active.
    pub nav_target: String,
    pub is_default: bool,
}

impl Route {
    pub fn new(page: impl Into<PageId>, nav_target: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            nav_target: nav_target.into(),
            is_default: false,
        }
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// Fixed set of routes, built once at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    default_index: usize,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for route in &routes {
            if !seen.insert(route.page.clone()) {
                return Err(AppError::invalid_argument(format!(
                    "duplicate route: {}",
                    route.page
                )));
            }
        }

        let mut defaults = routes
            .iter()
            .enumerate()
            .filter(|(_, route)| route.is_default)
            .map(|(index, _)| index);
        let Some(default_index) = defaults.next() else {
            return Err(AppError::invalid_argument(
                "route table needs exactly one default route",
            ));
        };
        if defaults.next().is_some() {
            return Err(AppError::invalid_argument(
                "route table needs exactly one default route",
            ));
        }

        Ok(Self {
            routes,
            default_index,
        })
    }

    /// The six pages of the greeting site, landing on `index.html`.
    pub fn site() -> Self {
        let routes = SITE_ROUTES
            .iter()
            .map(|(page, nav)| {
                let route = Route::new(*page, *nav);
                if *page == INDEX_PAGE {
                    route.as_default()
                } else {
                    route
                }
            })
            .collect();
        Self {
            routes,
            default_index: 0,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn default_page(&self) -> &PageId {
        &self.routes[self.default_index].page
    }

    pub fn get(&self, page: &PageId) -> Option<&Route> {
        self.routes.iter().find(|route| &route.page == page)
    }

    pub fn contains(&self, page: &PageId) -> bool {
        self.get(page).is_some()
    }

    /// Nav item to highlight for `page`; unmapped pages get no highlight.
    pub fn nav_target(&self, page: &PageId) -> Option<&str> {
        self.get(page).map(|route| route.nav_target.as_str())
    }

    /// Page shown for a location path; an empty final segment means the landing page.
    pub fn resolve_location(&self, path: &str) -> PageId {
        PageId::from_path(path).unwrap_or_else(|| self.default_page().clone())
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::site()
    }
}
