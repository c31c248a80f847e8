use std::collections::BTreeSet;

use crate::error::{AppError, AppResult};
use crate::route::{PageId, RouteTable};

/// Presentation classes toggled on the content region during a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentClass {
    Visible,
    FadeIn,
    FadeOut,
}

impl ContentClass {
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::FadeIn => "fade-in",
            Self::FadeOut => "fade-out",
        }
    }
}

/// The parts of the live document the router touches. Everything outside the
/// content region (nav chrome, audio control) belongs to the host.
pub trait DocumentSurface {
    fn has_content_region(&self) -> bool;

    fn add_content_class(&mut self, class: ContentClass);

    fn remove_content_class(&mut self, class: ContentClass);

    fn content_markup(&self) -> Option<String>;

    fn replace_content(&mut self, inner_markup: &str) -> AppResult<()>;

    /// Marks `nav_target` active and every other nav item inactive.
    fn set_active_nav(&mut self, nav_target: Option<&str>);

    fn scroll_to_top(&mut self);

    /// Full, non-animated browser navigation. Abandons the in-page session.
    fn assign_location(&mut self, page: &PageId);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ContentRegion {
    markup: String,
    classes: BTreeSet<ContentClass>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: String,
    pub active: bool,
}

/// Headless document used by the driver binary and tests.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    region: Option<ContentRegion>,
    nav_items: Vec<NavItem>,
    scroll_y: u32,
    assigned_location: Option<PageId>,
    swap_count: usize,
}

impl MemoryDocument {
    pub fn new(initial_markup: impl Into<String>, nav_ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            region: Some(ContentRegion {
                markup: initial_markup.into(),
                classes: BTreeSet::new(),
            }),
            nav_items: nav_ids
                .into_iter()
                .map(|id| NavItem { id, active: false })
                .collect(),
            scroll_y: 0,
            assigned_location: None,
            swap_count: 0,
        }
    }

    /// Document with one nav item per route of `routes`.
    pub fn for_routes(initial_markup: impl Into<String>, routes: &RouteTable) -> Self {
        Self::new(
            initial_markup,
            routes.routes().iter().map(|route| route.nav_target.clone()),
        )
    }

    /// Document whose markup lacks a content region entirely.
    pub fn without_content_region(routes: &RouteTable) -> Self {
        let mut document = Self::for_routes("", routes);
        document.region = None;
        document
    }

    pub fn has_class(&self, class: ContentClass) -> bool {
        self.region
            .as_ref()
            .is_some_and(|region| region.classes.contains(&class))
    }

    pub fn classes(&self) -> Vec<ContentClass> {
        self.region
            .as_ref()
            .map(|region| region.classes.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn active_nav(&self) -> Option<&str> {
        self.nav_items
            .iter()
            .find(|item| item.active)
            .map(|item| item.id.as_str())
    }

    pub fn nav_items(&self) -> &[NavItem] {
        &self.nav_items
    }

    pub fn scroll_y(&self) -> u32 {
        self.scroll_y
    }

    pub fn scroll_to(&mut self, y: u32) {
        self.scroll_y = y;
    }

    pub fn assigned_location(&self) -> Option<&PageId> {
        self.assigned_location.as_ref()
    }

    pub fn swap_count(&self) -> usize {
        self.swap_count
    }
}

impl DocumentSurface for MemoryDocument {
    fn has_content_region(&self) -> bool {
        self.region.is_some()
    }

    fn add_content_class(&mut self, class: ContentClass) {
        if let Some(region) = self.region.as_mut() {
            region.classes.insert(class);
        }
    }

    fn remove_content_class(&mut self, class: ContentClass) {
        if let Some(region) = self.region.as_mut() {
            region.classes.remove(&class);
        }
    }

    fn content_markup(&self) -> Option<String> {
        self.region.as_ref().map(|region| region.markup.clone())
    }

    fn replace_content(&mut self, inner_markup: &str) -> AppResult<()> {
        let Some(region) = self.region.as_mut() else {
            return Err(AppError::invalid_argument(
                "live document has no content region",
            ));
        };
        region.markup = inner_markup.to_string();
        self.swap_count += 1;
        Ok(())
    }

    fn set_active_nav(&mut self, nav_target: Option<&str>) {
        for item in &mut self.nav_items {
            item.active = Some(item.id.as_str()) == nav_target;
        }
    }

    fn scroll_to_top(&mut self) {
        self.scroll_y = 0;
    }

    fn assign_location(&mut self, page: &PageId) {
        self.assigned_location = Some(page.clone());
    }
}
