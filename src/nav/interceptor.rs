use crate::event::NavReason;
use crate::route::PageId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAttrs {
    pub href: Option<String>,
    pub target: Option<String>,
    pub download: bool,
}

impl LinkAttrs {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::default()
        }
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn download(mut self) -> Self {
        self.download = true;
        self
    }

    fn opens_new_context(&self) -> bool {
        self.target
            .as_deref()
            .map(str::trim)
            .is_some_and(|target| !target.is_empty() && !target.eq_ignore_ascii_case("_self"))
    }
}

/// One element on the path from the click target out to the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickElement {
    Link(LinkAttrs),
    /// Nav item with a declared `data-page`.
    NavButton { page: Option<String> },
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyHref,
    External,
    Fragment,
    MailTo,
    NewContext,
    Download,
    MissingPage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickDecision {
    /// Internal page: the router takes over.
    Navigate { page: PageId, via: NavReason },
    /// Internal link to the page already shown.
    SamePage(PageId),
    /// Left to the browser.
    Ignore(IgnoreReason),
    /// No link or nav button on the path.
    NotNavigation,
}

impl ClickDecision {
    /// Whether the browser's default navigation must be suppressed.
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::Navigate { .. } | Self::SamePage(_))
    }
}

/// Classifies a click given the element path, innermost first.
pub fn classify_click(path: &[ClickElement], current: &PageId) -> ClickDecision {
    let Some(element) = path
        .iter()
        .find(|element| !matches!(element, ClickElement::Other))
    else {
        return ClickDecision::NotNavigation;
    };

    let (page, via) = match element {
        ClickElement::Link(link) => match link_page(link) {
            Ok(page) => (page, NavReason::Link),
            Err(reason) => return ClickDecision::Ignore(reason),
        },
        ClickElement::NavButton { page } => {
            match page.as_deref().map(str::trim).filter(|page| !page.is_empty()) {
                Some(page) => (PageId::new(page), NavReason::NavButton),
                None => return ClickDecision::Ignore(IgnoreReason::MissingPage),
            }
        }
        ClickElement::Other => return ClickDecision::NotNavigation,
    };

    if &page == current {
        ClickDecision::SamePage(page)
    } else {
        ClickDecision::Navigate { page, via }
    }
}

fn link_page(link: &LinkAttrs) -> Result<PageId, IgnoreReason> {
    let href = link.href.as_deref().map(str::trim).unwrap_or_default();
    if href.is_empty() {
        return Err(IgnoreReason::EmptyHref);
    }
    if href.starts_with('#') {
        return Err(IgnoreReason::Fragment);
    }
    if let Some(scheme) = scheme_of(href) {
        if scheme.eq_ignore_ascii_case("mailto") || scheme.eq_ignore_ascii_case("tel") {
            return Err(IgnoreReason::MailTo);
        }
        return Err(IgnoreReason::External);
    }
    if href.starts_with("//") {
        return Err(IgnoreReason::External);
    }
    if link.opens_new_context() {
        return Err(IgnoreReason::NewContext);
    }
    if link.download {
        return Err(IgnoreReason::Download);
    }
    PageId::from_path(href).ok_or(IgnoreReason::EmptyHref)
}

/// URL scheme per RFC 3986: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`.
fn scheme_of(href: &str) -> Option<&str> {
    let colon = href.find(':')?;
    let scheme = &href[..colon];
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    chars
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        .then_some(scheme)
}
