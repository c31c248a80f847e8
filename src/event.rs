use crate::route::PageId;

/// Describes *why* a page became active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavReason {
    /// First page of the document, shown without a transition.
    Initial,
    /// In-page hyperlink.
    Link,
    /// Bottom-nav button carrying a declared page.
    NavButton,
    /// Direct call from a page module or host code.
    Programmatic,
    /// Browser back/forward.
    History,
}

/// Raised once after every successful content swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLoaded {
    pub page: PageId,
    pub reason: NavReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Escape,
    Enter,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl KeyInput {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            other => Self::Other(other.to_string()),
        }
    }
}
