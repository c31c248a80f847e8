use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical, filename-like name of a logical page (`"love-story.html"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Final path segment of `path` with any query or fragment dropped.
    ///
    /// `"folder/love-story.html"` and `"love-story.html"` resolve to the same id.
    /// Returns `None` when no segment remains (`"/"`, `""`, `"dir/"`).
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segment = path.rsplit('/').next().unwrap_or_default();
        if segment.is_empty() {
            None
        } else {
            Some(Self(segment.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for PageId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PageId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::PageId;

    #[test]
    fn from_path_keeps_only_final_segment() {
        assert_eq!(
            PageId::from_path("folder/love-story.html"),
            PageId::from_path("love-story.html")
        );
        assert_eq!(
            PageId::from_path("/site/pages/message.html?ref=nav#top"),
            Some(PageId::new("message.html"))
        );
    }

    #[test]
    fn from_path_rejects_directory_paths() {
        assert_eq!(PageId::from_path(""), None);
        assert_eq!(PageId::from_path("/"), None);
        assert_eq!(PageId::from_path("pages/"), None);
        assert_eq!(PageId::from_path("?q=1"), None);
    }
}
