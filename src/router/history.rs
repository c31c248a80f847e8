use crate::route::PageId;

/// The browser session history as seen by the router.
pub trait BrowserHistory {
    /// Path of the entry the browser currently shows.
    fn current_path(&self) -> String;

    /// Adds an entry for `page` after the current one, dropping forward entries.
    fn push(&mut self, page: &PageId);
}

/// Session history held in memory. `back`/`forward` move the cursor the way
/// the browser buttons do; the host then reports the move to the router.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            entries: vec![initial_path.into()],
            index: 0,
        }
    }

    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl BrowserHistory for MemoryHistory {
    fn current_path(&self) -> String {
        self.entries[self.index].clone()
    }

    fn push(&mut self, page: &PageId) {
        self.entries.truncate(self.index + 1);
        self.entries.push(page.as_str().to_string());
        self.index = self.entries.len() - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{BrowserHistory, MemoryHistory};
    use crate::route::PageId;

    #[test]
    fn push_after_back_drops_forward_entries() {
        let mut history = MemoryHistory::new("/index.html");
        history.push(&PageId::new("memories.html"));
        history.push(&PageId::new("message.html"));
        assert_eq!(history.len(), 3);

        assert!(history.back());
        assert_eq!(history.current_path(), "memories.html");

        history.push(&PageId::new("surprise.html"));
        assert_eq!(
            history.entries(),
            ["/index.html", "memories.html", "surprise.html"]
        );
        assert!(!history.forward());
    }

    #[test]
    fn back_and_forward_stop_at_the_ends() {
        let mut history = MemoryHistory::new("/");
        assert!(!history.back());
        history.push(&PageId::new("questions.html"));
        assert!(history.back());
        assert!(!history.back());
        assert!(history.forward());
        assert!(!history.forward());
        assert_eq!(history.index(), 1);
    }
}
