use crate::route::PageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Transitioning,
}

/// Mutable navigation record owned by one router instance.
#[derive(Debug, Clone)]
pub struct NavSession {
    current_page: PageId,
    phase: TransitionPhase,
    pending_history_sync: bool,
}

impl NavSession {
    pub fn new(current_page: PageId) -> Self {
        Self {
            current_page,
            phase: TransitionPhase::Idle,
            pending_history_sync: false,
        }
    }

    pub fn current_page(&self) -> &PageId {
        &self.current_page
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase == TransitionPhase::Transitioning
    }

    /// Enters `Transitioning`. Returns false when a transition is already in flight.
    pub fn begin_transition(&mut self) -> bool {
        if self.is_transitioning() {
            return false;
        }
        self.phase = TransitionPhase::Transitioning;
        true
    }

    pub fn finish_transition(&mut self) {
        self.phase = TransitionPhase::Idle;
    }

    pub fn record_swap(&mut self, page: PageId) {
        self.current_page = page;
    }

    /// Remembers a back/forward move that arrived mid-transition.
    pub fn defer_history_sync(&mut self) {
        self.pending_history_sync = true;
    }

    /// True while a deferred back/forward move waits for reconciliation. The
    /// history cursor then no longer points at the entry the transition
    /// started from.
    pub fn has_pending_history_sync(&self) -> bool {
        self.pending_history_sync
    }

    pub fn take_pending_history_sync(&mut self) -> bool {
        std::mem::take(&mut self.pending_history_sync)
    }
}
