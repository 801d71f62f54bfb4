/// Guards shared by the drag engine and the transition controller.
///
/// Owned by one gallery instance; nothing here is process-wide.
#[derive(Debug, Default)]
pub struct InteractionLock {
    transition: bool,
    scroll_locked: bool,
}

impl InteractionLock {
    /// Claim the single transition slot. False when a session already holds it.
    pub fn try_acquire_transition(&mut self) -> bool {
        if self.transition {
            return false;
        }
        self.transition = true;
        true
    }

    pub fn release_transition(&mut self) {
        self.transition = false;
    }

    #[inline]
    pub fn transition_in_progress(&self) -> bool {
        self.transition
    }

    /// Returns true when the lock state changed.
    pub fn lock_scroll(&mut self) -> bool {
        if self.scroll_locked {
            return false;
        }
        self.scroll_locked = true;
        log::debug!("[lock] background scroll locked");
        true
    }

    /// Unlock unless a drag still owns the pointer.
    pub fn unlock_scroll(&mut self, drag_active: bool) -> bool {
        if !self.scroll_locked || drag_active {
            return false;
        }
        self.scroll_locked = false;
        log::debug!("[lock] background scroll unlocked");
        true
    }

    /// Teardown path: drop both guards regardless of state.
    pub fn release_all(&mut self) {
        self.transition = false;
        self.scroll_locked = false;
    }

    #[inline]
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}
