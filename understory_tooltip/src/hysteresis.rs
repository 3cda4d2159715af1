// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hysteresis window shared by a class of tooltips.
//!
//! While any tooltip in the class is visible, and for a short window after the last one
//! closes, a new hover or focus request opens immediately instead of waiting for its enter
//! delay. Moving the pointer along a toolbar then shows each tooltip without re-paying the
//! delay.
//!
//! The window is a value owned by a [`TooltipContext`](crate::TooltipContext), not process
//! state. Clones of a [`Hysteresis`] share one window; independent contexts never do.
//! Decay is deadline based: closing records `now + window + leave_delay`, and the window is
//! active while `now` is before that deadline.

use alloc::rc::Rc;
use core::cell::Cell;

use crate::types::Millis;

/// Default length of the window after a close, before `leave_delay` is added.
pub const HYSTERESIS_WINDOW: Millis = 800;

#[derive(Debug)]
struct Window {
    visible: Cell<usize>,
    expires_at: Cell<Option<Millis>>,
    length: Millis,
}

/// Shared handle to one hysteresis window.
#[derive(Clone, Debug)]
pub struct Hysteresis {
    window: Rc<Window>,
}

impl Default for Hysteresis {
    fn default() -> Self {
        Self::new()
    }
}

impl Hysteresis {
    /// Create a window using [`HYSTERESIS_WINDOW`].
    pub fn new() -> Self {
        Self::with_window(HYSTERESIS_WINDOW)
    }

    /// Create a window with a custom base length.
    pub fn with_window(length: Millis) -> Self {
        Self {
            window: Rc::new(Window {
                visible: Cell::new(0),
                expires_at: Cell::new(None),
                length,
            }),
        }
    }

    /// Base window length.
    pub fn length(&self) -> Millis {
        self.window.length
    }

    /// Record that a tooltip of this class became visible.
    pub fn note_open(&self) {
        let w = &self.window;
        w.visible.set(w.visible.get().saturating_add(1));
        w.expires_at.set(None);
    }

    /// Record that a tooltip of this class stopped being visible at `now`.
    ///
    /// Starts the decay once no tooltip of the class is visible any more.
    pub fn note_close(&self, now: Millis, leave_delay: Millis) {
        let w = &self.window;
        let remaining = w.visible.get().saturating_sub(1);
        w.visible.set(remaining);
        if remaining == 0 {
            let expires = now.saturating_add(w.length).saturating_add(leave_delay);
            w.expires_at.set(Some(expires));
        }
    }

    /// True while the next open request should skip its enter delay.
    pub fn is_active(&self, now: Millis) -> bool {
        let w = &self.window;
        w.visible.get() > 0 || w.expires_at.get().is_some_and(|t| now < t)
    }

    /// Forget all state. Called on context teardown.
    pub fn reset(&self) {
        self.window.visible.set(0);
        self.window.expires_at.set(None);
    }

    /// True if `self` and `other` share one window.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.window, &other.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_until_something_opens() {
        let h = Hysteresis::new();
        assert!(!h.is_active(0));
        h.note_open();
        assert!(h.is_active(0));
    }

    // After a close the window lasts `length + leave_delay`.
    #[test]
    fn decays_after_window() {
        let h = Hysteresis::new();
        h.note_open();
        h.note_close(1000, 200);
        assert!(h.is_active(1000));
        assert!(h.is_active(1999));
        assert!(!h.is_active(2000));
    }

    // Decay only starts when the last visible tooltip closes.
    #[test]
    fn stays_active_while_any_visible() {
        let h = Hysteresis::new();
        let other = h.clone();
        h.note_open();
        other.note_open();
        h.note_close(0, 0);
        assert!(other.is_active(5000), "second tooltip still open");
        other.note_close(5000, 0);
        assert!(h.is_active(5799));
        assert!(!h.is_active(5800));
    }

    #[test]
    fn reopen_cancels_decay() {
        let h = Hysteresis::with_window(100);
        h.note_open();
        h.note_close(0, 0);
        h.note_open();
        assert!(h.is_active(10_000));
    }

    #[test]
    fn independent_windows_do_not_share() {
        let a = Hysteresis::new();
        let b = Hysteresis::new();
        a.note_open();
        assert!(!b.is_active(0));
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
    }

    #[test]
    fn reset_clears_everything() {
        let h = Hysteresis::new();
        h.note_open();
        h.reset();
        assert!(!h.is_active(0));
    }
}
