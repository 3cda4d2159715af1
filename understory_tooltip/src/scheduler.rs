// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction scheduler: the open/close state machine of one tooltip.
//!
//! ## Inputs and outputs
//!
//! Every input method takes the host's current time and returns the [`Transition`] it
//! produced, if any. A transition is emitted only when the effective open state would
//! change, so a hover-enter on an open tooltip or an Escape on a closed one is silent.
//!
//! Delayed work goes through [`Timers`]: the host calls [`Scheduler::advance`] when
//! [`Scheduler::next_deadline`] passes, or [`Scheduler::fire`] with the handle of a native
//! timer it armed.
//!
//! ## Controlled mode
//!
//! With [`Scheduler::set_controlled_open`] the owner decides what is visible. Triggers
//! still schedule and still emit transitions, but they never change [`Scheduler::is_open`].
//!
//! ## Touch
//!
//! A touch press arms a long-press timer; releasing before it fires cancels it. Releasing
//! after a touch opened the tooltip arms the auto-close timer. Browsers follow a touch with
//! emulated pointer events, so hover-enter is ignored from touch-start until shortly after
//! the next close.
//!
//! ## Minimal example
//!
//! ```
//! use understory_tooltip::config::TooltipConfig;
//! use understory_tooltip::hysteresis::Hysteresis;
//! use understory_tooltip::scheduler::Scheduler;
//! use understory_tooltip::types::Direction;
//!
//! let mut s = Scheduler::new(&TooltipConfig::default().enter_delay(300), Hysteresis::new());
//! assert_eq!(s.on_hover_enter(0), None);
//! assert_eq!(s.next_deadline(), Some(300));
//! let t = s.advance(300).unwrap();
//! assert_eq!(t.direction, Direction::Open);
//! assert!(s.is_open());
//! ```

use crate::config::{Delays, TooltipConfig, TriggerSources};
use crate::hysteresis::Hysteresis;
use crate::timer::{PendingKind, ScheduleEntry, TimerHandle, Timers};
use crate::types::{Direction, InteractionState, Millis, Transition, TriggerSource};

/// How long hover stays ignored after a touch-driven close.
pub const TOUCH_EMULATION_WINDOW: Millis = 150;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TouchSuppression {
    Off,
    Active,
    Until(Millis),
}

/// Open/close state machine for one tooltip.
#[derive(Debug)]
pub struct Scheduler {
    delays: Delays,
    triggers: TriggerSources,
    interactive: bool,
    timers: Timers,
    uncontrolled_open: bool,
    controlled: Option<bool>,
    has_content: bool,
    disabled: bool,
    mounted: bool,
    focus_visible: bool,
    touch: TouchSuppression,
    hysteresis: Hysteresis,
    holds_hysteresis: bool,
    last_seen: Millis,
}

impl Scheduler {
    /// Create a mounted scheduler from `config`, sharing `hysteresis` with its class.
    pub fn new(config: &TooltipConfig, hysteresis: Hysteresis) -> Self {
        let mut s = Self {
            delays: config.delays,
            triggers: config.triggers,
            interactive: config.is_interactive(),
            timers: Timers::new(),
            uncontrolled_open: config.default_open,
            controlled: config.open,
            has_content: true,
            disabled: config.disabled,
            mounted: true,
            focus_visible: false,
            touch: TouchSuppression::Off,
            hysteresis,
            holds_hysteresis: false,
            last_seen: 0,
        };
        s.sync_hysteresis(0);
        s
    }

    /// Effective visible state: mounted, has content, and open (controlled or not).
    pub fn is_open(&self) -> bool {
        self.mounted && self.has_content && self.controlled.unwrap_or(self.uncontrolled_open)
    }

    /// True when the owner controls the open state.
    pub fn is_controlled(&self) -> bool {
        self.controlled.is_some()
    }

    /// True until [`Scheduler::unmount`].
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True when scheduling is suppressed.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Observable state, ignoring measurement (see the facade for `OpenMeasuring`).
    pub fn state(&self) -> InteractionState {
        if self.is_open() {
            if self.timers.pending(Direction::Close).is_some() {
                InteractionState::CloseScheduled
            } else {
                InteractionState::Open
            }
        } else if self.timers.pending(Direction::Open).is_some() {
            InteractionState::OpenScheduled
        } else {
            InteractionState::Closed
        }
    }

    /// Configured delays.
    pub fn delays(&self) -> Delays {
        self.delays
    }

    /// The shared hysteresis window.
    pub fn hysteresis(&self) -> &Hysteresis {
        &self.hysteresis
    }

    /// Pending timer in `direction`, if any.
    pub fn pending(&self, direction: Direction) -> Option<&ScheduleEntry> {
        self.timers.pending(direction)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Ask to open after `delay` milliseconds (zero opens now).
    ///
    /// Ignored when unmounted, disabled, or without content. On an already open tooltip this
    /// only cancels a pending close.
    pub fn request_open(
        &mut self,
        source: TriggerSource,
        delay: Millis,
        now: Millis,
    ) -> Option<Transition> {
        self.seen(now);
        if !self.mounted || self.disabled || !self.has_content {
            return None;
        }
        if self.is_open() {
            self.cancel_all();
            return None;
        }
        if delay == 0 {
            self.cancel_all();
            return self.open_now(source, now);
        }
        self.arm(PendingKind::for_source(source, Direction::Open), source, now, delay);
        None
    }

    /// Ask to close after `delay` milliseconds (zero closes now).
    ///
    /// On a tooltip that is not open this only cancels a pending open.
    pub fn request_close(
        &mut self,
        source: TriggerSource,
        delay: Millis,
        now: Millis,
    ) -> Option<Transition> {
        self.seen(now);
        if !self.is_open() {
            self.cancel(Direction::Open);
            return None;
        }
        if delay == 0 {
            self.cancel_all();
            return self.close_now(source, now);
        }
        self.arm(PendingKind::for_source(source, Direction::Close), source, now, delay);
        None
    }

    /// Pointer entered the anchor.
    pub fn on_hover_enter(&mut self, now: Millis) -> Option<Transition> {
        if !self.triggers.contains(TriggerSources::HOVER) || self.touch_suppressed(now) {
            return None;
        }
        let delay = self.enter_delay(now);
        self.request_open(TriggerSource::Hover, delay, now)
    }

    /// Pointer left the anchor.
    pub fn on_hover_leave(&mut self, now: Millis) -> Option<Transition> {
        if !self.triggers.contains(TriggerSources::HOVER) {
            return None;
        }
        self.request_close(TriggerSource::Hover, self.delays.leave, now)
    }

    /// Anchor gained focus. Only focus-visible (keyboard) focus opens.
    pub fn on_focus(&mut self, focus_visible: bool, now: Millis) -> Option<Transition> {
        self.focus_visible = focus_visible;
        if !focus_visible || !self.triggers.contains(TriggerSources::FOCUS) {
            return None;
        }
        let delay = self.enter_delay(now);
        self.request_open(TriggerSource::Focus, delay, now)
    }

    /// Anchor lost focus. Closes only if the focus that preceded it was focus-visible.
    pub fn on_blur(&mut self, now: Millis) -> Option<Transition> {
        let was_visible = core::mem::replace(&mut self.focus_visible, false);
        if !was_visible || !self.triggers.contains(TriggerSources::FOCUS) {
            return None;
        }
        self.request_close(TriggerSource::Focus, self.delays.leave, now)
    }

    /// Touch pressed on the anchor: start the long press.
    pub fn on_touch_start(&mut self, now: Millis) -> Option<Transition> {
        if !self.triggers.contains(TriggerSources::TOUCH) {
            return None;
        }
        self.touch = TouchSuppression::Active;
        if self.is_open() {
            self.cancel(Direction::Close);
            return None;
        }
        self.request_open(TriggerSource::Touch, self.delays.enter_touch, now)
    }

    /// Touch released or cancelled.
    ///
    /// Before the long press completes this cancels it with no other effect. After a touch
    /// opened the tooltip it arms the auto-close. A release that leaves the tooltip closed
    /// still lets hover back in after [`TOUCH_EMULATION_WINDOW`].
    pub fn on_touch_end(&mut self, now: Millis) -> Option<Transition> {
        if !self.triggers.contains(TriggerSources::TOUCH) {
            return None;
        }
        self.seen(now);
        if self
            .timers
            .pending(Direction::Open)
            .is_some_and(|e| e.kind == PendingKind::EnterTouch)
        {
            self.cancel(Direction::Open);
            self.release_touch(now);
            return None;
        }
        if !self.is_open() {
            self.release_touch(now);
            return None;
        }
        self.request_close(TriggerSource::Touch, self.delays.leave_touch, now)
    }

    /// Pointer entered the overlay surface. Keeps an interactive tooltip open.
    pub fn on_surface_enter(&mut self, _now: Millis) -> Option<Transition> {
        if self.interactive && self.is_open() {
            self.cancel(Direction::Close);
        }
        None
    }

    /// Pointer left the overlay surface of an interactive tooltip.
    pub fn on_surface_leave(&mut self, now: Millis) -> Option<Transition> {
        if !self.interactive {
            return None;
        }
        self.request_close(TriggerSource::Surface, self.delays.leave, now)
    }

    /// Escape: close now, whatever is pending.
    pub fn on_escape(&mut self, now: Millis) -> Option<Transition> {
        self.dismiss_now(TriggerSource::Escape, now)
    }

    /// Platform dismiss request (back gesture, close request): same as Escape.
    pub fn on_dismiss_request(&mut self, now: Millis) -> Option<Transition> {
        self.dismiss_now(TriggerSource::Dismiss, now)
    }

    /// Press outside the overlay: close after the leave delay.
    pub fn on_outside_press(&mut self, now: Millis) -> Option<Transition> {
        self.request_close(TriggerSource::OutsidePress, self.delays.leave, now)
    }

    /// Fire whichever pending timer is due at `now`.
    pub fn advance(&mut self, now: Millis) -> Option<Transition> {
        self.seen(now);
        let entry = self.timers.take_due(now)?;
        self.fire_entry(entry, now)
    }

    /// Fire the timer behind `handle` regardless of its deadline.
    ///
    /// Stale handles are ignored, so a native timer that outlives a cancel or an unmount is
    /// harmless.
    pub fn fire(&mut self, handle: TimerHandle, now: Millis) -> Option<Transition> {
        self.seen(now);
        let entry = self.timers.take(handle)?;
        self.fire_entry(entry, now)
    }

    /// Hand the open state to the owner (`Some`) or take it back (`None`).
    ///
    /// A controlled close cancels everything pending.
    pub fn set_controlled_open(&mut self, open: Option<bool>, now: Millis) {
        self.controlled = open;
        if open == Some(false) {
            self.cancel_all();
        }
        self.sync_hysteresis(now);
    }

    /// Enable or disable scheduling. Disabling cancels timers and closes.
    pub fn set_disabled(&mut self, disabled: bool, now: Millis) -> Option<Transition> {
        self.disabled = disabled;
        if !disabled {
            return None;
        }
        self.dismiss_now(TriggerSource::Programmatic, now)
    }

    /// Whether there is anything to show. Without content the tooltip never opens.
    pub fn set_has_content(&mut self, has_content: bool, now: Millis) {
        self.has_content = has_content;
        if !has_content {
            self.cancel_all();
        }
        self.sync_hysteresis(now);
    }

    /// The anchor went away: cancel everything and close.
    pub fn detach_anchor(&mut self, now: Millis) -> Option<Transition> {
        self.dismiss_now(TriggerSource::Programmatic, now)
    }

    /// Tear down: cancel every timer and release the hysteresis window.
    ///
    /// Every later input is a no-op.
    pub fn unmount(&mut self, now: Millis) {
        self.cancel_all();
        self.mounted = false;
        self.sync_hysteresis(now);
        #[cfg(feature = "tracing")]
        tracing::debug!(now, "tooltip scheduler unmounted");
    }

    fn enter_delay(&self, now: Millis) -> Millis {
        if self.hysteresis.is_active(now) {
            #[cfg(feature = "tracing")]
            tracing::trace!(now, "hysteresis active, skipping enter delay");
            0
        } else {
            self.delays.enter
        }
    }

    fn touch_suppressed(&self, now: Millis) -> bool {
        match self.touch {
            TouchSuppression::Off => false,
            TouchSuppression::Active => true,
            TouchSuppression::Until(t) => now < t,
        }
    }

    fn dismiss_now(&mut self, source: TriggerSource, now: Millis) -> Option<Transition> {
        self.seen(now);
        self.cancel_all();
        if !self.is_open() {
            return None;
        }
        self.close_now(source, now)
    }

    fn fire_entry(&mut self, entry: ScheduleEntry, now: Millis) -> Option<Transition> {
        #[cfg(feature = "tracing")]
        tracing::debug!(kind = ?entry.kind, deadline = entry.deadline, now, "timer fired");
        match entry.kind.direction() {
            Direction::Open => {
                if !self.mounted || self.disabled || !self.has_content {
                    return None;
                }
                self.open_now(entry.source, now)
            }
            Direction::Close => self.close_now(entry.source, now),
        }
    }

    fn open_now(&mut self, source: TriggerSource, now: Millis) -> Option<Transition> {
        let was_open = self.is_open();
        if !self.is_controlled() {
            self.uncontrolled_open = true;
        }
        self.sync_hysteresis(now);
        if was_open {
            return None;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?source, now, controlled = self.is_controlled(), "tooltip open");
        Some(Transition::open(source, now))
    }

    fn close_now(&mut self, source: TriggerSource, now: Millis) -> Option<Transition> {
        let was_open = self.is_open();
        if !self.is_controlled() {
            self.uncontrolled_open = false;
        }
        self.release_touch(now);
        self.sync_hysteresis(now);
        if !was_open {
            return None;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?source, now, controlled = self.is_controlled(), "tooltip close");
        Some(Transition::close(source, now))
    }

    fn release_touch(&mut self, now: Millis) {
        if self.touch == TouchSuppression::Active {
            self.touch = TouchSuppression::Until(now.saturating_add(TOUCH_EMULATION_WINDOW));
        }
    }

    fn seen(&mut self, now: Millis) {
        self.last_seen = self.last_seen.max(now);
    }

    fn sync_hysteresis(&mut self, now: Millis) {
        self.seen(now);
        let visible = self.is_open();
        if visible && !self.holds_hysteresis {
            self.hysteresis.note_open();
            self.holds_hysteresis = true;
        } else if !visible && self.holds_hysteresis {
            self.hysteresis.note_close(now, self.delays.leave);
            self.holds_hysteresis = false;
        }
    }

    fn arm(&mut self, kind: PendingKind, source: TriggerSource, now: Millis, delay: Millis) {
        let _handle = self.timers.arm(kind, source, now, delay);
        #[cfg(feature = "tracing")]
        tracing::trace!(?kind, ?_handle, deadline = now.saturating_add(delay), "timer armed");
    }

    fn cancel(&mut self, direction: Direction) {
        let _cleared = self.timers.clear(direction);
        #[cfg(feature = "tracing")]
        if let Some(e) = _cleared {
            tracing::trace!(kind = ?e.kind, "timer cancelled");
        }
    }

    fn cancel_all(&mut self) {
        self.cancel(Direction::Open);
        self.cancel(Direction::Close);
    }
}

// A scheduler dropped while visible still hands the window back, timed from its last input.
impl Drop for Scheduler {
    fn drop(&mut self) {
        if self.holds_hysteresis {
            self.hysteresis.note_close(self.last_seen, self.delays.leave);
            self.holds_hysteresis = false;
        }
    }
}
