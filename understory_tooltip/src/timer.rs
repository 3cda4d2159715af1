// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellable deadline timers with generational handles.
//!
//! ## Semantics
//!
//! - There is one slot per [`Direction`]. Arming a slot clears whatever it held
//!   (clear-before-set) and also clears the opposite slot, so open and close are never
//!   pending at the same time.
//! - Every arm bumps a generation counter and returns a fresh [`TimerHandle`]. A handle
//!   whose entry was cleared or superseded is stale: [`Timers::take`] ignores it.
//! - Nothing here sleeps. Hosts either poll [`Timers::take_due`] with the current time or
//!   map [`Timers::next_deadline`] onto one event-loop wakeup.

use crate::types::{Direction, Millis, TriggerSource};

/// Kind of a pending timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PendingKind {
    /// Open after the hover/focus enter delay.
    EnterHover,
    /// Open after a long press.
    EnterTouch,
    /// Close after the hover/focus leave delay.
    LeaveHover,
    /// Close a touch-opened overlay after the touch leave delay.
    LeaveTouch,
}

impl PendingKind {
    /// Direction this timer moves the overlay in.
    pub const fn direction(self) -> Direction {
        match self {
            Self::EnterHover | Self::EnterTouch => Direction::Open,
            Self::LeaveHover | Self::LeaveTouch => Direction::Close,
        }
    }

    /// Kind to arm for a request from `source` in `direction`.
    pub const fn for_source(source: TriggerSource, direction: Direction) -> Self {
        match (source, direction) {
            (TriggerSource::Touch, Direction::Open) => Self::EnterTouch,
            (TriggerSource::Touch, Direction::Close) => Self::LeaveTouch,
            (_, Direction::Open) => Self::EnterHover,
            (_, Direction::Close) => Self::LeaveHover,
        }
    }
}

/// Generation-stamped identifier of one armed timer.
///
/// Stays valid until the entry fires, is cleared, or is replaced by a newer arm.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TimerHandle(u32);

/// One pending timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ScheduleEntry {
    /// What the timer does when it fires.
    pub kind: PendingKind,
    /// The trigger that armed it; reported on the resulting transition.
    pub source: TriggerSource,
    /// Absolute time at which it fires.
    pub deadline: Millis,
    /// Handle for host-managed wakeups.
    pub handle: TimerHandle,
}

/// The open-direction and close-direction timer slots of one tooltip.
#[derive(Clone, Debug, Default)]
pub struct Timers {
    open: Option<ScheduleEntry>,
    close: Option<ScheduleEntry>,
    generation: u32,
}

impl Timers {
    /// Create with both slots empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer of `kind` firing at `now + delay`.
    ///
    /// Clears both slots first, then fills the slot for `kind`'s direction.
    pub fn arm(
        &mut self,
        kind: PendingKind,
        source: TriggerSource,
        now: Millis,
        delay: Millis,
    ) -> TimerHandle {
        self.clear_all();
        self.generation = self.generation.wrapping_add(1);
        let handle = TimerHandle(self.generation);
        let entry = ScheduleEntry {
            kind,
            source,
            deadline: now.saturating_add(delay),
            handle,
        };
        *self.slot_mut(kind.direction()) = Some(entry);
        handle
    }

    /// Clear the slot for `direction`, returning what it held.
    pub fn clear(&mut self, direction: Direction) -> Option<ScheduleEntry> {
        self.slot_mut(direction).take()
    }

    /// Clear both slots.
    pub fn clear_all(&mut self) {
        self.open = None;
        self.close = None;
    }

    /// The pending entry for `direction`, if any.
    pub fn pending(&self, direction: Direction) -> Option<&ScheduleEntry> {
        match direction {
            Direction::Open => self.open.as_ref(),
            Direction::Close => self.close.as_ref(),
        }
    }

    /// The pending entry in either direction.
    pub fn any_pending(&self) -> Option<&ScheduleEntry> {
        self.open.as_ref().or(self.close.as_ref())
    }

    /// True when nothing is pending.
    pub fn is_idle(&self) -> bool {
        self.open.is_none() && self.close.is_none()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Millis> {
        match (self.open, self.close) {
            (Some(a), Some(b)) => Some(a.deadline.min(b.deadline)),
            (Some(e), None) | (None, Some(e)) => Some(e.deadline),
            (None, None) => None,
        }
    }

    /// Remove and return the earliest entry whose deadline is at or before `now`.
    pub fn take_due(&mut self, now: Millis) -> Option<ScheduleEntry> {
        let due = self.next_deadline().filter(|d| *d <= now)?;
        if self.open.is_some_and(|e| e.deadline == due) {
            self.open.take()
        } else {
            self.close.take()
        }
    }

    /// Remove and return the entry for `handle` if it is still current.
    ///
    /// Stale handles (cleared, superseded, or already fired) return `None`.
    pub fn take(&mut self, handle: TimerHandle) -> Option<ScheduleEntry> {
        if self.open.is_some_and(|e| e.handle == handle) {
            self.open.take()
        } else if self.close.is_some_and(|e| e.handle == handle) {
            self.close.take()
        } else {
            None
        }
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<ScheduleEntry> {
        match direction {
            Direction::Open => &mut self.open,
            Direction::Close => &mut self.close,
        }
    }
}
