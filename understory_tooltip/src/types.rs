// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types shared by the scheduler, overlay, and facade: time, trigger sources,
//! transitions, and the interaction state.

/// Host-supplied timestamp in milliseconds.
///
/// The engine never reads a clock. Every input carries the time at which it happened,
/// and pending timers are stored as deadlines in the same unit.
pub type Millis = u64;

/// What caused a request to open or close.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TriggerSource {
    /// Pointer entered or left the anchor.
    Hover,
    /// Keyboard (focus-visible) focus or blur on the anchor.
    Focus,
    /// Touch press on the anchor (long press to open, auto-close after release).
    Touch,
    /// Pointer left the overlay surface itself (interactive overlays only).
    Surface,
    /// Escape key.
    Escape,
    /// Platform dismiss request (for example a back gesture).
    Dismiss,
    /// Press outside the overlay.
    OutsidePress,
    /// Programmatic change: disabling, anchor removal.
    Programmatic,
}

/// Direction of a transition or pending timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Towards open.
    Open,
    /// Towards closed.
    Close,
}

impl Direction {
    /// The other direction.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Open => Self::Close,
            Self::Close => Self::Open,
        }
    }
}

/// A requested open or close.
///
/// In uncontrolled mode a transition is also applied to the visible state. In controlled
/// mode it is informational only; the owner decides whether to follow it.
///
/// This is what open and close callbacks receive in place of the raw host event. Delayed
/// transitions fire from a timer with no event of their own, so the transition carries the
/// [`TriggerSource`] that armed the timer and the time it fired. Hosts that need the event
/// itself can wrap their listeners with [`compose`](crate::binder::compose).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Transition {
    /// Open or close.
    pub direction: Direction,
    /// Trigger that caused the transition (the originating event of a timer).
    pub source: TriggerSource,
    /// Time at which the transition happened.
    pub at: Millis,
}

impl Transition {
    /// An open transition.
    pub const fn open(source: TriggerSource, at: Millis) -> Self {
        Self {
            direction: Direction::Open,
            source,
            at,
        }
    }

    /// A close transition.
    pub const fn close(source: TriggerSource, at: Millis) -> Self {
        Self {
            direction: Direction::Close,
            source,
            at,
        }
    }

    /// True for open transitions.
    pub const fn is_open(&self) -> bool {
        matches!(self.direction, Direction::Open)
    }
}

/// Observable state of one tooltip.
///
/// ```text
/// Closed ──trigger──▶ OpenScheduled ──timer / hysteresis──▶ Open ◀──▶ OpenMeasuring
///   ▲                      │ opposing trigger                 │ leave trigger
///   │◀─────────────────────┘                                  ▼
///   └──────────timer───────────────────────────────────── CloseScheduled
/// ```
///
/// Escape, unmount, and a controlled close go to `Closed` from any state. A scheduled state
/// reverts to the state it came from when the opposing trigger arrives before its timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InteractionState {
    /// Not visible, nothing pending.
    Closed,
    /// Not visible, an open timer is pending.
    OpenScheduled,
    /// Visible and positioned.
    Open,
    /// Visible but still being measured (painted off-screen).
    OpenMeasuring,
    /// Visible, a close timer is pending.
    CloseScheduled,
}
