// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger binder: composing the engine's anchor listeners with the caller's.
//!
//! The engine never clones or rewrites the anchor. It only assumes a node that can be
//! measured and that can receive listeners. How listeners get attached depends on the host:
//!
//! - Hosts where listeners are additive (DOM-style `addEventListener`) go through
//!   [`Platform`](crate::platform::Platform) and
//!   [`Tooltip::attach`](crate::tooltip::Tooltip::attach). Listeners registered earlier run
//!   first, and the engine's handler skips events the caller already default-prevented.
//! - Hosts where each node holds one handler per kind (handler props) collect the caller's
//!   handlers in [`AnchorListeners`] and get merged ones back from
//!   [`Tooltip::bind`](crate::tooltip::Tooltip::bind), which applies [`compose`] per kind.
//!
//! In both cases the caller's handler runs first and the engine's runs only if the event
//! was not default-prevented.
//!
//! [`AnchorRef`] does the same for node references: one reference that both the engine
//! (for measuring) and the caller receive.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Point;

use crate::types::Millis;

/// What the engine needs to read from a host input event.
pub trait TriggerEvent {
    /// When the event happened.
    fn timestamp(&self) -> Millis;

    /// True if an earlier handler asked for default handling to be skipped.
    fn is_default_prevented(&self) -> bool {
        false
    }

    /// For focus events: true when the focus is keyboard-attributable.
    fn is_focus_visible(&self) -> bool {
        true
    }

    /// Pointer position in viewport coordinates, for pointer events.
    fn pointer_position(&self) -> Option<Point> {
        None
    }
}

/// A boxed listener.
pub type Handler<E> = Box<dyn FnMut(&mut E)>;

/// Merge a caller-supplied handler with the engine's.
///
/// The caller's handler runs first. The engine's runs afterwards unless the event is then
/// default-prevented.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use understory_tooltip::binder::{Handler, TriggerEvent, compose};
///
/// struct Ev { prevented: bool }
/// impl TriggerEvent for Ev {
///     fn timestamp(&self) -> u64 { 0 }
///     fn is_default_prevented(&self) -> bool { self.prevented }
/// }
///
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let (a, b) = (log.clone(), log.clone());
/// let caller: Handler<Ev> = Box::new(move |_| a.borrow_mut().push("caller"));
/// let ours: Handler<Ev> = Box::new(move |_| b.borrow_mut().push("engine"));
/// let mut merged = compose(Some(caller), ours);
/// merged(&mut Ev { prevented: false });
/// merged(&mut Ev { prevented: true });
/// assert_eq!(*log.borrow(), ["caller", "engine", "caller"]);
/// ```
pub fn compose<E: TriggerEvent + 'static>(
    existing: Option<Handler<E>>,
    mut ours: Handler<E>,
) -> Handler<E> {
    match existing {
        None => Box::new(move |event: &mut E| {
            if !event.is_default_prevented() {
                ours(event);
            }
        }),
        Some(mut theirs) => Box::new(move |event: &mut E| {
            theirs(event);
            if !event.is_default_prevented() {
                ours(event);
            }
        }),
    }
}

/// Pointer listener kinds on the anchor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerKind {
    /// Pointer entered the node.
    Enter,
    /// Pointer left the node.
    Leave,
    /// Pointer moved over the node.
    Move,
    /// Touch or press started on the node.
    PressIn,
    /// Touch or press ended or was cancelled.
    PressOut,
}

/// Focus listener kinds on the anchor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FocusKind {
    /// Node gained focus.
    Focus,
    /// Node lost focus.
    Blur,
}

/// Any listener kind the engine binds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ListenerKind {
    /// A pointer listener.
    Pointer(PointerKind),
    /// A focus listener.
    Focus(FocusKind),
}

impl ListenerKind {
    /// Every kind, in slot order.
    pub const ALL: [Self; 7] = [
        Self::Focus(FocusKind::Focus),
        Self::Focus(FocusKind::Blur),
        Self::Pointer(PointerKind::Enter),
        Self::Pointer(PointerKind::Leave),
        Self::Pointer(PointerKind::Move),
        Self::Pointer(PointerKind::PressIn),
        Self::Pointer(PointerKind::PressOut),
    ];

    const fn slot(self) -> usize {
        match self {
            Self::Focus(FocusKind::Focus) => 0,
            Self::Focus(FocusKind::Blur) => 1,
            Self::Pointer(PointerKind::Enter) => 2,
            Self::Pointer(PointerKind::Leave) => 3,
            Self::Pointer(PointerKind::Move) => 4,
            Self::Pointer(PointerKind::PressIn) => 5,
            Self::Pointer(PointerKind::PressOut) => 6,
        }
    }
}

/// One optional handler per [`ListenerKind`], as attached to a node by handler props.
pub struct AnchorListeners<E> {
    slots: [Option<Handler<E>>; 7],
}

impl<E> fmt::Debug for AnchorListeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_set();
        for kind in ListenerKind::ALL {
            if self.is_set(kind) {
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

impl<E> Default for AnchorListeners<E> {
    fn default() -> Self {
        Self {
            slots: [None, None, None, None, None, None, None],
        }
    }
}

impl<E> AnchorListeners<E> {
    /// No handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the handler for `kind`, returning the previous one.
    pub fn set(&mut self, kind: ListenerKind, handler: Handler<E>) -> Option<Handler<E>> {
        self.slots[kind.slot()].replace(handler)
    }

    /// Builder form of [`AnchorListeners::set`].
    #[must_use]
    pub fn with(mut self, kind: ListenerKind, handler: impl FnMut(&mut E) + 'static) -> Self {
        self.slots[kind.slot()] = Some(Box::new(handler));
        self
    }

    /// Remove and return the handler for `kind`.
    pub fn take(&mut self, kind: ListenerKind) -> Option<Handler<E>> {
        self.slots[kind.slot()].take()
    }

    /// True if a handler is set for `kind`.
    pub fn is_set(&self, kind: ListenerKind) -> bool {
        self.slots[kind.slot()].is_some()
    }

    /// Invoke the handler for `kind`. Returns false if there is none.
    pub fn dispatch(&mut self, kind: ListenerKind, event: &mut E) -> bool {
        match &mut self.slots[kind.slot()] {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}

/// A node reference shared by the engine and the caller.
///
/// Calling [`AnchorRef::set`] forwards the node (or its removal) to both. The engine side
/// is installed by [`Tooltip::anchor_ref`](crate::tooltip::Tooltip::anchor_ref).
pub struct AnchorRef<N> {
    engine: Box<dyn FnMut(Option<N>)>,
    caller: Option<Box<dyn FnMut(Option<&N>)>>,
}

impl<N> fmt::Debug for AnchorRef<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchorRef")
            .field("caller", &self.caller.is_some())
            .finish_non_exhaustive()
    }
}

impl<N> AnchorRef<N> {
    /// A reference that only feeds `engine`.
    pub fn new(engine: impl FnMut(Option<N>) + 'static) -> Self {
        Self {
            engine: Box::new(engine),
            caller: None,
        }
    }

    /// Also forward to the caller's own reference callback.
    #[must_use]
    pub fn with_caller(mut self, caller: impl FnMut(Option<&N>) + 'static) -> Self {
        self.caller = Some(Box::new(caller));
        self
    }

    /// The anchor mounted (`Some`) or unmounted (`None`).
    pub fn set(&mut self, node: Option<N>) {
        if let Some(caller) = &mut self.caller {
            caller(node.as_ref());
        }
        (self.engine)(node);
    }
}
