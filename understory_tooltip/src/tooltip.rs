// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tooltip facade: scheduler, overlay, binder, and platform wired together.
//!
//! ## Driving a tooltip
//!
//! 1) Create a [`TooltipContext`] per UI root and a [`Tooltip`] per anchor.
//! 2) Connect the anchor: [`Tooltip::attach`] through the platform, [`Tooltip::bind`] for
//!    handler props, or [`Tooltip::anchor_ref`] plus manual `on_*` calls.
//! 3) Feed inputs (`on_hover_enter`, `on_escape`, ...) with the host's time. Each returns
//!    the [`Transition`] it produced and invokes the open/close callbacks.
//! 4) When [`Tooltip::next_deadline`] passes, call [`Tooltip::advance`].
//! 5) Once per frame call [`Tooltip::layout`] and paint the overlay child at the returned
//!    origin.
//!
//! `Tooltip` is a cheap handle: clones share one tooltip. Listeners registered through
//! [`Tooltip::attach`] and [`Tooltip::bind`] hold it weakly and do nothing once every handle
//! is dropped. Call [`Tooltip::unmount`] first to release the portal child.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use core::cell::RefCell;
use core::fmt;

use kurbo::Point;
use understory_placement::{ArrowStyle, Placement, compute_arrow_style};

use crate::binder::{
    AnchorListeners, AnchorRef, FocusKind, Handler, ListenerKind, PointerKind, TriggerEvent,
    compose,
};
use crate::config::{TooltipConfig, TriggerSources};
use crate::context::TooltipContext;
use crate::error::{TooltipError, single_anchor};
use crate::overlay::{Invalidation, OverlayPhase, OverlayState, PlacementRequest};
use crate::platform::Platform;
use crate::scheduler::Scheduler;
use crate::timer::TimerHandle;
use crate::types::{Direction, InteractionState, Millis, Transition};

type Callback = Rc<dyn Fn(&Transition)>;

struct Inner<P: Platform> {
    config: TooltipConfig,
    id: String,
    scheduler: Scheduler,
    overlay: OverlayState<P::Node>,
    context: TooltipContext<P::Container>,
    anchor: Option<P::Node>,
    described: Option<P::Node>,
    cursor: Option<Point>,
    last_seen: Millis,
    on_open: Option<Callback>,
    on_close: Option<Callback>,
}

impl<P: Platform> Inner<P> {
    fn callback_for(&self, transition: &Transition) -> Option<Callback> {
        match transition.direction {
            Direction::Open => self.on_open.clone(),
            Direction::Close => self.on_close.clone(),
        }
    }

    fn placement_request(&self, viewport: kurbo::Size) -> PlacementRequest {
        PlacementRequest {
            placement: self.config.placement,
            options: self.config.placement_options(),
            cursor: self.cursor.filter(|_| self.config.follow_cursor),
            viewport,
        }
    }

    fn sync_described_by(&mut self, platform: &mut P) {
        let target = self.anchor.clone().filter(|_| self.scheduler.is_open());
        if self.described == target {
            return;
        }
        let label = self.config.label.as_deref();
        if let Some(old) = self.described.take() {
            platform.set_described_by(&old, None);
            if label.is_some() {
                platform.set_anchor_label(&old, None);
            }
        }
        if let Some(anchor) = target {
            platform.set_described_by(&anchor, Some(&self.id));
            if label.is_some() {
                platform.set_anchor_label(&anchor, label);
            }
            self.described = Some(anchor);
        }
    }
}

/// Handle to one tooltip.
pub struct Tooltip<P: Platform> {
    inner: Rc<RefCell<Inner<P>>>,
}

/// Non-owning handle to a [`Tooltip`].
pub struct WeakTooltip<P: Platform> {
    inner: Weak<RefCell<Inner<P>>>,
}

impl<P: Platform> Clone for Tooltip<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P: Platform> Clone for WeakTooltip<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<P: Platform> fmt::Debug for Tooltip<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Tooltip");
        match self.inner.try_borrow() {
            Ok(inner) => s
                .field("id", &inner.id)
                .field("state", &inner.scheduler.state())
                .field("phase", &inner.overlay.phase())
                .field("anchor", &inner.anchor),
            Err(_) => s.field("inner", &"<borrowed>"),
        };
        s.finish_non_exhaustive()
    }
}

impl<P: Platform> fmt::Debug for WeakTooltip<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakTooltip")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl<P: Platform> WeakTooltip<P> {
    /// Get the tooltip back, or [`TooltipError::AnchorReleased`] if it was dropped.
    pub fn upgrade(&self) -> Result<Tooltip<P>, TooltipError> {
        self.inner
            .upgrade()
            .map(|inner| Tooltip { inner })
            .ok_or(TooltipError::AnchorReleased)
    }
}

impl<P: Platform> Tooltip<P> {
    /// Create a closed tooltip in `context`.
    ///
    /// The overlay identifier is taken from the config or allocated from the context.
    pub fn new(config: TooltipConfig, context: &TooltipContext<P::Container>) -> Self {
        let id = config.id.clone().unwrap_or_else(|| context.allocate_id());
        let scheduler = Scheduler::new(&config, context.hysteresis());
        Self {
            inner: Rc::new(RefCell::new(Inner {
                config,
                id,
                scheduler,
                overlay: OverlayState::new(),
                context: context.clone(),
                anchor: None,
                described: None,
                cursor: None,
                last_seen: 0,
                on_open: None,
                on_close: None,
            })),
        }
    }

    /// Call `f` with every open transition, controlled or not.
    ///
    /// `f` gets the [`Transition`] rather than the host event; for a delayed open its
    /// `source` names the trigger that armed the timer.
    #[must_use]
    pub fn with_on_open(self, f: impl Fn(&Transition) + 'static) -> Self {
        self.inner.borrow_mut().on_open = Some(Rc::new(f));
        self
    }

    /// Call `f` with every close transition, controlled or not.
    ///
    /// `f` gets the [`Transition`] rather than the host event; for a delayed close its
    /// `source` names the trigger that armed the timer.
    #[must_use]
    pub fn with_on_close(self, f: impl Fn(&Transition) + 'static) -> Self {
        self.inner.borrow_mut().on_close = Some(Rc::new(f));
        self
    }

    /// A non-owning handle.
    pub fn downgrade(&self) -> WeakTooltip<P> {
        WeakTooltip {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// The overlay identifier.
    pub fn id(&self) -> String {
        self.inner.borrow().id.clone()
    }

    /// Preferred placement.
    pub fn placement(&self) -> Placement {
        self.inner.borrow().config.placement
    }

    /// Change the preferred placement. Takes effect on the next layout.
    pub fn set_placement(&self, placement: Placement) {
        let mut inner = self.inner.borrow_mut();
        inner.config.placement = placement;
        inner.overlay.mark_stale();
    }

    /// Effective visible state.
    pub fn is_open(&self) -> bool {
        self.inner.borrow().scheduler.is_open()
    }

    /// Observable state, including `OpenMeasuring` while the overlay is not placed yet.
    pub fn state(&self) -> InteractionState {
        let inner = self.inner.borrow();
        match inner.scheduler.state() {
            InteractionState::Open if inner.overlay.phase() != OverlayPhase::Positioned => {
                InteractionState::OpenMeasuring
            }
            state => state,
        }
    }

    /// Overlay layout phase.
    pub fn phase(&self) -> OverlayPhase {
        self.inner.borrow().overlay.phase()
    }

    /// Where to paint the overlay, as of the last layout.
    pub fn paint_origin(&self) -> Option<Point> {
        self.inner.borrow().overlay.paint_origin()
    }

    /// The anchor node, once bound.
    pub fn anchor(&self) -> Option<P::Node> {
        self.inner.borrow().anchor.clone()
    }

    /// The identifier the anchor should be described by, while open.
    pub fn described_by(&self) -> Option<String> {
        let inner = self.inner.borrow();
        inner.scheduler.is_open().then(|| inner.id.clone())
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.inner.borrow().scheduler.next_deadline()
    }

    /// The pending timer's handle, for hosts that map timers onto native ones.
    pub fn pending_handle(&self) -> Option<TimerHandle> {
        let inner = self.inner.borrow();
        inner
            .scheduler
            .pending(Direction::Open)
            .or(inner.scheduler.pending(Direction::Close))
            .map(|e| e.handle)
    }

    /// Arrow geometry for the placed overlay, if arrows are enabled.
    pub fn arrow_style<C: Copy>(&self, color: C) -> Option<ArrowStyle<C>> {
        let inner = self.inner.borrow();
        if !inner.config.arrow || inner.overlay.phase() != OverlayPhase::Positioned {
            return None;
        }
        let size = inner.overlay.measured_size()?;
        Some(compute_arrow_style(inner.config.placement, size, color))
    }

    /// Pointer entered the anchor.
    pub fn on_hover_enter(&self, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.on_hover_enter(now))
    }

    /// Pointer left the anchor.
    pub fn on_hover_leave(&self, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.on_hover_leave(now))
    }

    /// Anchor focused; `focus_visible` when keyboard-attributable.
    pub fn on_focus(&self, focus_visible: bool, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.on_focus(focus_visible, now))
    }

    /// Anchor blurred.
    pub fn on_blur(&self, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.on_blur(now))
    }

    /// Touch pressed on the anchor.
    pub fn on_touch_start(&self, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.on_touch_start(now))
    }

    /// Touch released or cancelled.
    pub fn on_touch_end(&self, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.on_touch_end(now))
    }

    /// Pointer entered the overlay surface.
    pub fn on_surface_enter(&self, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.on_surface_enter(now))
    }

    /// Pointer left the overlay surface.
    pub fn on_surface_leave(&self, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.on_surface_leave(now))
    }

    /// Escape pressed.
    pub fn on_escape(&self, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.on_escape(now))
    }

    /// Platform dismiss request.
    pub fn on_dismiss_request(&self, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.on_dismiss_request(now))
    }

    /// Press outside the overlay.
    pub fn on_outside_press(&self, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.on_outside_press(now))
    }

    /// Fire the timer due at `now`, if any.
    pub fn advance(&self, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.advance(now))
    }

    /// Fire a specific timer. Stale handles are ignored.
    pub fn fire(&self, handle: TimerHandle, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.fire(handle, now))
    }

    /// Enable or disable the tooltip. Disabling closes it.
    pub fn set_disabled(&self, disabled: bool, now: Millis) -> Option<Transition> {
        self.drive(now, |s| s.set_disabled(disabled, now))
    }

    /// Set or clear the controlled open state.
    pub fn set_controlled_open(&self, open: Option<bool>, now: Millis) {
        self.drive(now, |s| {
            s.set_controlled_open(open, now);
            None
        });
    }

    /// Whether there is content to show.
    pub fn set_has_content(&self, has_content: bool, now: Millis) {
        self.drive(now, |s| {
            s.set_has_content(has_content, now);
            None
        });
    }

    /// Pointer moved over the anchor.
    ///
    /// When following the cursor and placed, the overlay moves immediately; the new
    /// position is returned.
    pub fn on_pointer_move(&self, position: Point, now: Millis) -> Option<Point> {
        let mut inner = self.inner.borrow_mut();
        inner.last_seen = inner.last_seen.max(now);
        inner.cursor = Some(position);
        if inner.config.follow_cursor && inner.scheduler.is_open() {
            inner.overlay.track_cursor(position)
        } else {
            None
        }
    }

    /// The window was resized.
    pub fn on_resize(&self) {
        self.inner.borrow_mut().overlay.invalidate(Invalidation::Geometry);
    }

    /// An ancestor of the anchor scrolled.
    pub fn on_scroll(&self) {
        self.inner.borrow_mut().overlay.invalidate(Invalidation::Geometry);
    }

    /// The overlay's content changed size.
    pub fn on_content_resize(&self) {
        self.inner.borrow_mut().overlay.invalidate(Invalidation::Content);
    }

    /// Bind or unbind the anchor node. Unbinding closes the tooltip.
    pub fn set_anchor(&self, node: Option<P::Node>) {
        match node {
            Some(node) => {
                let mut inner = self.inner.borrow_mut();
                inner.anchor = Some(node);
                inner.overlay.mark_stale();
            }
            None => {
                let now = {
                    let mut inner = self.inner.borrow_mut();
                    inner.anchor = None;
                    inner.last_seen
                };
                self.drive(now, |s| s.detach_anchor(now));
            }
        }
    }

    /// Tear down: cancel timers, release the portal child, and drop the description
    /// relation. Later inputs are no-ops.
    pub fn unmount(&self, platform: &mut P, now: Millis) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        inner.scheduler.unmount(now);
        if let Some(child) = inner.overlay.end() {
            platform.release_portal(child);
        }
        inner.sync_described_by(platform);
    }

    fn drive(
        &self,
        now: Millis,
        f: impl FnOnce(&mut Scheduler) -> Option<Transition>,
    ) -> Option<Transition> {
        let (transition, callback) = {
            let mut inner = self.inner.borrow_mut();
            inner.last_seen = inner.last_seen.max(now);
            let transition = f(&mut inner.scheduler);
            // A new open cycle while the old child is still mounted measures again.
            if transition.is_some_and(|t| t.is_open()) && inner.overlay.is_open() {
                inner.overlay.mark_stale();
            }
            let callback = transition.as_ref().and_then(|t| inner.callback_for(t));
            (transition, callback)
        };
        if let (Some(t), Some(callback)) = (&transition, callback) {
            callback(t);
        }
        transition
    }

    fn listens(&self, kind: ListenerKind) -> bool {
        let inner = self.inner.borrow();
        let triggers = inner.config.triggers;
        match kind {
            ListenerKind::Focus(_) => triggers.contains(TriggerSources::FOCUS),
            ListenerKind::Pointer(PointerKind::Enter | PointerKind::Leave) => {
                triggers.contains(TriggerSources::HOVER)
            }
            ListenerKind::Pointer(PointerKind::Move) => inner.config.follow_cursor,
            ListenerKind::Pointer(PointerKind::PressIn | PointerKind::PressOut) => {
                triggers.contains(TriggerSources::TOUCH)
            }
        }
    }
}

impl<P: Platform + 'static> Tooltip<P> {
    /// Run one layout pass and return where to paint the overlay.
    ///
    /// Mounts the portal child on the first pass after opening (painted off-screen), places
    /// it on a later pass, releases it once closed, and keeps the anchor's description
    /// relation in sync. An interactive tooltip listens for the pointer on its child so
    /// moving from the anchor onto the overlay keeps it open.
    pub fn layout(&self, platform: &mut P) -> Option<Point> {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        if !inner.scheduler.is_open() {
            if let Some(child) = inner.overlay.end() {
                platform.release_portal(child);
            }
        } else if !inner.overlay.is_open() {
            let container = inner
                .context
                .container_or_create(|| platform.create_portal_container());
            match platform.mount_portal(&container) {
                Some(child) => {
                    if inner.config.is_interactive() {
                        for kind in [PointerKind::Enter, PointerKind::Leave] {
                            let handler = compose(None, self.surface_handler(kind));
                            platform.add_pointer_listener(&child, kind, handler);
                        }
                    }
                    platform.set_overlay_semantics(
                        &child,
                        &inner.id,
                        inner.config.role,
                        inner.config.label.as_deref(),
                    );
                    inner.overlay.begin(child);
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(id = %inner.id, "portal mount failed, overlay stays hidden");
                }
            }
        } else if inner.overlay.needs_placement() {
            let anchor = inner.anchor.as_ref().and_then(|a| platform.measure(a));
            let size = inner
                .overlay
                .child()
                .and_then(|c| platform.measure(c))
                .map(|r| r.size());
            let request = inner.placement_request(platform.viewport());
            inner.overlay.resolve(anchor, size, request);
        }
        inner.sync_described_by(platform);
        inner.overlay.paint_origin()
    }

    /// Attach the engine's listeners to the single node in `anchors` through the platform.
    ///
    /// Fails fast unless exactly one node is given.
    pub fn attach(
        &self,
        platform: &mut P,
        anchors: impl IntoIterator<Item = P::Node>,
    ) -> Result<P::Node, TooltipError> {
        let node = single_anchor(anchors)?;
        for kind in ListenerKind::ALL {
            if !self.listens(kind) {
                continue;
            }
            let handler = compose(None, self.engine_handler(kind));
            match kind {
                ListenerKind::Pointer(k) => platform.add_pointer_listener(&node, k, handler),
                ListenerKind::Focus(k) => platform.add_focus_listener(&node, k, handler),
            }
        }
        self.set_anchor(Some(node.clone()));
        Ok(node)
    }

    /// Merge the engine's listeners into the caller's handler props.
    ///
    /// Kinds the tooltip does not listen to are passed through untouched.
    pub fn bind(&self, mut caller: AnchorListeners<P::Event>) -> AnchorListeners<P::Event> {
        let mut merged = AnchorListeners::new();
        for kind in ListenerKind::ALL {
            let existing = caller.take(kind);
            if self.listens(kind) {
                merged.set(kind, compose(existing, self.engine_handler(kind)));
            } else if let Some(handler) = existing {
                merged.set(kind, handler);
            }
        }
        merged
    }

    /// A node reference feeding the engine's anchor slot.
    pub fn anchor_ref(&self) -> AnchorRef<P::Node> {
        let weak = self.downgrade();
        AnchorRef::new(move |node| {
            if let Ok(tooltip) = weak.upgrade() {
                tooltip.set_anchor(node);
            }
        })
    }

    fn engine_handler(&self, kind: ListenerKind) -> Handler<P::Event> {
        let weak = self.downgrade();
        Box::new(move |event: &mut P::Event| {
            let Ok(tooltip) = weak.upgrade() else {
                return;
            };
            let now = event.timestamp();
            match kind {
                ListenerKind::Focus(FocusKind::Focus) => {
                    tooltip.on_focus(event.is_focus_visible(), now);
                }
                ListenerKind::Focus(FocusKind::Blur) => {
                    tooltip.on_blur(now);
                }
                ListenerKind::Pointer(PointerKind::Enter) => {
                    if let Some(p) = event.pointer_position() {
                        tooltip.on_pointer_move(p, now);
                    }
                    tooltip.on_hover_enter(now);
                }
                ListenerKind::Pointer(PointerKind::Leave) => {
                    tooltip.on_hover_leave(now);
                }
                ListenerKind::Pointer(PointerKind::Move) => {
                    if let Some(p) = event.pointer_position() {
                        tooltip.on_pointer_move(p, now);
                    }
                }
                ListenerKind::Pointer(PointerKind::PressIn) => {
                    tooltip.on_touch_start(now);
                }
                ListenerKind::Pointer(PointerKind::PressOut) => {
                    tooltip.on_touch_end(now);
                }
            }
        })
    }

    fn surface_handler(&self, kind: PointerKind) -> Handler<P::Event> {
        let weak = self.downgrade();
        Box::new(move |event: &mut P::Event| {
            let Ok(tooltip) = weak.upgrade() else {
                return;
            };
            let now = event.timestamp();
            match kind {
                PointerKind::Enter => {
                    tooltip.on_surface_enter(now);
                }
                PointerKind::Leave => {
                    tooltip.on_surface_leave(now);
                }
                _ => {}
            }
        })
    }
}
