// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory platform for tests, demos, and server-side layout.
//!
//! ## Feature
//!
//! Enable with `headless` (on by default).
//!
//! ## Model
//!
//! - Nodes are plain rectangles in viewport coordinates, addressed by generational
//!   [`NodeId`]s. Removing a node makes its id stale; measuring a stale id returns `None`.
//! - Portal containers are lists of children. Newly mounted children get the size set with
//!   [`HeadlessPlatform::set_overlay_size`].
//! - Listeners are kept in registration order and run by [`HeadlessPlatform::dispatch`].
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_tooltip::adapters::headless::{HeadlessEvent, HeadlessPlatform};
//! use understory_tooltip::binder::{ListenerKind, PointerKind};
//! use understory_tooltip::config::TooltipConfig;
//! use understory_tooltip::context::TooltipContext;
//! use understory_tooltip::tooltip::Tooltip;
//!
//! let mut platform = HeadlessPlatform::new(Size::new(800.0, 600.0));
//! platform.set_overlay_size(Size::new(120.0, 40.0));
//! let button = platform.insert(Rect::new(100.0, 100.0, 150.0, 120.0));
//!
//! let ctx = TooltipContext::new();
//! let tip = Tooltip::new(TooltipConfig::default(), &ctx);
//! tip.attach(&mut platform, [button]).unwrap();
//!
//! platform.dispatch(button, ListenerKind::Pointer(PointerKind::Enter), &mut HeadlessEvent::at(0));
//! tip.layout(&mut platform); // mount, measuring off-screen
//! let origin = tip.layout(&mut platform).unwrap();
//! assert_eq!((origin.x, origin.y), (65.0, 130.0));
//! assert_eq!(platform.described_by(button), Some("tooltip-1"));
//! ```

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::binder::{FocusKind, Handler, ListenerKind, PointerKind, TriggerEvent};
use crate::config::OverlayRole;
use crate::platform::Platform;
use crate::types::Millis;

/// Identifier of a headless node: slot index and generation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(u32, u32);

impl NodeId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identifier of a headless portal container.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ContainerId(u32);

/// Input event used by the headless platform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HeadlessEvent {
    /// Event time.
    pub at: Millis,
    /// Set by a listener to stop later (engine) listeners.
    pub default_prevented: bool,
    /// For focus events: keyboard-attributable.
    pub focus_visible: bool,
    /// Pointer position, for pointer events.
    pub pointer: Option<Point>,
}

impl HeadlessEvent {
    /// A plain event at `at` (keyboard focus, no pointer).
    pub const fn at(at: Millis) -> Self {
        Self {
            at,
            default_prevented: false,
            focus_visible: true,
            pointer: None,
        }
    }

    /// Attach a pointer position.
    #[must_use]
    pub const fn with_pointer(mut self, pointer: Point) -> Self {
        self.pointer = Some(pointer);
        self
    }

    /// Mark a focus event as pointer-driven.
    #[must_use]
    pub const fn pointer_focus(mut self) -> Self {
        self.focus_visible = false;
        self
    }

    /// Stop later listeners from acting on this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

impl TriggerEvent for HeadlessEvent {
    fn timestamp(&self) -> Millis {
        self.at
    }

    fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    fn is_focus_visible(&self) -> bool {
        self.focus_visible
    }

    fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    rect: Option<Rect>,
    described_by: Option<String>,
    label: Option<String>,
    semantics: Option<(String, OverlayRole, Option<String>)>,
}

struct Listener {
    node: NodeId,
    kind: ListenerKind,
    handler: Handler<HeadlessEvent>,
}

/// In-memory [`Platform`].
pub struct HeadlessPlatform {
    slots: Vec<Slot>,
    free_list: Vec<usize>,
    viewport: Size,
    overlay_size: Size,
    containers: Vec<Vec<NodeId>>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for HeadlessPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live = self.slots.iter().filter(|s| s.rect.is_some()).count();
        f.debug_struct("HeadlessPlatform")
            .field("live_nodes", &live)
            .field("free_list", &self.free_list.len())
            .field("viewport", &self.viewport)
            .field("overlay_size", &self.overlay_size)
            .field("containers", &self.containers)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl HeadlessPlatform {
    /// Create an empty platform with the given viewport.
    pub fn new(viewport: Size) -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            viewport,
            overlay_size: Size::ZERO,
            containers: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Change the viewport size.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Size given to overlay children mounted from now on.
    pub fn set_overlay_size(&mut self, size: Size) {
        self.overlay_size = size;
    }

    /// Insert a node with viewport-relative bounds.
    pub fn insert(&mut self, rect: Rect) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation = slot.generation.saturating_add(1);
            slot.rect = Some(rect);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 1,
                rect: Some(rect),
                described_by: None,
                label: None,
                semantics: None,
            });
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.slots.len() - 1) as u32, 1)
        };
        NodeId(idx, generation)
    }

    /// Remove a node and its listeners. Stale ids are ignored.
    pub fn remove(&mut self, id: NodeId) {
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        slot.rect = None;
        slot.described_by = None;
        slot.label = None;
        slot.semantics = None;
        self.free_list.push(id.idx());
        self.listeners.retain(|l| l.node != id);
        for children in &mut self.containers {
            children.retain(|c| *c != id);
        }
    }

    /// True if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    /// Move or resize a live node.
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(slot) = self.slot_mut(id) {
            slot.rect = Some(rect);
        }
    }

    /// Register a caller listener, run before any listener added later.
    pub fn add_listener(
        &mut self,
        node: NodeId,
        kind: ListenerKind,
        handler: impl FnMut(&mut HeadlessEvent) + 'static,
    ) {
        self.listeners.push(Listener {
            node,
            kind,
            handler: Box::new(handler),
        });
    }

    /// Run the listeners of `kind` on `node` in registration order. Returns how many ran.
    pub fn dispatch(&mut self, node: NodeId, kind: ListenerKind, event: &mut HeadlessEvent) -> usize {
        let mut ran = 0;
        for l in &mut self.listeners {
            if l.node == node && l.kind == kind {
                (l.handler)(event);
                ran += 1;
            }
        }
        ran
    }

    /// Children currently mounted in `container`.
    pub fn portal_children(&self, container: ContainerId) -> &[NodeId] {
        self.containers
            .get(container.0 as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of portal containers ever created.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// The identifier `node` is described by.
    pub fn described_by(&self, node: NodeId) -> Option<&str> {
        self.slot(node)?.described_by.as_deref()
    }

    /// Accessible label currently set on an anchor.
    pub fn anchor_label(&self, node: NodeId) -> Option<&str> {
        self.slot(node)?.label.as_deref()
    }

    /// Identifier and role exposed by an overlay child.
    pub fn overlay_semantics(&self, node: NodeId) -> Option<(&str, OverlayRole)> {
        let (id, role, _) = self.slot(node)?.semantics.as_ref()?;
        Some((id.as_str(), *role))
    }

    /// Accessible label exposed by an overlay child.
    pub fn overlay_label(&self, node: NodeId) -> Option<&str> {
        self.slot(node)?.semantics.as_ref()?.2.as_deref()
    }

    fn slot(&self, id: NodeId) -> Option<&Slot> {
        self.slots
            .get(id.idx())
            .filter(|s| s.generation == id.1 && s.rect.is_some())
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.idx())
            .filter(|s| s.generation == id.1 && s.rect.is_some())
    }
}

impl Platform for HeadlessPlatform {
    type Node = NodeId;
    type Container = ContainerId;
    type Event = HeadlessEvent;

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn measure(&self, node: &NodeId) -> Option<Rect> {
        self.slot(*node)?.rect
    }

    fn create_portal_container(&mut self) -> ContainerId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ContainerId uses 32-bit indices by design."
        )]
        let id = ContainerId(self.containers.len() as u32);
        self.containers.push(Vec::new());
        id
    }

    fn mount_portal(&mut self, container: &ContainerId) -> Option<NodeId> {
        if container.0 as usize >= self.containers.len() {
            return None;
        }
        let child = self.insert(Rect::from_origin_size(Point::ZERO, self.overlay_size));
        self.containers[container.0 as usize].push(child);
        Some(child)
    }

    fn release_portal(&mut self, child: NodeId) {
        self.remove(child);
    }

    fn add_pointer_listener(
        &mut self,
        node: &NodeId,
        kind: PointerKind,
        handler: Handler<HeadlessEvent>,
    ) {
        self.listeners.push(Listener {
            node: *node,
            kind: ListenerKind::Pointer(kind),
            handler,
        });
    }

    fn add_focus_listener(&mut self, node: &NodeId, kind: FocusKind, handler: Handler<HeadlessEvent>) {
        self.listeners.push(Listener {
            node: *node,
            kind: ListenerKind::Focus(kind),
            handler,
        });
    }

    fn set_described_by(&mut self, anchor: &NodeId, overlay_id: Option<&str>) {
        if let Some(slot) = self.slot_mut(*anchor) {
            slot.described_by = overlay_id.map(ToString::to_string);
        }
    }

    fn set_anchor_label(&mut self, anchor: &NodeId, label: Option<&str>) {
        if let Some(slot) = self.slot_mut(*anchor) {
            slot.label = label.map(ToString::to_string);
        }
    }

    fn set_overlay_semantics(
        &mut self,
        overlay: &NodeId,
        id: &str,
        role: OverlayRole,
        label: Option<&str>,
    ) {
        if let Some(slot) = self.slot_mut(*overlay) {
            slot.semantics = Some((id.to_string(), role, label.map(ToString::to_string)));
        }
    }
}
