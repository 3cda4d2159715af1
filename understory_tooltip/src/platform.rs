// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform capability interface.
//!
//! One engine serves every host. A host supplies a small adapter implementing [`Platform`]:
//! measuring nodes, creating a portal layer outside the anchor's layout ancestry, adding
//! listeners, and setting the accessibility relation. See
//! [`adapters::headless`](crate::adapters) for an in-memory implementation.

use core::fmt::Debug;

use kurbo::{Rect, Size};

use crate::binder::{FocusKind, Handler, PointerKind, TriggerEvent};
use crate::config::OverlayRole;

/// Primitives the tooltip engine needs from a host UI system.
pub trait Platform {
    /// A node handle: the anchor, or an overlay child mounted in a portal.
    type Node: Clone + PartialEq + Debug;
    /// Handle to a portal container.
    type Container: Clone + Debug;
    /// Input event delivered to listeners.
    type Event: TriggerEvent + 'static;

    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Viewport-relative bounds of `node`, or `None` if it is gone or not laid out yet.
    fn measure(&self, node: &Self::Node) -> Option<Rect>;

    /// Create a portal container. Called once per context, lazily.
    fn create_portal_container(&mut self) -> Self::Container;

    /// Mount a fresh overlay child in `container`. `None` if the container is unusable.
    fn mount_portal(&mut self, container: &Self::Container) -> Option<Self::Node>;

    /// Unmount and release an overlay child.
    fn release_portal(&mut self, child: Self::Node);

    /// Add a pointer listener to `node`. Listeners already on the node run first.
    fn add_pointer_listener(
        &mut self,
        node: &Self::Node,
        kind: PointerKind,
        handler: Handler<Self::Event>,
    );

    /// Add a focus listener to `node`. Listeners already on the node run first.
    fn add_focus_listener(&mut self, node: &Self::Node, kind: FocusKind, handler: Handler<Self::Event>);

    /// Point the anchor's description relation at `overlay_id`, or remove it with `None`.
    fn set_described_by(&mut self, anchor: &Self::Node, overlay_id: Option<&str>);

    /// Set or clear the anchor's accessible label. No-op by default.
    fn set_anchor_label(&mut self, anchor: &Self::Node, label: Option<&str>) {
        let _ = (anchor, label);
    }

    /// Expose the overlay's identifier, role, and optional label. No-op by default.
    fn set_overlay_semantics(
        &mut self,
        overlay: &Self::Node,
        id: &str,
        role: OverlayRole,
        label: Option<&str>,
    ) {
        let _ = (overlay, id, role, label);
    }
}
