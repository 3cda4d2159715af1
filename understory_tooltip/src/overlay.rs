// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay renderer state: portal child, measurement, and position.
//!
//! ## Phases
//!
//! - [`OverlayPhase::Hidden`]: nothing mounted.
//! - [`OverlayPhase::Measuring`]: a portal child is mounted and painted at [`OFFSCREEN`]
//!   until it has been measured, so it never flashes at a stale or default position.
//! - [`OverlayPhase::Positioned`]: measured and placed; paint at
//!   [`OverlayState::paint_origin`].
//!
//! Opening mounts the child (`Hidden → Measuring`); placement happens on a later layout pass,
//! after the host had a chance to lay the child out. Viewport changes (resize, ancestor
//! scroll) keep the phase and only mark the geometry stale. A content size change drops back
//! to `Measuring`.
//!
//! When a measurement fails, for example because the anchor was removed mid-cycle, the
//! overlay stays in `Measuring` and keeps painting off-screen.

use kurbo::{Point, Rect, Size};
use understory_placement::{Placement, PlacementOptions, compute_position};

/// Where a measuring overlay is painted.
pub const OFFSCREEN: Point = Point::new(-9999.0, -9999.0);

/// Layout phase of the overlay.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum OverlayPhase {
    /// Not mounted.
    #[default]
    Hidden,
    /// Mounted, painted off-screen while waiting for a measurement.
    Measuring,
    /// Measured and placed.
    Positioned,
}

/// What changed since the last layout.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Invalidation {
    /// Window resize or scroll of an ancestor: re-measure the anchor and re-place.
    Geometry,
    /// The overlay's own content changed size: re-measure everything.
    Content,
}

/// Inputs to one placement pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// Preferred placement.
    pub placement: Placement,
    /// Geometry options.
    pub options: PlacementOptions,
    /// Cursor to follow, if following the cursor.
    pub cursor: Option<Point>,
    /// Viewport size.
    pub viewport: Size,
}

/// Mounted overlay and its geometry for one open cycle.
#[derive(Clone, Debug)]
pub struct OverlayState<N> {
    phase: OverlayPhase,
    child: Option<N>,
    position: Option<Point>,
    measured_size: Option<Size>,
    anchor_rect: Option<Rect>,
    last_request: Option<PlacementRequest>,
    stale: bool,
}

impl<N> Default for OverlayState<N> {
    fn default() -> Self {
        Self {
            phase: OverlayPhase::Hidden,
            child: None,
            position: None,
            measured_size: None,
            anchor_rect: None,
            last_request: None,
            stale: false,
        }
    }
}

impl<N> OverlayState<N> {
    /// Hidden, nothing mounted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// True while something is mounted.
    pub fn is_open(&self) -> bool {
        self.phase != OverlayPhase::Hidden
    }

    /// The mounted portal child.
    pub fn child(&self) -> Option<&N> {
        self.child.as_ref()
    }

    /// Last computed position. Meaningful only while positioned.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Last measured overlay size.
    pub fn measured_size(&self) -> Option<Size> {
        self.measured_size
    }

    /// Anchor bounds captured by the last placement pass.
    pub fn anchor_rect(&self) -> Option<Rect> {
        self.anchor_rect
    }

    /// Start an open cycle with a freshly mounted child.
    pub fn begin(&mut self, child: N) {
        *self = Self {
            phase: OverlayPhase::Measuring,
            child: Some(child),
            ..Self::default()
        };
    }

    /// True when the next layout pass should measure and place.
    ///
    /// A measuring overlay is retried on every pass until placement succeeds.
    pub fn needs_placement(&self) -> bool {
        match self.phase {
            OverlayPhase::Hidden => false,
            OverlayPhase::Measuring => true,
            OverlayPhase::Positioned => self.stale,
        }
    }

    /// Arm the placement for the next layout pass.
    pub fn mark_stale(&mut self) {
        if self.is_open() {
            self.stale = true;
        }
    }

    /// Record a change that affects the overlay geometry.
    pub fn invalidate(&mut self, what: Invalidation) {
        if !self.is_open() {
            return;
        }
        if what == Invalidation::Content {
            self.phase = OverlayPhase::Measuring;
            self.measured_size = None;
            self.position = None;
        }
        self.stale = true;
    }

    /// Place the overlay from fresh measurements.
    ///
    /// In follow-cursor mode the anchor is not needed and an unknown overlay size counts
    /// as zero. Otherwise both measurements are required; without them the overlay stays
    /// (or falls back to) `Measuring`.
    pub fn resolve(
        &mut self,
        anchor: Option<Rect>,
        overlay: Option<Size>,
        request: PlacementRequest,
    ) -> OverlayPhase {
        if !self.is_open() {
            return self.phase;
        }
        self.stale = false;
        self.last_request = Some(request);
        self.anchor_rect = anchor;
        if overlay.is_some() {
            self.measured_size = overlay;
        }
        let origin = match (request.cursor, anchor, self.measured_size) {
            (Some(cursor), _, size) => Some(compute_position(
                Rect::ZERO,
                size.unwrap_or(Size::ZERO),
                request.placement,
                Some(cursor),
                request.viewport,
                &request.options,
            )),
            (None, Some(anchor), Some(size)) => Some(compute_position(
                anchor,
                size,
                request.placement,
                None,
                request.viewport,
                &request.options,
            )),
            _ => None,
        };
        self.position = origin;
        self.phase = if origin.is_some() {
            OverlayPhase::Positioned
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                anchor = anchor.is_some(),
                overlay = self.measured_size.is_some(),
                "overlay measurement unavailable, staying off-screen"
            );
            OverlayPhase::Measuring
        };
        self.phase
    }

    /// Re-place a positioned overlay at a new cursor position using the last measurements.
    ///
    /// Returns the new position, or `None` if the overlay is not positioned.
    pub fn track_cursor(&mut self, cursor: Point) -> Option<Point> {
        if self.phase != OverlayPhase::Positioned {
            return None;
        }
        let mut request = self.last_request?;
        request.cursor = Some(cursor);
        self.resolve(self.anchor_rect, None, request);
        self.position
    }

    /// End the open cycle, returning the child to release.
    pub fn end(&mut self) -> Option<N> {
        let child = self.child.take();
        *self = Self::default();
        child
    }

    /// Where to paint the overlay: `None` when hidden, [`OFFSCREEN`] while measuring.
    pub fn paint_origin(&self) -> Option<Point> {
        match self.phase {
            OverlayPhase::Hidden => None,
            OverlayPhase::Measuring => Some(OFFSCREEN),
            OverlayPhase::Positioned => self.position,
        }
    }
}
