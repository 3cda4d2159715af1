// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement calculator: anchor rectangle + overlay size → overlay origin.
//!
//! ## Overview
//!
//! [`compute_position`] works in two steps:
//!
//! 1) [`unclamped_position`] puts the overlay on the requested [`Side`] of the anchor,
//!    separated by the gap (plus the arrow size when an arrow is drawn), and aligns it on the
//!    cross axis: centered for the base placements, flush with the matching anchor edge for
//!    `-start`/`-end`. When following the cursor the anchor is ignored and the origin is the
//!    cursor plus a fixed offset.
//! 2) [`clamp_to_viewport`] keeps the overlay inside `[margin, viewport - size - margin]`
//!    on each axis independently.
//!
//! ## Limitations
//!
//! There is no flip. When the preferred side has no room on the primary axis the overlay is
//! clamped against the viewport edge and may cover the anchor.
//! [`Placement::opposite`] is available for callers that want their own fallback.
//!
//! ## Coordinates
//!
//! All inputs and outputs are viewport-relative (client coordinates). The returned [`Point`]
//! is the overlay's top-left corner: `x` is `left`, `y` is `top`.
//! Use [`viewport_to_document`] if you paint in a scrolled document space.

use kurbo::{Point, Rect, Size, Vec2};

use crate::types::{Align, Placement, Side};

/// Default distance between the anchor and the overlay.
pub const DEFAULT_GAP: f64 = 10.0;

/// Size of the arrow triangle (its border width). Added to the gap when an arrow is drawn.
pub const ARROW_SIZE: f64 = 8.0;

/// Minimum distance kept between the overlay and the viewport edges.
pub const VIEWPORT_MARGIN: f64 = 8.0;

/// Offset from the cursor when following it.
pub const CURSOR_OFFSET: Vec2 = Vec2::new(10.0, 10.0);

/// Tunables for [`compute_position`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementOptions {
    /// Distance between the anchor edge and the overlay edge.
    pub gap: f64,
    /// When true, [`ARROW_SIZE`] is added to the gap on the primary axis.
    pub arrow: bool,
    /// Minimum distance from the viewport edges after clamping.
    pub margin: f64,
    /// Offset from the cursor in follow-cursor mode.
    pub cursor_offset: Vec2,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            arrow: false,
            margin: VIEWPORT_MARGIN,
            cursor_offset: CURSOR_OFFSET,
        }
    }
}

impl PlacementOptions {
    /// Set the gap.
    #[must_use]
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Enable or disable the arrow offset.
    #[must_use]
    pub fn arrow(mut self, arrow: bool) -> Self {
        self.arrow = arrow;
        self
    }

    /// Set the viewport margin.
    #[must_use]
    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Total primary-axis distance between anchor and overlay.
    pub fn offset(&self) -> f64 {
        if self.arrow {
            self.gap + ARROW_SIZE
        } else {
            self.gap
        }
    }
}

/// Compute the clamped top-left corner of the overlay.
///
/// `cursor` selects follow-cursor mode: when `Some`, the anchor is ignored and the
/// overlay is placed at `cursor + options.cursor_offset`. Either way the result is clamped
/// into the viewport.
///
/// ```
/// use kurbo::{Point, Rect, Size};
/// use understory_placement::{Placement, PlacementOptions, compute_position};
///
/// let anchor = Rect::new(100.0, 100.0, 150.0, 120.0);
/// let pos = compute_position(
///     anchor,
///     Size::new(120.0, 40.0),
///     Placement::Top,
///     None,
///     Size::new(800.0, 600.0),
///     &PlacementOptions::default(),
/// );
/// assert_eq!(pos, Point::new(65.0, 50.0));
/// ```
pub fn compute_position(
    anchor: Rect,
    overlay: Size,
    placement: Placement,
    cursor: Option<Point>,
    viewport: Size,
    options: &PlacementOptions,
) -> Point {
    let raw = match cursor {
        Some(c) => c + options.cursor_offset,
        None => unclamped_position(anchor, overlay, placement, options),
    };
    clamp_to_viewport(raw, overlay, viewport, options.margin)
}

/// Place the overlay against the anchor without looking at the viewport.
pub fn unclamped_position(
    anchor: Rect,
    overlay: Size,
    placement: Placement,
    options: &PlacementOptions,
) -> Point {
    let offset = options.offset();
    let side = placement.side();
    let align = placement.align();

    if side.is_vertical() {
        let y = match side {
            Side::Top => anchor.y0 - overlay.height - offset,
            _ => anchor.y1 + offset,
        };
        let x = cross_axis(anchor.x0, anchor.x1, overlay.width, align);
        Point::new(x, y)
    } else {
        let x = match side {
            Side::Left => anchor.x0 - overlay.width - offset,
            _ => anchor.x1 + offset,
        };
        let y = cross_axis(anchor.y0, anchor.y1, overlay.height, align);
        Point::new(x, y)
    }
}

fn cross_axis(start: f64, end: f64, extent: f64, align: Align) -> f64 {
    match align {
        Align::Center => start + (end - start) / 2.0 - extent / 2.0,
        Align::Start => start,
        Align::End => end - extent,
    }
}

/// Clamp each axis of `origin` into `[margin, viewport - overlay - margin]`.
///
/// When the overlay does not fit on an axis the upper bound collapses to `margin`,
/// so the overlay is pinned to the leading edge.
pub fn clamp_to_viewport(origin: Point, overlay: Size, viewport: Size, margin: f64) -> Point {
    Point::new(
        clamp_axis(origin.x, overlay.width, viewport.width, margin),
        clamp_axis(origin.y, overlay.height, viewport.height, margin),
    )
}

fn clamp_axis(value: f64, extent: f64, viewport: f64, margin: f64) -> f64 {
    let upper = (viewport - extent - margin).max(margin);
    value.max(margin).min(upper)
}

/// Convert a viewport-relative origin to document space given the current scroll offset.
pub fn viewport_to_document(origin: Point, scroll: Vec2) -> Point {
    origin + scroll
}
