// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrow geometry resolver: the border-triangle that points from the overlay to the anchor.
//!
//! The arrow is described the way border-based renderers draw it: a zero-area box whose
//! four borders have asymmetric widths, with only the border on the far side of the
//! pointing direction painted in the surface color. The remaining borders are transparent
//! (`None`). Renderers that draw paths can use [`ArrowStyle::triangle`] instead.
//!
//! Placement of the box, in overlay-local coordinates:
//! - It sits on the overlay edge that faces the anchor (the opposite of the placement side).
//! - Along the cross axis it is centered for base placements, inset by `2 × size` from the
//!   start edge for `-start`, and `3 × size` from the end edge for `-end`.
//! - It starts flush with the overlay edge. Renderers that show a hairline seam between the
//!   surface and the arrow can pull it in with [`ArrowStyle::overlapping`].

use kurbo::{Insets, Point, Rect, Size};

use crate::position::ARROW_SIZE;
use crate::types::{Align, Placement, Side};

/// Per-edge border colors of the arrow box. `None` is transparent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BorderColors<C> {
    /// Top border color.
    pub top: Option<C>,
    /// Right border color.
    pub right: Option<C>,
    /// Bottom border color.
    pub bottom: Option<C>,
    /// Left border color.
    pub left: Option<C>,
}

impl<C> BorderColors<C> {
    fn only(side: Side, color: C) -> Self {
        let mut out = Self {
            top: None,
            right: None,
            bottom: None,
            left: None,
        };
        match side {
            Side::Top => out.top = Some(color),
            Side::Right => out.right = Some(color),
            Side::Bottom => out.bottom = Some(color),
            Side::Left => out.left = Some(color),
        }
        out
    }
}

/// Border-triangle description of an arrow.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArrowStyle<C> {
    /// Edge of the overlay the arrow is attached to.
    pub edge: Side,
    /// Top-left corner of the arrow box (outer border edge) in overlay-local coordinates.
    pub origin: Point,
    /// Border widths; `x0` is left, `y0` is top, `x1` is right, `y1` is bottom.
    pub widths: Insets,
    /// Border colors; exactly one is set.
    pub colors: BorderColors<C>,
}

impl<C> ArrowStyle<C> {
    /// Outer bounds of the arrow box in overlay-local coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(
            self.origin,
            Size::new(
                self.widths.x0 + self.widths.x1,
                self.widths.y0 + self.widths.y1,
            ),
        )
    }

    /// Move the box `overlap` units into the overlay, keeping its shape.
    ///
    /// ```
    /// use kurbo::{Point, Size};
    /// use understory_placement::{Placement, compute_arrow_style};
    ///
    /// let arrow = compute_arrow_style(Placement::Top, Size::new(120.0, 40.0), ()).overlapping(1.0);
    /// assert_eq!(arrow.origin, Point::new(52.0, 39.0));
    /// ```
    #[must_use]
    pub fn overlapping(mut self, overlap: f64) -> Self {
        match self.edge {
            Side::Bottom => self.origin.y -= overlap,
            Side::Top => self.origin.y += overlap,
            Side::Right => self.origin.x -= overlap,
            Side::Left => self.origin.x += overlap,
        }
        self
    }

    /// The point of the arrow, the vertex nearest the anchor.
    pub fn tip(&self) -> Point {
        self.triangle()[2]
    }

    /// The filled triangle as `[base_start, base_end, tip]` in overlay-local coordinates.
    pub fn triangle(&self) -> [Point; 3] {
        let b = self.bounds();
        match self.edge {
            // Attached under the overlay, pointing down.
            Side::Bottom => [
                Point::new(b.x0, b.y0),
                Point::new(b.x1, b.y0),
                Point::new(b.center().x, b.y1),
            ],
            Side::Top => [
                Point::new(b.x0, b.y1),
                Point::new(b.x1, b.y1),
                Point::new(b.center().x, b.y0),
            ],
            Side::Right => [
                Point::new(b.x0, b.y0),
                Point::new(b.x0, b.y1),
                Point::new(b.x1, b.center().y),
            ],
            Side::Left => [
                Point::new(b.x1, b.y0),
                Point::new(b.x1, b.y1),
                Point::new(b.x0, b.center().y),
            ],
        }
    }
}

/// Resolve the arrow for `placement` on an overlay of size `overlay` using the default
/// [`ARROW_SIZE`].
///
/// ```
/// use kurbo::{Point, Size};
/// use understory_placement::{Placement, Side, compute_arrow_style};
///
/// let arrow = compute_arrow_style(Placement::Top, Size::new(120.0, 40.0), 0xff_u8);
/// // Overlay sits above the anchor, so the arrow hangs off its bottom edge.
/// assert_eq!(arrow.edge, Side::Bottom);
/// assert_eq!(arrow.tip(), Point::new(60.0, 48.0));
/// ```
pub fn compute_arrow_style<C: Copy>(placement: Placement, overlay: Size, color: C) -> ArrowStyle<C> {
    arrow_style_with_size(placement, overlay, color, ARROW_SIZE)
}

/// Resolve the arrow with an explicit triangle size.
pub fn arrow_style_with_size<C: Copy>(
    placement: Placement,
    overlay: Size,
    color: C,
    size: f64,
) -> ArrowStyle<C> {
    let edge = placement.side().opposite();
    let align = placement.align();
    let s = size;

    let (origin, widths, painted) = match placement.side() {
        // Overlay above the anchor: box below the overlay, top border painted, points down.
        Side::Top => (
            Point::new(cross(overlay.width, s, align), overlay.height),
            Insets::new(s, s, s, 0.0),
            Side::Top,
        ),
        Side::Bottom => (
            Point::new(cross(overlay.width, s, align), -s),
            Insets::new(s, 0.0, s, s),
            Side::Bottom,
        ),
        Side::Left => (
            Point::new(overlay.width, cross(overlay.height, s, align)),
            Insets::new(s, s, 0.0, s),
            Side::Left,
        ),
        Side::Right => (
            Point::new(-s, cross(overlay.height, s, align)),
            Insets::new(0.0, s, s, s),
            Side::Right,
        ),
    };

    ArrowStyle {
        edge,
        origin,
        widths,
        colors: BorderColors::only(painted, color),
    }
}

fn cross(extent: f64, size: f64, align: Align) -> f64 {
    match align {
        Align::Center => extent / 2.0 - size,
        Align::Start => size * 2.0,
        Align::End => extent - size * 3.0,
    }
}
