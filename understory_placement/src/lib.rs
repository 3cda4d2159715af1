// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: Kurbo-native geometry for anchored floating overlays.
//!
//! Tooltips, popovers, and menus all need the same two answers: where does the floating
//! surface go relative to its anchor, and what does the little arrow pointing back at the
//! anchor look like. This crate answers both as pure functions.
//!
//! - [`compute_position`]: anchor [`Rect`](kurbo::Rect) + overlay [`Size`](kurbo::Size) +
//!   [`Placement`] + viewport → clamped top-left [`Point`](kurbo::Point).
//! - [`compute_arrow_style`]: placement + overlay size + surface color → [`ArrowStyle`], a
//!   zero-area box with asymmetric borders forming a directional triangle.
//!
//! ## Placements
//!
//! [`Placement`] is one of 12 values: a [`Side`] (`top`, `bottom`, `left`, `right`) and an
//! [`Align`] on the cross axis (centered, `-start`, `-end`). Unknown placement names fall back
//! to the default via [`Placement::parse_or_default`].
//!
//! ## Clamping, not flipping
//!
//! After computing the ideal position, each axis is clamped into the viewport with an 8px
//! margin ([`VIEWPORT_MARGIN`]). There is no automatic flip to the opposite side; a
//! placement that overflows on its primary axis is clamped and may cover the anchor.
//!
//! ## Coordinates
//!
//! Inputs and outputs are viewport-relative. See [`viewport_to_document`] for painting in a
//! scrolled document.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_placement::{Placement, PlacementOptions, compute_arrow_style, compute_position};
//!
//! let anchor = Rect::from_origin_size((100.0, 100.0), (50.0, 20.0));
//! let overlay = Size::new(120.0, 40.0);
//! let viewport = Size::new(800.0, 600.0);
//! let options = PlacementOptions::default().arrow(true);
//!
//! let origin = compute_position(anchor, overlay, Placement::Top, None, viewport, &options);
//! let arrow = compute_arrow_style(Placement::Top, overlay, "#222");
//!
//! // The arrow tip stops short of the anchor by the plain gap.
//! let tip = origin + arrow.tip().to_vec2();
//! assert!(tip.y < anchor.y0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arrow;
mod position;
mod types;

pub use arrow::{ArrowStyle, BorderColors, arrow_style_with_size, compute_arrow_style};
pub use position::{
    ARROW_SIZE, CURSOR_OFFSET, DEFAULT_GAP, PlacementOptions, VIEWPORT_MARGIN, clamp_to_viewport,
    compute_position, unclamped_position, viewport_to_document,
};
pub use types::{Align, ParsePlacementError, Placement, Side};
