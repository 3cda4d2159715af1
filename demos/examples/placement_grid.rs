// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Print every placement for one anchor, with and without viewport clamping.
//!
//! Run:
//! - `cargo run -p understory_demos --example placement_grid`

use kurbo::{Rect, Size};
use understory_placement::{
    Placement, PlacementOptions, compute_arrow_style, compute_position, unclamped_position,
};

fn main() {
    let viewport = Size::new(320.0, 240.0);
    let overlay = Size::new(100.0, 30.0);
    let anchor = Rect::new(20.0, 100.0, 80.0, 124.0);
    let options = PlacementOptions::default().arrow(true);

    println!("{:<14} {:>16} {:>16}  arrow tip", "placement", "raw", "clamped");
    for placement in Placement::ALL {
        let raw = unclamped_position(anchor, overlay, placement, &options);
        let clamped = compute_position(anchor, overlay, placement, None, viewport, &options);
        let arrow = compute_arrow_style(placement, overlay, ());
        let tip = arrow.tip();
        println!(
            "{:<14} ({:>6.1},{:>6.1}) ({:>6.1},{:>6.1})  ({:.1}, {:.1})",
            placement.as_str(),
            raw.x,
            raw.y,
            clamped.x,
            clamped.y,
            tip.x,
            tip.y,
        );
    }

    // Names round-trip through the string form, and unknown names fall back.
    let parsed: Placement = "bottom-start".parse().expect("known placement");
    assert_eq!(parsed, Placement::BottomStart);
    assert_eq!(Placement::parse_or_default("sideways"), Placement::Bottom);
}
