// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long-press on a touch screen, with the emulated mouse events that follow.
//!
//! Run:
//! - `cargo run -p understory_demos --example tooltip_touch`

use kurbo::{Rect, Size};
use understory_tooltip::adapters::headless::{HeadlessEvent, HeadlessPlatform};
use understory_tooltip::binder::{ListenerKind, PointerKind};
use understory_tooltip::config::TooltipConfig;
use understory_tooltip::context::TooltipContext;
use understory_tooltip::tooltip::Tooltip;
use understory_tooltip::types::InteractionState;

const PRESS_IN: ListenerKind = ListenerKind::Pointer(PointerKind::PressIn);
const PRESS_OUT: ListenerKind = ListenerKind::Pointer(PointerKind::PressOut);
const ENTER: ListenerKind = ListenerKind::Pointer(PointerKind::Enter);

fn main() {
    let mut platform = HeadlessPlatform::new(Size::new(390.0, 844.0));
    platform.set_overlay_size(Size::new(160.0, 32.0));
    let icon = platform.insert(Rect::new(300.0, 40.0, 340.0, 80.0));
    let ctx = TooltipContext::new();
    let tip: Tooltip<HeadlessPlatform> = Tooltip::new(TooltipConfig::default(), &ctx)
        .with_on_open(|t| println!("open at {}ms", t.at))
        .with_on_close(|t| println!("close at {}ms", t.at));
    tip.attach(&mut platform, [icon]).expect("single anchor");

    println!("== Quick tap ==");
    platform.dispatch(icon, PRESS_IN, &mut HeadlessEvent::at(0));
    platform.dispatch(icon, PRESS_OUT, &mut HeadlessEvent::at(200));
    // The browser-style emulated mouseenter lands right after the tap.
    platform.dispatch(icon, ENTER, &mut HeadlessEvent::at(210));
    assert_eq!(tip.state(), InteractionState::Closed);
    println!("  still {:?}", tip.state());

    println!("== Long press ==");
    platform.dispatch(icon, PRESS_IN, &mut HeadlessEvent::at(1_000));
    let deadline = tip.next_deadline().expect("long-press pending");
    tip.advance(deadline);
    tip.layout(&mut platform);
    let origin = tip.layout(&mut platform).expect("placed");
    // Clamped against the right edge of a narrow screen.
    println!("  painted at ({}, {})", origin.x, origin.y);

    platform.dispatch(icon, PRESS_OUT, &mut HeadlessEvent::at(2_000));
    println!("  released, {:?} until {:?}", tip.state(), tip.next_deadline());
    if let Some(deadline) = tip.next_deadline() {
        tip.advance(deadline);
    }
    tip.layout(&mut platform);
    assert!(!tip.is_open());
}
