// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover a toolbar of three buttons that share one tooltip context.
//!
//! The first tooltip waits out its enter delay. Sweeping to the neighbours opens theirs at
//! once while the hysteresis window is live.
//!
//! Run:
//! - `cargo run -p understory_demos --example tooltip_hover`

use kurbo::{Rect, Size};
use understory_tooltip::adapters::headless::{HeadlessEvent, HeadlessPlatform};
use understory_tooltip::binder::{ListenerKind, PointerKind};
use understory_tooltip::config::TooltipConfig;
use understory_tooltip::context::TooltipContext;
use understory_tooltip::tooltip::Tooltip;

const ENTER: ListenerKind = ListenerKind::Pointer(PointerKind::Enter);
const LEAVE: ListenerKind = ListenerKind::Pointer(PointerKind::Leave);

fn main() {
    let mut platform = HeadlessPlatform::new(Size::new(800.0, 600.0));
    platform.set_overlay_size(Size::new(90.0, 28.0));
    let ctx = TooltipContext::new();

    let labels = ["Cut", "Copy", "Paste"];
    let mut toolbar = Vec::new();
    for (i, label) in labels.into_iter().enumerate() {
        let x0 = 20.0 + i as f64 * 40.0;
        let button = platform.insert(Rect::new(x0, 20.0, x0 + 32.0, 52.0));
        let tip: Tooltip<HeadlessPlatform> = Tooltip::new(
            TooltipConfig::default()
                .enter_delay(400)
                .leave_delay(50)
                .label(label),
            &ctx,
        )
        .with_on_open(move |t| println!("  open  {label:<5} at {:>4}ms ({:?})", t.at, t.source))
        .with_on_close(move |t| println!("  close {label:<5} at {:>4}ms ({:?})", t.at, t.source));
        tip.attach(&mut platform, [button])
            .expect("one anchor per tooltip");
        toolbar.push((button, tip));
    }

    println!("== Sweep ==");
    let mut now = 0;
    for (button, tip) in &toolbar {
        platform.dispatch(*button, ENTER, &mut HeadlessEvent::at(now));
        if !tip.is_open() {
            let deadline = tip.next_deadline().expect("enter delay pending");
            now = deadline;
            tip.advance(now);
        }
        // Mount pass, then placement pass.
        tip.layout(&mut platform);
        let origin = tip.layout(&mut platform).expect("placed");
        println!("  {} painted at ({}, {})", tip.id(), origin.x, origin.y);

        now += 120;
        platform.dispatch(*button, LEAVE, &mut HeadlessEvent::at(now));
        now += 50;
        tip.advance(now);
        tip.layout(&mut platform);
    }

    println!("== After the window ==");
    let (button, tip) = &toolbar[0];
    now += 2_000;
    platform.dispatch(*button, ENTER, &mut HeadlessEvent::at(now));
    println!("  state {:?}, deadline {:?}", tip.state(), tip.next_deadline());
}
