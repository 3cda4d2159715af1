// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios through the headless platform.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use understory_placement::{Placement, Side};
use understory_tooltip::adapters::headless::{ContainerId, HeadlessEvent, HeadlessPlatform, NodeId};
use understory_tooltip::binder::{AnchorListeners, FocusKind, ListenerKind, PointerKind};
use understory_tooltip::config::{OverlayRole, TooltipConfig};
use understory_tooltip::context::TooltipContext;
use understory_tooltip::overlay::{OFFSCREEN, OverlayPhase};
use understory_tooltip::tooltip::Tooltip;
use understory_tooltip::types::{Direction, InteractionState, Transition, TriggerSource};
use understory_tooltip::TooltipError;

type Tip = Tooltip<HeadlessPlatform>;

const ENTER: ListenerKind = ListenerKind::Pointer(PointerKind::Enter);
const LEAVE: ListenerKind = ListenerKind::Pointer(PointerKind::Leave);
const MOVE: ListenerKind = ListenerKind::Pointer(PointerKind::Move);
const PRESS_IN: ListenerKind = ListenerKind::Pointer(PointerKind::PressIn);
const PRESS_OUT: ListenerKind = ListenerKind::Pointer(PointerKind::PressOut);
const FOCUS: ListenerKind = ListenerKind::Focus(FocusKind::Focus);

struct Harness {
    platform: HeadlessPlatform,
    ctx: TooltipContext<ContainerId>,
    anchor: NodeId,
}

fn harness() -> Harness {
    let mut platform = HeadlessPlatform::new(Size::new(800.0, 600.0));
    platform.set_overlay_size(Size::new(120.0, 40.0));
    let anchor = platform.insert(Rect::new(100.0, 100.0, 150.0, 120.0));
    Harness {
        platform,
        ctx: TooltipContext::new(),
        anchor,
    }
}

type Log = Rc<RefCell<Vec<Transition>>>;

fn logged(config: TooltipConfig, ctx: &TooltipContext<ContainerId>) -> (Tip, Log) {
    let log: Log = Rc::default();
    let (a, b) = (log.clone(), log.clone());
    let tip = Tip::new(config, ctx)
        .with_on_open(move |t| a.borrow_mut().push(*t))
        .with_on_close(move |t| b.borrow_mut().push(*t));
    (tip, log)
}

impl Harness {
    fn attach(&mut self, config: TooltipConfig) -> (Tip, Log) {
        let (tip, log) = logged(config, &self.ctx);
        tip.attach(&mut self.platform, [self.anchor]).unwrap();
        (tip, log)
    }

    fn send(&mut self, kind: ListenerKind, at: u64) {
        self.platform
            .dispatch(self.anchor, kind, &mut HeadlessEvent::at(at));
    }
}

// enterDelay=300: enter at 0, leave at 100. Never opens, no callbacks at all.
#[test]
fn hover_out_before_enter_delay_never_opens() {
    let mut h = harness();
    let (tip, log) = h.attach(TooltipConfig::default().enter_delay(300));
    h.send(ENTER, 0);
    h.send(LEAVE, 100);
    assert_eq!(tip.advance(1_000), None);
    assert!(!tip.is_open());
    assert!(log.borrow().is_empty());
    assert_eq!(tip.layout(&mut h.platform), None);
}

// touch-start at 0, touch-end at 500, long press 700: never opens.
#[test]
fn short_press_never_opens() {
    let mut h = harness();
    let (tip, log) = h.attach(TooltipConfig::default());
    h.send(PRESS_IN, 0);
    assert_eq!(tip.next_deadline(), Some(700));
    h.send(PRESS_OUT, 500);
    assert_eq!(tip.next_deadline(), None);
    assert_eq!(tip.advance(700), None);
    assert!(log.borrow().is_empty());
}

// Open, close, and reopen inside the hysteresis window without the enter delay.
#[test]
fn hover_cycle_then_instant_reopen() {
    let mut h = harness();
    let (tip, log) = h.attach(TooltipConfig::default().enter_delay(300).leave_delay(100));
    h.send(ENTER, 0);
    assert!(tip.advance(300).is_some_and(|t| t.is_open()));
    h.send(LEAVE, 500);
    assert!(tip.advance(600).is_some_and(|t| !t.is_open()));
    h.send(ENTER, 700);
    assert!(tip.is_open(), "opened with zero delay");
    let directions: Vec<_> = log.borrow().iter().map(|t| t.direction).collect();
    assert_eq!(
        directions,
        [Direction::Open, Direction::Close, Direction::Open]
    );
}

// Once the window lapses the enter delay applies again.
#[test]
fn hysteresis_window_expires() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default().enter_delay(300));
    h.send(ENTER, 0);
    tip.advance(300);
    h.send(LEAVE, 400);
    assert!(!tip.is_open());
    h.send(ENTER, 400 + 800);
    assert_eq!(tip.state(), InteractionState::OpenScheduled);
}

// Hovering along a row of anchors opens each one instantly after the first.
#[test]
fn sibling_tooltips_share_the_window() {
    let mut h = harness();
    let second = h.platform.insert(Rect::new(200.0, 100.0, 250.0, 120.0));
    let cfg = TooltipConfig::default().enter_delay(500);
    let (first, _) = h.attach(cfg.clone());
    let (other, _) = logged(cfg, &h.ctx);
    other.attach(&mut h.platform, [second]).unwrap();

    h.send(ENTER, 0);
    first.advance(500);
    h.send(LEAVE, 600);
    h.platform
        .dispatch(second, ENTER, &mut HeadlessEvent::at(610));
    assert!(other.is_open());
}

// Independent contexts never leak hysteresis into each other.
#[test]
fn separate_contexts_are_isolated() {
    let mut h = harness();
    let (first, _) = h.attach(TooltipConfig::default());
    h.send(ENTER, 0);
    assert!(first.is_open());

    let other_ctx = TooltipContext::new();
    let (other, _) = logged(TooltipConfig::default().enter_delay(300), &other_ctx);
    other.on_hover_enter(10);
    assert!(!other.is_open());
}

#[test]
fn escape_closes_without_pending_timer() {
    let mut h = harness();
    let (tip, log) = h.attach(TooltipConfig::default().leave_delay(5_000));
    h.send(ENTER, 0);
    assert!(tip.is_open());
    let t = tip.on_escape(10).unwrap();
    assert_eq!(t, Transition::close(TriggerSource::Escape, 10));
    assert_eq!(log.borrow().len(), 2);
}

// Controlled: callbacks fire, the visible state stays with the owner.
#[test]
fn controlled_mode_notifies_only() {
    let mut h = harness();
    let (tip, log) = h.attach(TooltipConfig::default().open(false));
    h.send(ENTER, 0);
    assert_eq!(log.borrow().len(), 1);
    assert!(!tip.is_open());
    assert_eq!(tip.layout(&mut h.platform), None, "nothing mounted");

    tip.set_controlled_open(Some(true), 5);
    assert!(tip.is_open());
    h.send(LEAVE, 10);
    assert_eq!(log.borrow().last().map(|t| t.direction), Some(Direction::Close));
    assert!(tip.is_open());
}

// Opening measures off-screen first, then places; closing releases the child.
#[test]
fn two_phase_layout_and_release() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default().placement(Placement::Top));
    h.send(ENTER, 0);
    assert_eq!(tip.state(), InteractionState::OpenMeasuring);

    assert_eq!(tip.layout(&mut h.platform), Some(OFFSCREEN));
    assert_eq!(tip.phase(), OverlayPhase::Measuring);
    let container = h.ctx.container().unwrap();
    let child = h.platform.portal_children(container)[0];
    assert_eq!(
        h.platform.overlay_semantics(child),
        Some(("tooltip-1", OverlayRole::Tooltip))
    );
    assert_eq!(h.platform.described_by(h.anchor), Some("tooltip-1"));

    assert_eq!(tip.layout(&mut h.platform), Some(Point::new(65.0, 50.0)));
    assert_eq!(tip.state(), InteractionState::Open);

    h.send(LEAVE, 10);
    assert_eq!(tip.layout(&mut h.platform), None);
    assert!(h.platform.portal_children(container).is_empty());
    assert!(!h.platform.is_alive(child));
    assert_eq!(h.platform.described_by(h.anchor), None);
}

// The portal container is created once per context and reused.
#[test]
fn container_created_once() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default());
    for cycle in 0..3 {
        let t = cycle * 100;
        h.send(ENTER, t);
        tip.layout(&mut h.platform);
        h.send(LEAVE, t + 10);
        tip.layout(&mut h.platform);
    }
    assert_eq!(h.platform.container_count(), 1);
}

#[test]
fn scroll_and_resize_reposition() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default());
    h.send(ENTER, 0);
    tip.layout(&mut h.platform);
    assert_eq!(tip.layout(&mut h.platform), Some(Point::new(65.0, 130.0)));

    h.platform
        .set_rect(h.anchor, Rect::new(100.0, 50.0, 150.0, 70.0));
    assert_eq!(
        tip.layout(&mut h.platform),
        Some(Point::new(65.0, 130.0)),
        "no re-measure without an invalidation"
    );
    tip.on_scroll();
    assert_eq!(tip.layout(&mut h.platform), Some(Point::new(65.0, 80.0)));

    h.platform.set_viewport(Size::new(150.0, 600.0));
    tip.on_resize();
    assert_eq!(tip.layout(&mut h.platform), Some(Point::new(22.0, 80.0)));
}

// Content resize drops back to measuring for one pass.
#[test]
fn content_resize_remeasures() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default());
    h.send(ENTER, 0);
    tip.layout(&mut h.platform);
    tip.layout(&mut h.platform);
    let container = h.ctx.container().unwrap();
    let child = h.platform.portal_children(container)[0];
    h.platform.set_rect(child, Rect::new(0.0, 0.0, 200.0, 40.0));
    tip.on_content_resize();
    assert_eq!(tip.state(), InteractionState::OpenMeasuring);
    assert_eq!(tip.layout(&mut h.platform), Some(Point::new(25.0, 130.0)));
}

// Anchor removed while positioned: overlay goes back off-screen instead of guessing.
#[test]
fn vanished_anchor_stays_offscreen() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default());
    h.send(ENTER, 0);
    tip.layout(&mut h.platform);
    tip.layout(&mut h.platform);
    h.platform.remove(h.anchor);
    tip.on_scroll();
    assert_eq!(tip.layout(&mut h.platform), Some(OFFSCREEN));
}

// Clearing the anchor reference cancels pending work and closes.
#[test]
fn anchor_ref_detach_closes() {
    let mut h = harness();
    let (tip, log) = logged(
        TooltipConfig::default().enter_delay(300).leave_delay(200),
        &h.ctx,
    );
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    let mut anchor_ref = tip
        .anchor_ref()
        .with_caller(move |n: Option<&NodeId>| s.borrow_mut().push(n.copied()));
    anchor_ref.set(Some(h.anchor));
    assert_eq!(tip.anchor(), Some(h.anchor));

    tip.on_hover_enter(0);
    tip.advance(300);
    tip.layout(&mut h.platform);
    tip.on_hover_leave(400);
    assert_eq!(tip.state(), InteractionState::CloseScheduled);
    anchor_ref.set(None);
    assert!(!tip.is_open());
    assert_eq!(tip.next_deadline(), None);
    assert_eq!(log.borrow().last().map(|t| t.source), Some(TriggerSource::Programmatic));
    assert_eq!(*seen.borrow(), [Some(h.anchor), None]);
    assert_eq!(tip.layout(&mut h.platform), None);
}

#[test]
fn attach_requires_exactly_one_anchor() {
    let mut h = harness();
    let extra = h.platform.insert(Rect::ZERO);
    let tip = Tip::new(TooltipConfig::default(), &h.ctx);
    assert_eq!(
        tip.attach(&mut h.platform, []),
        Err(TooltipError::NoAnchor)
    );
    assert_eq!(
        tip.attach(&mut h.platform, [h.anchor, extra]),
        Err(TooltipError::MultipleAnchors { count: 2 })
    );
    assert_eq!(tip.anchor(), None);
}

// A caller listener registered first can veto the engine with prevent_default.
#[test]
fn caller_listener_runs_first_and_can_veto() {
    let mut h = harness();
    let order = Rc::new(RefCell::new(Vec::new()));
    let o = order.clone();
    h.platform.add_listener(h.anchor, ENTER, move |e| {
        o.borrow_mut().push("caller");
        if e.at == 0 {
            e.prevent_default();
        }
    });
    let (tip, _) = h.attach(TooltipConfig::default());
    h.send(ENTER, 0);
    assert!(!tip.is_open(), "vetoed");
    h.send(ENTER, 1);
    assert!(tip.is_open());
    assert_eq!(*order.borrow(), ["caller", "caller"]);
}

// Prop-style binding keeps the caller's handlers and adds the engine's.
#[test]
fn bind_merges_handler_props() {
    let h = harness();
    let tip = Tip::new(TooltipConfig::default().disable_touch_listener(true), &h.ctx);
    let calls = Rc::new(RefCell::new(0));
    let c = calls.clone();
    let caller = AnchorListeners::new()
        .with(ENTER, move |_: &mut HeadlessEvent| *c.borrow_mut() += 1)
        .with(PRESS_IN, |_: &mut HeadlessEvent| {});
    let mut merged = tip.bind(caller);

    assert!(merged.dispatch(ENTER, &mut HeadlessEvent::at(0)));
    assert_eq!(*calls.borrow(), 1);
    assert!(tip.is_open());
    assert!(merged.is_set(PRESS_IN), "passed through");
    assert!(!merged.is_set(MOVE), "not following the cursor");

    merged.dispatch(PRESS_IN, &mut HeadlessEvent::at(10));
    assert_eq!(tip.next_deadline(), None, "touch listener disabled");
}

// Pointer-driven focus does not open; keyboard focus does.
#[test]
fn only_keyboard_focus_opens() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default());
    h.platform
        .dispatch(h.anchor, FOCUS, &mut HeadlessEvent::at(0).pointer_focus());
    assert!(!tip.is_open());
    h.send(FOCUS, 5);
    assert!(tip.is_open());
}

#[test]
fn follow_cursor_tracks_pointer() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default().follow_cursor(true));
    h.platform.dispatch(
        h.anchor,
        ENTER,
        &mut HeadlessEvent::at(0).with_pointer(Point::new(110.0, 105.0)),
    );
    tip.layout(&mut h.platform);
    assert_eq!(tip.layout(&mut h.platform), Some(Point::new(120.0, 115.0)));

    h.platform.dispatch(
        h.anchor,
        MOVE,
        &mut HeadlessEvent::at(5).with_pointer(Point::new(140.0, 110.0)),
    );
    assert_eq!(tip.paint_origin(), Some(Point::new(150.0, 120.0)));
}

#[test]
fn arrow_points_back_at_anchor() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default().arrow(true));
    assert!(tip.arrow_style(0_u8).is_none());
    h.send(ENTER, 0);
    tip.layout(&mut h.platform);
    let origin = tip.layout(&mut h.platform).unwrap();
    // Bottom placement with arrow: gap 10 + arrow 8 below the anchor.
    assert_eq!(origin.y, 138.0);
    let arrow = tip.arrow_style(0_u8).unwrap();
    assert_eq!(arrow.edge, Side::Top);
    let tip_y = origin.y + arrow.tip().y;
    assert_eq!(tip_y, 130.0, "arrow tip stops one gap short of the anchor");
}

#[test]
fn unmount_releases_everything() {
    let mut h = harness();
    let (tip, log) = h.attach(TooltipConfig::default().leave_delay(300));
    h.send(ENTER, 0);
    tip.layout(&mut h.platform);
    h.send(LEAVE, 10);
    let handle = tip.pending_handle().unwrap();
    tip.unmount(&mut h.platform, 20);

    assert_eq!(tip.fire(handle, 310), None);
    assert_eq!(tip.advance(1_000), None);
    h.send(ENTER, 2_000);
    assert!(!tip.is_open());
    assert!(h.platform.portal_children(h.ctx.container().unwrap()).is_empty());
    assert_eq!(h.platform.described_by(h.anchor), None);
    assert_eq!(log.borrow().len(), 1, "unmount itself is silent");
}

// Listeners outliving the tooltip are harmless.
#[test]
fn dropped_tooltip_listeners_are_inert() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default());
    let weak = tip.downgrade();
    drop(tip);
    h.send(ENTER, 0);
    assert_eq!(weak.upgrade().err(), Some(TooltipError::AnchorReleased));
}

#[test]
fn role_and_label_reach_the_overlay() {
    let mut h = harness();
    let (tip, _) = h.attach(
        TooltipConfig::default()
            .id("help")
            .role(OverlayRole::Alert)
            .label("Saves the file"),
    );
    h.send(ENTER, 0);
    tip.layout(&mut h.platform);
    let child = h.platform.portal_children(h.ctx.container().unwrap())[0];
    assert_eq!(h.platform.overlay_semantics(child), Some(("help", OverlayRole::Alert)));
    assert_eq!(h.platform.overlay_label(child), Some("Saves the file"));
    assert_eq!(tip.described_by().as_deref(), Some("help"));
    assert_eq!(h.platform.anchor_label(h.anchor), Some("Saves the file"));
    tip.on_escape(10);
    tip.layout(&mut h.platform);
    assert_eq!(h.platform.anchor_label(h.anchor), None);
    assert_eq!(h.platform.described_by(h.anchor), None);
}

// Without a configured label the anchor keeps whatever label it had.
#[test]
fn no_label_leaves_anchor_alone() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default());
    h.send(ENTER, 0);
    tip.layout(&mut h.platform);
    assert_eq!(h.platform.anchor_label(h.anchor), None);
    assert_eq!(h.platform.described_by(h.anchor), Some(tip.id().as_str()));
}

// Callbacks get the transition: a timer-fired open names the hover that armed it.
#[test]
fn callbacks_name_the_arming_trigger() {
    let mut h = harness();
    let (tip, log) = h.attach(TooltipConfig::default().enter_delay(300).leave_delay(50));
    h.send(ENTER, 0);
    tip.advance(300);
    h.send(LEAVE, 400);
    tip.advance(450);
    assert_eq!(
        *log.borrow(),
        [
            Transition::open(TriggerSource::Hover, 300),
            Transition::close(TriggerSource::Hover, 450),
        ]
    );
}

// Escape and reopen before the next frame: the new cycle measures the moved anchor.
#[test]
fn reopen_between_layouts_remeasures() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default());
    h.send(ENTER, 0);
    tip.layout(&mut h.platform);
    assert_eq!(tip.layout(&mut h.platform), Some(Point::new(65.0, 130.0)));
    h.platform
        .set_rect(h.anchor, Rect::new(400.0, 300.0, 450.0, 320.0));
    tip.on_escape(10);
    assert!(tip.on_hover_enter(20).is_some_and(|t| t.is_open()));
    assert_eq!(tip.layout(&mut h.platform), Some(Point::new(365.0, 330.0)));
}

// Moving from the anchor onto an interactive overlay keeps it open until the pointer leaves.
#[test]
fn pointer_moves_onto_interactive_overlay() {
    let mut h = harness();
    let (tip, log) = h.attach(TooltipConfig::default().leave_delay(200));
    h.send(ENTER, 0);
    tip.layout(&mut h.platform);
    tip.layout(&mut h.platform);
    let child = h.platform.portal_children(h.ctx.container().unwrap())[0];

    h.send(LEAVE, 100);
    assert_eq!(tip.state(), InteractionState::CloseScheduled);
    assert_eq!(h.platform.dispatch(child, ENTER, &mut HeadlessEvent::at(150)), 1);
    assert_eq!(tip.state(), InteractionState::Open);
    assert_eq!(tip.advance(1_000), None);

    h.platform.dispatch(child, LEAVE, &mut HeadlessEvent::at(1_000));
    let t = tip.advance(1_200).unwrap();
    assert_eq!(t, Transition::close(TriggerSource::Surface, 1_200));
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn non_interactive_overlay_has_no_listeners() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default().disable_interactive(true));
    h.send(ENTER, 0);
    tip.layout(&mut h.platform);
    let child = h.platform.portal_children(h.ctx.container().unwrap())[0];
    assert_eq!(h.platform.dispatch(child, ENTER, &mut HeadlessEvent::at(5)), 0);
}

// Dropping an open tooltip without unmounting still lets the shared window decay.
#[test]
fn dropped_open_tooltip_releases_hysteresis() {
    let mut h = harness();
    let (a, _) = h.attach(TooltipConfig::default());
    h.send(ENTER, 1_000);
    assert!(a.is_open());
    drop(a);
    let (b, _) = logged(TooltipConfig::default().enter_delay(500), &h.ctx);
    assert_eq!(b.on_hover_enter(10_000_000), None);
    assert_eq!(b.state(), InteractionState::OpenScheduled);
}

#[test]
fn disabled_tooltip_ignores_everything() {
    let mut h = harness();
    let (tip, log) = h.attach(TooltipConfig::default().disabled(true));
    h.send(ENTER, 0);
    h.send(FOCUS, 1);
    h.send(PRESS_IN, 2);
    assert!(!tip.is_open());
    assert_eq!(tip.next_deadline(), None);
    assert!(log.borrow().is_empty());
}

#[test]
fn empty_content_never_opens() {
    let mut h = harness();
    let (tip, _) = h.attach(TooltipConfig::default());
    tip.set_has_content(false, 0);
    h.send(ENTER, 1);
    assert!(!tip.is_open());
    assert_eq!(tip.layout(&mut h.platform), None);
}
