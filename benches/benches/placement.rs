// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_placement::{Placement, PlacementOptions, compute_arrow_style, compute_position};

const VIEWPORT: Size = Size::new(1280.0, 800.0);

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Anchors scattered over a slightly larger area than the viewport, so some clamp.
fn gen_anchors(count: usize) -> Vec<Rect> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let x0 = rng.next_f64() * (VIEWPORT.width + 200.0) - 100.0;
        let y0 = rng.next_f64() * (VIEWPORT.height + 200.0) - 100.0;
        let w = 16.0 + rng.next_f64() * 120.0;
        let h = 12.0 + rng.next_f64() * 40.0;
        out.push(Rect::new(x0, y0, x0 + w, y0 + h));
    }
    out
}

fn bench_compute_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_position");
    let anchors = gen_anchors(1024);
    let overlay = Size::new(180.0, 48.0);
    let options = PlacementOptions::default();
    group.throughput(Throughput::Elements((anchors.len() * Placement::ALL.len()) as u64));
    group.bench_function("anchored_all_placements", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for anchor in &anchors {
                for placement in Placement::ALL {
                    let p = compute_position(*anchor, overlay, placement, None, VIEWPORT, &options);
                    acc += p.x + p.y;
                }
            }
            black_box(acc)
        });
    });
    let cursors: Vec<Point> = anchors.iter().map(Rect::center).collect();
    group.throughput(Throughput::Elements(cursors.len() as u64));
    group.bench_function("follow_cursor", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for cursor in &cursors {
                let p = compute_position(
                    Rect::ZERO,
                    overlay,
                    Placement::Bottom,
                    Some(*cursor),
                    VIEWPORT,
                    &options,
                );
                acc += p.x + p.y;
            }
            black_box(acc)
        });
    });
    group.finish();
}

fn bench_arrow(c: &mut Criterion) {
    let overlay = Size::new(180.0, 48.0);
    c.bench_function("arrow_style_all_placements", |b| {
        b.iter(|| {
            for placement in Placement::ALL {
                black_box(compute_arrow_style(black_box(placement), overlay, 0xFF_u32));
            }
        });
    });
}

criterion_group!(benches, bench_compute_position, bench_arrow);
criterion_main!(benches);
