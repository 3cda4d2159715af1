// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_tooltip::config::TooltipConfig;
use understory_tooltip::hysteresis::Hysteresis;
use understory_tooltip::scheduler::Scheduler;

/// Hover in, wait out the enter delay, hover out, wait out the leave delay.
fn hover_cycles(s: &mut Scheduler, cycles: u64) -> usize {
    let mut transitions = 0;
    let mut now = 0;
    for _ in 0..cycles {
        s.on_hover_enter(now);
        now += 400;
        transitions += usize::from(s.advance(now).is_some());
        s.on_hover_leave(now);
        now += 2_000;
        transitions += usize::from(s.advance(now).is_some());
    }
    transitions
}

fn bench_hover_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler");
    for &n in &[64u64, 1024] {
        group.throughput(Throughput::Elements(n));
        group.bench_function(format!("hover_cycles_n{}", n), |b| {
            b.iter_batched(
                || {
                    Scheduler::new(
                        &TooltipConfig::default().enter_delay(300).leave_delay(100),
                        Hysteresis::new(),
                    )
                },
                |mut s| black_box(hover_cycles(&mut s, n)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

// Many siblings passing the shared window around, the toolbar sweep case.
fn bench_sibling_sweep(c: &mut Criterion) {
    c.bench_function("scheduler/sibling_sweep_64", |b| {
        b.iter_batched(
            || {
                let shared = Hysteresis::new();
                let config = TooltipConfig::default().enter_delay(300).leave_delay(0);
                (0..64)
                    .map(|_| Scheduler::new(&config, shared.clone()))
                    .collect::<Vec<_>>()
            },
            |mut tips| {
                let mut now = 0;
                let mut opened = 0;
                tips[0].on_hover_enter(now);
                now += 300;
                tips[0].advance(now);
                for i in 1..tips.len() {
                    now += 50;
                    tips[i - 1].on_hover_leave(now);
                    opened += usize::from(tips[i].on_hover_enter(now).is_some());
                }
                black_box(opened)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_hover_cycles, bench_sibling_sweep);
criterion_main!(benches);
