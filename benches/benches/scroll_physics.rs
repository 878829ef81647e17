// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use understory_scroll::{
    AnyScrollBehavior, BoundedBehavior, ExtentScrollBehavior, OverscrollBehavior, ScrollBehavior,
    Simulation, UnboundedBehavior,
};

const FRAME: f64 = 1.0 / 60.0;

/// Samples a fling once per frame until it settles.
fn run_fling(behavior: &AnyScrollBehavior, position: f64, velocity: f64) -> f64 {
    let Some(sim) = behavior.create_fling_scroll_simulation(position, velocity, 2.0) else {
        return position;
    };
    let mut t = 0.0;
    let mut x = position;
    while !sim.is_done(t) && t < 30.0 {
        x = sim.x(t);
        t += FRAME;
    }
    x
}

fn bench_flings(c: &mut Criterion) {
    let behaviors: [(&str, AnyScrollBehavior); 3] = [
        ("unbounded", UnboundedBehavior::new(10_000.0, 800.0).into()),
        ("bounded", BoundedBehavior::new(10_000.0, 800.0).into()),
        ("overscroll", OverscrollBehavior::new(10_000.0, 800.0).into()),
    ];
    let mut group = c.benchmark_group("fling_to_rest");
    for (name, behavior) in &behaviors {
        group.bench_function(*name, |b| {
            b.iter(|| run_fling(black_box(behavior), black_box(8_000.0), black_box(4.0)));
        });
    }
    // Starts past the end so the spring phase dominates.
    group.bench_function("overscroll_spring_back", |b| {
        let behavior: AnyScrollBehavior = OverscrollBehavior::new(10_000.0, 800.0).into();
        b.iter(|| run_fling(black_box(&behavior), black_box(9_400.0), black_box(0.5)));
    });
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    c.bench_function("overscroll_drag_1000_deltas", |b| {
        let behavior = OverscrollBehavior::new(10_000.0, 800.0);
        b.iter(|| {
            let mut offset = 0.0;
            for i in 0..1000 {
                let delta = if i % 2 == 0 { -7.5 } else { 3.0 };
                offset = behavior.apply_curve(offset, black_box(delta));
            }
            offset
        });
    });

    c.bench_function("bounded_update_extents", |b| {
        let mut behavior = BoundedBehavior::new(10_000.0, 800.0);
        let mut content = 10_000.0;
        b.iter(|| {
            content = if content > 5_000.0 { 1_000.0 } else { 10_000.0 };
            behavior.update_extents(Some(black_box(content)), None, black_box(9_000.0))
        });
    });
}

criterion_group!(benches, bench_flings, bench_drag);
criterion_main!(benches);
