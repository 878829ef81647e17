// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_gesture::{
    GestureDispatcher, GestureSettings, PanRecognizer, PointerEvent, PointerId, RecognizerId,
    TapRecognizer, VelocityTracker,
};

/// A dispatcher with `pairs` pan/tap pairs, all competing for one pointer.
fn competing(pairs: usize) -> (GestureDispatcher, Vec<RecognizerId>) {
    let mut gestures = GestureDispatcher::new();
    let mut ids = Vec::with_capacity(pairs * 2);
    for _ in 0..pairs {
        ids.push(gestures.insert(PanRecognizer::new(GestureSettings::default())));
        ids.push(gestures.insert(TapRecognizer::new(GestureSettings::default())));
    }
    (gestures, ids)
}

/// Down, a drag past the pan slop, then up.
fn drag_sequence(gestures: &mut GestureDispatcher, ids: &[RecognizerId], moves: u32) -> usize {
    let p = PointerId(1);
    let down = PointerEvent::down(p, Point::ZERO, 0);
    for &id in ids {
        let _ = gestures.add_pointer(id, &down);
    }
    let mut errors = gestures.handle_event(&down).len();
    for i in 1..=moves {
        let position = Point::new(f64::from(i) * 3.0, 0.0);
        errors += gestures
            .handle_event(&PointerEvent::moved(p, position, u64::from(i) * 8))
            .len();
    }
    let end = Point::new(f64::from(moves) * 3.0, 0.0);
    errors += gestures
        .handle_event(&PointerEvent::up(p, end, u64::from(moves + 1) * 8))
        .len();
    errors
}

fn bench_arbitration(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_sequence");
    for pairs in [1_usize, 4, 16] {
        group.bench_function(format!("{pairs}_pairs"), |b| {
            b.iter_batched(
                || competing(pairs),
                |(mut gestures, ids)| drag_sequence(&mut gestures, black_box(&ids), 30),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_velocity(c: &mut Criterion) {
    c.bench_function("velocity_tracker_full_history", |b| {
        let mut tracker = VelocityTracker::new();
        for i in 0..20_u32 {
            tracker.add_position(u64::from(i) * 4, Point::new(f64::from(i) * 12.0, 0.0));
        }
        b.iter(|| black_box(&tracker).velocity());
    });
}

criterion_group!(benches, bench_arbitration, bench_velocity);
criterion_main!(benches);
