// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer velocity estimation for flings.
//!
//! [`VelocityTracker`] keeps the most recent pointer samples in a ring buffer
//! and fits a line through the ones inside a short time horizon, weighting
//! recent samples more. A pause between samples means the pointer stopped,
//! so nothing older than the pause contributes.

use kurbo::{Point, Vec2};

const HISTORY_SIZE: usize = 20;
/// Samples older than this, relative to the newest, are ignored.
const HORIZON_MS: u64 = 100;
/// A gap this long between consecutive samples means the pointer stopped.
const ASSUME_STOPPED_MS: u64 = 40;
/// Per-sample weight decay, newest first.
const RECENCY_DECAY: f64 = 0.95;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Sample {
    time_ms: u64,
    position: Point,
}

/// Estimates pointer velocity from timestamped positions.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl VelocityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the pointer at `position` at `time_ms`.
    pub fn add_position(&mut self, time_ms: u64, position: Point) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    /// Forgets every sample.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Estimated velocity in units per second.
    ///
    /// Zero with fewer than two usable samples, or when the pointer has
    /// stalled since its last movement.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        let Some(newest) = self.samples[self.newest] else {
            return Vec2::ZERO;
        };

        let mut sum_w = 0.0;
        let mut sum_t = 0.0;
        let mut sum_tt = 0.0;
        let mut sum_x = Vec2::ZERO;
        let mut sum_tx = Vec2::ZERO;
        let mut count = 0;
        let mut previous_time = newest.time_ms;
        let mut w = 1.0;

        for step in 0..HISTORY_SIZE {
            let index = (self.newest + HISTORY_SIZE - step) % HISTORY_SIZE;
            let Some(sample) = self.samples[index] else {
                break;
            };
            if sample.time_ms > previous_time
                || newest.time_ms - sample.time_ms > HORIZON_MS
                || previous_time - sample.time_ms > ASSUME_STOPPED_MS
            {
                break;
            }
            previous_time = sample.time_ms;

            // Time relative to the newest sample, in milliseconds (non-positive).
            let t = -((newest.time_ms - sample.time_ms) as f64);
            let x = sample.position.to_vec2();
            sum_w += w;
            sum_t += w * t;
            sum_tt += w * t * t;
            sum_x += x * w;
            sum_tx += x * (w * t);
            count += 1;
            w *= RECENCY_DECAY;
        }

        if count < 2 {
            return Vec2::ZERO;
        }
        let denom = sum_w * sum_tt - sum_t * sum_t;
        // Weighted variance of the sample times; zero when they coincide.
        if denom < f64::EPSILON {
            return Vec2::ZERO;
        }
        let per_ms = (sum_tx * sum_w - sum_x * sum_t) / denom;
        per_ms * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_single_sample_is_zero() {
        let mut tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity(), Vec2::ZERO);
        tracker.add_position(0, Point::new(5.0, 5.0));
        assert_eq!(tracker.velocity(), Vec2::ZERO);
    }

    #[test]
    fn constant_motion_is_recovered() {
        let mut tracker = VelocityTracker::new();
        for i in 0..6_u32 {
            let t = u64::from(i) * 10;
            tracker.add_position(t, Point::new(f64::from(i) * 20.0, f64::from(i) * -5.0));
        }
        let v = tracker.velocity();
        assert!((v.x - 2000.0).abs() < 1e-6, "x velocity {}", v.x);
        assert!((v.y + 500.0).abs() < 1e-6, "y velocity {}", v.y);
    }

    #[test]
    fn samples_beyond_horizon_are_ignored() {
        let mut tracker = VelocityTracker::new();
        // A fast early burst, then slow motion for longer than the horizon.
        tracker.add_position(0, Point::new(0.0, 0.0));
        tracker.add_position(5, Point::new(500.0, 0.0));
        let mut t = 5;
        let mut x = 500.0;
        while t < 200 {
            t += 10;
            x += 1.0;
            tracker.add_position(t, Point::new(x, 0.0));
        }
        let v = tracker.velocity();
        assert!((v.x - 100.0).abs() < 1e-6, "x velocity {}", v.x);
    }

    #[test]
    fn pause_before_release_means_no_velocity() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, Point::new(0.0, 0.0));
        tracker.add_position(10, Point::new(50.0, 0.0));
        tracker.add_position(20, Point::new(100.0, 0.0));
        // Released after holding still.
        tracker.add_position(120, Point::new(100.0, 0.0));
        assert_eq!(tracker.velocity(), Vec2::ZERO);
    }

    #[test]
    fn reset_forgets_history() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, Point::ZERO);
        tracker.add_position(10, Point::new(10.0, 0.0));
        tracker.reset();
        assert_eq!(tracker.velocity(), Vec2::ZERO);
    }
}
