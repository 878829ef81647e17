// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settling thresholds, scaled to the display's device pixel ratio.

/// Thresholds below which a simulation is considered settled.
///
/// All values are magnitudes in the simulation's own units: `distance` in
/// offset units, `time` in seconds and `velocity` in offset units per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    /// Maximum remaining distance to rest.
    pub distance: f64,
    /// Maximum difference between two times treated as equal.
    pub time: f64,
    /// Maximum residual speed.
    pub velocity: f64,
}

impl Tolerance {
    /// Creates a tolerance with explicit thresholds.
    #[must_use]
    pub const fn new(distance: f64, time: f64, velocity: f64) -> Self {
        Self {
            distance,
            time,
            velocity,
        }
    }

    /// Tolerance for scroll motion on a display with the given device pixel ratio.
    ///
    /// Scroll offsets are logical pixels. Motion stops once it is within half a
    /// device pixel of rest and slower than 15 device pixels per second, so
    /// settling looks the same on every pixel density.
    ///
    /// A non-finite or non-positive ratio is treated as `1.0`.
    #[must_use]
    pub fn for_device_pixel_ratio(device_pixel_ratio: f64) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            distance: SCROLL_DISTANCE_TOLERANCE_DEVICE_PX / dpr,
            time: DEFAULT_TOLERANCE,
            velocity: SCROLL_VELOCITY_TOLERANCE_DEVICE_PX / dpr,
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_TOLERANCE, DEFAULT_TOLERANCE)
    }
}

const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Distance to rest, in device pixels, under which scroll motion is settled.
pub const SCROLL_DISTANCE_TOLERANCE_DEVICE_PX: f64 = 0.5;

/// Speed, in device pixels per second, under which scroll motion is settled.
pub const SCROLL_VELOCITY_TOLERANCE_DEVICE_PX: f64 = 15.0;

/// Returns `true` if `a` and `b` differ by no more than `epsilon`.
#[must_use]
pub fn near_equal(a: f64, b: f64, epsilon: f64) -> bool {
    debug_assert!(epsilon >= 0.0, "epsilon must be non-negative");
    (a > b - epsilon) && (a < b + epsilon) || a == b
}

/// Returns `true` if `a` is within `epsilon` of zero.
#[must_use]
pub fn near_zero(a: f64, epsilon: f64) -> bool {
    near_equal(a, 0.0, epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_pixel_ratio_scales_thresholds() {
        let one = Tolerance::for_device_pixel_ratio(1.0);
        let three = Tolerance::for_device_pixel_ratio(3.0);
        assert_eq!(one.distance, 0.5);
        assert_eq!(one.velocity, 15.0);
        assert!((three.distance - 0.5 / 3.0).abs() < 1e-12);
        assert!((three.velocity - 5.0).abs() < 1e-12);
    }

    #[test]
    fn bogus_device_pixel_ratio_falls_back_to_one() {
        for dpr in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                Tolerance::for_device_pixel_ratio(dpr),
                Tolerance::for_device_pixel_ratio(1.0),
                "dpr {dpr} should fall back"
            );
        }
    }

    #[test]
    fn near_equal_handles_infinities() {
        assert!(near_equal(f64::INFINITY, f64::INFINITY, 1e-3));
        assert!(!near_equal(1.0, 1.1, 1e-3));
        assert!(near_zero(-0.0005, 1e-3));
    }
}
