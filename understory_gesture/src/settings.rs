// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thresholds shared by the built-in recognizers.

/// Slops and fling limits, in logical pixels and logical pixels per second.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureSettings {
    /// Distance a pointer must travel from its down position before a pan claims it.
    pub pan_slop: f64,
    /// Distance a pointer may travel from its down position and still count as a tap.
    pub tap_slop: f64,
    /// Pan end velocities are clamped to this speed.
    pub max_fling_velocity: f64,
    /// Pan end velocities below this speed are reported as zero.
    pub min_fling_velocity: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            pan_slop: 8.0,
            tap_slop: 18.0,
            max_fling_velocity: 8000.0,
            min_fling_velocity: 50.0,
        }
    }
}

impl GestureSettings {
    /// Returns the settings with every value made non-negative and the fling
    /// limits ordered so that `min_fling_velocity <= max_fling_velocity`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let min = self.min_fling_velocity.max(0.0);
        let max = self.max_fling_velocity.max(0.0);
        let (min_fling_velocity, max_fling_velocity) =
            if min <= max { (min, max) } else { (max, min) };
        Self {
            pan_slop: self.pan_slop.max(0.0),
            tap_slop: self.tap_slop.max(0.0),
            max_fling_velocity,
            min_fling_velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_conventions() {
        let s = GestureSettings::default();
        assert_eq!(s.pan_slop, 8.0);
        assert_eq!(s.tap_slop, 18.0);
        assert_eq!(s.max_fling_velocity, 8000.0);
        assert_eq!(s.min_fling_velocity, 50.0);
        assert_eq!(s.normalized(), s);
    }

    #[test]
    fn normalized_orders_fling_limits() {
        let s = GestureSettings {
            pan_slop: -1.0,
            tap_slop: 4.0,
            max_fling_velocity: 10.0,
            min_fling_velocity: 500.0,
        }
        .normalized();
        assert_eq!(s.pan_slop, 0.0);
        assert_eq!(s.min_fling_velocity, 10.0);
        assert_eq!(s.max_fling_velocity, 500.0);
    }
}
