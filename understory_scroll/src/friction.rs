// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Friction simulations: exponential velocity decay.
//!
//! A friction simulation starts at `position` with `velocity` and loses a
//! constant fraction of its speed per second. `drag` is the fraction of the
//! velocity that remains after one second, so `0.025` keeps 2.5% and is
//! strongly damped while `0.9` coasts for a long time.
//!
//! ## Minimal example
//!
//! ```
//! use understory_scroll::{FrictionSimulation, Simulation};
//!
//! // Travel from 0 to 100, leaving at 500 units/s and arriving at 50 units/s.
//! let sim = FrictionSimulation::through(0.0, 100.0, 500.0, 50.0).unwrap();
//! assert_eq!(sim.x(0.0), 0.0);
//! assert_eq!(sim.dx(0.0), 500.0);
//!
//! let arrival = sim.time_at_x(100.0);
//! assert!((sim.x(arrival) - 100.0).abs() < 1e-9);
//! ```

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::simulation::Simulation;
use crate::tolerance::Tolerance;

/// Error returned when a friction trajectory cannot satisfy its endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationError {
    /// A position or velocity was NaN or infinite.
    NonFinite,
    /// Start and end positions are equal, so no drag can be derived.
    ZeroDistance,
    /// The start velocity is zero; friction can never leave the start.
    Stationary,
    /// Start and end velocities point in opposite directions.
    VelocitySignMismatch,
    /// The start velocity points away from the end position.
    DirectionMismatch,
    /// The end speed is not strictly below the start speed.
    EndVelocityTooHigh,
    /// The derived drag is not strictly between `0.0` and `1.0`.
    ///
    /// Happens when the speed change is extreme relative to the distance,
    /// for example a one pixel snap at ordinary fling speeds.
    DragOutOfRange,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NonFinite => "friction endpoints must be finite",
            Self::ZeroDistance => "friction start and end positions are equal",
            Self::Stationary => "friction start velocity is zero",
            Self::VelocitySignMismatch => "friction start and end velocities differ in sign",
            Self::DirectionMismatch => "friction start velocity points away from the end position",
            Self::EndVelocityTooHigh => "friction end speed must be below the start speed",
            Self::DragOutOfRange => "friction drag derived from the endpoints is out of range",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for SimulationError {}

/// Exponential decay from an initial velocity.
///
/// `x(t) = p + v * (drag^t - 1) / ln(drag)` and `dx(t) = v * drag^t`.
///
/// The motion is done once its speed drops below the velocity tolerance; the
/// position converges on [`FrictionSimulation::final_x`] without reaching it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrictionSimulation {
    drag: f64,
    drag_log: f64,
    position: f64,
    velocity: f64,
    tolerance: Tolerance,
}

impl FrictionSimulation {
    /// Creates a friction simulation.
    ///
    /// `drag` must lie strictly between `0.0` and `1.0`.
    #[must_use]
    pub fn new(drag: f64, position: f64, velocity: f64) -> Self {
        debug_assert!(drag > 0.0 && drag < 1.0, "drag must be in (0, 1), got {drag}");
        Self {
            drag,
            drag_log: drag.ln(),
            position,
            velocity,
            tolerance: Tolerance::default(),
        }
    }

    /// Creates a friction simulation that passes through `start` at
    /// `start_velocity` and through `end` at `end_velocity`.
    ///
    /// The drag is derived from the endpoints and the velocity tolerance is set
    /// to `|end_velocity|`, so [`Simulation::is_done`] turns `true` exactly when
    /// the motion reaches `end`. An `end_velocity` of zero only converges on
    /// `end`; the default velocity tolerance applies in that case.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] when the inputs do not describe a
    /// decelerating motion from `start` toward `end`.
    pub fn through(
        start: f64,
        end: f64,
        start_velocity: f64,
        end_velocity: f64,
    ) -> Result<Self, SimulationError> {
        if !(start.is_finite()
            && end.is_finite()
            && start_velocity.is_finite()
            && end_velocity.is_finite())
        {
            return Err(SimulationError::NonFinite);
        }
        if start == end {
            return Err(SimulationError::ZeroDistance);
        }
        if start_velocity == 0.0 {
            return Err(SimulationError::Stationary);
        }
        if end_velocity != 0.0 && start_velocity.signum() != end_velocity.signum() {
            return Err(SimulationError::VelocitySignMismatch);
        }
        if (end - start).signum() != start_velocity.signum() {
            return Err(SimulationError::DirectionMismatch);
        }
        if start_velocity.abs() <= end_velocity.abs() {
            return Err(SimulationError::EndVelocityTooHigh);
        }

        let drag = ((start_velocity - end_velocity) / (start - end)).exp();
        if !(drag > 0.0 && drag < 1.0) {
            return Err(SimulationError::DragOutOfRange);
        }
        let mut sim = Self::new(drag, start, start_velocity);
        if end_velocity != 0.0 {
            sim.tolerance.velocity = end_velocity.abs();
        }
        Ok(sim)
    }

    /// Replaces the tolerance used by [`Simulation::is_done`].
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Fraction of velocity retained per second.
    #[must_use]
    pub fn drag(&self) -> f64 {
        self.drag
    }

    /// Position the motion converges on as time goes to infinity.
    #[must_use]
    pub fn final_x(&self) -> f64 {
        self.position - self.velocity / self.drag_log
    }

    /// Time at which the motion reaches `x`.
    ///
    /// Returns `0.0` for the start position and `f64::INFINITY` when `x` is
    /// behind the start or beyond [`FrictionSimulation::final_x`].
    #[must_use]
    pub fn time_at_x(&self, x: f64) -> f64 {
        if x == self.position {
            return 0.0;
        }
        let final_x = self.final_x();
        let unreachable = if self.velocity > 0.0 {
            x < self.position || x >= final_x
        } else {
            x > self.position || x <= final_x
        };
        if self.velocity == 0.0 || unreachable {
            return f64::INFINITY;
        }
        (self.drag_log * (x - self.position) / self.velocity + 1.0).ln() / self.drag_log
    }
}

impl Simulation for FrictionSimulation {
    fn x(&self, time: f64) -> f64 {
        self.position + self.velocity * (self.drag.powf(time) - 1.0) / self.drag_log
    }

    fn dx(&self, time: f64) -> f64 {
        self.velocity * self.drag.powf(time)
    }

    fn is_done(&self, time: f64) -> bool {
        self.dx(time).abs() < self.tolerance.velocity
    }

    fn tolerance(&self) -> Tolerance {
        self.tolerance
    }
}

/// Friction whose position never leaves `[min, max]`.
///
/// Touching either bound also settles the motion. Passing infinite bounds
/// yields plain exponential decay, which is what unbounded scroll regions use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundedFrictionSimulation {
    friction: FrictionSimulation,
    min: f64,
    max: f64,
}

impl BoundedFrictionSimulation {
    /// Creates a bounded friction simulation.
    ///
    /// The bounds are normalized so that `min <= max`; a NaN bound is
    /// unbounded on that side. `position` is clamped into the bounds, and a
    /// NaN position starts at the nearest finite bound, or `0.0`.
    #[must_use]
    pub fn new(drag: f64, position: f64, velocity: f64, min: f64, max: f64) -> Self {
        let min = if min.is_nan() { f64::NEG_INFINITY } else { min };
        let max = if max.is_nan() { f64::INFINITY } else { max };
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let position = if position.is_nan() {
            if min.is_finite() {
                min
            } else if max.is_finite() {
                max
            } else {
                0.0
            }
        } else {
            position.clamp(min, max)
        };
        Self {
            friction: FrictionSimulation::new(drag, position, velocity),
            min,
            max,
        }
    }

    /// Replaces the tolerance used by [`Simulation::is_done`].
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.friction = self.friction.with_tolerance(tolerance);
        self
    }

    /// The lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Simulation for BoundedFrictionSimulation {
    fn x(&self, time: f64) -> f64 {
        self.friction.x(time).clamp(self.min, self.max)
    }

    fn dx(&self, time: f64) -> f64 {
        self.friction.dx(time)
    }

    fn is_done(&self, time: f64) -> bool {
        let x = self.x(time);
        let distance = self.friction.tolerance().distance;
        self.friction.is_done(time)
            || (x - self.min).abs() < distance
            || (x - self.max).abs() < distance
    }

    fn tolerance(&self) -> Tolerance {
        self.friction.tolerance()
    }
}
