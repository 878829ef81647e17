// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Simulation`] capability and the closed set of scroll motions.

use crate::friction::{BoundedFrictionSimulation, FrictionSimulation};
use crate::scroll_simulation::ScrollSimulation;
use crate::tolerance::Tolerance;

/// A one-dimensional motion expressed as a pure function of elapsed time.
///
/// Implementations hold no clock and never mutate on evaluation, so a caller
/// may sample any time in any order. Time is in seconds since the simulation
/// was created and is expected to be non-negative.
pub trait Simulation {
    /// Position at `time`.
    fn x(&self, time: f64) -> f64;

    /// Velocity at `time`, in position units per second.
    fn dx(&self, time: f64) -> f64;

    /// Whether the motion has settled at `time`.
    fn is_done(&self, time: f64) -> bool;

    /// Thresholds used by [`Simulation::is_done`].
    fn tolerance(&self) -> Tolerance;

    /// Samples position, velocity and completion in one call.
    fn evaluate(&self, time: f64) -> SimulationSample {
        SimulationSample {
            x: self.x(time),
            dx: self.dx(time),
            done: self.is_done(time),
        }
    }
}

/// One sample of a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationSample {
    /// Position.
    pub x: f64,
    /// Velocity.
    pub dx: f64,
    /// Whether the motion has settled.
    pub done: bool,
}

/// Any motion a [`ScrollBehavior`](crate::ScrollBehavior) may hand to a scroll controller.
///
/// The controller owns the value and discards it once [`Simulation::is_done`]
/// reports `true`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollMotion {
    /// Exponential decay, used for snapping.
    Friction(FrictionSimulation),
    /// Exponential decay limited to a range, used for unbounded flings.
    BoundedFriction(BoundedFrictionSimulation),
    /// Friction inside the scroll range and a spring back from overscroll.
    Scroll(ScrollSimulation),
}

impl Simulation for ScrollMotion {
    fn x(&self, time: f64) -> f64 {
        match self {
            Self::Friction(s) => s.x(time),
            Self::BoundedFriction(s) => s.x(time),
            Self::Scroll(s) => s.x(time),
        }
    }

    fn dx(&self, time: f64) -> f64 {
        match self {
            Self::Friction(s) => s.dx(time),
            Self::BoundedFriction(s) => s.dx(time),
            Self::Scroll(s) => s.dx(time),
        }
    }

    fn is_done(&self, time: f64) -> bool {
        match self {
            Self::Friction(s) => s.is_done(time),
            Self::BoundedFriction(s) => s.is_done(time),
            Self::Scroll(s) => s.is_done(time),
        }
    }

    fn tolerance(&self) -> Tolerance {
        match self {
            Self::Friction(s) => s.tolerance(),
            Self::BoundedFriction(s) => s.tolerance(),
            Self::Scroll(s) => s.tolerance(),
        }
    }
}

impl From<FrictionSimulation> for ScrollMotion {
    fn from(value: FrictionSimulation) -> Self {
        Self::Friction(value)
    }
}

impl From<BoundedFrictionSimulation> for ScrollMotion {
    fn from(value: BoundedFrictionSimulation) -> Self {
        Self::BoundedFriction(value)
    }
}

impl From<ScrollSimulation> for ScrollMotion {
    fn from(value: ScrollSimulation) -> Self {
        Self::Scroll(value)
    }
}
