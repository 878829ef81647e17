// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damped harmonic springs.
//!
//! A [`SpringSimulation`] moves from a start position toward an end position
//! under a spring force. The closed-form solution depends on how the damping
//! compares with critical damping; see [`SpringType`].

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::simulation::Simulation;
use crate::tolerance::{Tolerance, near_zero};

/// Physical parameters of a spring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringDescription {
    /// Mass of the moving object.
    pub mass: f64,
    /// Spring constant (stiffness).
    pub stiffness: f64,
    /// Damping coefficient.
    pub damping: f64,
}

impl SpringDescription {
    /// Creates a spring from explicit mass, stiffness and damping coefficient.
    #[must_use]
    pub const fn new(mass: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            mass,
            stiffness,
            damping,
        }
    }

    /// Creates a spring whose damping is `ratio` times critical damping.
    ///
    /// A ratio of `1.0` is critically damped, above `1.0` is overdamped (no
    /// oscillation) and below `1.0` oscillates.
    #[must_use]
    pub fn with_damping_ratio(mass: f64, stiffness: f64, ratio: f64) -> Self {
        Self {
            mass,
            stiffness,
            damping: ratio * 2.0 * (mass * stiffness).sqrt(),
        }
    }

    /// Which closed-form solution this spring follows.
    #[must_use]
    pub fn spring_type(&self) -> SpringType {
        let cmk = self.damping * self.damping - 4.0 * self.mass * self.stiffness;
        if cmk == 0.0 {
            SpringType::CriticallyDamped
        } else if cmk > 0.0 {
            SpringType::Overdamped
        } else {
            SpringType::Underdamped
        }
    }
}

/// Damping regime of a [`SpringDescription`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpringType {
    /// Returns to rest as fast as possible without oscillating.
    CriticallyDamped,
    /// Oscillates around the rest position with decaying amplitude.
    Underdamped,
    /// Returns to rest slowly without oscillating.
    Overdamped,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Solution {
    Critical { r: f64, c1: f64, c2: f64 },
    Overdamped { r1: f64, r2: f64, c1: f64, c2: f64 },
    Underdamped { w: f64, r: f64, c1: f64, c2: f64 },
}

impl Solution {
    /// Solves for displacement `distance` from rest and initial `velocity`.
    fn new(spring: &SpringDescription, distance: f64, velocity: f64) -> Self {
        let SpringDescription {
            mass,
            stiffness,
            damping,
        } = *spring;
        let cmk = damping * damping - 4.0 * mass * stiffness;
        match spring.spring_type() {
            SpringType::CriticallyDamped => {
                let r = -damping / (2.0 * mass);
                Self::Critical {
                    r,
                    c1: distance,
                    c2: velocity - r * distance,
                }
            }
            SpringType::Overdamped => {
                let root = cmk.sqrt();
                let r1 = (-damping - root) / (2.0 * mass);
                let r2 = (-damping + root) / (2.0 * mass);
                let c2 = (velocity - r1 * distance) / (r2 - r1);
                Self::Overdamped {
                    r1,
                    r2,
                    c1: distance - c2,
                    c2,
                }
            }
            SpringType::Underdamped => {
                let w = (-cmk).sqrt() / (2.0 * mass);
                let r = -damping / (2.0 * mass);
                Self::Underdamped {
                    w,
                    r,
                    c1: distance,
                    c2: (velocity - r * distance) / w,
                }
            }
        }
    }

    fn x(&self, t: f64) -> f64 {
        match *self {
            Self::Critical { r, c1, c2 } => (c1 + c2 * t) * (r * t).exp(),
            Self::Overdamped { r1, r2, c1, c2 } => c1 * (r1 * t).exp() + c2 * (r2 * t).exp(),
            Self::Underdamped { w, r, c1, c2 } => {
                (r * t).exp() * (c1 * (w * t).cos() + c2 * (w * t).sin())
            }
        }
    }

    fn dx(&self, t: f64) -> f64 {
        match *self {
            Self::Critical { r, c1, c2 } => {
                let power = (r * t).exp();
                r * (c1 + c2 * t) * power + c2 * power
            }
            Self::Overdamped { r1, r2, c1, c2 } => {
                c1 * r1 * (r1 * t).exp() + c2 * r2 * (r2 * t).exp()
            }
            Self::Underdamped { w, r, c1, c2 } => {
                let power = (r * t).exp();
                let (sin, cos) = ((w * t).sin(), (w * t).cos());
                power * (c2 * w * cos - c1 * w * sin) + r * power * (c2 * sin + c1 * cos)
            }
        }
    }
}

/// Motion of a mass on a spring from `start` toward `end`.
///
/// Done once both the displacement from `end` and the velocity are within
/// tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringSimulation {
    end: f64,
    solution: Solution,
    tolerance: Tolerance,
}

impl SpringSimulation {
    /// Creates a spring simulation.
    #[must_use]
    pub fn new(spring: SpringDescription, start: f64, end: f64, velocity: f64) -> Self {
        Self {
            end,
            solution: Solution::new(&spring, start - end, velocity),
            tolerance: Tolerance::default(),
        }
    }

    /// Replaces the tolerance used by [`Simulation::is_done`].
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The rest position the spring pulls toward.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }
}

impl Simulation for SpringSimulation {
    fn x(&self, time: f64) -> f64 {
        self.end + self.solution.x(time)
    }

    fn dx(&self, time: f64) -> f64 {
        self.solution.dx(time)
    }

    fn is_done(&self, time: f64) -> bool {
        near_zero(self.solution.x(time), self.tolerance.distance)
            && near_zero(self.solution.dx(time), self.tolerance.velocity)
    }

    fn tolerance(&self) -> Tolerance {
        self.tolerance
    }
}

/// A [`SpringSimulation`] that reports exactly its end position once settled.
///
/// Scroll offsets must land on the bound, not a sub-tolerance distance away.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSpringSimulation {
    spring: SpringSimulation,
}

impl ScrollSpringSimulation {
    /// Creates a scroll spring simulation.
    #[must_use]
    pub fn new(spring: SpringDescription, start: f64, end: f64, velocity: f64) -> Self {
        Self {
            spring: SpringSimulation::new(spring, start, end, velocity),
        }
    }

    /// Replaces the tolerance used by [`Simulation::is_done`].
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.spring = self.spring.with_tolerance(tolerance);
        self
    }
}

impl Simulation for ScrollSpringSimulation {
    fn x(&self, time: f64) -> f64 {
        if self.spring.is_done(time) {
            self.spring.end()
        } else {
            self.spring.x(time)
        }
    }

    fn dx(&self, time: f64) -> f64 {
        self.spring.dx(time)
    }

    fn is_done(&self, time: f64) -> bool {
        self.spring.is_done(time)
    }

    fn tolerance(&self) -> Tolerance {
        self.spring.tolerance()
    }
}
