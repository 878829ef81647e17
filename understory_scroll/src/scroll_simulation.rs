// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fling motion for bounded scroll regions: friction inside, spring outside.

use crate::friction::FrictionSimulation;
use crate::simulation::Simulation;
use crate::spring::{ScrollSpringSimulation, SpringDescription};
use crate::tolerance::Tolerance;

/// Mass of the overscroll spring.
pub const SCROLL_SPRING_MASS: f64 = 1.0;
/// Stiffness of the overscroll spring.
pub const SCROLL_SPRING_STIFFNESS: f64 = 170.0;
/// Damping ratio of the overscroll spring.
///
/// Above `1.0`, so returning from overscroll never bounces.
pub const SCROLL_SPRING_DAMPING_RATIO: f64 = 1.1;
/// Fraction of fling velocity retained per second inside the scroll range.
pub const SCROLL_DRAG: f64 = 0.025;

/// The spring used to pull overscrolled content back to its bounds.
#[must_use]
pub fn scroll_spring() -> SpringDescription {
    SpringDescription::with_damping_ratio(
        SCROLL_SPRING_MASS,
        SCROLL_SPRING_STIFFNESS,
        SCROLL_SPRING_DAMPING_RATIO,
    )
}

/// Friction while inside `[min, max]`, a spring toward the nearer bound once outside.
///
/// The switch-over time is solved when the simulation is created, so the
/// value is immutable and every query is a pure function of time:
///
/// - Starting outside the range, the spring runs from time zero.
/// - Starting inside, the friction trajectory is intersected with the bound
///   in the direction of travel. If it crosses, the spring takes over at the
///   crossing with the friction velocity at that instant.
/// - Otherwise the motion is plain friction and comes to rest inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSimulation {
    friction: FrictionSimulation,
    spring: Option<(f64, ScrollSpringSimulation)>,
    min: f64,
    max: f64,
    tolerance: Tolerance,
}

impl ScrollSimulation {
    /// Creates a scroll simulation from explicit physics parameters.
    ///
    /// The bounds are normalized so that `min <= max`.
    #[must_use]
    pub fn new(
        position: f64,
        velocity: f64,
        min: f64,
        max: f64,
        spring: SpringDescription,
        drag: f64,
        tolerance: Tolerance,
    ) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let friction = FrictionSimulation::new(drag, position, velocity).with_tolerance(tolerance);
        let spring_to = |start: f64, end: f64, velocity: f64| {
            ScrollSpringSimulation::new(spring, start, end, velocity).with_tolerance(tolerance)
        };

        let spring = if position > max {
            Some((0.0, spring_to(position, max, velocity)))
        } else if position < min {
            Some((0.0, spring_to(position, min, velocity)))
        } else {
            let bound = if velocity > 0.0 && friction.final_x() > max {
                Some(max)
            } else if velocity < 0.0 && friction.final_x() < min {
                Some(min)
            } else {
                None
            };
            bound.and_then(|bound| {
                let crossing = friction.time_at_x(bound);
                crossing
                    .is_finite()
                    .then(|| (crossing, spring_to(bound, bound, friction.dx(crossing))))
            })
        };

        Self {
            friction,
            spring,
            min,
            max,
            tolerance,
        }
    }

    /// Creates a fling with the fixed scroll spring and drag.
    #[must_use]
    pub fn fling(position: f64, velocity: f64, min: f64, max: f64, tolerance: Tolerance) -> Self {
        Self::new(
            position,
            velocity,
            min,
            max,
            scroll_spring(),
            SCROLL_DRAG,
            tolerance,
        )
    }

    /// The lower bound of the scroll range.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The upper bound of the scroll range.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Time at which the spring takes over, if it ever does.
    #[must_use]
    pub fn spring_start_time(&self) -> Option<f64> {
        self.spring.map(|(start, _)| start)
    }

    fn active(&self, time: f64) -> Phase<'_> {
        match &self.spring {
            Some((start, spring)) if time >= *start => Phase::Spring(spring, time - start),
            _ => Phase::Friction(&self.friction, time),
        }
    }
}

enum Phase<'a> {
    Friction(&'a FrictionSimulation, f64),
    Spring(&'a ScrollSpringSimulation, f64),
}

impl Simulation for ScrollSimulation {
    fn x(&self, time: f64) -> f64 {
        match self.active(time) {
            Phase::Friction(s, t) => s.x(t),
            Phase::Spring(s, t) => s.x(t),
        }
    }

    fn dx(&self, time: f64) -> f64 {
        match self.active(time) {
            Phase::Friction(s, t) => s.dx(t),
            Phase::Spring(s, t) => s.dx(t),
        }
    }

    fn is_done(&self, time: f64) -> bool {
        match self.active(time) {
            Phase::Friction(s, t) => s.is_done(t),
            Phase::Spring(s, t) => s.is_done(t),
        }
    }

    fn tolerance(&self) -> Tolerance {
        self.tolerance
    }
}
