// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll --heading-base-level=0

//! Understory Scroll: headless scroll physics.
//!
//! This crate turns pointer input into scroll motion without owning a clock,
//! a widget, or a renderer. It provides:
//!
//! - **Simulations**: pure functions of elapsed time ([`Simulation`]) for
//!   friction ([`FrictionSimulation`], [`BoundedFrictionSimulation`]), damped
//!   springs ([`SpringSimulation`], [`ScrollSpringSimulation`]) and flings
//!   that spring back from overscroll ([`ScrollSimulation`]).
//! - **Behaviors**: policies ([`ScrollBehavior`], [`ExtentScrollBehavior`])
//!   that map drag deltas to offsets and release velocities to simulations,
//!   with hard clamping, overscroll resistance, or no bounds at all.
//!
//! Callers are expected to:
//! - Own the scroll offset and feed drag deltas through
//!   [`ScrollBehavior::apply_curve`].
//! - Report content/container size changes through
//!   [`ExtentScrollBehavior::update_extents`] and adopt the returned offset.
//! - On release, evaluate the returned [`ScrollMotion`] once per frame from
//!   an external ticker and drop it once [`Simulation::is_done`] is `true`.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_scroll::{ExtentScrollBehavior, OverscrollBehavior, ScrollBehavior, Simulation};
//!
//! // 1000px of content in a 300px viewport.
//! let mut behavior = OverscrollBehavior::new(1000.0, 300.0);
//! assert_eq!(behavior.max_scroll_offset(), 700.0);
//!
//! // Dragging 30px past the start only moves 15px beyond it.
//! let offset = behavior.apply_curve(0.0, -30.0);
//! assert_eq!(offset, -15.0);
//!
//! // Releasing there springs back to the start.
//! let fling = behavior.create_fling_scroll_simulation(offset, 0.0, 2.0).unwrap();
//! let mut t = 0.0;
//! while !fling.is_done(t) {
//!     t += 1.0 / 60.0;
//! }
//! assert_eq!(fling.x(t), 0.0);
//!
//! // Content shrinks: the offset is corrected into the new range.
//! let offset = behavior.update_extents(Some(400.0), None, 650.0);
//! assert_eq!(offset, 100.0);
//! ```
//!
//! ## Design notes
//!
//! - Simulations hold no mutable state. A fling that crosses a bound solves
//!   the crossing time up front, so sampling is order independent.
//! - The overscroll spring (mass 1, stiffness 170, damping ratio 1.1) and the
//!   fling drag are fixed constants; a fling never bounces back past the
//!   bound it returns to.
//! - Stopping tolerances are expressed in device pixels and converted with
//!   the device pixel ratio passed when the simulation is created.
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod behavior;
mod friction;
mod scroll_simulation;
mod simulation;
mod spring;
mod tolerance;

pub use behavior::{
    AnyScrollBehavior, BoundedBehavior, ExtentScrollBehavior, Extents, OverscrollBehavior,
    OverscrollWhenScrollableBehavior, ScrollBehavior, UnboundedBehavior,
};
pub use friction::{BoundedFrictionSimulation, FrictionSimulation, SimulationError};
pub use scroll_simulation::{
    SCROLL_DRAG, SCROLL_SPRING_DAMPING_RATIO, SCROLL_SPRING_MASS, SCROLL_SPRING_STIFFNESS,
    ScrollSimulation, scroll_spring,
};
pub use simulation::{ScrollMotion, Simulation, SimulationSample};
pub use spring::{ScrollSpringSimulation, SpringDescription, SpringSimulation, SpringType};
pub use tolerance::{
    SCROLL_DISTANCE_TOLERANCE_DEVICE_PX, SCROLL_VELOCITY_TOLERANCE_DEVICE_PX, Tolerance,
    near_equal, near_zero,
};
