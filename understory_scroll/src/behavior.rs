// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll behaviors: how drag deltas and release velocities become motion.
//!
//! A scroll controller owns one behavior. While the user drags, each delta
//! goes through [`ScrollBehavior::apply_curve`]. On release the controller
//! asks for [`ScrollBehavior::create_fling_scroll_simulation`] and evaluates
//! the returned [`ScrollMotion`] once per frame until it is done.
//!
//! | Behavior | Range | Drag curve | Fling |
//! |---|---|---|---|
//! | [`UnboundedBehavior`] | all reals | identity | friction |
//! | [`BoundedBehavior`] | `[min, max]` | hard clamp | friction + spring |
//! | [`OverscrollBehavior`] | `[min, max]` | half speed outside | friction + spring |
//! | [`OverscrollWhenScrollableBehavior`] | `[min, max]` | overscroll if content overflows, else pinned | only when it can move |
//!
//! Velocities passed to behaviors are in offset units per millisecond, the
//! unit pointer velocity trackers usually report; simulations run in seconds.

use crate::friction::{BoundedFrictionSimulation, FrictionSimulation};
use crate::scroll_simulation::{SCROLL_DRAG, ScrollSimulation};
use crate::simulation::ScrollMotion;
use crate::tolerance::Tolerance;

const MILLIS_PER_SECOND: f64 = 1000.0;

/// Policy that turns drag deltas and release velocities into scroll motion.
pub trait ScrollBehavior {
    /// Returns the scroll offset after moving `scroll_offset` by `scroll_delta`.
    fn apply_curve(&self, scroll_offset: f64, scroll_delta: f64) -> f64;

    /// Returns the motion to run after the pointer is released.
    ///
    /// `velocity` is in offset units per millisecond. `device_pixel_ratio`
    /// should be queried when the fling starts; it sets the stopping
    /// tolerance (see [`Tolerance::for_device_pixel_ratio`]).
    fn create_fling_scroll_simulation(
        &self,
        position: f64,
        velocity: f64,
        device_pixel_ratio: f64,
    ) -> Option<ScrollMotion>;

    /// Returns a motion from `start` that comes to rest at `end`.
    ///
    /// Used to animate to a snap point. The speed of `velocity` (per
    /// millisecond) is kept, pointed toward `end`. Returns `None` when no such
    /// decelerating motion exists, for example when already at `end` or when
    /// the speed is too low to arrive; the caller should jump to `end`.
    fn create_snap_scroll_simulation(
        &self,
        start: f64,
        end: f64,
        velocity: f64,
        device_pixel_ratio: f64,
    ) -> Option<ScrollMotion>;

    /// Whether dragging can move the offset at all.
    fn is_scrollable(&self) -> bool;
}

/// A [`ScrollBehavior`] that knows the content and container extents.
///
/// Extents only change through [`ExtentScrollBehavior::update_extents`],
/// which also returns the caller's offset corrected into the new range.
pub trait ExtentScrollBehavior: ScrollBehavior {
    /// Current extents.
    fn extents(&self) -> Extents;

    /// Smallest valid scroll offset.
    fn min_scroll_offset(&self) -> f64;

    /// Largest valid scroll offset. Never below [`Self::min_scroll_offset`].
    fn max_scroll_offset(&self) -> f64;

    /// Updates whichever extents are provided and returns `scroll_offset`
    /// clamped into the resulting range.
    ///
    /// The returned value is the new authoritative scroll offset.
    fn update_extents(
        &mut self,
        content_extent: Option<f64>,
        container_extent: Option<f64>,
        scroll_offset: f64,
    ) -> f64;
}

/// Size of the scrolled content and of the container showing it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extents {
    /// Length of the content along the scroll axis.
    pub content: f64,
    /// Length of the visible container along the scroll axis.
    pub container: f64,
}

impl Extents {
    /// Creates extents.
    #[must_use]
    pub const fn new(content: f64, container: f64) -> Self {
        Self { content, container }
    }

    /// Whether the content is longer than the container.
    #[must_use]
    pub fn overflows(&self) -> bool {
        self.content > self.container
    }

    fn update(&mut self, content: Option<f64>, container: Option<f64>) {
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(container) = container {
            self.container = container;
        }
    }
}

fn fling_simulation(
    position: f64,
    velocity: f64,
    min: f64,
    max: f64,
    device_pixel_ratio: f64,
) -> ScrollMotion {
    let tolerance = Tolerance::for_device_pixel_ratio(device_pixel_ratio);
    ScrollSimulation::fling(position, velocity * MILLIS_PER_SECOND, min, max, tolerance).into()
}

fn snap_simulation(
    start: f64,
    end: f64,
    velocity: f64,
    device_pixel_ratio: f64,
) -> Option<ScrollMotion> {
    let tolerance = Tolerance::for_device_pixel_ratio(device_pixel_ratio);
    let direction = if end < start { -1.0 } else { 1.0 };
    let start_velocity = (velocity * MILLIS_PER_SECOND).abs() * direction;
    let end_velocity = tolerance.velocity * direction;
    match FrictionSimulation::through(start, end, start_velocity, end_velocity) {
        Ok(sim) => Some(sim.with_tolerance(tolerance).into()),
        Err(err) => {
            log::debug!("no snap simulation from {start} to {end}: {err}");
            None
        }
    }
}

/// Offsets range over all reals; deltas pass through unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UnboundedBehavior {
    extents: Extents,
}

impl UnboundedBehavior {
    /// Creates an unbounded behavior.
    #[must_use]
    pub fn new(content_extent: f64, container_extent: f64) -> Self {
        Self {
            extents: Extents::new(content_extent, container_extent),
        }
    }
}

impl ScrollBehavior for UnboundedBehavior {
    fn apply_curve(&self, scroll_offset: f64, scroll_delta: f64) -> f64 {
        scroll_offset + scroll_delta
    }

    fn create_fling_scroll_simulation(
        &self,
        position: f64,
        velocity: f64,
        device_pixel_ratio: f64,
    ) -> Option<ScrollMotion> {
        let tolerance = Tolerance::for_device_pixel_ratio(device_pixel_ratio);
        let sim = BoundedFrictionSimulation::new(
            SCROLL_DRAG,
            position,
            velocity * MILLIS_PER_SECOND,
            f64::NEG_INFINITY,
            f64::INFINITY,
        )
        .with_tolerance(tolerance);
        Some(sim.into())
    }

    fn create_snap_scroll_simulation(
        &self,
        start: f64,
        end: f64,
        velocity: f64,
        device_pixel_ratio: f64,
    ) -> Option<ScrollMotion> {
        snap_simulation(start, end, velocity, device_pixel_ratio)
    }

    fn is_scrollable(&self) -> bool {
        true
    }
}

impl ExtentScrollBehavior for UnboundedBehavior {
    fn extents(&self) -> Extents {
        self.extents
    }

    fn min_scroll_offset(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn max_scroll_offset(&self) -> f64 {
        f64::INFINITY
    }

    fn update_extents(
        &mut self,
        content_extent: Option<f64>,
        container_extent: Option<f64>,
        scroll_offset: f64,
    ) -> f64 {
        self.extents.update(content_extent, container_extent);
        scroll_offset
    }
}

/// Offsets are hard-clamped to `[min, max]`.
///
/// `max` is `min + content - container`, or `min` when the content fits.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundedBehavior {
    extents: Extents,
    min_scroll_offset: f64,
}

impl BoundedBehavior {
    /// Creates a bounded behavior with a minimum scroll offset of zero.
    #[must_use]
    pub fn new(content_extent: f64, container_extent: f64) -> Self {
        Self {
            extents: Extents::new(content_extent, container_extent),
            min_scroll_offset: 0.0,
        }
    }

    /// Sets the minimum scroll offset; the whole range shifts with it.
    #[must_use]
    pub fn with_min_scroll_offset(mut self, min_scroll_offset: f64) -> Self {
        self.min_scroll_offset = min_scroll_offset;
        self
    }
}

impl ScrollBehavior for BoundedBehavior {
    fn apply_curve(&self, scroll_offset: f64, scroll_delta: f64) -> f64 {
        (scroll_offset + scroll_delta).clamp(self.min_scroll_offset(), self.max_scroll_offset())
    }

    fn create_fling_scroll_simulation(
        &self,
        position: f64,
        velocity: f64,
        device_pixel_ratio: f64,
    ) -> Option<ScrollMotion> {
        Some(fling_simulation(
            position,
            velocity,
            self.min_scroll_offset(),
            self.max_scroll_offset(),
            device_pixel_ratio,
        ))
    }

    fn create_snap_scroll_simulation(
        &self,
        start: f64,
        end: f64,
        velocity: f64,
        device_pixel_ratio: f64,
    ) -> Option<ScrollMotion> {
        snap_simulation(start, end, velocity, device_pixel_ratio)
    }

    fn is_scrollable(&self) -> bool {
        true
    }
}

impl ExtentScrollBehavior for BoundedBehavior {
    fn extents(&self) -> Extents {
        self.extents
    }

    fn min_scroll_offset(&self) -> f64 {
        self.min_scroll_offset
    }

    fn max_scroll_offset(&self) -> f64 {
        let min = self.min_scroll_offset;
        min.max(min + self.extents.content - self.extents.container)
    }

    fn update_extents(
        &mut self,
        content_extent: Option<f64>,
        container_extent: Option<f64>,
        scroll_offset: f64,
    ) -> f64 {
        self.extents.update(content_extent, container_extent);
        let corrected = scroll_offset.clamp(self.min_scroll_offset(), self.max_scroll_offset());
        if corrected != scroll_offset {
            log::trace!("scroll offset {scroll_offset} corrected to {corrected} after extent change");
        }
        corrected
    }
}

/// Bounded range with soft resistance past either end.
///
/// Movement that crosses a bound is halved for the part beyond it, so the
/// content follows the pointer at half speed while overscrolled and the
/// curve is continuous at the bound. The excess is measured from
/// `min(min, offset)` (resp. `max(max, offset)`), which anchors it at the
/// previous offset when that was already overscrolled.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverscrollBehavior {
    bounded: BoundedBehavior,
}

impl OverscrollBehavior {
    /// Creates an overscroll behavior with a minimum scroll offset of zero.
    #[must_use]
    pub fn new(content_extent: f64, container_extent: f64) -> Self {
        Self {
            bounded: BoundedBehavior::new(content_extent, container_extent),
        }
    }

    /// Sets the minimum scroll offset; the whole range shifts with it.
    #[must_use]
    pub fn with_min_scroll_offset(mut self, min_scroll_offset: f64) -> Self {
        self.bounded = self.bounded.with_min_scroll_offset(min_scroll_offset);
        self
    }
}

impl ScrollBehavior for OverscrollBehavior {
    fn apply_curve(&self, scroll_offset: f64, scroll_delta: f64) -> f64 {
        let min = self.min_scroll_offset();
        let max = self.max_scroll_offset();
        let mut new_offset = scroll_offset + scroll_delta;
        if new_offset < min {
            new_offset -= (new_offset - min.min(scroll_offset)) / 2.0;
        } else if new_offset > max {
            new_offset -= (new_offset - max.max(scroll_offset)) / 2.0;
        }
        new_offset
    }

    fn create_fling_scroll_simulation(
        &self,
        position: f64,
        velocity: f64,
        device_pixel_ratio: f64,
    ) -> Option<ScrollMotion> {
        self.bounded
            .create_fling_scroll_simulation(position, velocity, device_pixel_ratio)
    }

    fn create_snap_scroll_simulation(
        &self,
        start: f64,
        end: f64,
        velocity: f64,
        device_pixel_ratio: f64,
    ) -> Option<ScrollMotion> {
        self.bounded
            .create_snap_scroll_simulation(start, end, velocity, device_pixel_ratio)
    }

    fn is_scrollable(&self) -> bool {
        true
    }
}

impl ExtentScrollBehavior for OverscrollBehavior {
    fn extents(&self) -> Extents {
        self.bounded.extents()
    }

    fn min_scroll_offset(&self) -> f64 {
        self.bounded.min_scroll_offset()
    }

    fn max_scroll_offset(&self) -> f64 {
        self.bounded.max_scroll_offset()
    }

    fn update_extents(
        &mut self,
        content_extent: Option<f64>,
        container_extent: Option<f64>,
        scroll_offset: f64,
    ) -> f64 {
        self.bounded
            .update_extents(content_extent, container_extent, scroll_offset)
    }
}

/// [`OverscrollBehavior`] gated on the content overflowing its container.
///
/// When the content fits, drags leave the offset pinned at the minimum and
/// no fling is produced unless the offset is already out of range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverscrollWhenScrollableBehavior {
    overscroll: OverscrollBehavior,
}

impl OverscrollWhenScrollableBehavior {
    /// Creates the behavior with a minimum scroll offset of zero.
    #[must_use]
    pub fn new(content_extent: f64, container_extent: f64) -> Self {
        Self::wrap(OverscrollBehavior::new(content_extent, container_extent))
    }

    /// Gates an existing overscroll behavior.
    #[must_use]
    pub fn wrap(overscroll: OverscrollBehavior) -> Self {
        Self { overscroll }
    }

    /// The wrapped overscroll behavior.
    #[must_use]
    pub fn inner(&self) -> &OverscrollBehavior {
        &self.overscroll
    }
}

impl ScrollBehavior for OverscrollWhenScrollableBehavior {
    fn apply_curve(&self, scroll_offset: f64, scroll_delta: f64) -> f64 {
        if self.is_scrollable() {
            self.overscroll.apply_curve(scroll_offset, scroll_delta)
        } else {
            self.min_scroll_offset()
        }
    }

    fn create_fling_scroll_simulation(
        &self,
        position: f64,
        velocity: f64,
        device_pixel_ratio: f64,
    ) -> Option<ScrollMotion> {
        let out_of_range =
            position < self.min_scroll_offset() || position > self.max_scroll_offset();
        if self.is_scrollable() || out_of_range {
            self.overscroll
                .create_fling_scroll_simulation(position, velocity, device_pixel_ratio)
        } else {
            None
        }
    }

    fn create_snap_scroll_simulation(
        &self,
        start: f64,
        end: f64,
        velocity: f64,
        device_pixel_ratio: f64,
    ) -> Option<ScrollMotion> {
        self.overscroll
            .create_snap_scroll_simulation(start, end, velocity, device_pixel_ratio)
    }

    fn is_scrollable(&self) -> bool {
        self.extents().overflows()
    }
}

impl ExtentScrollBehavior for OverscrollWhenScrollableBehavior {
    fn extents(&self) -> Extents {
        self.overscroll.extents()
    }

    fn min_scroll_offset(&self) -> f64 {
        self.overscroll.min_scroll_offset()
    }

    fn max_scroll_offset(&self) -> f64 {
        self.overscroll.max_scroll_offset()
    }

    fn update_extents(
        &mut self,
        content_extent: Option<f64>,
        container_extent: Option<f64>,
        scroll_offset: f64,
    ) -> f64 {
        self.overscroll
            .update_extents(content_extent, container_extent, scroll_offset)
    }
}

/// The closed set of extent behaviors, for controllers that switch policy at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnyScrollBehavior {
    /// See [`UnboundedBehavior`].
    Unbounded(UnboundedBehavior),
    /// See [`BoundedBehavior`].
    Bounded(BoundedBehavior),
    /// See [`OverscrollBehavior`].
    Overscroll(OverscrollBehavior),
    /// See [`OverscrollWhenScrollableBehavior`].
    OverscrollWhenScrollable(OverscrollWhenScrollableBehavior),
}

impl AnyScrollBehavior {
    fn get(&self) -> &dyn ExtentScrollBehavior {
        match self {
            Self::Unbounded(b) => b,
            Self::Bounded(b) => b,
            Self::Overscroll(b) => b,
            Self::OverscrollWhenScrollable(b) => b,
        }
    }

    fn get_mut(&mut self) -> &mut dyn ExtentScrollBehavior {
        match self {
            Self::Unbounded(b) => b,
            Self::Bounded(b) => b,
            Self::Overscroll(b) => b,
            Self::OverscrollWhenScrollable(b) => b,
        }
    }
}

impl Default for AnyScrollBehavior {
    fn default() -> Self {
        Self::OverscrollWhenScrollable(OverscrollWhenScrollableBehavior::default())
    }
}

impl ScrollBehavior for AnyScrollBehavior {
    fn apply_curve(&self, scroll_offset: f64, scroll_delta: f64) -> f64 {
        self.get().apply_curve(scroll_offset, scroll_delta)
    }

    fn create_fling_scroll_simulation(
        &self,
        position: f64,
        velocity: f64,
        device_pixel_ratio: f64,
    ) -> Option<ScrollMotion> {
        self.get()
            .create_fling_scroll_simulation(position, velocity, device_pixel_ratio)
    }

    fn create_snap_scroll_simulation(
        &self,
        start: f64,
        end: f64,
        velocity: f64,
        device_pixel_ratio: f64,
    ) -> Option<ScrollMotion> {
        self.get()
            .create_snap_scroll_simulation(start, end, velocity, device_pixel_ratio)
    }

    fn is_scrollable(&self) -> bool {
        self.get().is_scrollable()
    }
}

impl ExtentScrollBehavior for AnyScrollBehavior {
    fn extents(&self) -> Extents {
        self.get().extents()
    }

    fn min_scroll_offset(&self) -> f64 {
        self.get().min_scroll_offset()
    }

    fn max_scroll_offset(&self) -> f64 {
        self.get().max_scroll_offset()
    }

    fn update_extents(
        &mut self,
        content_extent: Option<f64>,
        container_extent: Option<f64>,
        scroll_offset: f64,
    ) -> f64 {
        self.get_mut()
            .update_extents(content_extent, container_extent, scroll_offset)
    }
}

impl From<UnboundedBehavior> for AnyScrollBehavior {
    fn from(value: UnboundedBehavior) -> Self {
        Self::Unbounded(value)
    }
}

impl From<BoundedBehavior> for AnyScrollBehavior {
    fn from(value: BoundedBehavior) -> Self {
        Self::Bounded(value)
    }
}

impl From<OverscrollBehavior> for AnyScrollBehavior {
    fn from(value: OverscrollBehavior) -> Self {
        Self::Overscroll(value)
    }
}

impl From<OverscrollWhenScrollableBehavior> for AnyScrollBehavior {
    fn from(value: OverscrollWhenScrollableBehavior) -> Self {
        Self::OverscrollWhenScrollable(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Simulation;

    #[test]
    fn bounded_range_follows_extents() {
        let b = BoundedBehavior::new(1000.0, 300.0);
        assert_eq!(b.min_scroll_offset(), 0.0);
        assert_eq!(b.max_scroll_offset(), 700.0);

        let shifted = BoundedBehavior::new(1000.0, 300.0).with_min_scroll_offset(-50.0);
        assert_eq!(shifted.max_scroll_offset(), 650.0);

        let fits = BoundedBehavior::new(100.0, 300.0);
        assert_eq!(fits.max_scroll_offset(), fits.min_scroll_offset());
    }

    #[test]
    fn bounded_curve_clamps() {
        let b = BoundedBehavior::new(1000.0, 300.0);
        assert_eq!(b.apply_curve(10.0, -50.0), 0.0);
        assert_eq!(b.apply_curve(690.0, 50.0), 700.0);
        assert_eq!(b.apply_curve(100.0, 25.0), 125.0);
    }

    #[test]
    fn unbounded_curve_is_identity() {
        let b = UnboundedBehavior::new(0.0, 0.0);
        assert_eq!(b.apply_curve(-1e9, -5.0), -1e9 - 5.0);
        assert_eq!(b.min_scroll_offset(), f64::NEG_INFINITY);
        assert_eq!(b.max_scroll_offset(), f64::INFINITY);
    }

    #[test]
    fn overscroll_halves_only_the_excess() {
        let b = OverscrollBehavior::new(1000.0, 300.0);
        // From 10 by -30: 10 units inside, 20 beyond, which is halved to 10.
        assert_eq!(b.apply_curve(10.0, -30.0), -10.0);
        // Symmetric at the far end.
        assert_eq!(b.apply_curve(690.0, 30.0), 710.0);
        // Inside the range nothing changes.
        assert_eq!(b.apply_curve(100.0, 30.0), 130.0);
    }

    #[test]
    fn overscroll_anchors_on_previous_offset_when_already_out() {
        let b = OverscrollBehavior::new(1000.0, 300.0);
        // Already at -20, moving -10: excess measured from -20, so -25.
        assert_eq!(b.apply_curve(-20.0, -10.0), -25.0);
        // Moving back toward the range is measured from -20 too.
        assert_eq!(b.apply_curve(-20.0, 5.0), -17.5);
    }

    #[test]
    fn overscroll_when_scrollable_pins_fitting_content() {
        let b = OverscrollWhenScrollableBehavior::new(200.0, 300.0);
        assert!(!b.is_scrollable());
        for delta in [-100.0, -1.0, 0.0, 1.0, 100.0] {
            assert_eq!(b.apply_curve(0.0, delta), 0.0);
        }
        assert!(b.create_fling_scroll_simulation(0.0, 2.0, 1.0).is_none());
    }

    #[test]
    fn overscroll_when_scrollable_still_springs_back_when_out_of_range() {
        let b = OverscrollWhenScrollableBehavior::new(200.0, 300.0);
        let sim = b.create_fling_scroll_simulation(-40.0, 0.0, 1.0).unwrap();
        let mut t = 0.0;
        while !sim.is_done(t) {
            t += 1.0 / 60.0;
        }
        assert_eq!(sim.x(t), 0.0);
    }

    #[test]
    fn overscroll_when_scrollable_flings_whenever_scrollable() {
        let b = OverscrollWhenScrollableBehavior::new(1000.0, 300.0);
        assert!(b.is_scrollable());
        let still = b.create_fling_scroll_simulation(100.0, 0.0, 1.0).unwrap();
        assert_eq!(still.x(0.0), 100.0);
        assert!(still.is_done(0.0), "a fling without velocity is already at rest");
        assert!(b.create_fling_scroll_simulation(100.0, 1.5, 1.0).is_some());

        let fits = OverscrollWhenScrollableBehavior::new(100.0, 300.0);
        assert!(fits.create_fling_scroll_simulation(0.0, 1.5, 1.0).is_none());
    }

    #[test]
    fn fling_velocity_is_converted_to_seconds() {
        let b = BoundedBehavior::new(100_000.0, 300.0);
        let sim = b.create_fling_scroll_simulation(0.0, 2.0, 1.0).unwrap();
        assert!((sim.dx(0.0) - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn fling_tolerance_tracks_device_pixel_ratio() {
        let b = BoundedBehavior::new(1000.0, 300.0);
        let sim = b.create_fling_scroll_simulation(0.0, 1.0, 3.0).unwrap();
        assert_eq!(sim.tolerance(), Tolerance::for_device_pixel_ratio(3.0));
    }

    #[test]
    fn unbounded_fling_is_plain_friction() {
        let b = UnboundedBehavior::new(0.0, 0.0);
        let sim = b.create_fling_scroll_simulation(0.0, -1.0, 1.0).unwrap();
        assert!(matches!(sim, ScrollMotion::BoundedFriction(_)));
        assert!(sim.x(1.0) < -200.0);
    }

    #[test]
    fn snap_lands_on_target() {
        let b = BoundedBehavior::new(1000.0, 300.0);
        let sim = b.create_snap_scroll_simulation(100.0, 200.0, -1.5, 1.0).unwrap();
        assert!(sim.dx(0.0) > 0.0, "snap heads toward the target");
        let mut t = 0.0;
        while !sim.is_done(t) {
            t += 1.0 / 240.0;
            assert!(t < 10.0, "snap never settled");
        }
        assert!((sim.x(t) - 200.0).abs() < 0.5);
    }

    #[test]
    fn snap_without_distance_or_speed_yields_none() {
        let b = BoundedBehavior::new(1000.0, 300.0);
        assert!(b.create_snap_scroll_simulation(50.0, 50.0, 1.0, 1.0).is_none());
        assert!(b.create_snap_scroll_simulation(0.0, 50.0, 0.001, 1.0).is_none());
    }

    #[test]
    fn short_fast_snap_yields_none() {
        // One unit at 1 unit/ms decelerates too sharply for any friction.
        let b = BoundedBehavior::new(1000.0, 300.0);
        assert!(b.create_snap_scroll_simulation(100.0, 101.0, 1.0, 1.0).is_none());
        assert!(b.create_snap_scroll_simulation(101.0, 100.0, -8.0, 2.0).is_none());
    }

    #[test]
    fn update_extents_reclamps_offset() {
        let mut b = BoundedBehavior::new(1000.0, 300.0);
        assert_eq!(b.update_extents(Some(500.0), None, 650.0), 200.0);
        assert_eq!(b.extents(), Extents::new(500.0, 300.0));
        assert_eq!(b.update_extents(None, Some(600.0), 200.0), 0.0);
        assert_eq!(b.max_scroll_offset(), 0.0);
    }

    #[test]
    fn any_behavior_delegates() {
        let mut any: AnyScrollBehavior = OverscrollBehavior::new(1000.0, 300.0).into();
        assert_eq!(any.apply_curve(10.0, -30.0), -10.0);
        assert_eq!(any.update_extents(Some(100.0), None, 50.0), 0.0);
        assert_eq!(any.max_scroll_offset(), 0.0);

        let default = AnyScrollBehavior::default();
        assert!(!default.is_scrollable());
    }
}
