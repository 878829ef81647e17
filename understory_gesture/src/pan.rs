// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan recognizer: a pointer that travels past the pan slop drags content.
//!
//! ## Lifecycle
//!
//! 1) `add_pointer` starts tracking the down position.
//! 2) Moves accumulate a pending delta. Once the pointer is more than
//!    [`GestureSettings::pan_slop`] from where it went down, the recognizer
//!    accepts.
//! 3) When the arena accepts it, `on_start` reports the down position and
//!    the pending delta is flushed as the first `on_update`.
//! 4) Every later move reports the delta since the last report.
//! 5) Up ends the pan with the release velocity (`on_end`); cancel calls
//!    `on_cancel`. An up before the slop was crossed gives the gesture up.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Vec2};

use crate::pointer::{PointerEvent, PointerEventKind, PointerId};
use crate::recognizer::{GestureContext, GestureRecognizer, RecognizerError};
use crate::settings::GestureSettings;
use crate::velocity::VelocityTracker;

/// Reported once when the pan wins its pointer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanStartDetails {
    /// The panning pointer.
    pub pointer: PointerId,
    /// Where the pointer went down.
    pub position: Point,
}

/// Reported for movement while the pan is active.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanUpdateDetails {
    /// The panning pointer.
    pub pointer: PointerId,
    /// Current pointer position.
    pub position: Point,
    /// Movement since the previous report.
    pub delta: Vec2,
}

/// Reported when the panning pointer is released.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanEndDetails {
    /// The panning pointer.
    pub pointer: PointerId,
    /// Release velocity in logical pixels per second, clamped to the fling limits.
    pub velocity: Vec2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PanState {
    Idle,
    Tracking,
    Active,
}

type Callback<T> = Option<Box<dyn FnMut(T)>>;

/// Recognizes a drag that moves past the pan slop.
pub struct PanRecognizer {
    settings: GestureSettings,
    state: PanState,
    pointer: Option<PointerId>,
    down_position: Point,
    last_position: Point,
    pending_delta: Vec2,
    accept_requested: bool,
    tracker: VelocityTracker,
    disposed: bool,
    on_start: Callback<PanStartDetails>,
    on_update: Callback<PanUpdateDetails>,
    on_end: Callback<PanEndDetails>,
    on_cancel: Callback<PointerId>,
}

impl fmt::Debug for PanRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanRecognizer")
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("pointer", &self.pointer)
            .field("down_position", &self.down_position)
            .field("last_position", &self.last_position)
            .field("pending_delta", &self.pending_delta)
            .field("accept_requested", &self.accept_requested)
            .field("tracker", &self.tracker)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl PanRecognizer {
    /// Creates a pan recognizer without callbacks.
    #[must_use]
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings: settings.normalized(),
            state: PanState::Idle,
            pointer: None,
            down_position: Point::ZERO,
            last_position: Point::ZERO,
            pending_delta: Vec2::ZERO,
            accept_requested: false,
            tracker: VelocityTracker::new(),
            disposed: false,
            on_start: None,
            on_update: None,
            on_end: None,
            on_cancel: None,
        }
    }

    /// Called once when the pan wins its pointer.
    #[must_use]
    pub fn on_start(mut self, f: impl FnMut(PanStartDetails) + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Called for movement while the pan is active.
    #[must_use]
    pub fn on_update(mut self, f: impl FnMut(PanUpdateDetails) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Called when an active pan is released.
    #[must_use]
    pub fn on_end(mut self, f: impl FnMut(PanEndDetails) + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    /// Called when an active pan is cancelled.
    #[must_use]
    pub fn on_cancel(mut self, f: impl FnMut(PointerId) + 'static) -> Self {
        self.on_cancel = Some(Box::new(f));
        self
    }

    /// Whether the pan has won its pointer and is reporting movement.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == PanState::Active
    }

    /// The pointer currently being tracked, if any.
    #[must_use]
    pub fn pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    fn report_update(&mut self, pointer: PointerId, delta: Vec2) {
        if let Some(f) = &mut self.on_update {
            f(PanUpdateDetails {
                pointer,
                position: self.last_position,
                delta,
            });
        }
    }

    fn release_velocity(&self) -> Vec2 {
        let velocity = self.tracker.velocity();
        let speed = velocity.hypot();
        if speed < self.settings.min_fling_velocity {
            Vec2::ZERO
        } else if speed > self.settings.max_fling_velocity {
            velocity * (self.settings.max_fling_velocity / speed)
        } else {
            velocity
        }
    }

    fn finish(&mut self, cx: &mut GestureContext, pointer: PointerId) {
        cx.stop_tracking(pointer);
        self.reset();
    }

    fn reset(&mut self) {
        self.state = PanState::Idle;
        self.pointer = None;
        self.pending_delta = Vec2::ZERO;
        self.accept_requested = false;
        self.tracker.reset();
    }
}

impl GestureRecognizer for PanRecognizer {
    fn add_pointer(&mut self, cx: &mut GestureContext, event: &PointerEvent) {
        if self.disposed || self.pointer.is_some() {
            return;
        }
        self.state = PanState::Tracking;
        self.pointer = Some(event.pointer);
        self.down_position = event.position;
        self.last_position = event.position;
        self.pending_delta = Vec2::ZERO;
        self.tracker.reset();
        self.tracker.add_position(event.time_ms, event.position);
        cx.track_pointer(event.pointer);
    }

    fn handle_event(
        &mut self,
        cx: &mut GestureContext,
        event: &PointerEvent,
    ) -> Result<(), RecognizerError> {
        if self.disposed {
            return Err(RecognizerError::Disposed);
        }
        let pointer = event.pointer;
        if self.pointer != Some(pointer) {
            return Err(RecognizerError::UntrackedPointer(pointer));
        }

        match event.kind {
            PointerEventKind::Down => {}
            PointerEventKind::Move => {
                self.tracker.add_position(event.time_ms, event.position);
                let delta = event.position - self.last_position;
                self.last_position = event.position;
                match self.state {
                    PanState::Active => self.report_update(pointer, delta),
                    PanState::Tracking => {
                        self.pending_delta += delta;
                        let travelled = (event.position - self.down_position).hypot();
                        if travelled > self.settings.pan_slop && !self.accept_requested {
                            log::trace!("pan on {pointer} moved {travelled} past its slop");
                            self.accept_requested = true;
                            cx.accept(pointer);
                        }
                    }
                    PanState::Idle => {}
                }
            }
            PointerEventKind::Up => {
                self.tracker.add_position(event.time_ms, event.position);
                if self.state == PanState::Active {
                    let velocity = self.release_velocity();
                    if let Some(f) = &mut self.on_end {
                        f(PanEndDetails { pointer, velocity });
                    }
                } else {
                    cx.reject(pointer);
                }
                self.finish(cx, pointer);
            }
            PointerEventKind::Cancel => {
                if self.state == PanState::Active {
                    if let Some(f) = &mut self.on_cancel {
                        f(pointer);
                    }
                } else {
                    cx.reject(pointer);
                }
                self.finish(cx, pointer);
            }
        }
        Ok(())
    }

    fn accept_gesture(&mut self, _cx: &mut GestureContext, pointer: PointerId) {
        if self.pointer != Some(pointer) || self.state != PanState::Tracking {
            return;
        }
        self.state = PanState::Active;
        if let Some(f) = &mut self.on_start {
            f(PanStartDetails {
                pointer,
                position: self.down_position,
            });
        }
        let pending = core::mem::replace(&mut self.pending_delta, Vec2::ZERO);
        if pending != Vec2::ZERO {
            self.report_update(pointer, pending);
        }
    }

    fn reject_gesture(&mut self, cx: &mut GestureContext, pointer: PointerId) {
        if self.pointer == Some(pointer) {
            self.finish(cx, pointer);
        }
    }

    fn dispose(&mut self) {
        self.reset();
        self.disposed = true;
        self.on_start = None;
        self.on_update = None;
        self.on_end = None;
        self.on_cancel = None;
    }

    fn debug_name(&self) -> &'static str {
        "pan"
    }
}
