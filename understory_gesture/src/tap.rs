// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap recognizer: a down and up that stay within the tap slop.
//!
//! A tap needs two things before it fires: the pointer must have gone up,
//! and the arena must have chosen the tap. They can happen in either order.
//! The tap usually wins by elimination (every competitor gave up) or at
//! sweep, when the pointer goes up with nobody having claimed it.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Point;

use crate::pointer::{PointerEvent, PointerEventKind, PointerId};
use crate::recognizer::{GestureContext, GestureRecognizer, RecognizerError};
use crate::settings::GestureSettings;

/// Reported by the tap callbacks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TapDetails {
    /// The tapping pointer.
    pub pointer: PointerId,
    /// Down position for `on_tap_down`, up position for `on_tap`.
    pub position: Point,
}

type Callback<T> = Option<Box<dyn FnMut(T)>>;

/// Recognizes a single tap.
pub struct TapRecognizer {
    settings: GestureSettings,
    pointer: Option<PointerId>,
    down_position: Point,
    up_position: Option<Point>,
    accepted: bool,
    disposed: bool,
    on_tap_down: Callback<TapDetails>,
    on_tap: Callback<TapDetails>,
    on_tap_cancel: Callback<PointerId>,
}

impl fmt::Debug for TapRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapRecognizer")
            .field("settings", &self.settings)
            .field("pointer", &self.pointer)
            .field("down_position", &self.down_position)
            .field("up_position", &self.up_position)
            .field("accepted", &self.accepted)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl TapRecognizer {
    /// Creates a tap recognizer without callbacks.
    #[must_use]
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings: settings.normalized(),
            pointer: None,
            down_position: Point::ZERO,
            up_position: None,
            accepted: false,
            disposed: false,
            on_tap_down: None,
            on_tap: None,
            on_tap_cancel: None,
        }
    }

    /// Called when the tap wins its pointer, with the down position.
    #[must_use]
    pub fn on_tap_down(mut self, f: impl FnMut(TapDetails) + 'static) -> Self {
        self.on_tap_down = Some(Box::new(f));
        self
    }

    /// Called when the tap completes, with the up position.
    #[must_use]
    pub fn on_tap(mut self, f: impl FnMut(TapDetails) + 'static) -> Self {
        self.on_tap = Some(Box::new(f));
        self
    }

    /// Called when a tap that already reported `on_tap_down` will not complete.
    #[must_use]
    pub fn on_tap_cancel(mut self, f: impl FnMut(PointerId) + 'static) -> Self {
        self.on_tap_cancel = Some(Box::new(f));
        self
    }

    /// The pointer currently being tracked, if any.
    #[must_use]
    pub fn pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    fn fire_tap(&mut self, cx: &mut GestureContext, pointer: PointerId, position: Point) {
        if let Some(f) = &mut self.on_tap {
            f(TapDetails { pointer, position });
        }
        self.finish(cx, pointer);
    }

    fn cancel(&mut self, cx: &mut GestureContext, pointer: PointerId) {
        if self.accepted {
            if let Some(f) = &mut self.on_tap_cancel {
                f(pointer);
            }
        } else {
            cx.reject(pointer);
        }
        self.finish(cx, pointer);
    }

    fn finish(&mut self, cx: &mut GestureContext, pointer: PointerId) {
        cx.stop_tracking(pointer);
        self.reset();
    }

    fn reset(&mut self) {
        self.pointer = None;
        self.up_position = None;
        self.accepted = false;
    }
}

impl GestureRecognizer for TapRecognizer {
    fn add_pointer(&mut self, cx: &mut GestureContext, event: &PointerEvent) {
        if self.disposed || self.pointer.is_some() {
            return;
        }
        self.pointer = Some(event.pointer);
        self.down_position = event.position;
        self.up_position = None;
        self.accepted = false;
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
                let travelled = (event.position - self.down_position).hypot();
                if travelled > self.settings.tap_slop {
                    log::trace!("tap on {pointer} moved {travelled} past its slop");
                    self.cancel(cx, pointer);
                }
            }
            PointerEventKind::Up => {
                if self.accepted {
                    self.fire_tap(cx, pointer, event.position);
                } else {
                    self.up_position = Some(event.position);
                }
            }
            PointerEventKind::Cancel => self.cancel(cx, pointer),
        }
        Ok(())
    }

    fn accept_gesture(&mut self, cx: &mut GestureContext, pointer: PointerId) {
        if self.pointer != Some(pointer) || self.accepted {
            return;
        }
        self.accepted = true;
        if let Some(f) = &mut self.on_tap_down {
            f(TapDetails {
                pointer,
                position: self.down_position,
            });
        }
        if let Some(position) = self.up_position {
            self.fire_tap(cx, pointer, position);
        }
    }

    fn reject_gesture(&mut self, cx: &mut GestureContext, pointer: PointerId) {
        if self.pointer != Some(pointer) {
            return;
        }
        if self.accepted {
            if let Some(f) = &mut self.on_tap_cancel {
                f(pointer);
            }
        }
        self.finish(cx, pointer);
    }

    fn dispose(&mut self) {
        self.reset();
        self.disposed = true;
        self.on_tap_down = None;
        self.on_tap = None;
        self.on_tap_cancel = None;
    }

    fn debug_name(&self) -> &'static str {
        "tap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Disposition;
    use crate::recognizer::{GestureRequest, RecognizerId};
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    const P: PointerId = PointerId(1);

    fn cx() -> GestureContext {
        GestureContext::new(RecognizerId(4))
    }

    fn logged_tap(log: &Rc<RefCell<Vec<String>>>) -> TapRecognizer {
        let (down, tap, cancel) = (Rc::clone(log), Rc::clone(log), Rc::clone(log));
        TapRecognizer::new(GestureSettings::default())
            .on_tap_down(move |d| {
                let entry = alloc::format!("down {} {}", d.position.x, d.position.y);
                down.borrow_mut().push(entry);
            })
            .on_tap(move |d| {
                let entry = alloc::format!("tap {} {}", d.position.x, d.position.y);
                tap.borrow_mut().push(entry);
            })
            .on_tap_cancel(move |_| cancel.borrow_mut().push("cancel".into()))
    }

    #[test]
    fn up_then_accept_fires_tap() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tap = logged_tap(&log);
        let mut c = cx();
        tap.add_pointer(&mut c, &PointerEvent::down(P, Point::new(1.0, 1.0), 0));
        tap.handle_event(&mut c, &PointerEvent::up(P, Point::new(2.0, 2.0), 80)).unwrap();
        assert!(log.borrow().is_empty(), "no callbacks before the arena decides");

        tap.accept_gesture(&mut c, P);
        assert_eq!(*log.borrow(), ["down 1 1", "tap 2 2"].map(String::from));
        assert_eq!(tap.pointer(), None);
    }

    #[test]
    fn accept_then_up_fires_tap() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tap = logged_tap(&log);
        let mut c = cx();
        tap.add_pointer(&mut c, &PointerEvent::down(P, Point::ZERO, 0));
        tap.accept_gesture(&mut c, P);
        assert_eq!(log.borrow().len(), 1);
        tap.handle_event(&mut c, &PointerEvent::up(P, Point::ZERO, 50)).unwrap();
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn moving_past_slop_rejects() {
        let mut tap = TapRecognizer::new(GestureSettings::default());
        let mut c = cx();
        tap.add_pointer(&mut c, &PointerEvent::down(P, Point::ZERO, 0));
        let mut c = cx();
        tap.handle_event(&mut c, &PointerEvent::moved(P, Point::new(10.0, 10.0), 10)).unwrap();
        assert!(c.requests().is_empty(), "14px is within the default slop");
        tap.handle_event(&mut c, &PointerEvent::moved(P, Point::new(20.0, 0.0), 20)).unwrap();
        assert_eq!(
            c.requests(),
            &[
                GestureRequest::Resolve(P, Disposition::Rejected),
                GestureRequest::StopTracking(P),
            ]
        );
    }

    #[test]
    fn rejection_after_tap_down_cancels() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tap = logged_tap(&log);
        let mut c = cx();
        tap.add_pointer(&mut c, &PointerEvent::down(P, Point::ZERO, 0));
        tap.accept_gesture(&mut c, P);
        tap.handle_event(&mut c, &PointerEvent::cancel(P, Point::ZERO, 10)).unwrap();
        assert_eq!(log.borrow().last().map(String::as_str), Some("cancel"));
    }

    #[test]
    fn rejection_before_acceptance_is_silent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tap = logged_tap(&log);
        let mut c = cx();
        tap.add_pointer(&mut c, &PointerEvent::down(P, Point::ZERO, 0));
        tap.reject_gesture(&mut c, P);
        assert!(log.borrow().is_empty());
        assert_eq!(tap.pointer(), None);
    }

    #[test]
    fn dispose_twice_is_safe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tap = logged_tap(&log);
        let mut c = cx();
        tap.add_pointer(&mut c, &PointerEvent::down(P, Point::ZERO, 0));
        tap.dispose();
        tap.dispose();
        tap.accept_gesture(&mut c, P);
        assert!(log.borrow().is_empty());
    }
}
