// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: deterministic gesture arbitration for UI.
//!
//! ## Overview
//!
//! Several recognizers often want the same pointer: a list wants to pan, the
//! row under the finger wants a tap. This crate lets all of them watch the
//! pointer and picks exactly one winner per pointer-down sequence.
//!
//! - [`PointerRouter`]: which recognizers receive which pointer's events.
//! - [`GestureArena`]: per-pointer membership and the rules that pick a winner.
//! - [`GestureRecognizer`]: the capability recognizers implement, talking to
//!   the router and arena through a [`GestureContext`].
//! - [`PanRecognizer`] and [`TapRecognizer`]: the built-in recognizers, tuned by
//!   [`GestureSettings`]. Pan release velocity comes from a [`VelocityTracker`].
//! - [`GestureDispatcher`]: owns all of the above and applies every decision
//!   synchronously.
//!
//! It does not hit test. The host decides which recognizers get a pointer,
//! for example from `understory_responder` routing, and reports it with
//! [`GestureDispatcher::add_pointer`].
//!
//! ## Resolution rules
//!
//! - The arena closes once the down event has been routed. A lone member
//!   wins right away.
//! - A member that accepts wins; every other member is rejected first.
//! - A member that rejects leaves; the last member standing wins.
//! - When the pointer goes up with nobody chosen, the first member to join wins.
//! - A cancelled pointer has no winner; undecided members are all rejected.
//!
//! ## Pan versus tap
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use kurbo::Point;
//! use understory_gesture::{
//!     GestureDispatcher, GestureSettings, PanRecognizer, PointerEvent, PointerId, TapRecognizer,
//! };
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let (pan_log, tap_log) = (Rc::clone(&log), Rc::clone(&log));
//!
//! let mut gestures = GestureDispatcher::new();
//! let pan = gestures.insert(
//!     PanRecognizer::new(GestureSettings::default())
//!         .on_update(move |d| {
//!             pan_log.borrow_mut().push(format!("pan {} {}", d.delta.x, d.delta.y));
//!         }),
//! );
//! let tap = gestures.insert(
//!     TapRecognizer::new(GestureSettings::default())
//!         .on_tap(move |_| tap_log.borrow_mut().push("tap".to_string())),
//! );
//!
//! let p = PointerId(5);
//! let down = PointerEvent::down(p, Point::new(10.0, 10.0), 0);
//! gestures.add_pointer(pan, &down).unwrap();
//! gestures.add_pointer(tap, &down).unwrap();
//! gestures.handle_event(&down);
//!
//! // 14px of travel: past the pan slop, within the tap slop. The pan wins.
//! gestures.handle_event(&PointerEvent::moved(p, Point::new(20.0, 20.0), 16));
//! gestures.handle_event(&PointerEvent::up(p, Point::new(20.0, 20.0), 32));
//!
//! assert_eq!(*log.borrow(), ["pan 10 10"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arena;
mod dispatcher;
mod pan;
mod pointer;
mod recognizer;
mod router;
mod settings;
mod tap;
mod velocity;

pub use arena::{
    ArenaError, ArenaNotification, ArenaOutcome, ArenaState, Disposition, GestureArena,
};
pub use dispatcher::{DispatchError, DispatchErrorKind, GestureDispatcher};
pub use pan::{PanEndDetails, PanRecognizer, PanStartDetails, PanUpdateDetails};
pub use pointer::{PointerEvent, PointerEventKind, PointerId};
pub use recognizer::{
    GestureContext, GestureRecognizer, GestureRequest, RecognizerError, RecognizerId,
};
pub use router::{PointerRouter, Routes};
pub use settings::GestureSettings;
pub use tap::{TapDetails, TapRecognizer};
pub use velocity::VelocityTracker;
