// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The recognizer capability and the request buffer recognizers talk through.
//!
//! Recognizers never hold a reference to the router or the arena. Each call
//! receives a [`GestureContext`]; whatever the recognizer asks for (start or
//! stop receiving a pointer, accept or reject in the arena) is queued there
//! and applied by the [`GestureDispatcher`](crate::GestureDispatcher) as soon
//! as the call returns, before any other recognizer runs.

use alloc::string::String;
use core::fmt;

use smallvec::SmallVec;

use crate::arena::Disposition;
use crate::pointer::{PointerEvent, PointerId};

/// Handle to a recognizer owned by a [`GestureDispatcher`](crate::GestureDispatcher).
///
/// Arena members and router routes are recognizer ids. The id is the
/// recognizer's slot in its dispatcher; slots are never reused, so an id
/// outlives its recognizer without ever naming another one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecognizerId(pub usize);

impl RecognizerId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RecognizerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recognizer {}", self.0)
    }
}

/// A request queued by a recognizer during a call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GestureRequest {
    /// Route the pointer's events to this recognizer and join its arena.
    Track(PointerId),
    /// Stop routing the pointer's events to this recognizer.
    StopTracking(PointerId),
    /// Accept or reject the gesture for the pointer.
    Resolve(PointerId, Disposition),
}

/// Per-call request buffer handed to a [`GestureRecognizer`].
#[derive(Clone, Debug)]
pub struct GestureContext {
    id: RecognizerId,
    requests: SmallVec<[GestureRequest; 4]>,
}

impl GestureContext {
    /// Creates an empty context for the recognizer `id`.
    #[must_use]
    pub fn new(id: RecognizerId) -> Self {
        Self {
            id,
            requests: SmallVec::new(),
        }
    }

    /// The recognizer being called.
    #[must_use]
    pub fn id(&self) -> RecognizerId {
        self.id
    }

    /// Starts receiving events for `pointer` and joins its arena.
    ///
    /// Only meaningful from [`GestureRecognizer::add_pointer`]; the arena is
    /// closed to new members once the down event has been routed.
    pub fn track_pointer(&mut self, pointer: PointerId) {
        self.requests.push(GestureRequest::Track(pointer));
    }

    /// Stops receiving events for `pointer`. Arena membership is unaffected.
    pub fn stop_tracking(&mut self, pointer: PointerId) {
        self.requests.push(GestureRequest::StopTracking(pointer));
    }

    /// Claims the gesture for `pointer`.
    pub fn accept(&mut self, pointer: PointerId) {
        self.resolve(pointer, Disposition::Accepted);
    }

    /// Gives up the gesture for `pointer`.
    pub fn reject(&mut self, pointer: PointerId) {
        self.resolve(pointer, Disposition::Rejected);
    }

    /// Accepts or rejects the gesture for `pointer`.
    pub fn resolve(&mut self, pointer: PointerId, disposition: Disposition) {
        self.requests
            .push(GestureRequest::Resolve(pointer, disposition));
    }

    /// Requests queued so far, in call order.
    #[must_use]
    pub fn requests(&self) -> &[GestureRequest] {
        &self.requests
    }

    pub(crate) fn into_requests(self) -> SmallVec<[GestureRequest; 4]> {
        self.requests
    }
}

/// Failure reported by [`GestureRecognizer::handle_event`].
///
/// The router logs it and keeps delivering the event to the remaining routes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecognizerError {
    /// The recognizer received an event for a pointer it is not tracking.
    UntrackedPointer(PointerId),
    /// The recognizer was used after [`GestureRecognizer::dispose`].
    Disposed,
    /// Recognizer-specific failure.
    Failed(String),
}

impl fmt::Display for RecognizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UntrackedPointer(pointer) => write!(f, "received an event for untracked {pointer}"),
            Self::Disposed => f.write_str("recognizer used after dispose"),
            Self::Failed(msg) => f.write_str(msg),
        }
    }
}

impl core::error::Error for RecognizerError {}

/// A state machine that interprets pointer sequences and competes for them in the arena.
///
/// The lifecycle of one sequence is:
///
/// 1. [`add_pointer`](Self::add_pointer) with the down event, when the host
///    decides the recognizer is interested (usually from a hit test). The
///    recognizer calls [`GestureContext::track_pointer`] to take part.
/// 2. [`handle_event`](Self::handle_event) for every routed event, starting
///    with that same down event.
/// 3. Exactly one of [`accept_gesture`](Self::accept_gesture) or
///    [`reject_gesture`](Self::reject_gesture), whenever the arena decides.
///
/// Implementations reset their per-sequence state when rejected and when
/// the gesture completes.
pub trait GestureRecognizer {
    /// Offers a new pointer sequence, starting with its down event.
    fn add_pointer(&mut self, cx: &mut GestureContext, event: &PointerEvent);

    /// Handles an event for a tracked pointer.
    ///
    /// # Errors
    ///
    /// Returns a [`RecognizerError`] when the event cannot be interpreted.
    /// The failure is isolated; other recognizers still see the event.
    fn handle_event(
        &mut self,
        cx: &mut GestureContext,
        event: &PointerEvent,
    ) -> Result<(), RecognizerError>;

    /// The arena chose this recognizer for `pointer`.
    fn accept_gesture(&mut self, cx: &mut GestureContext, pointer: PointerId);

    /// The arena chose another recognizer for `pointer`, or this one gave up.
    fn reject_gesture(&mut self, cx: &mut GestureContext, pointer: PointerId);

    /// Releases callbacks and per-sequence state. Idempotent; never calls back.
    fn dispose(&mut self);

    /// Short name used in log messages.
    fn debug_name(&self) -> &'static str {
        "recognizer"
    }
}
