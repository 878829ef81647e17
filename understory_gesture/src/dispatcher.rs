// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture dispatcher: owns recognizers, the router and the arena.
//!
//! The dispatcher drives one pointer sequence like this:
//!
//! - The host hit tests the down event and calls
//!   [`GestureDispatcher::add_pointer`] for every interested recognizer.
//! - [`GestureDispatcher::handle_event`] routes each event, then closes the
//!   arena after a down and sweeps it after an up. A cancel rejects every
//!   undecided member before it is routed, so it never picks a winner.
//!
//! Whatever a recognizer requests is applied as soon as its call returns.
//! Arena decisions are delivered immediately too, losers first, so a
//! recognizer that loses during an event is never handed that event.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::arena::{ArenaError, ArenaNotification, ArenaOutcome, GestureArena};
use crate::pointer::{PointerEvent, PointerEventKind, PointerId};
use crate::recognizer::{
    GestureContext, GestureRecognizer, GestureRequest, RecognizerError, RecognizerId,
};
use crate::router::PointerRouter;

/// What failed while dispatching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchErrorKind {
    /// The arena refused a request.
    Arena(ArenaError),
    /// The recognizer failed to handle an event.
    Recognizer(RecognizerError),
    /// No live recognizer has this id.
    UnknownRecognizer,
}

/// A failure attributed to one recognizer and pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchError {
    /// Recognizer involved.
    pub recognizer: RecognizerId,
    /// Pointer involved.
    pub pointer: PointerId,
    /// What went wrong.
    pub kind: DispatchErrorKind,
}

impl DispatchError {
    fn new(recognizer: RecognizerId, pointer: PointerId, kind: DispatchErrorKind) -> Self {
        Self {
            recognizer,
            pointer,
            kind,
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DispatchErrorKind::Arena(err) => {
                write!(f, "{} on {}: {err}", self.recognizer, self.pointer)
            }
            DispatchErrorKind::Recognizer(err) => {
                write!(f, "{} on {}: {err}", self.recognizer, self.pointer)
            }
            DispatchErrorKind::UnknownRecognizer => {
                write!(f, "{} is not registered (used on {})", self.recognizer, self.pointer)
            }
        }
    }
}

impl core::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.kind {
            DispatchErrorKind::Arena(err) => Some(err),
            DispatchErrorKind::Recognizer(err) => Some(err),
            DispatchErrorKind::UnknownRecognizer => None,
        }
    }
}

/// Recognizer slots plus the arena; everything but the router.
///
/// Kept apart from the router so a routing callback can borrow both.
#[derive(Default)]
struct Members {
    recognizers: Vec<Option<Box<dyn GestureRecognizer>>>,
    arena: GestureArena,
}

impl Members {
    fn call<R>(
        &mut self,
        id: RecognizerId,
        f: impl FnOnce(&mut dyn GestureRecognizer, &mut GestureContext) -> R,
    ) -> Option<(R, GestureContext)> {
        let recognizer = self.recognizers.get_mut(id.index())?.as_deref_mut()?;
        let mut cx = GestureContext::new(id);
        let out = f(recognizer, &mut cx);
        Some((out, cx))
    }

    fn apply(
        &mut self,
        router: &mut PointerRouter,
        cx: GestureContext,
        errors: &mut Vec<DispatchError>,
    ) {
        let id = cx.id();
        for request in cx.into_requests() {
            match request {
                GestureRequest::Track(pointer) => {
                    router.add_route(pointer, id);
                    if let Err(err) = self.arena.add(pointer, id) {
                        router.remove_route(pointer, id);
                        let kind = DispatchErrorKind::Arena(err);
                        errors.push(DispatchError::new(id, pointer, kind));
                        // The recognizer already counts the pointer as its own.
                        let refused = ArenaNotification {
                            member: id,
                            pointer,
                            outcome: ArenaOutcome::Reject,
                        };
                        self.deliver(router, vec![refused], errors);
                    }
                }
                GestureRequest::StopTracking(pointer) => {
                    router.remove_route(pointer, id);
                }
                GestureRequest::Resolve(pointer, disposition) => {
                    match self.arena.resolve(pointer, id, disposition) {
                        Ok(notes) => self.deliver(router, notes, errors),
                        Err(err) => errors.push(DispatchError::new(
                            id,
                            pointer,
                            DispatchErrorKind::Arena(err),
                        )),
                    }
                }
            }
        }
    }

    fn deliver(
        &mut self,
        router: &mut PointerRouter,
        notes: Vec<ArenaNotification>,
        errors: &mut Vec<DispatchError>,
    ) {
        for note in notes {
            let called = self.call(note.member, |r, cx| match note.outcome {
                ArenaOutcome::Accept => r.accept_gesture(cx, note.pointer),
                ArenaOutcome::Reject => r.reject_gesture(cx, note.pointer),
            });
            match called {
                Some(((), cx)) => self.apply(router, cx, errors),
                None => log::debug!(
                    "{:?} for {} dropped: recognizer gone",
                    note.outcome,
                    note.member
                ),
            }
        }
    }

    fn deliver_event(
        &mut self,
        router: &mut PointerRouter,
        id: RecognizerId,
        event: &PointerEvent,
        errors: &mut Vec<DispatchError>,
    ) -> Result<(), RecognizerError> {
        let Some((result, cx)) = self.call(id, |r, cx| r.handle_event(cx, event)) else {
            router.remove_recognizer(id);
            return Ok(());
        };
        self.apply(router, cx, errors);
        result
    }
}

/// Owns recognizers and arbitrates pointer sequences between them.
///
/// ## Minimal example
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use kurbo::Point;
/// use understory_gesture::{
///     GestureDispatcher, GestureSettings, PointerEvent, PointerId, TapRecognizer,
/// };
///
/// let taps = Rc::new(RefCell::new(0));
/// let counter = Rc::clone(&taps);
///
/// let mut gestures = GestureDispatcher::new();
/// let tap = gestures.insert(
///     TapRecognizer::new(GestureSettings::default()).on_tap(move |_| *counter.borrow_mut() += 1),
/// );
///
/// let pointer = PointerId(1);
/// let down = PointerEvent::down(pointer, Point::new(10.0, 10.0), 0);
/// gestures.add_pointer(tap, &down).unwrap();
/// assert!(gestures.handle_event(&down).is_empty());
/// gestures.handle_event(&PointerEvent::up(pointer, Point::new(11.0, 10.0), 90));
///
/// assert_eq!(*taps.borrow(), 1);
/// ```
#[derive(Default)]
pub struct GestureDispatcher {
    router: PointerRouter,
    members: Members,
}

impl fmt::Debug for GestureDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self
            .members
            .recognizers
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().map(|r| (i, r.debug_name())))
            .collect();
        f.debug_struct("GestureDispatcher")
            .field("recognizers", &names)
            .field("router", &self.router)
            .field("arena", &self.members.arena)
            .finish()
    }
}

impl GestureDispatcher {
    /// Creates a dispatcher with no recognizers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `recognizer` and returns its id.
    pub fn insert(&mut self, recognizer: impl GestureRecognizer + 'static) -> RecognizerId {
        self.insert_boxed(Box::new(recognizer))
    }

    /// Takes ownership of an already boxed recognizer and returns its id.
    pub fn insert_boxed(&mut self, recognizer: Box<dyn GestureRecognizer>) -> RecognizerId {
        let id = RecognizerId(self.members.recognizers.len());
        log::debug!("{id} registered as {}", recognizer.debug_name());
        self.members.recognizers.push(Some(recognizer));
        id
    }

    /// Whether `id` names a live recognizer.
    #[must_use]
    pub fn contains(&self, id: RecognizerId) -> bool {
        self.members
            .recognizers
            .get(id.index())
            .is_some_and(Option::is_some)
    }

    /// Number of live recognizers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.recognizers.iter().flatten().count()
    }

    /// Whether no recognizer is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The routing table.
    #[must_use]
    pub fn router(&self) -> &PointerRouter {
        &self.router
    }

    /// The arena.
    #[must_use]
    pub fn arena(&self) -> &GestureArena {
        &self.members.arena
    }

    /// Offers the down event `event` to the recognizer `id`.
    ///
    /// Call this for each recognizer interested in a new pointer, before
    /// passing the same down event to [`Self::handle_event`].
    ///
    /// # Errors
    ///
    /// Fails if `id` is not live or the arena refuses the recognizer. When
    /// several requests fail, the first failure is returned and all are logged.
    pub fn add_pointer(
        &mut self,
        id: RecognizerId,
        event: &PointerEvent,
    ) -> Result<(), DispatchError> {
        let Some(((), cx)) = self.members.call(id, |r, cx| r.add_pointer(cx, event)) else {
            return Err(DispatchError::new(
                id,
                event.pointer,
                DispatchErrorKind::UnknownRecognizer,
            ));
        };
        let mut errors = Vec::new();
        self.members.apply(&mut self.router, cx, &mut errors);
        match errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Routes `event` to every recognizer tracking its pointer and advances the arena.
    ///
    /// After routing, a down closes the pointer's arena and an up sweeps it.
    /// A cancel first rejects every undecided member, then reaches only a
    /// winner chosen earlier. An up or cancel drops whatever routes remain
    /// for the pointer.
    ///
    /// Returns every failure that occurred; a failing recognizer does not stop
    /// the event from reaching the others.
    pub fn handle_event(&mut self, event: &PointerEvent) -> Vec<DispatchError> {
        let mut errors = Vec::new();
        let pointer = event.pointer;
        if event.kind == PointerEventKind::Cancel && self.members.arena.contains(pointer) {
            // Undecided members drop out before the event, so nobody wins by
            // elimination. A winner chosen earlier still receives the cancel.
            match self.members.arena.cancel(pointer) {
                Ok(notes) => self.members.deliver(&mut self.router, notes, &mut errors),
                Err(err) => log::error!("cancelling the arena for {pointer} failed: {err}"),
            }
        }
        let members = &mut self.members;
        let failures = self.router.route(event, |router, id| {
            members.deliver_event(router, id, event, &mut errors)
        });
        errors.extend(failures.into_iter().map(|(id, err)| {
            DispatchError::new(id, pointer, DispatchErrorKind::Recognizer(err))
        }));

        if !self.members.arena.contains(pointer) {
            if event.ends_sequence() {
                self.router.clear_pointer(pointer);
            }
            return errors;
        }
        let advanced = match event.kind {
            PointerEventKind::Down => self.members.arena.close(pointer),
            PointerEventKind::Up => self.members.arena.sweep(pointer),
            PointerEventKind::Cancel => self.members.arena.cancel(pointer),
            PointerEventKind::Move => Ok(Vec::new()),
        };
        match advanced {
            Ok(notes) => self.members.deliver(&mut self.router, notes, &mut errors),
            Err(err) => log::error!("advancing the arena for {pointer} failed: {err}"),
        }
        if event.ends_sequence() {
            let stale = self.router.clear_pointer(pointer);
            if stale > 0 {
                log::debug!("dropped {stale} routes left on {pointer} after its sequence ended");
            }
        }
        errors
    }

    /// Holds the arena for `pointer` past the end of its sequence.
    ///
    /// # Errors
    ///
    /// Fails when no arena exists for `pointer`.
    pub fn hold(&mut self, pointer: PointerId) -> Result<(), ArenaError> {
        self.members.arena.hold(pointer)
    }

    /// Releases a hold, running a sweep it deferred.
    ///
    /// # Errors
    ///
    /// Fails when no arena exists for `pointer`. Failures from recognizers
    /// notified by the sweep are returned in the `Ok` vector.
    pub fn release(&mut self, pointer: PointerId) -> Result<Vec<DispatchError>, ArenaError> {
        let notes = self.members.arena.release(pointer)?;
        let mut errors = Vec::new();
        self.members.deliver(&mut self.router, notes, &mut errors);
        Ok(errors)
    }

    /// Disposes the recognizer `id` and removes it from every route and arena.
    ///
    /// Returns `false` if `id` was not live, so disposing twice is harmless.
    /// Arenas decided by its departure notify their remaining members.
    pub fn dispose(&mut self, id: RecognizerId) -> bool {
        let Some(mut recognizer) = self
            .members
            .recognizers
            .get_mut(id.index())
            .and_then(Option::take)
        else {
            return false;
        };
        recognizer.dispose();
        log::debug!("{id} ({}) disposed", recognizer.debug_name());

        self.router.remove_recognizer(id);
        let notes = self.members.arena.remove_member(id);
        let mut errors = Vec::new();
        self.members.deliver(&mut self.router, notes, &mut errors);
        for err in errors {
            log::warn!("while disposing {id}: {err}");
        }
        true
    }
}
