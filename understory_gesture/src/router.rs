// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer router: which recognizers receive which pointer's events.
//!
//! Routes are kept per pointer in registration order without duplicates.
//! [`PointerRouter::route`] walks a snapshot of the routes taken when the
//! event arrives and skips any route removed while the event is being
//! delivered, so a recognizer that loses the arena mid-dispatch never sees
//! the event that made it lose.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::{PointerEvent, PointerId, PointerRouter, RecognizerId};
//!
//! let pointer = PointerId(1);
//! let mut router = PointerRouter::new();
//! router.add_route(pointer, RecognizerId(0));
//! router.add_route(pointer, RecognizerId(1));
//!
//! // The first handler removes the second route; it is skipped.
//! let mut seen = Vec::new();
//! let down = PointerEvent::down(pointer, Point::ZERO, 0);
//! let failures = router.route(&down, |router, id| {
//!     seen.push(id);
//!     router.remove_route(pointer, RecognizerId(1));
//!     Ok::<(), &str>(())
//! });
//! assert!(failures.is_empty());
//! assert_eq!(seen, vec![RecognizerId(0)]);
//! ```

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::pointer::{PointerEvent, PointerId};
use crate::recognizer::RecognizerId;

/// Routes for a single pointer, in registration order.
pub type Routes = SmallVec<[RecognizerId; 4]>;

/// Per-pointer routing table.
#[derive(Clone, Debug, Default)]
pub struct PointerRouter {
    routes: HashMap<PointerId, Routes>,
}

impl PointerRouter {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes `pointer`'s events to `recognizer`.
    ///
    /// Returns `false` if the route already existed.
    pub fn add_route(&mut self, pointer: PointerId, recognizer: RecognizerId) -> bool {
        let routes = self.routes.entry(pointer).or_default();
        if routes.contains(&recognizer) {
            return false;
        }
        routes.push(recognizer);
        log::trace!("route added: {pointer} -> {recognizer}");
        true
    }

    /// Stops routing `pointer`'s events to `recognizer`.
    ///
    /// Returns `false` if there was no such route. The pointer's entry is
    /// dropped once its last route is removed.
    pub fn remove_route(&mut self, pointer: PointerId, recognizer: RecognizerId) -> bool {
        let Some(routes) = self.routes.get_mut(&pointer) else {
            return false;
        };
        let Some(index) = routes.iter().position(|r| *r == recognizer) else {
            return false;
        };
        routes.remove(index);
        if routes.is_empty() {
            self.routes.remove(&pointer);
        }
        log::trace!("route removed: {pointer} -> {recognizer}");
        true
    }

    /// Removes every route to `recognizer`.
    pub fn remove_recognizer(&mut self, recognizer: RecognizerId) {
        self.routes.retain(|_, routes| {
            routes.retain(|r| *r != recognizer);
            !routes.is_empty()
        });
    }

    /// Removes every route for `pointer`, returning how many there were.
    pub fn clear_pointer(&mut self, pointer: PointerId) -> usize {
        self.routes.remove(&pointer).map_or(0, |routes| routes.len())
    }

    /// Whether `pointer`'s events are routed to `recognizer`.
    #[must_use]
    pub fn contains_route(&self, pointer: PointerId, recognizer: RecognizerId) -> bool {
        self.routes
            .get(&pointer)
            .is_some_and(|routes| routes.contains(&recognizer))
    }

    /// Snapshot of the routes for `pointer`.
    #[must_use]
    pub fn routes(&self, pointer: PointerId) -> Routes {
        self.routes.get(&pointer).cloned().unwrap_or_default()
    }

    /// Whether no pointer has any route.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Delivers `event` to every route registered for its pointer.
    ///
    /// `handler` receives the router itself so it can add or remove routes
    /// while the event is in flight. Routes present in the snapshot but
    /// removed before their turn are skipped; routes added during delivery
    /// only see later events. A handler error is logged and collected and
    /// delivery continues.
    pub fn route<E: fmt::Display>(
        &mut self,
        event: &PointerEvent,
        mut handler: impl FnMut(&mut Self, RecognizerId) -> Result<(), E>,
    ) -> Vec<(RecognizerId, E)> {
        let pointer = event.pointer;
        let mut failures = Vec::new();
        for recognizer in self.routes(pointer) {
            if !self.contains_route(pointer, recognizer) {
                log::trace!("skipping {recognizer}: route to {pointer} removed mid-dispatch");
                continue;
            }
            log::trace!("routing {:?} for {pointer} to {recognizer}", event.kind);
            if let Err(err) = handler(self, recognizer) {
                log::warn!("{recognizer} failed to handle {:?} for {pointer}: {err}", event.kind);
                failures.push((recognizer, err));
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Point;

    const P: PointerId = PointerId(1);

    fn ids(raw: &[usize]) -> Routes {
        raw.iter().copied().map(RecognizerId).collect()
    }

    #[test]
    fn routes_keep_registration_order_without_duplicates() {
        let mut router = PointerRouter::new();
        assert!(router.add_route(P, RecognizerId(2)));
        assert!(router.add_route(P, RecognizerId(0)));
        assert!(!router.add_route(P, RecognizerId(2)));
        assert_eq!(router.routes(P), ids(&[2, 0]));
    }

    #[test]
    fn removing_last_route_drops_pointer_entry() {
        let mut router = PointerRouter::new();
        router.add_route(P, RecognizerId(0));
        assert!(router.remove_route(P, RecognizerId(0)));
        assert!(!router.remove_route(P, RecognizerId(0)));
        assert!(router.is_empty());
    }

    #[test]
    fn remove_recognizer_clears_all_pointers() {
        let mut router = PointerRouter::new();
        let q = PointerId(2);
        router.add_route(P, RecognizerId(0));
        router.add_route(P, RecognizerId(1));
        router.add_route(q, RecognizerId(0));
        router.remove_recognizer(RecognizerId(0));
        assert_eq!(router.routes(P), ids(&[1]));
        assert!(router.routes(q).is_empty());
        assert_eq!(router.clear_pointer(P), 1);
        assert!(router.is_empty());
    }

    #[test]
    fn failures_are_isolated() {
        let mut router = PointerRouter::new();
        for id in 0..3 {
            router.add_route(P, RecognizerId(id));
        }
        let mut seen = Vec::new();
        let event = PointerEvent::moved(P, Point::new(1.0, 1.0), 16);
        let failures = router.route(&event, |_, id| {
            seen.push(id);
            if id == RecognizerId(1) { Err("boom") } else { Ok(()) }
        });
        assert_eq!(seen, vec![RecognizerId(0), RecognizerId(1), RecognizerId(2)]);
        assert_eq!(failures, vec![(RecognizerId(1), "boom")]);
    }

    #[test]
    fn routes_added_mid_dispatch_wait_for_next_event() {
        let mut router = PointerRouter::new();
        router.add_route(P, RecognizerId(0));
        let mut seen = Vec::new();
        let event = PointerEvent::down(P, Point::ZERO, 0);
        router.route(&event, |router, id| {
            seen.push(id);
            router.add_route(P, RecognizerId(7));
            Ok::<(), &str>(())
        });
        assert_eq!(seen, vec![RecognizerId(0)]);
        assert!(router.contains_route(P, RecognizerId(7)));
    }

    #[test]
    fn unrouted_pointer_delivers_nothing() {
        let mut router = PointerRouter::new();
        let event = PointerEvent::up(P, Point::ZERO, 0);
        let failures = router.route(&event, |_, _| Err("unreachable"));
        assert!(failures.is_empty());
    }
}
