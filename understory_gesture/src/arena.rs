// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture arena: one winner per pointer sequence.
//!
//! Every recognizer interested in a pointer-down joins that pointer's arena.
//! The arena then picks exactly one of them:
//!
//! - A member accepts: it wins as soon as the arena is closed.
//! - Members reject until one is left: the last one wins.
//! - The sequence ends undecided: the first member to join wins.
//!
//! Operations return [`ArenaNotification`]s in the order they must be
//! delivered. At resolution every loser is notified before the winner.
//!
//! ## Minimal example
//!
//! ```
//! use understory_gesture::{
//!     ArenaNotification, ArenaOutcome, Disposition, GestureArena, PointerId, RecognizerId,
//! };
//!
//! let pointer = PointerId(1);
//! let (pan, tap) = (RecognizerId(0), RecognizerId(1));
//!
//! let mut arena = GestureArena::new();
//! arena.add(pointer, pan).unwrap();
//! arena.add(pointer, tap).unwrap();
//! assert!(arena.close(pointer).unwrap().is_empty());
//!
//! // The pan moves past its slop and claims the pointer.
//! let notes = arena.resolve(pointer, pan, Disposition::Accepted).unwrap();
//! assert_eq!(notes, vec![
//!     ArenaNotification { member: tap, pointer, outcome: ArenaOutcome::Reject },
//!     ArenaNotification { member: pan, pointer, outcome: ArenaOutcome::Accept },
//! ]);
//! ```

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::pointer::PointerId;
use crate::recognizer::RecognizerId;

/// How a member resolves itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// The member claims the gesture.
    Accepted,
    /// The member gives up.
    Rejected,
}

/// Stage of one arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArenaState {
    /// Accepting new members.
    Open,
    /// Membership is fixed; waiting for a decision.
    Closed,
    /// The winner has been chosen.
    Resolved(RecognizerId),
}

/// What a member is told.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArenaOutcome {
    /// The member won the pointer.
    Accept,
    /// The member lost the pointer.
    Reject,
}

/// A decision to deliver to one member.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArenaNotification {
    /// Who to notify.
    pub member: RecognizerId,
    /// Which pointer the decision is about.
    pub pointer: PointerId,
    /// The decision.
    pub outcome: ArenaOutcome,
}

impl ArenaNotification {
    fn accept(pointer: PointerId, member: RecognizerId) -> Self {
        Self {
            member,
            pointer,
            outcome: ArenaOutcome::Accept,
        }
    }

    fn reject(pointer: PointerId, member: RecognizerId) -> Self {
        Self {
            member,
            pointer,
            outcome: ArenaOutcome::Reject,
        }
    }
}

/// Misuse of the arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArenaError {
    /// No arena exists for the pointer.
    UnknownPointer(PointerId),
    /// The arena was closed; it takes no new members.
    Closed(PointerId),
    /// The arena already has a winner.
    AlreadyResolved(PointerId),
    /// The recognizer already belongs to the arena.
    AlreadyMember {
        /// Arena pointer.
        pointer: PointerId,
        /// Recognizer that tried to join twice.
        member: RecognizerId,
    },
    /// The recognizer does not belong to the arena.
    NotAMember {
        /// Arena pointer.
        pointer: PointerId,
        /// Recognizer that tried to resolve.
        member: RecognizerId,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPointer(pointer) => write!(f, "no gesture arena for {pointer}"),
            Self::Closed(pointer) => write!(f, "gesture arena for {pointer} is closed"),
            Self::AlreadyResolved(pointer) => {
                write!(f, "gesture arena for {pointer} is already resolved")
            }
            Self::AlreadyMember { pointer, member } => {
                write!(f, "{member} already belongs to the gesture arena for {pointer}")
            }
            Self::NotAMember { pointer, member } => {
                write!(f, "{member} is not a member of the gesture arena for {pointer}")
            }
        }
    }
}

impl core::error::Error for ArenaError {}

fn misuse(err: ArenaError) -> ArenaError {
    log::error!("{err}");
    err
}

#[derive(Clone, Debug)]
struct ArenaEntry {
    members: SmallVec<[RecognizerId; 4]>,
    state: ArenaState,
    held: bool,
    sweep_pending: bool,
    eager_winner: Option<RecognizerId>,
}

impl ArenaEntry {
    fn new() -> Self {
        Self {
            members: SmallVec::new(),
            state: ArenaState::Open,
            held: false,
            sweep_pending: false,
            eager_winner: None,
        }
    }
}

/// Arenas for every live pointer sequence.
#[derive(Clone, Debug, Default)]
pub struct GestureArena {
    entries: HashMap<PointerId, ArenaEntry>,
}

impl GestureArena {
    /// Creates an empty arena set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an arena exists for `pointer`.
    #[must_use]
    pub fn contains(&self, pointer: PointerId) -> bool {
        self.entries.contains_key(&pointer)
    }

    /// Number of live arenas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no arena is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stage of the arena for `pointer`.
    #[must_use]
    pub fn state(&self, pointer: PointerId) -> Option<ArenaState> {
        self.entries.get(&pointer).map(|e| e.state)
    }

    /// Members of the arena for `pointer`, in the order they joined.
    #[must_use]
    pub fn members(&self, pointer: PointerId) -> Option<&[RecognizerId]> {
        self.entries.get(&pointer).map(|e| e.members.as_slice())
    }

    /// Whether the arena for `pointer` is held open past the end of its sequence.
    #[must_use]
    pub fn is_held(&self, pointer: PointerId) -> bool {
        self.entries.get(&pointer).is_some_and(|e| e.held)
    }

    /// Adds `member` to the arena for `pointer`, creating the arena if needed.
    ///
    /// # Errors
    ///
    /// Fails once the arena is closed or resolved, or when `member` already joined.
    pub fn add(&mut self, pointer: PointerId, member: RecognizerId) -> Result<(), ArenaError> {
        let entry = self.entries.entry(pointer).or_insert_with(ArenaEntry::new);
        match entry.state {
            ArenaState::Open => {}
            ArenaState::Closed => return Err(misuse(ArenaError::Closed(pointer))),
            ArenaState::Resolved(_) => {
                return Err(misuse(ArenaError::AlreadyResolved(pointer)));
            }
        }
        if entry.members.contains(&member) {
            return Err(misuse(ArenaError::AlreadyMember { pointer, member }));
        }
        entry.members.push(member);
        log::debug!("{member} joined the gesture arena for {pointer}");
        Ok(())
    }

    /// Closes the arena for `pointer` to new members.
    ///
    /// A lone member, or a member that accepted while the arena was open, wins
    /// immediately. An arena nobody joined is destroyed. Closing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Fails when no arena exists for `pointer`.
    pub fn close(&mut self, pointer: PointerId) -> Result<Vec<ArenaNotification>, ArenaError> {
        let entry = self
            .entries
            .get_mut(&pointer)
            .ok_or_else(|| misuse(ArenaError::UnknownPointer(pointer)))?;
        if entry.state != ArenaState::Open {
            return Ok(Vec::new());
        }
        entry.state = ArenaState::Closed;
        log::debug!(
            "gesture arena for {pointer} closed with {} members",
            entry.members.len()
        );
        Ok(self.try_resolve(pointer))
    }

    /// Resolves `member`'s claim on `pointer`.
    ///
    /// - [`Disposition::Accepted`] while closed: `member` wins now. While open,
    ///   the first member to accept wins when the arena closes.
    /// - [`Disposition::Rejected`]: `member` leaves the arena and is notified.
    ///   In a closed arena the last remaining member wins.
    ///
    /// # Errors
    ///
    /// Fails when the arena is unknown or resolved, or `member` is not in it.
    pub fn resolve(
        &mut self,
        pointer: PointerId,
        member: RecognizerId,
        disposition: Disposition,
    ) -> Result<Vec<ArenaNotification>, ArenaError> {
        let entry = self
            .entries
            .get_mut(&pointer)
            .ok_or_else(|| misuse(ArenaError::UnknownPointer(pointer)))?;
        if let ArenaState::Resolved(_) = entry.state {
            return Err(misuse(ArenaError::AlreadyResolved(pointer)));
        }
        let Some(index) = entry.members.iter().position(|m| *m == member) else {
            return Err(misuse(ArenaError::NotAMember { pointer, member }));
        };

        match disposition {
            Disposition::Accepted => {
                if entry.state == ArenaState::Open {
                    log::debug!("{member} accepted {pointer} while its arena is open");
                    entry.eager_winner.get_or_insert(member);
                    Ok(Vec::new())
                } else {
                    Ok(self.resolve_in_favor_of(pointer, member))
                }
            }
            Disposition::Rejected => {
                entry.members.remove(index);
                if entry.eager_winner == Some(member) {
                    entry.eager_winner = None;
                }
                log::debug!("{member} rejected {pointer}");
                let mut notes = Vec::from([ArenaNotification::reject(pointer, member)]);
                if entry.state == ArenaState::Closed {
                    notes.extend(self.try_resolve(pointer));
                }
                Ok(notes)
            }
        }
    }

    /// Holds the arena for `pointer` open past the end of its sequence.
    ///
    /// A [`Self::sweep`] while held is deferred until [`Self::release`].
    ///
    /// # Errors
    ///
    /// Fails when no arena exists for `pointer`.
    pub fn hold(&mut self, pointer: PointerId) -> Result<(), ArenaError> {
        let entry = self
            .entries
            .get_mut(&pointer)
            .ok_or_else(|| misuse(ArenaError::UnknownPointer(pointer)))?;
        entry.held = true;
        Ok(())
    }

    /// Releases a hold, performing a sweep that was deferred by it.
    ///
    /// # Errors
    ///
    /// Fails when no arena exists for `pointer`.
    pub fn release(&mut self, pointer: PointerId) -> Result<Vec<ArenaNotification>, ArenaError> {
        let entry = self
            .entries
            .get_mut(&pointer)
            .ok_or_else(|| misuse(ArenaError::UnknownPointer(pointer)))?;
        entry.held = false;
        if entry.sweep_pending {
            self.sweep(pointer)
        } else {
            Ok(Vec::new())
        }
    }

    /// Ends the sequence for `pointer` and destroys its arena.
    ///
    /// If no winner was chosen the first remaining member wins and the
    /// others are rejected. A held arena is only marked for sweeping.
    ///
    /// # Errors
    ///
    /// Fails when no arena exists for `pointer`.
    pub fn sweep(&mut self, pointer: PointerId) -> Result<Vec<ArenaNotification>, ArenaError> {
        let entry = self
            .entries
            .get_mut(&pointer)
            .ok_or_else(|| misuse(ArenaError::UnknownPointer(pointer)))?;
        if entry.held {
            log::debug!("sweep of the gesture arena for {pointer} deferred by a hold");
            entry.sweep_pending = true;
            return Ok(Vec::new());
        }
        let Some(entry) = self.entries.remove(&pointer) else {
            return Ok(Vec::new());
        };
        if let ArenaState::Resolved(_) = entry.state {
            return Ok(Vec::new());
        }
        let mut members = entry.members.into_iter();
        let Some(winner) = members.next() else {
            return Ok(Vec::new());
        };
        log::debug!("sweep: {winner} wins {pointer} as first member");
        let mut notes = Vec::from([ArenaNotification::accept(pointer, winner)]);
        notes.extend(members.map(|m| ArenaNotification::reject(pointer, m)));
        Ok(notes)
    }

    /// Abandons the sequence for `pointer` and destroys its arena.
    ///
    /// Nobody wins. Undecided members are rejected in registration order; a
    /// winner chosen earlier is not notified again. Holds do not defer this.
    ///
    /// # Errors
    ///
    /// Fails when no arena exists for `pointer`.
    pub fn cancel(&mut self, pointer: PointerId) -> Result<Vec<ArenaNotification>, ArenaError> {
        let entry = self
            .entries
            .remove(&pointer)
            .ok_or_else(|| misuse(ArenaError::UnknownPointer(pointer)))?;
        log::debug!("gesture arena for {pointer} cancelled");
        if let ArenaState::Resolved(_) = entry.state {
            return Ok(Vec::new());
        }
        Ok(entry
            .members
            .iter()
            .map(|m| ArenaNotification::reject(pointer, *m))
            .collect())
    }

    /// Removes `member` from every arena without notifying it.
    ///
    /// Used when a recognizer goes away. Remaining members are notified if
    /// its departure decides an arena.
    pub fn remove_member(&mut self, member: RecognizerId) -> Vec<ArenaNotification> {
        let mut pointers: Vec<PointerId> = self
            .entries
            .iter()
            .filter(|(_, e)| e.members.contains(&member))
            .map(|(p, _)| *p)
            .collect();
        pointers.sort_unstable();

        let mut notes = Vec::new();
        for pointer in pointers {
            let Some(entry) = self.entries.get_mut(&pointer) else {
                continue;
            };
            entry.members.retain(|m| *m != member);
            if entry.eager_winner == Some(member) {
                entry.eager_winner = None;
            }
            if entry.state == ArenaState::Closed {
                notes.extend(self.try_resolve(pointer));
            }
        }
        notes
    }

    fn try_resolve(&mut self, pointer: PointerId) -> Vec<ArenaNotification> {
        let Some(entry) = self.entries.get(&pointer) else {
            return Vec::new();
        };
        let (empty, winner) = match (entry.members.as_slice(), entry.eager_winner) {
            ([], _) => (true, None),
            ([solo], _) => (false, Some(*solo)),
            (_, eager) => (false, eager),
        };
        if empty {
            log::debug!("gesture arena for {pointer} is empty; destroyed");
            self.entries.remove(&pointer);
            return Vec::new();
        }
        winner.map_or_else(Vec::new, |winner| self.resolve_in_favor_of(pointer, winner))
    }

    fn resolve_in_favor_of(
        &mut self,
        pointer: PointerId,
        winner: RecognizerId,
    ) -> Vec<ArenaNotification> {
        let Some(entry) = self.entries.get_mut(&pointer) else {
            return Vec::new();
        };
        log::debug!("{winner} wins {pointer}");
        entry.state = ArenaState::Resolved(winner);
        entry.eager_winner = None;
        let mut notes: Vec<ArenaNotification> = entry
            .members
            .iter()
            .filter(|m| **m != winner)
            .map(|m| ArenaNotification::reject(pointer, *m))
            .collect();
        notes.push(ArenaNotification::accept(pointer, winner));
        entry.members.retain(|m| *m == winner);
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const P: PointerId = PointerId(5);
    const A: RecognizerId = RecognizerId(0);
    const B: RecognizerId = RecognizerId(1);
    const C: RecognizerId = RecognizerId(2);

    fn accept(member: RecognizerId) -> ArenaNotification {
        ArenaNotification::accept(P, member)
    }

    fn reject(member: RecognizerId) -> ArenaNotification {
        ArenaNotification::reject(P, member)
    }

    fn arena_with(members: &[RecognizerId]) -> GestureArena {
        let mut arena = GestureArena::new();
        for m in members {
            arena.add(P, *m).unwrap();
        }
        arena
    }

    #[test]
    fn solo_member_wins_on_close() {
        let mut arena = arena_with(&[A]);
        assert_eq!(arena.close(P).unwrap(), vec![accept(A)]);
        assert_eq!(arena.state(P), Some(ArenaState::Resolved(A)));
    }

    #[test]
    fn close_without_decision_leaves_arena_closed() {
        let mut arena = arena_with(&[A, B]);
        assert!(arena.close(P).unwrap().is_empty());
        assert_eq!(arena.state(P), Some(ArenaState::Closed));
        assert!(arena.close(P).unwrap().is_empty(), "closing twice is a no-op");
    }

    #[test]
    fn accept_while_closed_rejects_others_first() {
        let mut arena = arena_with(&[A, B, C]);
        arena.close(P).unwrap();
        let notes = arena.resolve(P, B, Disposition::Accepted).unwrap();
        assert_eq!(notes, vec![reject(A), reject(C), accept(B)]);
        assert_eq!(arena.members(P), Some(&[B][..]));
    }

    #[test]
    fn eager_accept_is_deferred_to_close() {
        let mut arena = arena_with(&[A, B]);
        assert!(arena.resolve(P, B, Disposition::Accepted).unwrap().is_empty());
        assert!(arena.resolve(P, A, Disposition::Accepted).unwrap().is_empty());
        assert_eq!(arena.state(P), Some(ArenaState::Open));
        assert_eq!(arena.close(P).unwrap(), vec![reject(A), accept(B)]);
    }

    #[test]
    fn last_member_standing_wins() {
        let mut arena = arena_with(&[A, B, C]);
        arena.close(P).unwrap();
        assert_eq!(arena.resolve(P, A, Disposition::Rejected).unwrap(), vec![reject(A)]);
        assert_eq!(
            arena.resolve(P, C, Disposition::Rejected).unwrap(),
            vec![reject(C), accept(B)]
        );
    }

    #[test]
    fn reject_while_open_does_not_resolve() {
        let mut arena = arena_with(&[A, B]);
        assert_eq!(arena.resolve(P, A, Disposition::Rejected).unwrap(), vec![reject(A)]);
        assert_eq!(arena.state(P), Some(ArenaState::Open));
        assert_eq!(arena.close(P).unwrap(), vec![accept(B)]);
    }

    #[test]
    fn closed_arena_without_members_is_destroyed() {
        let mut arena = arena_with(&[A]);
        arena.resolve(P, A, Disposition::Rejected).unwrap();
        assert!(arena.close(P).unwrap().is_empty());
        assert!(!arena.contains(P));
    }

    #[test]
    fn sweep_picks_first_member() {
        let mut arena = arena_with(&[A, B, C]);
        arena.close(P).unwrap();
        assert_eq!(arena.sweep(P).unwrap(), vec![accept(A), reject(B), reject(C)]);
        assert!(arena.is_empty());
    }

    #[test]
    fn sweep_after_resolution_only_destroys() {
        let mut arena = arena_with(&[A, B]);
        arena.close(P).unwrap();
        arena.resolve(P, B, Disposition::Accepted).unwrap();
        assert!(arena.sweep(P).unwrap().is_empty());
        assert!(!arena.contains(P));
    }

    #[test]
    fn hold_defers_sweep_until_release() {
        let mut arena = arena_with(&[A, B]);
        arena.close(P).unwrap();
        arena.hold(P).unwrap();
        assert!(arena.sweep(P).unwrap().is_empty());
        assert!(arena.contains(P));
        assert_eq!(arena.release(P).unwrap(), vec![accept(A), reject(B)]);
        assert!(!arena.contains(P));
    }

    #[test]
    fn cancel_rejects_everyone_and_ignores_holds() {
        let mut arena = arena_with(&[A, B, C]);
        arena.close(P).unwrap();
        arena.hold(P).unwrap();
        assert_eq!(arena.cancel(P).unwrap(), vec![reject(A), reject(B), reject(C)]);
        assert!(arena.is_empty());
        assert_eq!(arena.cancel(P), Err(ArenaError::UnknownPointer(P)));
    }

    #[test]
    fn cancel_after_resolution_leaves_the_winner_alone() {
        let mut arena = arena_with(&[A, B]);
        arena.close(P).unwrap();
        arena.resolve(P, B, Disposition::Accepted).unwrap();
        assert!(arena.cancel(P).unwrap().is_empty());
        assert!(!arena.contains(P));
    }

    #[test]
    fn release_without_pending_sweep_keeps_arena() {
        let mut arena = arena_with(&[A, B]);
        arena.hold(P).unwrap();
        assert!(arena.is_held(P));
        assert!(arena.release(P).unwrap().is_empty());
        assert!(!arena.is_held(P));
        assert!(arena.contains(P));
    }

    #[test]
    fn resolution_is_one_shot() {
        let mut arena = arena_with(&[A, B]);
        arena.close(P).unwrap();
        arena.resolve(P, A, Disposition::Accepted).unwrap();
        assert_eq!(
            arena.resolve(P, A, Disposition::Accepted),
            Err(ArenaError::AlreadyResolved(P))
        );
        assert_eq!(arena.add(P, C), Err(ArenaError::AlreadyResolved(P)));
    }

    #[test]
    fn misuse_is_reported() {
        let mut arena = arena_with(&[A]);
        assert_eq!(
            arena.add(P, A),
            Err(ArenaError::AlreadyMember { pointer: P, member: A })
        );
        assert_eq!(
            arena.resolve(P, B, Disposition::Rejected),
            Err(ArenaError::NotAMember { pointer: P, member: B })
        );
        let other = PointerId(9);
        assert_eq!(arena.close(other), Err(ArenaError::UnknownPointer(other)));
        assert_eq!(arena.sweep(other), Err(ArenaError::UnknownPointer(other)));

        arena.add(P, B).unwrap();
        arena.close(P).unwrap();
        assert_eq!(arena.add(P, C), Err(ArenaError::Closed(P)));
    }

    #[test]
    fn removing_a_member_can_decide_the_arena() {
        let mut arena = arena_with(&[A, B]);
        arena.close(P).unwrap();
        assert_eq!(arena.remove_member(A), vec![accept(B)]);
        assert!(arena.remove_member(C).is_empty());
    }

    #[test]
    fn removing_an_eager_winner_forgets_its_claim() {
        let mut arena = arena_with(&[A, B, C]);
        arena.resolve(P, A, Disposition::Accepted).unwrap();
        assert!(arena.remove_member(A).is_empty());
        assert!(arena.close(P).unwrap().is_empty());
        assert_eq!(arena.state(P), Some(ArenaState::Closed));
    }

    #[test]
    fn arenas_are_independent_per_pointer() {
        let mut arena = GestureArena::new();
        let q = PointerId(6);
        arena.add(P, A).unwrap();
        arena.add(q, A).unwrap();
        arena.add(q, B).unwrap();
        assert_eq!(arena.close(P).unwrap(), vec![accept(A)]);
        assert!(arena.close(q).unwrap().is_empty());
        assert_eq!(arena.len(), 2);
    }
}
