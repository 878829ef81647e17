// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer identities and the raw events recognizers consume.

use core::fmt;

use kurbo::Point;

/// Identifies one pointer-down sequence (a finger, a mouse button press, a stylus contact).
///
/// The host assigns ids; an id is reused only after the previous sequence
/// with that id has ended with an up or cancel event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointerId(pub u64);

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pointer {}", self.0)
    }
}

/// What happened to the pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Contact started. Begins a sequence.
    Down,
    /// Contact moved.
    Move,
    /// Contact ended normally. Ends the sequence.
    Up,
    /// The host took the pointer away (e.g. the window lost focus). Ends the sequence.
    Cancel,
}

/// A raw pointer event in the coordinate space of the recognizers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// The sequence this event belongs to.
    pub pointer: PointerId,
    /// Event kind.
    pub kind: PointerEventKind,
    /// Pointer position.
    pub position: Point,
    /// Monotonic timestamp in milliseconds.
    pub time_ms: u64,
}

impl PointerEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(
        pointer: PointerId,
        kind: PointerEventKind,
        position: Point,
        time_ms: u64,
    ) -> Self {
        Self {
            pointer,
            kind,
            position,
            time_ms,
        }
    }

    /// A [`PointerEventKind::Down`] event.
    #[must_use]
    pub const fn down(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(pointer, PointerEventKind::Down, position, time_ms)
    }

    /// A [`PointerEventKind::Move`] event.
    #[must_use]
    pub const fn moved(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(pointer, PointerEventKind::Move, position, time_ms)
    }

    /// A [`PointerEventKind::Up`] event.
    #[must_use]
    pub const fn up(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(pointer, PointerEventKind::Up, position, time_ms)
    }

    /// A [`PointerEventKind::Cancel`] event.
    #[must_use]
    pub const fn cancel(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(pointer, PointerEventKind::Cancel, position, time_ms)
    }

    /// Whether this event ends its pointer sequence.
    #[must_use]
    pub fn ends_sequence(&self) -> bool {
        matches!(self.kind, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}
