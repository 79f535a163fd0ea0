// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events as delivered by the host.

use core::num::NonZeroU64;

use kurbo::Point;

/// Pointer identifier, stable for the lifetime of one touch.
pub type PointerId = NonZeroU64;

/// What happened to a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// The pointer touched down.
    Down,
    /// The pointer moved while down.
    Move,
    /// The pointer lifted.
    Up,
    /// The host took the gesture away (for example, a parent started scrolling).
    Cancel,
}

/// One pointer event, in strip-local coordinates.
///
/// Timestamps are in milliseconds on a monotonic clock shared with the frame
/// ticks passed to [`StripScroller::tick`](crate::StripScroller::tick).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Which pointer this event belongs to.
    pub pointer: PointerId,
    /// What happened.
    pub action: PointerAction,
    /// Pointer position. Only `x` drives horizontal scrolling.
    pub position: Point,
    /// Event time in milliseconds.
    pub time_ms: u64,
}

impl PointerEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(
        pointer: PointerId,
        action: PointerAction,
        position: Point,
        time_ms: u64,
    ) -> Self {
        Self {
            pointer,
            action,
            position,
            time_ms,
        }
    }

    /// A [`PointerAction::Down`] event.
    #[must_use]
    pub const fn down(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(pointer, PointerAction::Down, position, time_ms)
    }

    /// A [`PointerAction::Move`] event.
    #[must_use]
    pub const fn moved(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(pointer, PointerAction::Move, position, time_ms)
    }

    /// A [`PointerAction::Up`] event.
    #[must_use]
    pub const fn up(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(pointer, PointerAction::Up, position, time_ms)
    }

    /// A [`PointerAction::Cancel`] event.
    #[must_use]
    pub const fn cancel(pointer: PointerId, time_ms: u64) -> Self {
        Self::new(pointer, PointerAction::Cancel, Point::ZERO, time_ms)
    }
}
