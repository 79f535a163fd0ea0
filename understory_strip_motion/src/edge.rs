// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge notifications for an overscroll glow or bounce effect.

/// Which end of the strip was crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeSide {
    /// Scroll offset `0`.
    Start,
    /// Scroll offset `scroll_range`.
    End,
}

/// Receiver for edge hits, typically a platform glow effect.
///
/// The scroller calls [`absorb`](Self::absorb) once each time a drag or fling carries the
/// offset past a boundary. It owns no state for the effect and never reads anything back.
///
/// Closures implement this trait:
///
/// ```rust
/// use understory_strip_motion::{EdgeEffect, EdgeSide};
///
/// let mut hits = Vec::new();
/// let mut glow = |side: EdgeSide, velocity: f64| hits.push((side, velocity));
/// glow.absorb(EdgeSide::End, 1200.0);
/// assert_eq!(hits, [(EdgeSide::End, 1200.0)]);
/// ```
pub trait EdgeEffect {
    /// The offset crossed `side` while moving at `velocity` (pixels per second, non-negative).
    fn absorb(&mut self, side: EdgeSide, velocity: f64);
}

impl<F: FnMut(EdgeSide, f64)> EdgeEffect for F {
    fn absorb(&mut self, side: EdgeSide, velocity: f64) {
        self(side, velocity);
    }
}

/// An [`EdgeEffect`] that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEdgeEffect;

impl EdgeEffect for NoEdgeEffect {
    fn absorb(&mut self, _side: EdgeSide, _velocity: f64) {}
}
