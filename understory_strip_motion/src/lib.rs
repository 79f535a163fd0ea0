// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Strip Motion: touch scrolling for a one-dimensional strip.
//!
//! This crate turns raw pointer events and frame ticks into a scroll offset, with
//! Android-style touch behavior: a touch slop before dragging, rubber-band overscroll at
//! the ends, velocity-driven flings that bounce off the edges, and an edge signal for
//! glow effects. It knows nothing about what is being scrolled.
//!
//! The pieces are usable on their own:
//!
//! - [`VelocityTracker`]: least-squares velocity over a short, bounded sample window.
//! - [`FlingSimulator`]: a closed-form fling or spring-back trajectory, sampled by elapsed time.
//! - [`EdgeEffect`]: the receiver for boundary hits, implemented by any `FnMut(EdgeSide, f64)`.
//! - [`StripScroller`]: the gesture state machine that ties them together.
//!
//! ## Driving a scroller
//!
//! ```rust
//! use core::num::NonZeroU64;
//!
//! use kurbo::Point;
//! use understory_strip_motion::{
//!     EdgeSide, GestureOutcome, GesturePhase, PointerEvent, StripScroller,
//! };
//!
//! let finger = NonZeroU64::new(1).unwrap();
//! let mut scroller = StripScroller::default();
//! scroller.set_scroll_range(152);
//! let mut edge_hits = Vec::new();
//! let mut glow = |side: EdgeSide, velocity: f64| edge_hits.push((side, velocity));
//!
//! // A quick swipe to the left.
//! scroller.handle(PointerEvent::down(finger, Point::new(300.0, 0.0), 0), &mut glow);
//! scroller.handle(PointerEvent::moved(finger, Point::new(260.0, 0.0), 10), &mut glow);
//! scroller.handle(PointerEvent::moved(finger, Point::new(220.0, 0.0), 20), &mut glow);
//! let outcome = scroller.handle(PointerEvent::up(finger, Point::new(180.0, 0.0), 30), &mut glow);
//! assert!(matches!(outcome, GestureOutcome::Fling { .. }));
//!
//! // One tick per frame until the fling comes to rest.
//! let mut now = 30;
//! while scroller.tick(now, &mut glow) {
//!     now += 16;
//! }
//! assert_eq!(scroller.phase(), GesturePhase::Idle);
//! assert_eq!(scroller.offset(), 152);
//! assert_eq!(edge_hits.len(), 1);
//! assert_eq!(edge_hits[0].0, EdgeSide::End);
//! ```
//!
//! Timestamps are caller-supplied milliseconds on one monotonic clock, so every
//! trajectory is reproducible in tests.
//!
//! ## Features
//!
//! - `std` (default): float math from `std`.
//! - `libm`: float math from `libm` for `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("understory_strip_motion requires either the `std` or `libm` feature");

mod edge;
mod float;
mod fling;
mod pointer;
mod scroller;
mod velocity;

pub use edge::{EdgeEffect, EdgeSide, NoEdgeEffect};
pub use fling::{EdgeCrossing, FlingConfig, FlingPhase, FlingSample, FlingSimulator};
pub use pointer::{PointerAction, PointerEvent, PointerId};
pub use scroller::{
    GestureOutcome, GesturePhase, OverscrollMode, ScrollerConfig, StripScroller,
};
pub use velocity::{VelocityLimits, VelocityTracker};
