// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Strip Layout: viewport culling for a horizontal strip of uniform icons.
//!
//! This crate is the geometry half of a scrollable icon strip. It is renderer-agnostic
//! and works in whole pixels, with content coordinates that start at the strip's left
//! edge (a scroll offset of `0`).
//!
//! The core concepts are:
//!
//! - [`StripMetrics`]: icon size, spacing, and [`Padding`], plus the derived pitch,
//!   content extent, and scroll range.
//! - [`compute_visible_icons`]: a non-allocating walk that yields the [`VisibleIcon`]s
//!   intersecting a viewport, each tagged with its index and visible rank.
//! - [`PositionCache`]: a rank-indexed arena of [`IconRect`]s that a layout pass
//!   overwrites in place, so steady-state scrolling allocates nothing.
//! - [`measure`]: resolves host [`MeasureSpec`] constraints to a size and scroll range.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_strip_layout::{PositionCache, StripMetrics, compute_visible_icons};
//!
//! // Five 64px icons, 8px apart. A 200px viewport can scroll 152px.
//! let metrics = StripMetrics::new(64, 8);
//! assert_eq!(metrics.scroll_range(5, 200), 152);
//!
//! let mut cache = PositionCache::new();
//! cache.update(compute_visible_icons(&metrics, 5, 100, 150));
//!
//! // In a 150px viewport scrolled to 100, icons 1..=3 intersect 100..250.
//! let visible: Vec<usize> = cache.iter().map(|(index, _)| index).collect();
//! assert_eq!(visible, [1, 2, 3]);
//! ```
//!
//! Host frameworks are responsible for drawing: after a pass, iterate
//! [`PositionCache::iter`] and draw icon `index` into its rectangle, shifted by the
//! scroll offset (see [`IconRect::to_viewport`]).
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds of `kurbo` using `libm`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod layout;
mod measure;
mod metrics;
mod rect;

pub use cache::PositionCache;
pub use layout::{VisibleIcon, VisibleIcons, compute_visible_icons};
pub use measure::{MeasureSpec, Measured, measure};
pub use metrics::{Padding, StripMetrics};
pub use rect::IconRect;
