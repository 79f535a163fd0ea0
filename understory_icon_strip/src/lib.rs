// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Icon Strip: a horizontally scrollable row of fixed-size icons.
//!
//! [`IconStrip`] combines the viewport culling of [`understory_strip_layout`] with the
//! touch scrolling of [`understory_strip_motion`] into a widget core that any view system
//! can host. It owns the icon list, scroll state, and a position cache. The host owns
//! everything else:
//!
//! - pointer delivery, through [`IconStrip::handle_pointer`];
//! - the frame clock, through [`IconStrip::tick`];
//! - measurement, through [`IconStrip::measure`];
//! - painting, by iterating [`IconStrip::draw`];
//! - scheduling, by implementing [`StripHost`];
//! - edge glow, by implementing [`EdgeEffect`].
//!
//! ## Example
//!
//! ```rust
//! use core::num::NonZeroU64;
//!
//! use kurbo::Point;
//! use understory_icon_strip::{
//!     IconStrip, Invalidation, MeasureSpec, NoEdgeEffect, PointerEvent, StripConfig,
//!     StripMetrics,
//! };
//!
//! let config = StripConfig::new(StripMetrics::new(64, 8));
//! let mut strip = IconStrip::new(config, Invalidation::empty(), NoEdgeEffect);
//! strip.set_icons(Some(vec!["mail", "maps", "music", "notes", "photos"]));
//! assert!(strip.host().contains(Invalidation::REMEASURE));
//!
//! let size = strip.measure(MeasureSpec::Exactly(200), MeasureSpec::Unspecified);
//! assert_eq!((size.width, size.height), (200.0, 64.0));
//! assert_eq!(strip.scroll_range(), 152);
//!
//! let names: Vec<&str> = strip.draw().map(|item| *item.icon).collect();
//! assert_eq!(names, ["mail", "maps", "music"]);
//!
//! // Drag 50px to the left; the first 8px are touch slop.
//! let finger = NonZeroU64::new(1).unwrap();
//! strip.handle_pointer(PointerEvent::down(finger, Point::new(150.0, 20.0), 0));
//! strip.handle_pointer(PointerEvent::moved(finger, Point::new(100.0, 20.0), 16));
//! assert_eq!(strip.scroll_offset(), 42);
//!
//! let offset = strip.scroll_offset();
//! let first = strip.draw().next().unwrap();
//! assert_eq!(first.index, 0);
//! assert_eq!(first.viewport_rect(offset).x0, -42);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in the layout and motion crates.
//! - `libm`: `no_std` float math via `libm`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod host;
mod strip;

pub use config::StripConfig;
pub use host::{Invalidation, StripHost};
pub use strip::{IconStrip, RenderItem};

pub use understory_strip_layout::{IconRect, MeasureSpec, Measured, Padding, StripMetrics};
pub use understory_strip_motion::{
    EdgeEffect, EdgeSide, GesturePhase, NoEdgeEffect, OverscrollMode, PointerAction,
    PointerEvent, PointerId, ScrollerConfig,
};
