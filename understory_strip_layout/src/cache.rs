// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rank-indexed arena of icon bounds, reused across frames.

use alloc::vec::Vec;

use crate::{IconRect, VisibleIcon};

/// Bounds of the currently visible icons, stored by visible rank.
///
/// Each layout pass overwrites slot `k` with the bounds of the `k`-th visible icon.
/// Slots are never freed when fewer icons become visible; they are simply not
/// reported. The cache therefore distinguishes:
///
/// - [`capacity`](Self::capacity): slots allocated so far (the high-water mark), and
/// - [`active_count`](Self::active_count): slots written by the most recent pass.
///
/// Only the first `active_count` slots are ever exposed. Since visible icons are
/// contiguous, the icon index for rank `k` is [`first_index`](Self::first_index)` + k`.
///
/// ```rust
/// use understory_strip_layout::{PositionCache, StripMetrics, compute_visible_icons};
///
/// let metrics = StripMetrics::new(64, 8);
/// let mut cache = PositionCache::new();
/// assert_eq!(cache.iter().count(), 0);
///
/// cache.update(compute_visible_icons(&metrics, 5, 0, 200));
/// assert_eq!(cache.active_count(), 3);
///
/// // Scrolling to the end shows fewer icons but keeps the slots around.
/// cache.update(compute_visible_icons(&metrics, 5, 300, 200));
/// assert_eq!(cache.active_count(), 1);
/// assert_eq!(cache.capacity(), 3);
/// assert_eq!(cache.first_index(), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PositionCache {
    slots: Vec<IconRect>,
    active: usize,
    first_index: usize,
}

impl PositionCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            active: 0,
            first_index: 0,
        }
    }

    /// Records a layout pass, overwriting slots in place and appending new ones as needed.
    ///
    /// Returns the number of active slots. Icons are expected in increasing rank order
    /// starting at zero, as produced by [`compute_visible_icons`](crate::compute_visible_icons).
    pub fn update<I>(&mut self, icons: I) -> usize
    where
        I: IntoIterator<Item = VisibleIcon>,
    {
        let mut active = 0;
        for icon in icons {
            debug_assert_eq!(
                icon.rank, active,
                "visible icons must arrive in contiguous rank order"
            );
            if active == 0 {
                self.first_index = icon.index;
            }
            match self.slots.get_mut(active) {
                Some(slot) => slot.set(icon.rect),
                None => self.slots.push(icon.rect),
            }
            active += 1;
        }
        if active == 0 {
            self.first_index = 0;
        }
        self.active = active;
        active
    }

    /// Drops every slot. Used when the icon list is replaced, since rank-to-icon
    /// correspondence is meaningless across lists.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.active = 0;
        self.first_index = 0;
    }

    /// Number of icons written by the last pass.
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.active
    }

    /// Number of slots allocated so far.
    ///
    /// May exceed [`active_count`](Self::active_count); never iterate up to this bound.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the last pass produced no icons.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Index of the icon at rank zero, or `0` when nothing is visible.
    #[must_use]
    pub const fn first_index(&self) -> usize {
        self.first_index
    }

    /// Bounds of the icon at visible `rank`, if that rank is active.
    #[must_use]
    pub fn get(&self, rank: usize) -> Option<IconRect> {
        self.active_slots().get(rank).copied()
    }

    /// Iterates the active slots as `(icon index, bounds)` pairs in increasing index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, IconRect)> + '_ {
        let first = self.first_index;
        self.active_slots()
            .iter()
            .enumerate()
            .map(move |(rank, rect)| (first + rank, *rect))
    }

    fn active_slots(&self) -> &[IconRect] {
        &self.slots[..self.active]
    }
}
