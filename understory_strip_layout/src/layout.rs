// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewport-culling walk over a uniform strip.

use crate::{IconRect, StripMetrics};

/// An icon that intersects the viewport during one layout pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleIcon {
    /// Index in the full icon list.
    pub index: usize,
    /// Position among the visible icons of this pass, starting at zero.
    pub rank: usize,
    /// Bounds in content coordinates.
    pub rect: IconRect,
}

/// Lazy walk over the icons intersecting a viewport, in increasing index order.
///
/// Created by [`compute_visible_icons`]. The walk does not allocate, so it can run
/// every frame of a fling. Icons entirely before the viewport are skipped and
/// counted; the walk stops at the first icon starting at or after the right edge.
///
/// The early stop relies on icon starts increasing monotonically, which holds
/// because every icon shares the same size and spacing. Variable-width icons
/// would need a different termination rule.
#[derive(Clone, Debug)]
pub struct VisibleIcons {
    metrics: StripMetrics,
    icon_count: usize,
    left_edge: i32,
    right_edge: i32,
    next: usize,
    skipped: usize,
    emitted: usize,
    done: bool,
}

impl VisibleIcons {
    /// Number of icons skipped so far because they end before the left edge.
    ///
    /// Once at least one icon has been emitted this equals the index of the
    /// first visible icon, so `index == skipped + rank` for every emitted icon.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of icons emitted so far.
    #[must_use]
    pub const fn emitted(&self) -> usize {
        self.emitted
    }
}

impl Iterator for VisibleIcons {
    type Item = VisibleIcon;

    fn next(&mut self) -> Option<VisibleIcon> {
        while !self.done && self.next < self.icon_count {
            let index = self.next;
            let rect = self.metrics.icon_rect(index);
            self.next += 1;

            if rect.x1 <= self.left_edge {
                self.skipped += 1;
                continue;
            }
            if rect.x0 >= self.right_edge {
                self.done = true;
                break;
            }

            let rank = index - self.skipped;
            self.emitted += 1;
            return Some(VisibleIcon { index, rank, rect });
        }
        self.done = true;
        None
    }
}

impl core::iter::FusedIterator for VisibleIcons {}

/// Starts a layout pass for a strip scrolled to `scroll_offset` and shown in `viewport_width`.
///
/// The viewport covers content `scroll_offset..scroll_offset + viewport_width`. An icon is
/// visible when its horizontal span `start..start + icon_size` overlaps that range.
/// A non-positive `viewport_width` yields no icons.
///
/// ```rust
/// use understory_strip_layout::{StripMetrics, compute_visible_icons};
///
/// let metrics = StripMetrics::new(64, 8);
/// let visible: Vec<usize> = compute_visible_icons(&metrics, 5, 0, 200)
///     .map(|icon| icon.index)
///     .collect();
/// assert_eq!(visible, [0, 1, 2]);
/// ```
#[must_use]
pub fn compute_visible_icons(
    metrics: &StripMetrics,
    icon_count: usize,
    scroll_offset: i32,
    viewport_width: i32,
) -> VisibleIcons {
    VisibleIcons {
        metrics: *metrics,
        icon_count,
        left_edge: scroll_offset,
        right_edge: scroll_offset.saturating_add(viewport_width.max(0)),
        next: 0,
        skipped: 0,
        emitted: 0,
        done: viewport_width <= 0,
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{VisibleIcon, compute_visible_icons};
    use crate::{IconRect, Padding, StripMetrics};

    fn indices(metrics: &StripMetrics, count: usize, offset: i32, width: i32) -> Vec<usize> {
        compute_visible_icons(metrics, count, offset, width)
            .map(|icon| icon.index)
            .collect()
    }

    #[test]
    fn worked_example_at_origin() {
        // Starts are 0, 72, 144, 216, 288. Index 3 starts past the right edge (200).
        let metrics = StripMetrics::new(64, 8);
        let icons: Vec<VisibleIcon> = compute_visible_icons(&metrics, 5, 0, 200).collect();
        assert_eq!(icons.len(), 3);
        assert_eq!(icons[2].index, 2);
        assert_eq!(icons[2].rank, 2);
        assert_eq!(icons[2].rect, IconRect::new(144, 0, 208, 64));
        assert_eq!(metrics.scroll_range(5, 200), 152);
    }

    #[test]
    fn scrolled_walk_reports_ranks_and_skips() {
        let metrics = StripMetrics::new(64, 8);
        let mut walk = compute_visible_icons(&metrics, 5, 152, 200);
        let icons: Vec<VisibleIcon> = walk.by_ref().collect();
        // Viewport 152..352: index 2 (144..208) onwards.
        assert_eq!(
            icons.iter().map(|i| (i.index, i.rank)).collect::<Vec<_>>(),
            [(2, 0), (3, 1), (4, 2)]
        );
        assert_eq!(walk.skipped(), 2);
        assert_eq!(walk.emitted(), 3);
    }

    #[test]
    fn touching_edges_are_not_visible() {
        let metrics = StripMetrics::new(64, 8);
        // Icon 0 ends exactly at 64; icon 1 starts at 72 == right edge.
        assert_eq!(indices(&metrics, 5, 64, 8), Vec::<usize>::new());
        assert_eq!(indices(&metrics, 5, 63, 9), [0]);
        assert_eq!(indices(&metrics, 5, 64, 9), [1]);
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        let metrics = StripMetrics::new(64, 8);
        assert!(indices(&metrics, 0, 0, 200).is_empty());
        assert!(indices(&metrics, 5, 0, 0).is_empty());
        assert!(indices(&metrics, 5, 0, -10).is_empty());
    }

    #[test]
    fn overscrolled_offsets_still_cull_correctly() {
        let metrics = StripMetrics::new(64, 8);
        // Pulled 30px past the start: viewport -30..170.
        assert_eq!(indices(&metrics, 5, -30, 200), [0, 1, 2]);
        // Pulled past the end: viewport 400..600 sees nothing.
        assert!(indices(&metrics, 5, 400, 200).is_empty());
    }

    #[test]
    fn padding_offsets_the_walk() {
        let metrics = StripMetrics::new(10, 0).with_padding(Padding {
            start: 20,
            top: 4,
            ..Padding::ZERO
        });
        let icons: Vec<VisibleIcon> = compute_visible_icons(&metrics, 10, 0, 35).collect();
        assert_eq!(icons.len(), 2);
        assert_eq!(icons[0].rect, IconRect::new(20, 4, 30, 14));
        assert_eq!(icons[1].rect, IconRect::new(30, 4, 40, 14));
    }

    #[test]
    fn visible_set_matches_brute_force_intersection() {
        let metrics = StripMetrics::new(17, 5).with_padding(Padding {
            start: 3,
            end: 9,
            ..Padding::ZERO
        });
        let count = 23;
        for width in [1, 16, 17, 40, 97] {
            for offset in (-40..500).step_by(7) {
                let expected: Vec<usize> = (0..count)
                    .filter(|&i| metrics.icon_rect(i).intersects_span(offset, offset + width))
                    .collect();
                assert_eq!(
                    indices(&metrics, count, offset, width),
                    expected,
                    "offset {offset}, width {width}"
                );
            }
        }
    }
}
