// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform strip geometry: icon size, spacing, and padding.

use crate::IconRect;

/// Padding around the strip content, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Padding {
    /// Space before the first icon.
    pub start: i32,
    /// Space above the icons.
    pub top: i32,
    /// Space after the last icon.
    pub end: i32,
    /// Space below the icons.
    pub bottom: i32,
}

impl Padding {
    /// No padding on any side.
    pub const ZERO: Self = Self::uniform(0);

    /// The same padding on every side.
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self {
            start: value,
            top: value,
            end: value,
            bottom: value,
        }
    }

    fn sanitized(self) -> Self {
        Self {
            start: self.start.max(0),
            top: self.top.max(0),
            end: self.end.max(0),
            bottom: self.bottom.max(0),
        }
    }
}

/// Geometry shared by every icon in a strip.
///
/// Icons are uniform: each one is an `icon_size` square, and consecutive icons are
/// separated by `spacing`. The distance between the starts of two neighbors is the
/// [`pitch`](Self::pitch).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripMetrics {
    icon_size: i32,
    spacing: i32,
    padding: Padding,
}

impl StripMetrics {
    /// Creates metrics for icons of `icon_size` separated by `spacing`, with no padding.
    ///
    /// Negative values are clamped to zero.
    #[must_use]
    pub fn new(icon_size: i32, spacing: i32) -> Self {
        Self {
            icon_size: icon_size.max(0),
            spacing: spacing.max(0),
            padding: Padding::ZERO,
        }
    }

    /// Returns these metrics with the given padding (negative sides clamped to zero).
    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding.sanitized();
        self
    }

    /// Side length of each icon.
    #[must_use]
    pub const fn icon_size(&self) -> i32 {
        self.icon_size
    }

    /// Gap between neighboring icons.
    #[must_use]
    pub const fn spacing(&self) -> i32 {
        self.spacing
    }

    /// Padding around the content.
    #[must_use]
    pub const fn padding(&self) -> Padding {
        self.padding
    }

    /// Horizontal footprint of one icon: `icon_size + spacing`.
    #[must_use]
    pub const fn pitch(&self) -> i32 {
        self.icon_size.saturating_add(self.spacing)
    }

    /// Left edge of the icon at `index`, in content coordinates.
    #[must_use]
    pub fn icon_start(&self, index: usize) -> i32 {
        self.padding
            .start
            .saturating_add(count_to_i32(index).saturating_mul(self.pitch()))
    }

    /// Bounds of the icon at `index`, in content coordinates.
    #[must_use]
    pub fn icon_rect(&self, index: usize) -> IconRect {
        IconRect::square(self.icon_start(index), self.padding.top, self.icon_size)
    }

    /// Total width of `icon_count` icons including spacing and horizontal padding.
    ///
    /// Spacing only sits *between* icons, so zero or one icon contributes no spacing.
    #[must_use]
    pub fn content_extent(&self, icon_count: usize) -> i32 {
        let icons = count_to_i32(icon_count).saturating_mul(self.icon_size);
        let gaps = count_to_i32(icon_count.saturating_sub(1)).saturating_mul(self.spacing);
        icons
            .saturating_add(gaps)
            .saturating_add(self.padding.start)
            .saturating_add(self.padding.end)
    }

    /// Height of the content: one icon plus vertical padding.
    #[must_use]
    pub const fn content_height(&self) -> i32 {
        self.icon_size
            .saturating_add(self.padding.top)
            .saturating_add(self.padding.bottom)
    }

    /// How far the strip can scroll when `icon_count` icons are shown in `viewport_width`.
    ///
    /// This is `max(0, content_extent - viewport_width)`.
    #[must_use]
    pub fn scroll_range(&self, icon_count: usize, viewport_width: i32) -> i32 {
        scroll_range_for(self.content_extent(icon_count), viewport_width)
    }
}

impl Default for StripMetrics {
    fn default() -> Self {
        Self::new(48, 8)
    }
}

pub(crate) fn scroll_range_for(content_extent: i32, viewport_width: i32) -> i32 {
    content_extent.saturating_sub(viewport_width.max(0)).max(0)
}

fn count_to_i32(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{Padding, StripMetrics};
    use crate::{IconRect, compute_visible_icons};

    #[test]
    fn extent_and_range_follow_uniform_pitch() {
        let metrics = StripMetrics::new(64, 8);
        assert_eq!(metrics.pitch(), 72);
        assert_eq!(metrics.content_extent(5), 352);
        assert_eq!(metrics.scroll_range(5, 200), 152);
        assert_eq!(metrics.scroll_range(5, 400), 0);
    }

    #[test]
    fn zero_and_one_icon_have_no_spacing() {
        let metrics = StripMetrics::new(64, 8);
        assert_eq!(metrics.content_extent(0), 0);
        assert_eq!(metrics.scroll_range(0, 10), 0);
        assert_eq!(metrics.content_extent(1), 64);
        assert_eq!(metrics.scroll_range(1, 40), 24);
        assert_eq!(metrics.scroll_range(1, 100), 0);
    }

    #[test]
    fn padding_shifts_icons_and_grows_extent() {
        let metrics = StripMetrics::new(10, 2).with_padding(Padding {
            start: 5,
            top: 3,
            end: 7,
            bottom: 1,
        });
        assert_eq!(metrics.icon_start(0), 5);
        assert_eq!(metrics.icon_rect(2), IconRect::new(29, 3, 39, 13));
        assert_eq!(metrics.content_extent(3), 5 + 30 + 4 + 7);
        assert_eq!(metrics.content_height(), 14);
    }

    #[test]
    fn negative_inputs_are_clamped_to_zero() {
        let metrics = StripMetrics::new(-4, -1).with_padding(Padding::uniform(-3));
        assert_eq!(metrics.icon_size(), 0);
        assert_eq!(metrics.spacing(), 0);
        assert_eq!(metrics.padding(), Padding::ZERO);
        assert_eq!(metrics.scroll_range(10, -5), 0);
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let metrics = StripMetrics::new(1 << 20, 1 << 20);
        assert_eq!(metrics.content_extent(usize::MAX), i32::MAX);
    }

    #[test]
    fn oversized_icons_clamp_their_far_edge() {
        let metrics = StripMetrics::new(i32::MAX, 0).with_padding(Padding {
            start: 1,
            top: 1,
            ..Padding::ZERO
        });
        assert_eq!(metrics.icon_rect(0), IconRect::new(1, 1, i32::MAX, i32::MAX));
        assert_eq!(compute_visible_icons(&metrics, 1, 0, 10).count(), 1);
    }
}
