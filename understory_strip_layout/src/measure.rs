// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size negotiation with a host layout system.

use crate::StripMetrics;
use crate::metrics::scroll_range_for;

/// A size constraint offered by the host for one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The host dictates this exact size.
    Exactly(i32),
    /// The strip may be as large as it wants, up to this size.
    AtMost(i32),
    /// No constraint; the strip reports its natural size.
    #[default]
    Unspecified,
}

impl MeasureSpec {
    /// Resolves a natural `desired` size against this constraint.
    ///
    /// Negative sizes (from the host or `desired`) resolve to zero.
    #[must_use]
    pub fn resolve(self, desired: i32) -> i32 {
        let desired = desired.max(0);
        match self {
            Self::Exactly(size) => size.max(0),
            Self::AtMost(size) => desired.min(size.max(0)),
            Self::Unspecified => desired,
        }
    }
}

/// Result of measuring a strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Measured {
    /// Width granted to the strip, which is also its viewport width.
    pub width: i32,
    /// Height granted to the strip.
    pub height: i32,
    /// Natural content width (icons, spacing, and horizontal padding).
    pub content_extent: i32,
    /// How far the strip can scroll within `width`.
    pub scroll_range: i32,
}

impl Measured {
    /// Returns the granted size as a [`kurbo::Size`].
    #[must_use]
    pub fn size(&self) -> kurbo::Size {
        kurbo::Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Measures a strip of `icon_count` icons under the host's constraints.
///
/// The height is one icon plus vertical padding. The width is the full content extent
/// unless the host constrains it. The scroll range falls out of the width computation
/// and must be applied before the next layout pass.
///
/// ```rust
/// use understory_strip_layout::{MeasureSpec, StripMetrics, measure};
///
/// let metrics = StripMetrics::new(64, 8);
/// let measured = measure(&metrics, 5, MeasureSpec::AtMost(200), MeasureSpec::Unspecified);
/// assert_eq!((measured.width, measured.height), (200, 64));
/// assert_eq!(measured.scroll_range, 152);
/// ```
#[must_use]
pub fn measure(
    metrics: &StripMetrics,
    icon_count: usize,
    width_spec: MeasureSpec,
    height_spec: MeasureSpec,
) -> Measured {
    let content_extent = metrics.content_extent(icon_count);
    let width = width_spec.resolve(content_extent);
    let height = height_spec.resolve(metrics.content_height());
    Measured {
        width,
        height,
        content_extent,
        scroll_range: scroll_range_for(content_extent, width),
    }
}

#[cfg(test)]
mod tests {
    use super::{MeasureSpec, measure};
    use crate::{Padding, StripMetrics};

    #[test]
    fn unconstrained_width_fits_content() {
        let metrics = StripMetrics::new(64, 8);
        let m = measure(&metrics, 5, MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        assert_eq!(m.width, 352);
        assert_eq!(m.scroll_range, 0);
    }

    #[test]
    fn exact_width_wins_even_when_larger() {
        let metrics = StripMetrics::new(64, 8);
        let m = measure(&metrics, 2, MeasureSpec::Exactly(500), MeasureSpec::Exactly(10));
        assert_eq!((m.width, m.height), (500, 10));
        assert_eq!(m.scroll_range, 0);

        let m = measure(&metrics, 5, MeasureSpec::Exactly(100), MeasureSpec::Unspecified);
        assert_eq!(m.scroll_range, 252);
    }

    #[test]
    fn at_most_caps_both_axes() {
        let metrics = StripMetrics::new(64, 8).with_padding(Padding {
            top: 8,
            bottom: 8,
            ..Padding::ZERO
        });
        let m = measure(&metrics, 1, MeasureSpec::AtMost(500), MeasureSpec::AtMost(70));
        assert_eq!((m.width, m.height), (64, 70));

        let m = measure(&metrics, 1, MeasureSpec::AtMost(500), MeasureSpec::AtMost(100));
        assert_eq!(m.height, 80);
    }

    #[test]
    fn degenerate_constraints_produce_zero_size() {
        let metrics = StripMetrics::new(64, 8);
        let m = measure(&metrics, 5, MeasureSpec::Exactly(-20), MeasureSpec::AtMost(0));
        assert_eq!((m.width, m.height), (0, 0));
        assert_eq!(m.scroll_range, 352);

        let m = measure(&metrics, 0, MeasureSpec::AtMost(300), MeasureSpec::Unspecified);
        assert_eq!((m.width, m.scroll_range), (0, 0));
    }
}
