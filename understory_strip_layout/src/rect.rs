// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer pixel rectangles for icon bounds.

use kurbo::Rect;

/// Axis-aligned icon bounds in whole pixels, in content coordinates.
///
/// `x0`/`y0` are inclusive and `x1`/`y1` exclusive, so an icon of size `s`
/// placed at `x` covers `x..x + s`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IconRect {
    /// Left edge.
    pub x0: i32,
    /// Top edge.
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl IconRect {
    /// An empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates a rectangle from its edges.
    #[must_use]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Creates a square of side `size` with its top-left corner at `(x, y)`.
    #[must_use]
    pub const fn square(x: i32, y: i32, size: i32) -> Self {
        Self::new(x, y, x.saturating_add(size), y.saturating_add(size))
    }

    /// Overwrites the edges of this rectangle without reallocating its owner.
    pub const fn set(&mut self, other: Self) {
        self.x0 = other.x0;
        self.y0 = other.y0;
        self.x1 = other.x1;
        self.y1 = other.y1;
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Returns `true` if this rectangle overlaps the half-open span `start..end` horizontally.
    #[must_use]
    pub const fn intersects_span(&self, start: i32, end: i32) -> bool {
        self.x0 < end && self.x1 > start
    }

    /// Returns this rectangle shifted left by `scroll_offset`, i.e. in viewport coordinates.
    #[must_use]
    pub const fn to_viewport(self, scroll_offset: i32) -> Self {
        Self::new(
            self.x0 - scroll_offset,
            self.y0,
            self.x1 - scroll_offset,
            self.y1,
        )
    }

    /// Converts to a [`kurbo::Rect`] for renderers working in floating point.
    #[must_use]
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x0),
            f64::from(self.y0),
            f64::from(self.x1),
            f64::from(self.y1),
        )
    }
}

impl From<IconRect> for Rect {
    fn from(rect: IconRect) -> Self {
        rect.to_rect()
    }
}

#[cfg(test)]
mod tests {
    use super::IconRect;
    use kurbo::Rect;

    #[test]
    fn square_and_extents() {
        let r = IconRect::square(72, 4, 64);
        assert_eq!(r, IconRect::new(72, 4, 136, 68));
        assert_eq!(r.width(), 64);
        assert_eq!(r.height(), 64);
    }

    #[test]
    fn span_intersection_is_half_open() {
        let r = IconRect::square(0, 0, 64);
        assert!(r.intersects_span(63, 100));
        assert!(!r.intersects_span(64, 100));
        assert!(!r.intersects_span(-10, 0));
    }

    #[test]
    fn viewport_and_kurbo_conversion() {
        let r = IconRect::square(144, 0, 64).to_viewport(100);
        assert_eq!(r, IconRect::new(44, 0, 108, 64));
        assert_eq!(Rect::from(r), Rect::new(44.0, 0.0, 108.0, 64.0));
    }
}
