// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between a strip and the view system hosting it.

bitflags::bitflags! {
    /// Work the host must schedule after a change to the strip.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// Pixels changed; draw again.
        const REDRAW    = 0b0000_0001;
        /// Size or scroll range may have changed; measure, then draw.
        const REMEASURE = 0b0000_0010;
    }
}

impl Default for Invalidation {
    fn default() -> Self {
        Self::empty()
    }
}

/// Callbacks into the hosting view system.
///
/// The strip calls these as it changes; it never measures or draws on its own. Requests
/// may be coalesced freely by the host.
pub trait StripHost {
    /// The strip's pixels are stale.
    fn request_redraw(&mut self);
    /// The strip's size or scroll range may be stale.
    fn request_remeasure(&mut self);
}

/// Accumulates requests as flags, for hosts that poll after each call.
///
/// ```rust
/// use understory_icon_strip::{Invalidation, StripHost};
///
/// let mut pending = Invalidation::empty();
/// pending.request_redraw();
/// assert_eq!(pending, Invalidation::REDRAW);
/// ```
impl StripHost for Invalidation {
    fn request_redraw(&mut self) {
        self.insert(Self::REDRAW);
    }

    fn request_remeasure(&mut self) {
        self.insert(Self::REMEASURE);
    }
}

impl<H: StripHost + ?Sized> StripHost for &mut H {
    fn request_redraw(&mut self) {
        (**self).request_redraw();
    }

    fn request_remeasure(&mut self) {
        (**self).request_remeasure();
    }
}
