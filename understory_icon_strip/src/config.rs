// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strip configuration.

use understory_strip_layout::StripMetrics;
use understory_strip_motion::ScrollerConfig;

/// Everything needed to build an [`IconStrip`](crate::IconStrip).
///
/// The defaults are 48px icons 8px apart with no padding, and the default touch
/// behavior of [`ScrollerConfig`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StripConfig {
    /// Icon geometry.
    pub metrics: StripMetrics,
    /// Touch, fling, and overscroll tunables.
    pub scroller: ScrollerConfig,
}

impl StripConfig {
    /// Creates a configuration with the given geometry and default touch behavior.
    #[must_use]
    pub fn new(metrics: StripMetrics) -> Self {
        Self {
            metrics,
            scroller: ScrollerConfig::default(),
        }
    }

    /// Returns this configuration with different touch behavior.
    #[must_use]
    pub fn with_scroller(mut self, scroller: ScrollerConfig) -> Self {
        self.scroller = scroller;
        self
    }
}
