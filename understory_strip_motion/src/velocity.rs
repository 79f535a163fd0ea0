// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer velocity estimation from a short window of samples.

use smallvec::SmallVec;

use crate::float;

/// Maximum number of samples kept.
const HISTORY_LEN: usize = 20;
/// Samples older than this, relative to the newest one, are ignored.
const HORIZON_MS: u64 = 100;
/// A gap this long between samples means the pointer stopped; older samples are ignored.
const ASSUME_STOPPED_MS: u64 = 40;

/// Bounds applied to a release velocity before it may start a fling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityLimits {
    /// Speeds below this (pixels per second) count as no velocity at all.
    pub min: f64,
    /// Speeds above this (pixels per second) are clamped down to it.
    pub max: f64,
}

impl VelocityLimits {
    /// Creates limits, sanitizing so that `0 <= min <= max`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_finite() { min.max(0.0) } else { 0.0 };
        let max = if max.is_finite() { max.max(min) } else { min };
        Self { min, max }
    }

    /// Applies the limits to a signed velocity.
    ///
    /// Returns `0.0` when `|velocity| < min` (or the input is not finite), otherwise the
    /// velocity with its magnitude clamped to `max`.
    #[must_use]
    pub fn apply(&self, velocity: f64) -> f64 {
        if !velocity.is_finite() || float::abs(velocity) < self.min {
            return 0.0;
        }
        velocity.clamp(-self.max, self.max)
    }
}

impl Default for VelocityLimits {
    /// 50 px/s minimum and 8000 px/s maximum.
    fn default() -> Self {
        Self::new(50.0, 8000.0)
    }
}

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: u64,
    x: f64,
}

/// Estimates horizontal pointer velocity from recent samples.
///
/// Feed one sample per pointer event with [`add_sample`](Self::add_sample). The
/// [`estimate`](Self::estimate) is the slope of a least-squares line through the samples
/// of the last 100 ms, stopping at any pause longer than 40 ms. With only two samples in
/// the window this is plain displacement over time.
///
/// ```rust
/// use understory_strip_motion::VelocityTracker;
///
/// let mut tracker = VelocityTracker::new();
/// tracker.add_sample(0, 100.0);
/// tracker.add_sample(10, 90.0);
/// tracker.add_sample(20, 80.0);
/// // Moving left at 10px every 10ms.
/// assert!((tracker.estimate() + 1000.0).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[Sample; HISTORY_LEN]>,
}

impl VelocityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: SmallVec::new(),
        }
    }

    /// Forgets every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of samples currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if no samples are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Records the pointer at `x` at time `time_ms`.
    ///
    /// A timestamp earlier than the newest sample starts a fresh window. Non-finite
    /// positions are dropped.
    pub fn add_sample(&mut self, time_ms: u64, x: f64) {
        debug_assert!(x.is_finite(), "pointer positions must be finite; got {x}");
        if !x.is_finite() {
            return;
        }
        if self.samples.last().is_some_and(|last| time_ms < last.time_ms) {
            self.samples.clear();
        }
        if self.samples.len() == HISTORY_LEN {
            self.samples.remove(0);
        }
        self.samples.push(Sample { time_ms, x });
    }

    /// Current velocity estimate in pixels per second (positive means moving right).
    ///
    /// Returns `0.0` when fewer than two usable samples are available.
    #[must_use]
    pub fn estimate(&self) -> f64 {
        let Some(newest) = self.samples.last().copied() else {
            return 0.0;
        };

        let mut first = self.samples.len() - 1;
        let mut previous_time = newest.time_ms;
        while first > 0 {
            let candidate = self.samples[first - 1];
            if newest.time_ms - candidate.time_ms > HORIZON_MS
                || previous_time - candidate.time_ms > ASSUME_STOPPED_MS
            {
                break;
            }
            previous_time = candidate.time_ms;
            first -= 1;
        }

        let window = &self.samples[first..];
        if window.len() < 2 {
            return 0.0;
        }

        // Fit x = a + b·t with t in seconds relative to the newest sample.
        let secs = |s: &Sample| -((newest.time_ms - s.time_ms) as f64) / 1000.0;
        let n = window.len() as f64;
        let mean_t = window.iter().map(secs).sum::<f64>() / n;
        let mean_x = window.iter().map(|s| s.x).sum::<f64>() / n;
        let mut covariance = 0.0;
        let mut variance = 0.0;
        for sample in window {
            let dt = secs(sample) - mean_t;
            covariance += dt * (sample.x - mean_x);
            variance += dt * dt;
        }
        if variance <= f64::EPSILON {
            return 0.0;
        }
        covariance / variance
    }

    /// The estimate passed through `limits`: the velocity a release should fling with.
    #[must_use]
    pub fn release_velocity(&self, limits: &VelocityLimits) -> f64 {
        limits.apply(self.estimate())
    }
}

#[cfg(test)]
mod tests {
    use super::{VelocityLimits, VelocityTracker};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn empty_and_single_sample_have_no_velocity() {
        let mut tracker = VelocityTracker::new();
        assert_eq!(tracker.estimate(), 0.0);
        tracker.add_sample(5, 10.0);
        assert_eq!(tracker.estimate(), 0.0);
    }

    #[test]
    fn two_samples_give_delta_over_time() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(100, 0.0);
        tracker.add_sample(116, 32.0);
        assert!(approx(tracker.estimate(), 2000.0));
    }

    #[test]
    fn least_squares_smooths_jitter() {
        let mut tracker = VelocityTracker::new();
        // Nominal 1 px/ms with alternating ±1px noise.
        for (i, noise) in [0.0, 1.0, -1.0, 1.0, -1.0, 0.0].into_iter().enumerate() {
            let t = i as u64 * 10;
            tracker.add_sample(t, t as f64 + noise);
        }
        let v = tracker.estimate();
        assert!((v - 1000.0).abs() < 100.0, "estimate {v}");
    }

    #[test]
    fn samples_outside_horizon_are_ignored() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0, 0.0);
        tracker.add_sample(10, 500.0);
        // Slow, steady motion within the last 100ms.
        for t in (80..=160).step_by(10) {
            tracker.add_sample(t, t as f64);
        }
        assert!(approx(tracker.estimate(), 1000.0));
    }

    #[test]
    fn pause_before_release_kills_velocity() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0, 0.0);
        tracker.add_sample(10, 20.0);
        tracker.add_sample(20, 40.0);
        // Held still for 60ms, then lifted.
        tracker.add_sample(80, 40.0);
        assert_eq!(tracker.estimate(), 0.0);
    }

    #[test]
    fn history_is_bounded_and_time_travel_resets() {
        let mut tracker = VelocityTracker::new();
        for t in 0..50 {
            tracker.add_sample(t, 0.0);
        }
        assert_eq!(tracker.len(), 20);
        tracker.add_sample(10, 3.0);
        assert_eq!(tracker.len(), 1);
        tracker.clear();
        assert!(tracker.is_empty());
    }

    #[test]
    fn limits_zero_slow_and_clamp_fast() {
        let limits = VelocityLimits::new(50.0, 8000.0);
        assert_eq!(limits.apply(49.9), 0.0);
        assert_eq!(limits.apply(-49.9), 0.0);
        assert_eq!(limits.apply(50.0), 50.0);
        assert_eq!(limits.apply(-9000.0), -8000.0);
        assert_eq!(limits.apply(f64::NAN), 0.0);

        let odd = VelocityLimits::new(100.0, 10.0);
        assert_eq!(odd.max, 100.0);
    }

    #[test]
    fn release_velocity_applies_limits() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0, 0.0);
        tracker.add_sample(10, 0.2);
        assert_eq!(tracker.release_velocity(&VelocityLimits::default()), 0.0);

        tracker.add_sample(20, 400.0);
        let v = tracker.release_velocity(&VelocityLimits::default());
        assert_eq!(v, 8000.0);
    }
}
