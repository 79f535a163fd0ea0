// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic fling and spring-back trajectories.
//!
//! A fling is modeled in up to two segments:
//!
//! 1. **Coast**: exponential friction, `v(t) = v0·e^(−k·t)`, so
//!    `x(t) = x0 + v0/k·(1 − e^(−k·t))`. Coasting ends once the speed drops to the stop
//!    velocity, after travelling `(|v0| − v_stop)/k`. Distance therefore grows linearly
//!    with the release speed.
//! 2. **Edge**: if the coast would leave `[0, scroll_range]`, the crossing time and the
//!    velocity left at the boundary have closed forms (with exponential friction the
//!    velocity falls linearly with distance: `v = v0 − k·(x − x0)`). From there a
//!    critically damped spring carries the offset past the boundary and back, stiffened
//!    when needed so the peak stays within the overfling distance.
//!
//! A release while already overscrolled skips the coast and springs straight back.

use core::f64::consts::E;

use crate::EdgeSide;
use crate::float;

/// Displacement below which a spring counts as settled, in pixels.
const SETTLE_PX: f64 = 0.5;
const MIN_FRICTION: f64 = 0.01;
const MIN_STOP_VELOCITY: f64 = 0.01;

/// Physical parameters for flings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingConfig {
    /// Exponential decay rate of the coasting velocity, per second.
    ///
    /// A fling released at `v` px/s travels about `v / friction` pixels.
    pub friction: f64,
    /// Speed (px/s) at which coasting stops.
    pub stop_velocity: f64,
    /// Stiffness of the unit-mass, critically damped spring used past the edges (1/s²).
    pub spring_stiffness: f64,
    /// How far (px) a fling may carry the offset past either boundary. Zero stops flings
    /// dead at the boundary.
    pub overfling_distance: i32,
}

impl FlingConfig {
    /// Returns this configuration with a different overfling distance.
    #[must_use]
    pub const fn with_overfling_distance(mut self, distance: i32) -> Self {
        self.overfling_distance = distance;
        self
    }

    fn friction(&self) -> f64 {
        if self.friction.is_finite() {
            self.friction.max(MIN_FRICTION)
        } else {
            Self::default().friction
        }
    }

    fn stop_velocity(&self) -> f64 {
        if self.stop_velocity.is_finite() {
            self.stop_velocity.max(MIN_STOP_VELOCITY)
        } else {
            Self::default().stop_velocity
        }
    }

    fn omega(&self) -> f64 {
        if self.spring_stiffness.is_finite() && self.spring_stiffness > 0.0 {
            float::sqrt(self.spring_stiffness)
        } else {
            float::sqrt(Self::default().spring_stiffness)
        }
    }
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            friction: 4.0,
            stop_velocity: 10.0,
            spring_stiffness: 400.0,
            overfling_distance: 24,
        }
    }
}

/// Which part of the trajectory a sample falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlingPhase {
    /// Decelerating inside the scroll range.
    Coasting,
    /// Past a boundary and still moving away from it.
    Overscrolling,
    /// Springing back toward a boundary.
    Returning,
    /// At rest.
    Finished,
}

/// The moment a fling leaves the scroll range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeCrossing {
    /// Boundary that was crossed.
    pub side: EdgeSide,
    /// Time of the crossing since the fling started, in milliseconds.
    pub time_ms: f64,
    /// Speed at the crossing, in px/s (non-negative).
    pub velocity: f64,
}

/// The state of a fling at some elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingSample {
    /// Scroll offset, rounded to whole pixels.
    pub offset: i32,
    /// Signed velocity in px/s (positive increases the offset).
    pub velocity: f64,
    /// Trajectory segment.
    pub phase: FlingPhase,
    /// `true` once the trajectory has come to rest at [`FlingSimulator::final_offset`].
    pub finished: bool,
}

#[derive(Clone, Copy, Debug)]
struct Coast {
    start: f64,
    velocity: f64,
    friction: f64,
}

impl Coast {
    fn position(&self, t: f64) -> f64 {
        self.start + self.velocity / self.friction * (1.0 - float::exp(-self.friction * t))
    }

    fn velocity(&self, t: f64) -> f64 {
        self.velocity * float::exp(-self.friction * t)
    }
}

#[derive(Clone, Copy, Debug)]
enum EdgeMotion {
    /// Leaves `boundary` at `velocity`, peaks, and returns: `d(τ) = v·τ·e^(−ωτ)`.
    Bounce {
        boundary: f64,
        velocity: f64,
        omega: f64,
        limit: f64,
    },
    /// Returns from `displacement` at rest: `d(τ) = d0·(1 + ωτ)·e^(−ωτ)`.
    Return {
        boundary: f64,
        displacement: f64,
        omega: f64,
    },
    /// Overscroll disabled: parks on the boundary.
    Stop { boundary: f64 },
}

impl EdgeMotion {
    fn boundary(&self) -> f64 {
        match *self {
            Self::Bounce { boundary, .. }
            | Self::Return { boundary, .. }
            | Self::Stop { boundary } => boundary,
        }
    }

    fn displacement(&self, tau: f64) -> f64 {
        match *self {
            Self::Bounce {
                velocity,
                omega,
                limit,
                ..
            } => (velocity * tau * float::exp(-omega * tau)).clamp(-limit, limit),
            Self::Return {
                displacement,
                omega,
                ..
            } => displacement * (1.0 + omega * tau) * float::exp(-omega * tau),
            Self::Stop { .. } => 0.0,
        }
    }

    fn velocity(&self, tau: f64) -> f64 {
        match *self {
            Self::Bounce {
                velocity, omega, ..
            } => velocity * float::exp(-omega * tau) * (1.0 - omega * tau),
            Self::Return {
                displacement,
                omega,
                ..
            } => -displacement * omega * omega * tau * float::exp(-omega * tau),
            Self::Stop { .. } => 0.0,
        }
    }

    /// Time of the largest displacement; it only shrinks afterwards.
    fn peak_time(&self) -> f64 {
        match *self {
            Self::Bounce { omega, .. } => 1.0 / omega,
            Self::Return { .. } | Self::Stop { .. } => 0.0,
        }
    }

    fn phase(&self, tau: f64) -> FlingPhase {
        match *self {
            Self::Bounce { .. } if tau < self.peak_time() => FlingPhase::Overscrolling,
            Self::Bounce { .. } | Self::Return { .. } => FlingPhase::Returning,
            Self::Stop { .. } => FlingPhase::Finished,
        }
    }

    /// Time after which the displacement stays below [`SETTLE_PX`].
    fn settle_time(&self) -> f64 {
        let omega = match *self {
            Self::Bounce { omega, .. } | Self::Return { omega, .. } => omega,
            Self::Stop { .. } => return 0.0,
        };
        let size = |tau: f64| float::abs(self.displacement(tau));

        let mut settled = self.peak_time();
        if size(settled) < SETTLE_PX {
            return settled;
        }
        let mut moving = settled;
        let mut step = 1.0 / omega;
        settled += step;
        for _ in 0..64 {
            if size(settled) < SETTLE_PX {
                break;
            }
            moving = settled;
            step *= 2.0;
            settled += step;
        }
        for _ in 0..48 {
            let mid = 0.5 * (moving + settled);
            if size(mid) < SETTLE_PX {
                settled = mid;
            } else {
                moving = mid;
            }
        }
        settled
    }
}

/// A precomputed fling trajectory, sampled by elapsed time.
///
/// Sampling is a pure function of the elapsed time, so a host can query it once per frame
/// from whatever clock it uses, skip frames, or sample the same time twice.
///
/// ```rust
/// use understory_strip_motion::{FlingConfig, FlingPhase, FlingSimulator};
///
/// let config = FlingConfig::default();
/// let fling = FlingSimulator::fling(0, 2000.0, 10_000, &config);
/// assert_eq!(fling.sample(0).offset, 0);
/// assert_eq!(fling.sample(100).phase, FlingPhase::Coasting);
///
/// let end = fling.sample(fling.duration_ms());
/// assert!(end.finished);
/// assert_eq!(end.offset, fling.final_offset());
/// assert!(fling.final_offset() > 400);
/// ```
#[derive(Clone, Debug)]
pub struct FlingSimulator {
    coast: Coast,
    edge: Option<EdgeMotion>,
    edge_start: f64,
    duration: f64,
    crossing: Option<EdgeCrossing>,
    final_offset: i32,
}

impl FlingSimulator {
    /// Starts a fling from `start` at `velocity` px/s within `0..=scroll_range`.
    ///
    /// If `start` is already outside the range the velocity is ignored and the
    /// trajectory is a [`spring_back`](Self::spring_back).
    #[must_use]
    pub fn fling(start: i32, velocity: f64, scroll_range: i32, config: &FlingConfig) -> Self {
        let range = f64::from(scroll_range.max(0));
        let x0 = f64::from(start);
        if !(0.0..=range).contains(&x0) {
            return Self::returning(x0, x0.clamp(0.0, range), config);
        }

        debug_assert!(velocity.is_finite(), "fling velocity must be finite");
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let friction = config.friction();
        let stop = config.stop_velocity();
        let speed = float::abs(velocity);

        let coast = Coast {
            start: x0,
            velocity,
            friction,
        };
        if speed <= stop {
            return Self::at_rest(coast, start);
        }

        let coast_duration = float::ln(speed / stop) / friction;
        let rest = x0 + (velocity - float::sign(velocity) * stop) / friction;
        let (boundary, side) = if rest > range {
            (range, EdgeSide::End)
        } else if rest < 0.0 {
            (0.0, EdgeSide::Start)
        } else {
            return Self {
                coast,
                edge: None,
                edge_start: coast_duration,
                duration: coast_duration,
                crossing: None,
                final_offset: float::round_px(rest).clamp(0, scroll_range.max(0)),
            };
        };

        let distance = boundary - x0;
        let crossing_time = -float::ln(1.0 - distance * friction / velocity) / friction;
        let crossing_velocity = velocity - friction * distance;
        let overfling = f64::from(config.overfling_distance.max(0));
        let edge = if overfling > 0.0 {
            let omega = config
                .omega()
                .max(float::abs(crossing_velocity) / (E * overfling));
            EdgeMotion::Bounce {
                boundary,
                velocity: crossing_velocity,
                omega,
                limit: overfling,
            }
        } else {
            EdgeMotion::Stop { boundary }
        };

        Self {
            coast,
            edge: Some(edge),
            edge_start: crossing_time,
            duration: crossing_time + edge.settle_time(),
            crossing: Some(EdgeCrossing {
                side,
                time_ms: crossing_time * 1000.0,
                velocity: float::abs(crossing_velocity),
            }),
            final_offset: float::round_px(boundary),
        }
    }

    /// Springs an overscrolled `start` back to the nearest end of `0..=scroll_range`.
    ///
    /// Returns `None` when `start` is already inside the range.
    #[must_use]
    pub fn spring_back(start: i32, scroll_range: i32, config: &FlingConfig) -> Option<Self> {
        let range = f64::from(scroll_range.max(0));
        let x0 = f64::from(start);
        (!(0.0..=range).contains(&x0)).then(|| Self::returning(x0, x0.clamp(0.0, range), config))
    }

    fn returning(x0: f64, boundary: f64, config: &FlingConfig) -> Self {
        let edge = EdgeMotion::Return {
            boundary,
            displacement: x0 - boundary,
            omega: config.omega(),
        };
        Self {
            coast: Coast {
                start: x0,
                velocity: 0.0,
                friction: config.friction(),
            },
            edge: Some(edge),
            edge_start: 0.0,
            duration: edge.settle_time(),
            crossing: None,
            final_offset: float::round_px(boundary),
        }
    }

    fn at_rest(coast: Coast, start: i32) -> Self {
        Self {
            coast,
            edge: None,
            edge_start: 0.0,
            duration: 0.0,
            crossing: None,
            final_offset: start,
        }
    }

    /// Samples the trajectory `elapsed_ms` after it started.
    #[must_use]
    pub fn sample(&self, elapsed_ms: u64) -> FlingSample {
        let t = elapsed_ms as f64 / 1000.0;
        if t >= self.duration {
            return FlingSample {
                offset: self.final_offset,
                velocity: 0.0,
                phase: FlingPhase::Finished,
                finished: true,
            };
        }

        let (position, velocity, phase) = match self.edge {
            Some(edge) if t >= self.edge_start => {
                let tau = t - self.edge_start;
                (
                    edge.boundary() + edge.displacement(tau),
                    edge.velocity(tau),
                    edge.phase(tau),
                )
            }
            _ => (
                self.coast.position(t),
                self.coast.velocity(t),
                FlingPhase::Coasting,
            ),
        };
        FlingSample {
            offset: float::round_px(position),
            velocity,
            phase,
            finished: false,
        }
    }

    /// Returns `true` once the trajectory is at rest at `elapsed_ms`.
    #[must_use]
    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        elapsed_ms as f64 / 1000.0 >= self.duration
    }

    /// Total duration, rounded up to whole milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        float::secs_to_ms_ceil(self.duration)
    }

    /// Offset at rest.
    #[must_use]
    pub const fn final_offset(&self) -> i32 {
        self.final_offset
    }

    /// Where and how fast the trajectory leaves the scroll range, if it does.
    #[must_use]
    pub const fn crossing(&self) -> Option<EdgeCrossing> {
        self.crossing
    }
}
