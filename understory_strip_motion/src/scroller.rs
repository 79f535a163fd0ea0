// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag/fling gesture state machine.
//!
//! A [`StripScroller`] owns the scroll offset of one strip and moves through four phases:
//!
//! ```text
//!            down                 move > slop
//!   Idle ───────────▶ Pressed ─────────────────▶ Dragging
//!    ▲                  │ up (tap)                 │ up
//!    ├──────────────────┘                          ├── slow, in range ─────▶ Idle
//!    │                                             └── fast or overscrolled ─▶ Settling
//!    │       trajectory finished / cancel / abort                              │
//!    └─────────────────────────────────────────────────────────────────────────┘
//!                                    down while Settling catches the fling ─▶ Dragging
//! ```
//!
//! Only one pointer is tracked. A second pointer touching down while the first is active
//! is ignored, as are moves and ups from any other pointer.
//!
//! ## Offsets and overscroll
//!
//! The offset is a whole-pixel content offset, normally in `0..=scroll_range`. While
//! dragging past either end, the finger's travel beyond the boundary is scaled by the drag
//! resistance and capped at the overscroll distance. Fractional movement is carried
//! between events so slow drags do not lose pixels.
//!
//! ## Example
//!
//! ```rust
//! use core::num::NonZeroU64;
//!
//! use kurbo::Point;
//! use understory_strip_motion::{
//!     GestureOutcome, GesturePhase, NoEdgeEffect, PointerEvent, StripScroller,
//! };
//!
//! let finger = NonZeroU64::new(1).unwrap();
//! let mut scroller = StripScroller::default();
//! scroller.set_scroll_range(152);
//!
//! scroller.handle(PointerEvent::down(finger, Point::new(100.0, 10.0), 0), &mut NoEdgeEffect);
//! // Past the 8px slop: the drag starts without jumping by the slop.
//! let moved = scroller.handle(
//!     PointerEvent::moved(finger, Point::new(90.0, 10.0), 16),
//!     &mut NoEdgeEffect,
//! );
//! assert_eq!(moved, GestureOutcome::Scrolled { delta: 2 });
//! assert_eq!(scroller.phase(), GesturePhase::Dragging);
//! assert_eq!(scroller.offset(), 2);
//! ```

use tracing::{debug, trace};

use crate::float;
use crate::{
    EdgeEffect, EdgeSide, FlingConfig, FlingSimulator, PointerAction, PointerEvent, PointerId,
    VelocityLimits, VelocityTracker,
};

/// When the strip may be pulled or flung past its ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverscrollMode {
    /// Always, even when the content fits.
    Always,
    /// Only when the content is wider than the viewport.
    #[default]
    IfContentScrolls,
    /// Never. The offset is hard-clamped and no edge signals are sent.
    Never,
}

/// Tunables for [`StripScroller`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollerConfig {
    /// Distance (px) the pointer must travel from its down position before a drag starts.
    pub touch_slop: f64,
    /// Release velocity bounds.
    pub velocity: VelocityLimits,
    /// Maximum stretch (px) past either end while dragging.
    pub overscroll_distance: i32,
    /// When overscroll is permitted.
    pub overscroll_mode: OverscrollMode,
    /// Fraction of finger travel applied past a boundary, in `0.0..=1.0`.
    pub drag_resistance: f64,
    /// Fling physics.
    pub fling: FlingConfig,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            velocity: VelocityLimits::default(),
            overscroll_distance: 32,
            overscroll_mode: OverscrollMode::default(),
            drag_resistance: 0.5,
            fling: FlingConfig::default(),
        }
    }
}

/// The scroller's gesture phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No pointer down and no motion.
    #[default]
    Idle,
    /// A pointer is down but has not moved past the touch slop.
    Pressed,
    /// A pointer is dragging the strip.
    Dragging,
    /// A fling or spring-back is running; advance it with [`StripScroller::tick`].
    Settling,
}

/// What a pointer event did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureOutcome {
    /// The event was not for this gesture (foreign pointer, second pointer, or no gesture).
    Ignored,
    /// A new press started.
    Pressed,
    /// A press landed on a running fling and stopped it; dragging continues from there.
    Caught,
    /// The pointer moved without changing the offset.
    Tracking,
    /// The offset changed by `delta` pixels.
    Scrolled {
        /// New offset minus old offset.
        delta: i32,
    },
    /// The pointer lifted without ever dragging.
    Tap,
    /// The drag ended without enough velocity to fling.
    Released,
    /// The drag ended in a fling at `velocity` px/s (in offset space).
    Fling {
        /// Signed initial fling velocity; positive increases the offset.
        velocity: f64,
    },
    /// The drag ended overscrolled; the offset is springing back.
    SpringBack,
    /// The gesture was canceled and the offset snapped into range.
    Canceled,
}

impl GestureOutcome {
    /// Returns `true` if the strip consumed the event.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Clone, Debug)]
struct ActiveFling {
    simulator: FlingSimulator,
    start_ms: u64,
    crossing_reported: bool,
}

/// Turns pointer events and frame ticks into a scroll offset.
///
/// See the [module documentation](self) for the phase diagram.
#[derive(Clone, Debug, Default)]
pub struct StripScroller {
    config: ScrollerConfig,
    scroll_range: i32,
    offset: i32,
    phase: GesturePhase,
    pointer: Option<PointerId>,
    down_x: f64,
    last_x: f64,
    /// Unresisted drag position; `offset` is this with overscroll resistance applied.
    drag_position: f64,
    /// Boundary already reported to the edge effect during this drag.
    pulled_edge: Option<EdgeSide>,
    tracker: VelocityTracker,
    fling: Option<ActiveFling>,
}

impl StripScroller {
    /// Creates an idle scroller at offset `0` with an empty scroll range.
    #[must_use]
    pub fn new(config: ScrollerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &ScrollerConfig {
        &self.config
    }

    /// Replaces the configuration. Takes effect from the next gesture.
    pub fn set_config(&mut self, config: ScrollerConfig) {
        self.config = config;
    }

    /// Current offset in whole pixels. Outside `0..=scroll_range` while overscrolled.
    #[must_use]
    pub const fn offset(&self) -> i32 {
        self.offset
    }

    /// Largest in-range offset.
    #[must_use]
    pub const fn scroll_range(&self) -> i32 {
        self.scroll_range
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// The pointer being tracked, if any.
    #[must_use]
    pub const fn active_pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    /// Signed overscroll: negative past the start, positive past the end, else zero.
    #[must_use]
    pub fn overscroll(&self) -> i32 {
        self.offset - self.offset.clamp(0, self.scroll_range)
    }

    /// Returns `true` while a fling or spring-back is running.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.phase == GesturePhase::Settling
    }

    /// Sets the scroll range, as produced by measurement. Negative ranges become `0`.
    ///
    /// A running fling is stopped, since its trajectory targets the old range. Outside a
    /// drag the offset is clamped into the new range.
    pub fn set_scroll_range(&mut self, scroll_range: i32) {
        let scroll_range = scroll_range.max(0);
        if scroll_range == self.scroll_range {
            return;
        }
        debug!(from = self.scroll_range, to = scroll_range, "scroll range changed");
        self.scroll_range = scroll_range;
        if self.phase == GesturePhase::Dragging {
            self.drag_position = self.clamp_drag_position(self.drag_position);
            self.offset = float::round_px(self.resisted(self.drag_position));
        } else {
            self.abort();
        }
    }

    /// Jumps to `offset`, clamped into range, stopping any fling.
    pub fn scroll_to(&mut self, offset: i32) {
        if self.fling.take().is_some() {
            self.set_phase(GesturePhase::Idle);
        }
        self.offset = offset.clamp(0, self.scroll_range);
        self.drag_position = f64::from(self.offset);
    }

    /// Stops any fling where it is and snaps the offset into range.
    ///
    /// A gesture in progress keeps its pointer; only motion stops.
    pub fn abort(&mut self) {
        if self.fling.take().is_some() {
            debug!(offset = self.offset, "fling aborted");
            self.set_phase(GesturePhase::Idle);
        }
        if self.phase != GesturePhase::Dragging {
            self.offset = self.offset.clamp(0, self.scroll_range);
            self.drag_position = f64::from(self.offset);
        }
    }

    /// Dispatches a pointer event to the matching handler.
    pub fn handle(&mut self, event: PointerEvent, edge: &mut impl EdgeEffect) -> GestureOutcome {
        match event.action {
            PointerAction::Down => self.pointer_down(event, edge),
            PointerAction::Move => self.pointer_move(event, edge),
            PointerAction::Up => self.pointer_up(event),
            PointerAction::Cancel => self.pointer_cancel(),
        }
    }

    /// Handles a pointer touching down.
    ///
    /// Landing on a running fling stops it where it is. A boundary crossing the fling
    /// made since the last [`tick`](Self::tick) is reported to `edge` first.
    pub fn pointer_down(
        &mut self,
        event: PointerEvent,
        edge: &mut impl EdgeEffect,
    ) -> GestureOutcome {
        let x = event.position.x;
        debug_assert!(x.is_finite(), "pointer position must be finite");
        if !x.is_finite() {
            return GestureOutcome::Ignored;
        }
        match self.phase {
            GesturePhase::Pressed | GesturePhase::Dragging => GestureOutcome::Ignored,
            GesturePhase::Idle => {
                self.begin_press(event.pointer, x, event.time_ms);
                self.set_phase(GesturePhase::Pressed);
                GestureOutcome::Pressed
            }
            GesturePhase::Settling => {
                let mut crossed = None;
                if let Some(active) = self.fling.take() {
                    let elapsed = event.time_ms.saturating_sub(active.start_ms);
                    self.offset = active.simulator.sample(elapsed).offset;
                    if let Some(crossing) = active.simulator.crossing()
                        && elapsed as f64 >= crossing.time_ms
                    {
                        if !active.crossing_reported && self.overscroll_allowed() {
                            debug!(
                                side = ?crossing.side,
                                velocity = crossing.velocity,
                                "fling hit edge on catch"
                            );
                            edge.absorb(crossing.side, crossing.velocity);
                        }
                        crossed = Some(crossing.side);
                    }
                }
                self.begin_press(event.pointer, x, event.time_ms);
                self.pulled_edge = crossed;
                self.drag_position = self.unresisted(self.offset);
                self.set_phase(GesturePhase::Dragging);
                GestureOutcome::Caught
            }
        }
    }

    /// Handles a pointer move.
    pub fn pointer_move(
        &mut self,
        event: PointerEvent,
        edge: &mut impl EdgeEffect,
    ) -> GestureOutcome {
        let x = event.position.x;
        if self.pointer != Some(event.pointer) || !x.is_finite() {
            return GestureOutcome::Ignored;
        }
        self.tracker.add_sample(event.time_ms, x);

        match self.phase {
            GesturePhase::Pressed => {
                let travelled = x - self.down_x;
                if float::abs(travelled) <= self.config.touch_slop {
                    return GestureOutcome::Tracking;
                }
                let slop = self.config.touch_slop.max(0.0);
                self.last_x = self.down_x + float::sign(travelled) * slop;
                self.set_phase(GesturePhase::Dragging);
                self.drag_to(x, edge)
            }
            GesturePhase::Dragging => self.drag_to(x, edge),
            GesturePhase::Idle | GesturePhase::Settling => GestureOutcome::Ignored,
        }
    }

    /// Handles a pointer lifting.
    ///
    /// The up position contributes a velocity sample but does not move the strip.
    pub fn pointer_up(&mut self, event: PointerEvent) -> GestureOutcome {
        if self.pointer != Some(event.pointer) {
            return GestureOutcome::Ignored;
        }
        if event.position.x.is_finite() {
            self.tracker.add_sample(event.time_ms, event.position.x);
        }
        self.pointer = None;
        self.pulled_edge = None;

        let outcome = match self.phase {
            GesturePhase::Pressed => {
                self.set_phase(GesturePhase::Idle);
                GestureOutcome::Tap
            }
            GesturePhase::Dragging => self.release(event.time_ms),
            GesturePhase::Idle | GesturePhase::Settling => GestureOutcome::Ignored,
        };
        self.tracker.clear();
        outcome
    }

    /// Cancels the gesture: stops motion, drops velocity, and snaps into range.
    ///
    /// A cancel applies to the whole gesture, whichever pointer it names.
    pub fn pointer_cancel(&mut self) -> GestureOutcome {
        let overscrolled = self.overscroll() != 0;
        if self.phase == GesturePhase::Idle && !overscrolled {
            return GestureOutcome::Ignored;
        }
        self.pointer = None;
        self.pulled_edge = None;
        self.tracker.clear();
        self.fling = None;
        self.offset = self.offset.clamp(0, self.scroll_range);
        self.drag_position = f64::from(self.offset);
        self.set_phase(GesturePhase::Idle);
        GestureOutcome::Canceled
    }

    /// Advances a running fling to `now_ms`.
    ///
    /// Reports the fling's boundary crossing to `edge` the first tick at or after it
    /// happens. Returns `true` while motion continues, so the host should schedule
    /// another frame.
    pub fn tick(&mut self, now_ms: u64, edge: &mut impl EdgeEffect) -> bool {
        let overscroll_allowed = self.overscroll_allowed();
        let Some(active) = self.fling.as_mut() else {
            return false;
        };
        let elapsed = now_ms.saturating_sub(active.start_ms);

        if !active.crossing_reported
            && let Some(crossing) = active.simulator.crossing()
            && elapsed as f64 >= crossing.time_ms
        {
            active.crossing_reported = true;
            if overscroll_allowed {
                debug!(side = ?crossing.side, velocity = crossing.velocity, "fling hit edge");
                edge.absorb(crossing.side, crossing.velocity);
            }
        }

        let sample = active.simulator.sample(elapsed);
        trace!(elapsed, offset = sample.offset, phase = ?sample.phase, "fling tick");
        self.offset = sample.offset;
        if sample.finished {
            self.fling = None;
            self.offset = self.offset.clamp(0, self.scroll_range);
            self.drag_position = f64::from(self.offset);
            self.set_phase(GesturePhase::Idle);
            return false;
        }
        true
    }

    fn begin_press(&mut self, pointer: PointerId, x: f64, time_ms: u64) {
        self.pointer = Some(pointer);
        self.down_x = x;
        self.last_x = x;
        self.pulled_edge = None;
        self.tracker.clear();
        self.tracker.add_sample(time_ms, x);
    }

    fn drag_to(&mut self, x: f64, edge: &mut impl EdgeEffect) -> GestureOutcome {
        let delta = -(x - self.last_x);
        self.last_x = x;
        let candidate = self.drag_position + delta;

        let range = f64::from(self.scroll_range);
        let past = if candidate < 0.0 {
            Some(EdgeSide::Start)
        } else if candidate > range {
            Some(EdgeSide::End)
        } else {
            None
        };
        match past {
            Some(side) if self.pulled_edge != Some(side) && self.overscroll_allowed() => {
                let velocity = self
                    .config
                    .velocity
                    .max
                    .min(float::abs(self.tracker.estimate()));
                debug!(?side, velocity, "drag pulled past edge");
                edge.absorb(side, velocity);
                self.pulled_edge = Some(side);
            }
            Some(_) => {}
            None => self.pulled_edge = None,
        }

        self.drag_position = self.clamp_drag_position(candidate);
        let previous = self.offset;
        self.offset = float::round_px(self.resisted(self.drag_position));
        trace!(x, offset = self.offset, "drag");
        match self.offset - previous {
            0 => GestureOutcome::Tracking,
            delta => GestureOutcome::Scrolled { delta },
        }
    }

    fn release(&mut self, time_ms: u64) -> GestureOutcome {
        if self.overscroll() != 0
            && let Some(simulator) =
                FlingSimulator::spring_back(self.offset, self.scroll_range, &self.config.fling)
        {
            self.start_settling(simulator, time_ms);
            return GestureOutcome::SpringBack;
        }

        // Finger velocity is opposite to offset velocity.
        let velocity = -self.tracker.release_velocity(&self.config.velocity);
        if velocity != 0.0 {
            let simulator = FlingSimulator::fling(
                self.offset,
                velocity,
                self.scroll_range,
                &self.fling_config(),
            );
            if simulator.duration_ms() > 0 {
                self.start_settling(simulator, time_ms);
                return GestureOutcome::Fling { velocity };
            }
        }
        self.drag_position = f64::from(self.offset);
        self.set_phase(GesturePhase::Idle);
        GestureOutcome::Released
    }

    fn start_settling(&mut self, simulator: FlingSimulator, time_ms: u64) {
        debug!(
            from = self.offset,
            to = simulator.final_offset(),
            duration_ms = simulator.duration_ms(),
            "settling"
        );
        self.fling = Some(ActiveFling {
            simulator,
            start_ms: time_ms,
            crossing_reported: false,
        });
        self.set_phase(GesturePhase::Settling);
    }

    fn set_phase(&mut self, phase: GesturePhase) {
        if self.phase != phase {
            debug!(from = ?self.phase, to = ?phase, offset = self.offset, "gesture phase");
            self.phase = phase;
        }
    }

    fn overscroll_allowed(&self) -> bool {
        match self.config.overscroll_mode {
            OverscrollMode::Always => true,
            OverscrollMode::IfContentScrolls => self.scroll_range > 0,
            OverscrollMode::Never => false,
        }
    }

    fn fling_config(&self) -> FlingConfig {
        if self.overscroll_allowed() {
            self.config.fling
        } else {
            self.config.fling.with_overfling_distance(0)
        }
    }

    fn resistance(&self) -> f64 {
        let r = self.config.drag_resistance;
        if r.is_finite() { r.clamp(0.0, 1.0) } else { 0.0 }
    }

    /// Largest unresisted distance past a boundary.
    fn drag_slack(&self) -> f64 {
        let resistance = self.resistance();
        if !self.overscroll_allowed() || resistance <= 0.0 {
            return 0.0;
        }
        f64::from(self.config.overscroll_distance.max(0)) / resistance
    }

    fn clamp_drag_position(&self, position: f64) -> f64 {
        let slack = self.drag_slack();
        position.clamp(-slack, f64::from(self.scroll_range) + slack)
    }

    fn resisted(&self, position: f64) -> f64 {
        let range = f64::from(self.scroll_range);
        if position < 0.0 {
            position * self.resistance()
        } else if position > range {
            range + (position - range) * self.resistance()
        } else {
            position
        }
    }

    fn unresisted(&self, offset: i32) -> f64 {
        let resistance = self.resistance();
        let range = self.scroll_range;
        let inside = offset.clamp(0, range);
        let excess = f64::from(offset - inside);
        let inside = f64::from(inside);
        if resistance > 0.0 {
            self.clamp_drag_position(inside + excess / resistance)
        } else {
            inside
        }
    }
}
