// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The icon strip widget core.

use alloc::vec::Vec;

use kurbo::Size;
use tracing::{debug, trace};
use understory_strip_layout::{
    IconRect, MeasureSpec, Measured, PositionCache, StripMetrics, compute_visible_icons, measure,
};
use understory_strip_motion::{
    EdgeEffect, GestureOutcome, GesturePhase, NoEdgeEffect, PointerEvent, ScrollerConfig,
    StripScroller,
};

use crate::{Invalidation, StripConfig, StripHost};

/// One icon to draw this frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderItem<'a, I> {
    /// Position of the icon in the full list.
    pub index: usize,
    /// Bounds in content coordinates.
    pub rect: IconRect,
    /// The icon itself.
    pub icon: &'a I,
}

impl<I> RenderItem<'_, I> {
    /// Bounds relative to the viewport's left edge at `scroll_offset`.
    #[must_use]
    pub fn viewport_rect(&self, scroll_offset: i32) -> IconRect {
        self.rect.to_viewport(scroll_offset)
    }
}

/// A horizontally scrollable strip of uniform icons.
///
/// `I` is whatever handle the renderer draws (an image id, a texture, a glyph). The strip
/// never inspects it. `H` receives redraw and remeasure requests, and `E` receives edge
/// hits for a glow or bounce effect.
///
/// The host drives the strip with four calls:
///
/// - [`measure`](Self::measure) when laying out,
/// - [`handle_pointer`](Self::handle_pointer) for each pointer event,
/// - [`tick`](Self::tick) once per frame while [`is_animating`](Self::is_animating),
/// - [`draw`](Self::draw) to get the icons to paint.
#[derive(Debug)]
pub struct IconStrip<I, H, E = NoEdgeEffect> {
    icons: Option<Vec<I>>,
    metrics: StripMetrics,
    scroller: StripScroller,
    cache: PositionCache,
    width_spec: MeasureSpec,
    height_spec: MeasureSpec,
    measured: Option<Measured>,
    host: H,
    edge: E,
}

impl<I, H: StripHost, E: EdgeEffect> IconStrip<I, H, E> {
    /// Creates an empty, unmeasured strip.
    #[must_use]
    pub fn new(config: StripConfig, host: H, edge: E) -> Self {
        Self {
            icons: None,
            metrics: config.metrics,
            scroller: StripScroller::new(config.scroller),
            cache: PositionCache::new(),
            width_spec: MeasureSpec::Unspecified,
            height_spec: MeasureSpec::Unspecified,
            measured: None,
            host,
            edge,
        }
    }

    /// The current icon list, if one is set.
    #[must_use]
    pub fn icons(&self) -> Option<&[I]> {
        self.icons.as_deref()
    }

    /// Number of icons (zero when no list is set).
    #[must_use]
    pub fn icon_count(&self) -> usize {
        self.icons.as_ref().map_or(0, Vec::len)
    }

    /// Replaces the icon list and reports what the host must redo.
    ///
    /// - No list before or after: nothing.
    /// - A list of the same length: [`Invalidation::REDRAW`] only. The geometry is
    ///   unchanged, so cached positions stay valid.
    /// - Any other change: [`Invalidation::REMEASURE`]. Cached positions are dropped and the
    ///   scroll range is recomputed against the last measure constraints.
    ///
    /// Clearing the list also stops any fling. The same flags are sent to the host.
    pub fn set_icons(&mut self, icons: Option<Vec<I>>) -> Invalidation {
        let invalidation = match (self.icons.as_ref(), icons.as_ref()) {
            (None, None) => return Invalidation::empty(),
            (Some(old), Some(new)) if old.len() == new.len() => Invalidation::REDRAW,
            _ => Invalidation::REMEASURE,
        };
        debug!(
            from = self.icon_count(),
            to = icons.as_ref().map_or(0, Vec::len),
            cleared = icons.is_none(),
            "icon list replaced"
        );
        if icons.is_none() {
            self.scroller.abort();
        }
        self.icons = icons;
        if invalidation.contains(Invalidation::REMEASURE) {
            self.cache.clear();
            self.remeasure();
        }
        self.notify(invalidation);
        invalidation
    }

    /// Current icon geometry.
    #[must_use]
    pub const fn metrics(&self) -> &StripMetrics {
        &self.metrics
    }

    /// Changes the icon geometry. Anything but an identical value forces a remeasure.
    pub fn set_metrics(&mut self, metrics: StripMetrics) -> Invalidation {
        if metrics == self.metrics {
            return Invalidation::empty();
        }
        self.metrics = metrics;
        self.cache.clear();
        self.remeasure();
        self.notify(Invalidation::REMEASURE);
        Invalidation::REMEASURE
    }

    /// Current touch configuration.
    #[must_use]
    pub const fn scroller_config(&self) -> &ScrollerConfig {
        self.scroller.config()
    }

    /// Changes the touch configuration, effective from the next gesture.
    pub fn set_scroller_config(&mut self, config: ScrollerConfig) {
        self.scroller.set_config(config);
    }

    /// Measures the strip under the host's constraints and returns its size.
    ///
    /// The constraints are remembered so a later icon change can recompute the scroll
    /// range without waiting for the host.
    pub fn measure(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Size {
        self.width_spec = width_spec;
        self.height_spec = height_spec;
        let measured = measure(&self.metrics, self.icon_count(), width_spec, height_spec);
        trace!(
            width = measured.width,
            height = measured.height,
            scroll_range = measured.scroll_range,
            "measured"
        );
        self.measured = Some(measured);
        self.scroller.set_scroll_range(measured.scroll_range);
        measured.size()
    }

    /// The most recent measurement, if any.
    #[must_use]
    pub const fn measured(&self) -> Option<Measured> {
        self.measured
    }

    /// Viewport width from the last measurement, or `0` before the first.
    #[must_use]
    pub fn viewport_width(&self) -> i32 {
        self.measured.map_or(0, |m| m.width)
    }

    /// Current scroll offset. Outside `0..=scroll_range` while overscrolled.
    #[must_use]
    pub const fn scroll_offset(&self) -> i32 {
        self.scroller.offset()
    }

    /// How far the strip can scroll.
    #[must_use]
    pub const fn scroll_range(&self) -> i32 {
        self.scroller.scroll_range()
    }

    /// Current gesture phase.
    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        self.scroller.phase()
    }

    /// Returns `true` while a fling or spring-back needs [`tick`](Self::tick)s.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scroller.is_settling()
    }

    /// Jumps to `offset`, clamped into range, stopping any fling.
    pub fn scroll_to(&mut self, offset: i32) {
        let before = self.scroller.offset();
        self.scroller.scroll_to(offset);
        if self.scroller.offset() != before {
            self.host.request_redraw();
        }
    }

    /// Feeds one pointer event to the gesture state machine.
    ///
    /// Returns `true` if the strip consumed the event. A redraw is requested whenever the
    /// offset moves or a fling starts.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let before = self.scroller.offset();
        let outcome = self.scroller.handle(event, &mut self.edge);
        let started = matches!(
            outcome,
            GestureOutcome::Fling { .. } | GestureOutcome::SpringBack
        );
        if started || self.scroller.offset() != before {
            self.host.request_redraw();
        }
        outcome.is_consumed()
    }

    /// Advances any fling to `now_ms` ahead of the next [`draw`](Self::draw).
    ///
    /// Returns `true` while motion continues; the host should tick again next frame.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let before = self.scroller.offset();
        let animating = self.scroller.tick(now_ms, &mut self.edge);
        if animating || self.scroller.offset() != before {
            self.host.request_redraw();
        }
        animating
    }

    /// Stops all motion, as when the strip leaves the view tree.
    pub fn detach(&mut self) {
        if self.scroller.is_settling() {
            debug!(offset = self.scroller.offset(), "detached while settling");
        }
        self.scroller.abort();
    }

    /// Lays out the viewport at the current offset and returns the icons to paint, in
    /// increasing index order.
    ///
    /// Positions are written into the strip's cache in place, so steady-state frames do not
    /// allocate. With no icons this draws nothing.
    pub fn draw(&mut self) -> impl Iterator<Item = RenderItem<'_, I>> + '_ {
        let icons = self.icons.as_deref().unwrap_or(&[]);
        let offset = self.scroller.offset();
        let width = self.measured.map_or(0, |m| m.width);
        let visible = compute_visible_icons(&self.metrics, icons.len(), offset, width);
        let count = self.cache.update(visible);
        trace!(offset, count, first = self.cache.first_index(), "draw");
        self.cache.iter().filter_map(move |(index, rect)| {
            icons.get(index).map(|icon| RenderItem { index, rect, icon })
        })
    }

    /// Indices and content-space bounds from the last [`draw`](Self::draw).
    ///
    /// Empty before the first draw and after the icon list changes length.
    pub fn visible_icons(&self) -> impl ExactSizeIterator<Item = (usize, IconRect)> + '_ {
        self.cache.iter()
    }

    /// The host.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The edge effect.
    #[must_use]
    pub const fn edge_effect(&self) -> &E {
        &self.edge
    }

    /// The edge effect, mutably.
    pub fn edge_effect_mut(&mut self) -> &mut E {
        &mut self.edge
    }

    /// Recomputes the scroll range with the last constraints, if the strip was measured.
    fn remeasure(&mut self) {
        if self.measured.is_some() {
            self.measure(self.width_spec, self.height_spec);
        } else {
            self.scroller.abort();
        }
    }

    fn notify(&mut self, invalidation: Invalidation) {
        if invalidation.contains(Invalidation::REMEASURE) {
            self.host.request_remeasure();
        }
        if invalidation.contains(Invalidation::REDRAW) {
            self.host.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::num::NonZeroU64;

    use kurbo::{Point, Size};
    use understory_strip_layout::{IconRect, MeasureSpec, StripMetrics};
    use understory_strip_motion::{EdgeEffect, EdgeSide, GesturePhase, PointerEvent, PointerId};

    use super::IconStrip;
    use crate::{Invalidation, StripConfig};

    #[derive(Debug, Default)]
    struct Glow(Vec<(EdgeSide, f64)>);

    impl EdgeEffect for Glow {
        fn absorb(&mut self, side: EdgeSide, velocity: f64) {
            self.0.push((side, velocity));
        }
    }

    type Strip = IconStrip<char, Invalidation, Glow>;

    fn finger() -> PointerId {
        NonZeroU64::new(7).unwrap()
    }

    fn at(x: f64) -> Point {
        Point::new(x, 30.0)
    }

    /// Five 64px icons, 8px apart, in a 200px viewport.
    fn worked_example() -> Strip {
        let config = StripConfig::new(StripMetrics::new(64, 8));
        let mut strip = Strip::new(config, Invalidation::empty(), Glow::default());
        strip.set_icons(Some(vec!['a', 'b', 'c', 'd', 'e']));
        strip.measure(MeasureSpec::Exactly(200), MeasureSpec::Unspecified);
        *strip.host_mut() = Invalidation::empty();
        strip
    }

    fn drawn(strip: &mut Strip) -> Vec<(usize, char)> {
        strip.draw().map(|item| (item.index, *item.icon)).collect()
    }

    #[test]
    fn worked_example_draws_first_three() {
        let mut strip = worked_example();
        assert_eq!(strip.scroll_range(), 152);
        assert_eq!(drawn(&mut strip), [(0, 'a'), (1, 'b'), (2, 'c')]);
        let rects: Vec<IconRect> = strip.visible_icons().map(|(_, r)| r).collect();
        assert_eq!(
            rects,
            [
                IconRect::new(0, 0, 64, 64),
                IconRect::new(72, 0, 136, 64),
                IconRect::new(144, 0, 208, 64),
            ]
        );
    }

    #[test]
    fn measure_reports_size() {
        let mut strip = worked_example();
        let size = strip.measure(MeasureSpec::AtMost(1000), MeasureSpec::AtMost(40));
        assert_eq!(size, Size::new(352.0, 40.0));
        assert_eq!(strip.scroll_range(), 0);
        assert_eq!(strip.viewport_width(), 352);
    }

    #[test]
    fn nothing_visible_before_first_draw() {
        let strip = worked_example();
        assert_eq!(strip.visible_icons().len(), 0);
    }

    #[test]
    fn icon_list_invalidation_rules() {
        let config = StripConfig::new(StripMetrics::new(64, 8));
        let mut strip = Strip::new(config, Invalidation::empty(), Glow::default());

        assert_eq!(strip.set_icons(None), Invalidation::empty());
        assert_eq!(strip.host(), &Invalidation::empty());

        assert_eq!(strip.set_icons(Some(vec!['a', 'b'])), Invalidation::REMEASURE);
        assert_eq!(strip.host(), &Invalidation::REMEASURE);
        strip.measure(MeasureSpec::Exactly(100), MeasureSpec::Unspecified);
        assert_eq!(strip.scroll_range(), 36);
        strip.draw().for_each(drop);
        assert_eq!(strip.visible_icons().len(), 2);

        // Same length: redraw only, cached positions survive.
        *strip.host_mut() = Invalidation::empty();
        assert_eq!(strip.set_icons(Some(vec!['x', 'y'])), Invalidation::REDRAW);
        assert_eq!(strip.host(), &Invalidation::REDRAW);
        assert_eq!(strip.visible_icons().len(), 2);
        assert_eq!(strip.draw().map(|item| *item.icon).collect::<Vec<_>>(), ['x', 'y']);

        // Different length: remeasure against the remembered constraints.
        *strip.host_mut() = Invalidation::empty();
        assert_eq!(
            strip.set_icons(Some(vec!['a', 'b', 'c', 'd', 'e'])),
            Invalidation::REMEASURE
        );
        assert_eq!(strip.visible_icons().len(), 0);
        assert_eq!(strip.scroll_range(), 252);

        assert_eq!(strip.set_icons(None), Invalidation::REMEASURE);
        assert_eq!(strip.scroll_range(), 0);
        assert_eq!(strip.draw().count(), 0);
    }

    #[test]
    fn dragging_scrolls_the_drawn_icons() {
        let mut strip = worked_example();
        let p = finger();
        assert!(strip.handle_pointer(PointerEvent::down(p, at(150.0), 0)));
        assert_eq!(strip.host(), &Invalidation::empty());
        strip.handle_pointer(PointerEvent::moved(p, at(100.0), 16));
        strip.handle_pointer(PointerEvent::moved(p, at(66.0), 32));
        assert_eq!(strip.scroll_offset(), 76);
        assert!(strip.host().contains(Invalidation::REDRAW));

        // 76..276 shows icons 1, 2 and 3.
        let items: Vec<_> = strip.draw().map(|item| (item.index, item.viewport_rect(76))).collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], (1, IconRect::new(-4, 0, 60, 64)));
    }

    #[test]
    fn second_pointer_is_not_consumed() {
        let mut strip = worked_example();
        strip.handle_pointer(PointerEvent::down(finger(), at(150.0), 0));
        let other = NonZeroU64::new(8).unwrap();
        assert!(!strip.handle_pointer(PointerEvent::down(other, at(10.0), 5)));
    }

    #[test]
    fn fling_runs_on_ticks_and_glows_at_the_end() {
        let mut strip = worked_example();
        let p = finger();
        strip.handle_pointer(PointerEvent::down(p, at(300.0), 0));
        strip.handle_pointer(PointerEvent::moved(p, at(260.0), 10));
        strip.handle_pointer(PointerEvent::moved(p, at(220.0), 20));
        *strip.host_mut() = Invalidation::empty();
        strip.handle_pointer(PointerEvent::up(p, at(180.0), 30));
        assert!(strip.is_animating());
        assert_eq!(strip.host(), &Invalidation::REDRAW);

        let mut now = 30;
        while strip.tick(now) {
            now += 16;
            assert!(now < 10_000, "fling never settled");
        }
        assert_eq!(strip.phase(), GesturePhase::Idle);
        assert_eq!(strip.scroll_offset(), 152);
        assert_eq!(strip.edge_effect().0.len(), 1);
        assert_eq!(strip.edge_effect().0[0].0, EdgeSide::End);
        assert_eq!(drawn(&mut strip), [(2, 'c'), (3, 'd'), (4, 'e')]);
    }

    #[test]
    fn detach_and_clearing_icons_stop_motion() {
        let mut strip = worked_example();
        let p = finger();
        strip.handle_pointer(PointerEvent::down(p, at(300.0), 0));
        strip.handle_pointer(PointerEvent::moved(p, at(260.0), 10));
        strip.handle_pointer(PointerEvent::up(p, at(220.0), 20));
        assert!(strip.is_animating());
        strip.detach();
        assert!(!strip.is_animating());
        assert!(!strip.tick(100));

        strip.handle_pointer(PointerEvent::down(p, at(300.0), 200));
        strip.handle_pointer(PointerEvent::moved(p, at(260.0), 210));
        strip.handle_pointer(PointerEvent::up(p, at(220.0), 220));
        assert!(strip.is_animating());
        strip.set_icons(None);
        assert!(!strip.is_animating());
        assert_eq!(strip.scroll_offset(), 0);
    }

    #[test]
    fn metrics_change_forces_remeasure() {
        let mut strip = worked_example();
        strip.draw().for_each(drop);
        assert_eq!(strip.set_metrics(*strip.metrics()), Invalidation::empty());
        assert_eq!(strip.set_metrics(StripMetrics::new(32, 0)), Invalidation::REMEASURE);
        assert!(strip.host().contains(Invalidation::REMEASURE));
        assert_eq!(strip.visible_icons().len(), 0);
        assert_eq!(strip.scroll_range(), 0);

        strip.scroll_to(500);
        assert_eq!(strip.scroll_offset(), 0);
    }
}
