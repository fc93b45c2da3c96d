//! Infinite horizontal heading strip.
//!
//! The strip is a scrolling surface over a conceptually unbounded,
//! 360°-periodic band of marker content. Only the segments intersecting the
//! viewport are alive; new ones are requested from the [`SegmentProvider`] as
//! regions scroll into view, and segments that scroll fully out of view are
//! released.
//!
//! # Coordinates
//!
//! ```text
//!   content span (content_width, e.g. 4000 px)
//!   ├──────────────────────────────────────────────────────────────┤
//!          ┌──────── viewport ────────┐
//!          │ scroll_offset … +width   │
//!   ┄┄┄┄┬──┴────────────┬─────────────┴┬──────────────┬┄┄┄┄
//!       │  segment k-1  │  segment k   │  segment k+1 │
//!   ┄┄┄┄┴───────────────┴──────────────┴──────────────┴┄┄┄┄
//!        ◄─ 360 × ppd ─►
//! ```
//!
//! Heading updates move `scroll_offset`. When the offset drifts more than a
//! quarter of the content span from the centre, the offset snaps back to the
//! centre and every segment moves by the same amount, so nothing moves on
//! screen and the offset stays bounded over long sessions.
//!
//! # Threading
//!
//! The strip is single-writer. It is `Send` (when its provider is) but not
//! shared: sensor threads must marshal updates onto the task that owns it,
//! see [`crate::session`].

mod arena;
mod events;
mod viewport;

pub use arena::{PlacedSegment, SegmentArena, SegmentId};
pub use events::{EventLog, SegmentEvent, MAX_PENDING_EVENTS};
pub use viewport::{
    GeometryError, StripGeometry, ViewportState, DEFAULT_CONTENT_WIDTH, MAX_FIELD_OF_VIEW_DEG,
};

use tracing::{debug, trace, warn};

use crate::heading::HeadingDeltaPolicy;
use crate::layout::{SegmentFrame, SegmentProvider};

/// Recycling viewport over the 360°-periodic marker strip.
pub struct InfiniteStrip<P: SegmentProvider> {
    provider: P,
    geometry: StripGeometry,
    state: ViewportState,
    arena: SegmentArena<P::Segment>,
    delta_policy: HeadingDeltaPolicy,
    /// Heading in effect when the current lattice was first seeded.
    seed_heading: Option<f64>,
    events: EventLog,
}

impl<P: SegmentProvider> std::fmt::Debug for InfiniteStrip<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfiniteStrip")
            .field("geometry", &self.geometry)
            .field("state", &self.state)
            .field("delta_policy", &self.delta_policy)
            .field("segments", &self.arena.len())
            .field("pending_events", &self.events.len())
            .finish()
    }
}

impl<P: SegmentProvider> InfiniteStrip<P> {
    /// Create a strip with no segments and a zero scroll offset.
    ///
    /// Nothing is laid out until [`InfiniteStrip::on_viewport_layout`] runs.
    pub fn new(provider: P, geometry: StripGeometry) -> Self {
        let points_per_degree = geometry.points_per_degree();
        if points_per_degree == 0.0 {
            warn!(
                field_of_view = geometry.field_of_view(),
                "Non-positive field of view, strip layout collapses to a point"
            );
        }

        Self {
            provider,
            geometry,
            state: ViewportState {
                scroll_offset: 0.0,
                last_heading: 0.0,
                points_per_degree,
            },
            arena: SegmentArena::new(geometry.segment_width()),
            delta_policy: HeadingDeltaPolicy::default(),
            seed_heading: None,
            events: EventLog::new(),
        }
    }

    /// Use the given policy for heading deltas.
    pub fn with_delta_policy(mut self, policy: HeadingDeltaPolicy) -> Self {
        self.delta_policy = policy;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the provider.
    ///
    /// Visible segments keep their old content until
    /// [`InfiniteStrip::refresh_all_visible_segments`] is called.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn geometry(&self) -> &StripGeometry {
        &self.geometry
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn scroll_offset(&self) -> f64 {
        self.state.scroll_offset
    }

    pub fn last_heading(&self) -> f64 {
        self.state.last_heading
    }

    pub fn points_per_degree(&self) -> f64 {
        self.state.points_per_degree
    }

    pub fn delta_policy(&self) -> HeadingDeltaPolicy {
        self.delta_policy
    }

    /// Visible span `[min_x, max_x]` in content coordinates.
    pub fn visible_bounds(&self) -> (f64, f64) {
        self.state.visible_bounds(self.geometry.viewport_width())
    }

    /// Live segments, left to right.
    pub fn segments(&self) -> impl Iterator<Item = PlacedSegment<'_, P::Segment>> + '_ {
        self.arena.iter()
    }

    pub fn segment_count(&self) -> usize {
        self.arena.len()
    }

    /// Viewport-relative x of a content-space x.
    pub fn to_screen_x(&self, content_x: f64) -> f64 {
        content_x - self.state.scroll_offset
    }

    /// Take every lifecycle event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<SegmentEvent> {
        self.events.drain()
    }

    /// Lifecycle events discarded because they were not drained in time.
    pub fn dropped_events(&self) -> u64 {
        self.events.dropped()
    }

    fn frame(&self) -> SegmentFrame {
        SegmentFrame::for_scale(self.state.points_per_degree, self.geometry.viewport_height())
    }

    fn build(&self) -> P::Segment {
        self.provider
            .build_segment(self.frame(), self.state.points_per_degree)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────

    /// Bring the live segments in line with the current viewport.
    ///
    /// Re-centres if needed, fills to the right then to the left until the
    /// viewport is covered, then evicts segments that are fully out of view.
    pub fn on_viewport_layout(&mut self) {
        self.recenter_if_necessary();

        let (min_x, max_x) = self.visible_bounds();
        self.tile(min_x, max_x);
    }

    fn recenter_if_necessary(&mut self) {
        let current = self.state.scroll_offset;
        let center = self.geometry.center_offset();

        if (current - center).abs() > self.geometry.recenter_threshold() {
            let delta = center - current;
            self.state.scroll_offset = center;
            self.arena.shift(delta);

            debug!(delta, offset = center, "Strip re-centered");
            self.events.push(SegmentEvent::Recentered { delta });
        }
    }

    fn tile(&mut self, min_x: f64, max_x: f64) {
        let width = self.arena.width();

        if self.arena.is_empty() {
            self.seed(min_x + (max_x - min_x) / 2.0);
        } else if width > 0.0 && self.run_misses(min_x, max_x) {
            self.rebase(min_x);
        }

        if width > 0.0 {
            while self.arena.max_x().is_some_and(|right| right < max_x) {
                let content = self.build();
                if let Some(id) = self.arena.push_right(content) {
                    let left_edge = self.arena.last_left_edge();
                    self.record_created(id, left_edge);
                }
            }

            while self.arena.min_x().is_some_and(|left| left > min_x) {
                let content = self.build();
                if let Some(id) = self.arena.push_left(content) {
                    let left_edge = self.arena.min_x();
                    self.record_created(id, left_edge);
                }
            }
        }

        while self.arena.last_left_edge().is_some_and(|left| left > max_x) {
            if let Some((id, _)) = self.arena.pop_right() {
                self.record_evicted(id);
            }
        }

        while self.arena.first_right_edge().is_some_and(|right| right < min_x) {
            if let Some((id, _)) = self.arena.pop_left() {
                self.record_evicted(id);
            }
        }

        // Zero-width segments cannot follow the viewport; re-place the point.
        if self.arena.is_empty() {
            self.seed(min_x + (max_x - min_x) / 2.0);
        }
    }

    /// Whether the live run lies entirely outside `[min_x, max_x]`.
    fn run_misses(&self, min_x: f64, max_x: f64) -> bool {
        match (self.arena.min_x(), self.arena.max_x()) {
            (Some(left), Some(right)) => right < min_x || left > max_x,
            _ => false,
        }
    }

    /// Start a new lattice with a single segment at `left_edge`.
    fn seed(&mut self, left_edge: f64) {
        let content = self.build();
        let id = self.arena.seed(left_edge, content);
        if self.seed_heading.is_none() {
            self.seed_heading = Some(self.state.last_heading);
        }
        self.record_created(id, Some(left_edge));
    }

    /// Replace a run that scrolled entirely out of view with the lattice
    /// slot under `min_x`, keeping the lattice phase.
    fn rebase(&mut self, min_x: f64) {
        self.evict_all();

        let width = self.arena.width();
        let origin = self.arena.slot_left_edge(0);
        let slot = ((min_x - origin) / width).floor();
        let left_edge = origin + slot * width;

        let content = self.build();
        let id = self.arena.seed(left_edge, content);
        self.record_created(id, Some(left_edge));
        debug!(left_edge, "Strip rebased after a long jump");
    }

    fn evict_all(&mut self) {
        for (id, _) in self.arena.clear() {
            self.record_evicted(id);
        }
    }

    fn record_created(&mut self, id: SegmentId, left_edge: Option<f64>) {
        let left_edge = left_edge.unwrap_or_default();
        debug!(%id, left_edge, "Segment created");
        self.events.push(SegmentEvent::Created { id, left_edge });
    }

    fn record_evicted(&mut self, id: SegmentId) {
        debug!(%id, "Segment evicted");
        self.events.push(SegmentEvent::Evicted { id });
    }

    // ─────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────

    /// Scroll (non-animated) to `offset` and lay out.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        if !offset.is_finite() {
            warn!(offset, "Ignoring non-finite scroll offset");
            return;
        }
        self.state.scroll_offset = offset;
        self.on_viewport_layout();
    }

    /// Apply a new heading sample.
    ///
    /// The scroll offset moves by `(heading − last_heading) × points_per_degree`,
    /// with the difference taken according to the strip's
    /// [`HeadingDeltaPolicy`]. Repeating the same heading leaves the offset
    /// unchanged.
    pub fn set_scroll_offset_for_heading(&mut self, heading_deg: f64) {
        if !heading_deg.is_finite() {
            warn!(heading_deg, "Ignoring non-finite heading");
            return;
        }

        let delta_deg = self
            .delta_policy
            .delta(self.state.last_heading, heading_deg);
        let offset = self.state.scroll_offset + delta_deg * self.state.points_per_degree;

        if !offset.is_finite() {
            warn!(heading_deg, offset, "Ignoring heading with non-finite scroll offset");
            return;
        }

        trace!(
            heading = heading_deg,
            delta_deg,
            offset,
            "Applying heading to strip"
        );

        self.state.last_heading = heading_deg;
        self.set_scroll_offset(offset);
    }

    /// Rebuild the content of every visible segment in place.
    ///
    /// Bounds, ids, segment count and scroll offset are unchanged.
    pub fn refresh_all_visible_segments(&mut self) {
        let frame = self.frame();
        let ppd = self.state.points_per_degree;
        let provider = &self.provider;

        let rebuilt = self
            .arena
            .rebuild_all(|| provider.build_segment(frame, ppd));

        debug!(segments = rebuilt.len(), "Refreshed visible segments");
        for id in rebuilt {
            self.events.push(SegmentEvent::Rebuilt { id });
        }
    }

    /// Apply a new viewport size.
    ///
    /// The scale changes with the width, so every segment is released and
    /// the strip is re-tiled at the new scale. Headings keep their on-screen
    /// alignment.
    pub fn resize_viewport(&mut self, width: f64, height: f64) -> Result<(), GeometryError> {
        let geometry = self.geometry.resized(width, height)?;
        if geometry == self.geometry {
            return Ok(());
        }

        self.evict_all();
        self.geometry = geometry;
        self.state.points_per_degree = geometry.points_per_degree();
        self.arena.set_width(geometry.segment_width());

        debug!(
            width,
            height,
            points_per_degree = self.state.points_per_degree,
            "Viewport resized"
        );

        if let Some(seed_heading) = self.seed_heading {
            if self.arena.width() > 0.0 {
                let turned = self.state.last_heading - seed_heading;
                let left_edge = self.state.scroll_offset + width / 2.0
                    - turned * self.state.points_per_degree;
                let content = self.build();
                let id = self.arena.seed(left_edge, content);
                self.record_created(id, Some(left_edge));
            }
        }

        self.on_viewport_layout();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Provider returning the frame it was asked for.
    fn frame_provider() -> impl Fn(SegmentFrame, f64) -> SegmentFrame {
        |frame, _| frame
    }

    fn geometry(width: f64, fov: f64) -> StripGeometry {
        StripGeometry::new(width, 100.0, fov, DEFAULT_CONTENT_WIDTH).unwrap()
    }

    fn strip(width: f64, fov: f64) -> InfiniteStrip<impl SegmentProvider<Segment = SegmentFrame>> {
        InfiniteStrip::new(frame_provider(), geometry(width, fov))
    }

    fn assert_gapless_cover<P: SegmentProvider>(strip: &InfiniteStrip<P>) {
        let segments: Vec<_> = strip.segments().collect();
        assert!(!segments.is_empty());

        for pair in segments.windows(2) {
            assert_eq!(pair[0].right_edge, pair[1].left_edge, "gap or overlap");
        }

        let (min_x, max_x) = strip.visible_bounds();
        assert!(segments[0].left_edge <= min_x, "left side uncovered");
        assert!(
            segments[segments.len() - 1].right_edge >= max_x,
            "right side uncovered"
        );
        for segment in &segments {
            assert!(
                segment.right_edge >= min_x && segment.left_edge <= max_x,
                "{} fully out of view",
                segment.id
            );
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn test_first_layout_recenters_and_tiles() {
        let mut strip = strip(375.0, 60.0);
        strip.on_viewport_layout();

        assert_eq!(strip.scroll_offset(), 1812.5);
        // Seeded at viewport mid, then one more to the left
        assert_eq!(strip.segment_count(), 2);
        assert_gapless_cover(&strip);

        let events = strip.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, SegmentEvent::Created { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_first_segment_starts_at_viewport_mid() {
        let mut strip = strip(375.0, 60.0);
        strip.on_viewport_layout();

        let (min_x, max_x) = strip.visible_bounds();
        let mid = min_x + (max_x - min_x) / 2.0;
        assert!(strip.segments().any(|s| s.left_edge == mid));
    }

    #[test]
    fn test_segments_are_full_turn_wide() {
        let mut strip = strip(375.0, 60.0);
        strip.on_viewport_layout();

        for segment in strip.segments() {
            assert_eq!(segment.width(), 2250.0);
            assert_eq!(segment.content.width, 2250.0);
            assert_eq!(segment.content.height, 100.0);
        }
    }

    #[test]
    fn test_layout_is_stable_without_scrolling() {
        let mut strip = strip(375.0, 60.0);
        strip.on_viewport_layout();
        strip.drain_events();

        strip.on_viewport_layout();
        assert!(strip.drain_events().is_empty());
    }

    #[test]
    fn test_scrolling_evicts_and_creates() {
        // Narrow segments: 360 × (400 / 360) = 400 px, same as the viewport
        let mut strip = strip(400.0, 360.0);
        strip.on_viewport_layout();
        strip.drain_events();

        strip.set_scroll_offset(strip.scroll_offset() + 900.0);

        let events = strip.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, SegmentEvent::Created { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, SegmentEvent::Evicted { .. })));
        assert_gapless_cover(&strip);
    }

    #[test]
    fn test_long_jump_rebases_without_walking() {
        // 400 px / 200° = 2 points per degree, 720 px segments
        let mut strip = strip(400.0, 200.0);
        strip.on_viewport_layout();
        let jump = 1.0e7;
        let before = strip.segments().next().unwrap().left_edge;
        let expected_phase = (before - jump).rem_euclid(720.0);
        strip.drain_events();

        strip.set_scroll_offset(jump);

        assert_gapless_cover(&strip);
        assert!(strip.drain_events().len() < 10);
        let left = strip.segments().next().unwrap().left_edge;
        let phase = strip.to_screen_x(left).rem_euclid(720.0);
        let drift = (phase - expected_phase).abs();
        assert!(drift.min(720.0 - drift) < 1e-6, "lattice phase must survive");
    }

    #[test]
    fn test_zero_fov_degenerates_to_single_point() {
        let mut strip = strip(375.0, 0.0);
        strip.on_viewport_layout();

        assert_eq!(strip.points_per_degree(), 0.0);
        assert_eq!(strip.segment_count(), 1);
        let segment = strip.segments().next().unwrap();
        assert_eq!(segment.width(), 0.0);

        // Heading changes cannot move anything at zero scale
        let offset = strip.scroll_offset();
        strip.set_scroll_offset_for_heading(120.0);
        assert_eq!(strip.scroll_offset(), offset);
        assert_eq!(strip.segment_count(), 1);
    }

    #[test]
    fn test_zero_width_segment_follows_viewport() {
        let mut strip = strip(375.0, 0.0);
        strip.on_viewport_layout();
        strip.set_scroll_offset(strip.scroll_offset() + 500.0);

        assert_eq!(strip.segment_count(), 1);
        let (min_x, max_x) = strip.visible_bounds();
        let left = strip.segments().next().unwrap().left_edge;
        assert!(left >= min_x && left <= max_x);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Heading
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn test_heading_sequence_scroll_deltas() {
        // 120 px / 60° = 2 points per degree
        let mut strip = strip(120.0, 60.0);
        strip.on_viewport_layout();

        let mut offsets = Vec::new();
        for heading in [10.0, 15.0, 15.0, 20.0] {
            strip.set_scroll_offset_for_heading(heading);
            offsets.push(strip.scroll_offset());
        }

        let deltas: Vec<f64> = offsets.windows(2).map(|w| w[1] - w[0]).collect();
        assert_eq!(deltas, vec![10.0, 0.0, 10.0]);
    }

    #[test]
    fn test_same_heading_twice_moves_once() {
        let mut strip = strip(120.0, 60.0);
        strip.on_viewport_layout();
        let start = strip.scroll_offset();

        strip.set_scroll_offset_for_heading(30.0);
        let after_first = strip.scroll_offset();
        strip.set_scroll_offset_for_heading(30.0);

        assert_eq!(after_first, start + 60.0);
        assert_eq!(strip.scroll_offset(), after_first);
        assert_eq!(strip.last_heading(), 30.0);
    }

    #[test]
    fn test_raw_policy_jumps_across_north() {
        let mut strip = strip(120.0, 60.0);
        strip.on_viewport_layout();
        strip.set_scroll_offset_for_heading(359.0);
        strip.drain_events();

        let before = strip.scroll_offset();
        strip.set_scroll_offset_for_heading(1.0);
        let moved = strip.scroll_offset() - before;

        // -358° × 2 = -716 px, still inside the re-center threshold
        let recentered = strip
            .drain_events()
            .iter()
            .any(|e| matches!(e, SegmentEvent::Recentered { .. }));
        assert_eq!(moved, -716.0);
        assert!(!recentered);
    }

    #[test]
    fn test_shortest_arc_policy_crosses_north_smoothly() {
        let mut strip = strip(120.0, 60.0).with_delta_policy(HeadingDeltaPolicy::ShortestArc);
        strip.on_viewport_layout();
        strip.set_scroll_offset_for_heading(359.0);

        let before = strip.scroll_offset();
        strip.set_scroll_offset_for_heading(1.0);
        assert!((strip.scroll_offset() - before - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_heading_is_ignored() {
        let mut strip = strip(120.0, 60.0);
        strip.on_viewport_layout();
        let offset = strip.scroll_offset();

        strip.set_scroll_offset_for_heading(f64::NAN);
        assert_eq!(strip.scroll_offset(), offset);
        assert_eq!(strip.last_heading(), 0.0);
    }

    #[test]
    fn test_overflowing_heading_keeps_heading_and_offset_in_step() {
        let mut strip = strip(120.0, 60.0);
        strip.on_viewport_layout();
        strip.set_scroll_offset_for_heading(10.0);
        let offset = strip.scroll_offset();

        // 1e308° × 2 points per degree overflows to infinity
        strip.set_scroll_offset_for_heading(1e308);
        assert_eq!(strip.scroll_offset(), offset);
        assert_eq!(strip.last_heading(), 10.0);

        strip.set_scroll_offset_for_heading(20.0);
        assert_eq!(strip.scroll_offset(), offset + 20.0);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Re-centering
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn test_recenter_preserves_screen_positions() {
        let mut strip = strip(375.0, 60.0);
        strip.on_viewport_layout();
        strip.drain_events();

        // Drift just past the threshold
        let new_offset = strip.geometry().center_offset() + 1001.0;
        let expected: Vec<_> = strip
            .segments()
            .map(|s| (s.id, s.left_edge - new_offset))
            .collect();

        strip.set_scroll_offset(new_offset);

        assert!(strip
            .drain_events()
            .iter()
            .any(|e| matches!(e, SegmentEvent::Recentered { .. })));
        assert_eq!(strip.scroll_offset(), strip.geometry().center_offset());

        for segment in strip.segments() {
            if let Some((_, screen_x)) = expected.iter().find(|(id, _)| *id == segment.id) {
                assert!((strip.to_screen_x(segment.left_edge) - screen_x).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_small_drift_does_not_recenter() {
        let mut strip = strip(375.0, 60.0);
        strip.on_viewport_layout();
        strip.drain_events();

        let offset = strip.geometry().center_offset() + 999.0;
        strip.set_scroll_offset(offset);

        assert_eq!(strip.scroll_offset(), offset);
        assert!(!strip
            .drain_events()
            .iter()
            .any(|e| matches!(e, SegmentEvent::Recentered { .. })));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Refresh and resize
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn test_refresh_rebuilds_in_place() {
        use std::cell::Cell;

        let builds = Cell::new(0u32);
        let provider = |_: SegmentFrame, _: f64| {
            builds.set(builds.get() + 1);
            builds.get()
        };
        let mut strip = InfiniteStrip::new(provider, geometry(375.0, 60.0));
        strip.on_viewport_layout();
        strip.drain_events();

        let before: Vec<_> = strip
            .segments()
            .map(|s| (s.id, s.left_edge, *s.content))
            .collect();
        let offset = strip.scroll_offset();

        strip.refresh_all_visible_segments();

        let after: Vec<_> = strip
            .segments()
            .map(|s| (s.id, s.left_edge, *s.content))
            .collect();
        assert_eq!(before.len(), after.len());
        assert_eq!(strip.scroll_offset(), offset);
        for (b, a) in before.iter().zip(&after) {
            assert_eq!((b.0, b.1), (a.0, a.1));
            assert_ne!(b.2, a.2, "content should be rebuilt");
        }
        let rebuilt = strip
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, SegmentEvent::Rebuilt { .. }))
            .count();
        assert_eq!(rebuilt, after.len());
    }

    #[test]
    fn test_resize_retiles_at_new_scale() {
        let mut strip = strip(375.0, 60.0);
        strip.on_viewport_layout();

        strip.resize_viewport(750.0, 200.0).unwrap();

        assert_eq!(strip.points_per_degree(), 12.5);
        for segment in strip.segments() {
            assert_eq!(segment.width(), 4500.0);
            assert_eq!(segment.content.height, 200.0);
        }
        assert_gapless_cover(&strip);
    }

    #[test]
    fn test_resize_keeps_heading_alignment() {
        let mut strip = strip(360.0, 60.0);
        strip.on_viewport_layout();
        strip.set_scroll_offset_for_heading(90.0);

        // Azimuth equal to the heading sits at the viewport centre
        fn centre_azimuth_x<P: SegmentProvider>(s: &InfiniteStrip<P>) -> Option<f64> {
            let heading = s.last_heading();
            s.segments()
                .map(|seg| s.to_screen_x(seg.left_edge + heading * s.points_per_degree()))
                .find(|x| *x >= 0.0 && *x <= s.geometry().viewport_width())
        }
        assert_eq!(centre_azimuth_x(&strip), Some(180.0));

        strip.resize_viewport(720.0, 100.0).unwrap();
        assert_eq!(centre_azimuth_x(&strip), Some(360.0));
    }

    #[test]
    fn test_resize_rejects_invalid_geometry() {
        let mut strip = strip(375.0, 60.0);
        strip.on_viewport_layout();

        let result = strip.resize_viewport(5000.0, 100.0);
        assert!(matches!(result, Err(GeometryError::ContentTooNarrow { .. })));
        assert_eq!(strip.geometry().viewport_width(), 375.0);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Properties
    // ─────────────────────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_gapless_after_any_headings(
            fov in 20.0f64..=360.0,
            headings in prop::collection::vec(0.0f64..360.0, 1..40),
        ) {
            let mut strip = strip(375.0, fov);
            strip.on_viewport_layout();
            for heading in headings {
                strip.set_scroll_offset_for_heading(heading);
                assert_gapless_cover(&strip);
            }
        }

        #[test]
        fn prop_recenter_keeps_surviving_segments_in_place(
            fov in 20.0f64..=360.0,
            offsets in prop::collection::vec(-10_000.0f64..10_000.0, 1..20),
        ) {
            let mut strip = strip(375.0, fov);
            strip.on_viewport_layout();

            for offset in offsets {
                let expected: Vec<_> = strip
                    .segments()
                    .map(|s| (s.id, s.left_edge - offset))
                    .collect();

                strip.set_scroll_offset(offset);

                for segment in strip.segments() {
                    if let Some((_, x)) = expected.iter().find(|(id, _)| *id == segment.id) {
                        prop_assert!((strip.to_screen_x(segment.left_edge) - x).abs() < 1e-6);
                    }
                }
            }
        }
    }
}
