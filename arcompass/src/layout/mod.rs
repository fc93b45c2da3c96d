//! Marker layout for heading-strip segments.
//!
//! Every segment of the strip shows one full turn of the compass. The
//! builder places one marker per point of interest at
//! `azimuth × points_per_degree` from the segment's left edge and, when
//! enabled, overlays a compass scale of 36 ticks.
//!
//! # Architecture
//!
//! ```text
//! InfiniteStrip ──build_segment(frame, ppd)──► SegmentProvider
//!                                                  │
//!                                     MarkerLayoutBuilder (registry,
//!                                     device position, scale flag)
//!                                                  │
//!                                          bearing_and_distance
//! ```
//!
//! The strip owns its provider; the provider never refers back to the strip.

mod geometry;

pub use geometry::{
    CompassTick, Marker, Rect, SegmentFrame, SegmentLayout, DISTANCE_LABEL_HEIGHT,
    DISTANCE_LABEL_WIDTH, MARKER_HEIGHT, MARKER_WIDTH, TICK_COUNT, TICK_HEIGHT,
    TICK_LABEL_HEIGHT, TICK_LABEL_WIDTH, TICK_SPACING_DEG, TICK_WIDTH,
};

use crate::geo::{bearing_and_distance, format_distance, GeoPoint};
use crate::poi::{PoiId, PoiRegistry, PointOfInterest};

/// Supplies the content of strip segments.
///
/// The strip asks for a new segment whenever a region of the strip becomes
/// visible, and again for every visible segment on refresh. Implementations
/// decide what a segment is: the built-in [`MarkerLayoutBuilder`] returns a
/// [`SegmentLayout`], a host toolkit may return its own view type.
pub trait SegmentProvider {
    /// Segment content type.
    type Segment;

    /// Build the content for a segment of the given frame.
    fn build_segment(&self, frame: SegmentFrame, points_per_degree: f64) -> Self::Segment;
}

impl<F, S> SegmentProvider for F
where
    F: Fn(SegmentFrame, f64) -> S,
{
    type Segment = S;

    fn build_segment(&self, frame: SegmentFrame, points_per_degree: f64) -> S {
        self(frame, points_per_degree)
    }
}

/// Lays out segment content from the registered points of interest.
#[derive(Debug, Clone)]
pub struct MarkerLayoutBuilder {
    registry: PoiRegistry,
    device_position: Option<GeoPoint>,
    display_compass_scale: bool,
}

impl Default for MarkerLayoutBuilder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MarkerLayoutBuilder {
    /// Create a builder with an empty registry and no device position.
    pub fn new(display_compass_scale: bool) -> Self {
        Self {
            registry: PoiRegistry::new(),
            device_position: None,
            display_compass_scale,
        }
    }

    /// Register a point of interest.
    pub fn add_point(&mut self, location: GeoPoint, label: impl Into<String>) -> PoiId {
        self.registry.add(location, label)
    }

    /// Record the latest device position.
    pub fn set_device_position(&mut self, position: GeoPoint) {
        self.device_position = Some(position);
    }

    /// Latest device position, if one has been reported.
    pub fn device_position(&self) -> Option<GeoPoint> {
        self.device_position
    }

    /// Registered points of interest.
    pub fn registry(&self) -> &PoiRegistry {
        &self.registry
    }

    /// Whether segments carry the compass scale.
    pub fn displays_compass_scale(&self) -> bool {
        self.display_compass_scale
    }

    pub fn set_display_compass_scale(&mut self, enabled: bool) {
        self.display_compass_scale = enabled;
    }
}

impl SegmentProvider for MarkerLayoutBuilder {
    type Segment = SegmentLayout;

    fn build_segment(&self, frame: SegmentFrame, points_per_degree: f64) -> SegmentLayout {
        build_segment(
            frame,
            points_per_degree,
            self.device_position.as_ref(),
            self.registry.points(),
            self.display_compass_scale,
        )
    }
}

/// Lay out one segment.
///
/// Without a device position the segment has no markers; the compass scale
/// is still drawn when enabled. Pure: no shared state is touched.
pub fn build_segment(
    frame: SegmentFrame,
    points_per_degree: f64,
    device_position: Option<&GeoPoint>,
    points: &[PointOfInterest],
    display_compass_scale: bool,
) -> SegmentLayout {
    let markers = match device_position {
        Some(device) => points
            .iter()
            .map(|poi| place_marker(device, poi, points_per_degree, frame.height))
            .collect(),
        None => Vec::new(),
    };

    let scale = if display_compass_scale {
        compass_scale(points_per_degree)
    } else {
        Vec::new()
    };

    SegmentLayout {
        frame,
        points_per_degree,
        markers,
        scale,
    }
}

fn place_marker(
    device: &GeoPoint,
    poi: &PointOfInterest,
    points_per_degree: f64,
    frame_height: f64,
) -> Marker {
    let bearing = bearing_and_distance(device, &poi.location());
    let center_x = bearing.azimuth_deg * points_per_degree;

    let glyph = Rect::centered(center_x, frame_height / 2.0, MARKER_WIDTH, MARKER_HEIGHT);
    let label_frame = Rect::new(
        center_x - DISTANCE_LABEL_WIDTH / 2.0,
        glyph.max_y(),
        DISTANCE_LABEL_WIDTH,
        DISTANCE_LABEL_HEIGHT,
    );

    Marker {
        poi: poi.id(),
        name: poi.label().to_string(),
        azimuth_deg: bearing.azimuth_deg,
        distance_m: bearing.distance_m,
        glyph,
        distance_label: format_distance(bearing.distance_m),
        label_frame,
    }
}

/// Compass scale: one tick every 10°, labelled with its degree value.
pub fn compass_scale(points_per_degree: f64) -> Vec<CompassTick> {
    (0..TICK_COUNT)
        .map(|i| {
            let degrees = i * TICK_SPACING_DEG;
            let line = Rect::new(
                f64::from(degrees) * points_per_degree,
                0.0,
                TICK_WIDTH,
                TICK_HEIGHT,
            );
            CompassTick {
                degrees,
                line,
                label: format!("{}°", degrees),
                label_frame: Rect::new(line.x, line.max_y(), TICK_LABEL_WIDTH, TICK_LABEL_HEIGHT),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_with_east_point() -> MarkerLayoutBuilder {
        let mut builder = MarkerLayoutBuilder::new(false);
        builder.add_point(GeoPoint::new(0.0, 1.0), "east");
        builder
    }

    #[test]
    fn test_no_device_position_means_no_markers() {
        let builder = builder_with_east_point();
        let layout = builder.build_segment(SegmentFrame::for_scale(2.0, 400.0), 2.0);

        assert!(layout.markers.is_empty());
        assert!(layout.is_blank());
    }

    #[test]
    fn test_marker_placed_at_azimuth_times_scale() {
        let mut builder = builder_with_east_point();
        builder.set_device_position(GeoPoint::new(0.0, 0.0));

        let layout = builder.build_segment(SegmentFrame::for_scale(2.0, 400.0), 2.0);

        assert_eq!(layout.markers.len(), 1);
        let marker = &layout.markers[0];
        assert!((marker.offset_x() - 180.0).abs() < 1e-9);
        assert!((marker.azimuth_deg - 90.0).abs() < 1e-9);
        assert_eq!(marker.name, "east");
    }

    #[test]
    fn test_marker_vertical_placement() {
        let mut builder = builder_with_east_point();
        builder.set_device_position(GeoPoint::new(0.0, 0.0));

        let layout = builder.build_segment(SegmentFrame::for_scale(2.0, 400.0), 2.0);
        let marker = &layout.markers[0];

        assert_eq!(marker.glyph.mid_y(), 200.0);
        assert_eq!(marker.glyph.width, MARKER_WIDTH);
        assert_eq!(marker.label_frame.y, marker.glyph.max_y());
        assert!((marker.label_frame.mid_x() - marker.offset_x()).abs() < 1e-9);
    }

    #[test]
    fn test_distance_label_format() {
        let mut builder = builder_with_east_point();
        builder.set_device_position(GeoPoint::new(0.0, 0.0));
        builder.add_point(GeoPoint::new(0.0, 0.0005), "near");

        let layout = builder.build_segment(SegmentFrame::for_scale(1.0, 100.0), 1.0);

        assert_eq!(layout.markers[0].distance_label, "111.19 km");
        assert!(layout.markers[1].distance_label.ends_with(" m"));
        assert_eq!(layout.markers[1].distance_label, "55.60 m");
    }

    #[test]
    fn test_zero_scale_collapses_markers_to_origin() {
        let mut builder = MarkerLayoutBuilder::new(true);
        builder.set_device_position(GeoPoint::new(0.0, 0.0));
        builder.add_point(GeoPoint::new(0.0, 1.0), "east");
        builder.add_point(GeoPoint::new(-1.0, 0.0), "south");
        builder.add_point(GeoPoint::new(1.0, -1.0), "north-west");

        let layout = builder.build_segment(SegmentFrame::for_scale(0.0, 100.0), 0.0);

        assert_eq!(layout.frame.width, 0.0);
        for marker in &layout.markers {
            assert_eq!(marker.offset_x(), 0.0, "{} should collapse", marker.name);
        }
        for tick in &layout.scale {
            assert_eq!(tick.line.x, 0.0);
        }
    }

    #[test]
    fn test_compass_scale_ticks() {
        let ticks = compass_scale(3.0);

        assert_eq!(ticks.len(), 36);
        assert_eq!(ticks[0].label, "0°");
        assert_eq!(ticks[35].label, "350°");
        assert_eq!(ticks[9].line.x, 270.0);
        assert_eq!(ticks[9].label_frame.y, TICK_HEIGHT);
    }

    #[test]
    fn test_scale_flag_controls_ticks() {
        let mut builder = MarkerLayoutBuilder::default();
        assert!(builder.displays_compass_scale());
        let frame = SegmentFrame::for_scale(1.0, 100.0);
        assert_eq!(builder.build_segment(frame, 1.0).scale.len(), 36);

        builder.set_display_compass_scale(false);
        assert!(builder.build_segment(frame, 1.0).scale.is_empty());
    }

    #[test]
    fn test_markers_follow_registration_order() {
        let mut builder = MarkerLayoutBuilder::new(false);
        builder.set_device_position(GeoPoint::new(0.0, 0.0));
        let first = builder.add_point(GeoPoint::new(1.0, 0.0), "north");
        let second = builder.add_point(GeoPoint::new(0.0, -1.0), "west");

        let layout = builder.build_segment(SegmentFrame::for_scale(1.0, 100.0), 1.0);
        let ids: Vec<_> = layout.markers.iter().map(|m| m.poi).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_closure_provider() {
        let provider = |frame: SegmentFrame, ppd: f64| (frame.width, ppd);
        assert_eq!(
            provider.build_segment(SegmentFrame::for_scale(2.0, 10.0), 2.0),
            (720.0, 2.0)
        );
    }
}
