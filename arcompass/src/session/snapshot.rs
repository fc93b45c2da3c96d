//! Read-only views of the strip published by the session.

use serde::Serialize;

use crate::layout::{SegmentLayout, SegmentProvider};
use crate::strip::{InfiniteStrip, SegmentEvent, SegmentId};

/// A marker as it currently appears on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSnapshot {
    pub name: String,
    pub azimuth_deg: f64,
    pub distance_label: String,
    /// Marker centre relative to the viewport's left edge.
    pub screen_x: f64,
}

/// One live segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentSnapshot {
    pub id: SegmentId,
    /// Left edge in content coordinates.
    pub left_edge: f64,
    /// Left edge relative to the viewport.
    pub screen_x: f64,
    pub width: f64,
    pub markers: Vec<MarkerSnapshot>,
}

/// Strip state after an event was applied.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StripSnapshot {
    pub scroll_offset: f64,
    pub last_heading: f64,
    pub points_per_degree: f64,
    pub segments: Vec<SegmentSnapshot>,
    pub events_processed: u64,
    /// Segment lifecycle changes caused by the event that produced this
    /// snapshot, oldest first.
    pub segment_events: Vec<SegmentEvent>,
}

impl StripSnapshot {
    pub(crate) fn capture<P>(
        strip: &InfiniteStrip<P>,
        events_processed: u64,
        segment_events: Vec<SegmentEvent>,
    ) -> Self
    where
        P: SegmentProvider<Segment = SegmentLayout>,
    {
        let segments = strip
            .segments()
            .map(|segment| {
                let screen_x = strip.to_screen_x(segment.left_edge);
                let markers = segment
                    .content
                    .markers
                    .iter()
                    .map(|marker| MarkerSnapshot {
                        name: marker.name.clone(),
                        azimuth_deg: marker.azimuth_deg,
                        distance_label: marker.distance_label.clone(),
                        screen_x: screen_x + marker.offset_x(),
                    })
                    .collect();

                SegmentSnapshot {
                    id: segment.id,
                    left_edge: segment.left_edge,
                    screen_x,
                    width: segment.width(),
                    markers,
                }
            })
            .collect();

        Self {
            scroll_offset: strip.scroll_offset(),
            last_heading: strip.last_heading(),
            points_per_degree: strip.points_per_degree(),
            segments,
            events_processed,
            segment_events,
        }
    }

    /// Markers whose centre lies inside a viewport of the given width.
    pub fn visible_markers(&self, viewport_width: f64) -> impl Iterator<Item = &MarkerSnapshot> {
        self.segments
            .iter()
            .flat_map(|segment| segment.markers.iter())
            .filter(move |marker| marker.screen_x >= 0.0 && marker.screen_x <= viewport_width)
    }
}
