//! Geometry of a laid-out strip segment.
//!
//! All coordinates are segment-local: x = 0 is the segment's left edge
//! (azimuth 0°), y = 0 is its top edge.

use serde::Serialize;

use crate::poi::PoiId;

/// Marker glyph size (width × height).
pub const MARKER_WIDTH: f64 = 5.0;
pub const MARKER_HEIGHT: f64 = 25.0;

/// Distance label size beneath each marker.
pub const DISTANCE_LABEL_WIDTH: f64 = 100.0;
pub const DISTANCE_LABEL_HEIGHT: f64 = 30.0;

/// Compass scale tick size.
pub const TICK_WIDTH: f64 = 1.0;
pub const TICK_HEIGHT: f64 = 10.0;

/// Compass scale tick label size.
pub const TICK_LABEL_WIDTH: f64 = 50.0;
pub const TICK_LABEL_HEIGHT: f64 = 20.0;

/// Degrees between compass scale ticks.
pub const TICK_SPACING_DEG: u16 = 10;

/// Number of ticks in one 360° segment.
pub const TICK_COUNT: u16 = 360 / TICK_SPACING_DEG;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from origin and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle of the given size centred on `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Size of one 360° segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentFrame {
    pub width: f64,
    pub height: f64,
}

impl SegmentFrame {
    /// Frame covering a full turn at the given scale.
    pub fn for_scale(points_per_degree: f64, height: f64) -> Self {
        Self {
            width: 360.0 * points_per_degree,
            height,
        }
    }
}

/// A point-of-interest marker placed by azimuth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Point this marker represents.
    pub poi: PoiId,
    /// Label of the point of interest.
    pub name: String,
    /// Azimuth from the device, degrees.
    pub azimuth_deg: f64,
    /// Distance from the device, meters.
    pub distance_m: f64,
    /// Glyph frame, centred on `azimuth × points_per_degree`.
    pub glyph: Rect,
    /// Formatted distance text.
    pub distance_label: String,
    /// Distance label frame, directly beneath the glyph.
    pub label_frame: Rect,
}

impl Marker {
    /// Horizontal centre of the glyph in segment-local coordinates.
    pub fn offset_x(&self) -> f64 {
        self.glyph.mid_x()
    }
}

/// One tick of the compass scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompassTick {
    pub degrees: u16,
    pub line: Rect,
    pub label: String,
    pub label_frame: Rect,
}

/// Content of one strip segment, produced by the layout builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentLayout {
    pub frame: SegmentFrame,
    pub points_per_degree: f64,
    pub markers: Vec<Marker>,
    pub scale: Vec<CompassTick>,
}

impl SegmentLayout {
    /// Whether the segment draws nothing at all.
    pub fn is_blank(&self) -> bool {
        self.markers.is_empty() && self.scale.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let rect = Rect::centered(100.0, 50.0, 10.0, 20.0);
        assert_eq!(rect.x, 95.0);
        assert_eq!(rect.y, 40.0);
        assert_eq!(rect.mid_x(), 100.0);
        assert_eq!(rect.mid_y(), 50.0);
        assert_eq!(rect.max_y(), 60.0);
    }

    #[test]
    fn test_frame_for_scale() {
        let frame = SegmentFrame::for_scale(6.25, 500.0);
        assert_eq!(frame.width, 2250.0);
        assert_eq!(frame.height, 500.0);
    }

    #[test]
    fn test_tick_count_covers_full_turn() {
        assert_eq!(TICK_COUNT, 36);
    }
}
