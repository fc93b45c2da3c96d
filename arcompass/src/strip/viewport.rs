//! Viewport geometry and scroll state of the heading strip.

use serde::Serialize;
use thiserror::Error;

/// Default width of the scrollable content span (pixels).
pub const DEFAULT_CONTENT_WIDTH: f64 = 4000.0;

/// Widest accepted camera field of view (degrees).
///
/// Anything wider would make a 360° segment narrower than the viewport.
pub const MAX_FIELD_OF_VIEW_DEG: f64 = 360.0;

/// Invalid viewport geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Viewport width must be positive, got {0}")]
    InvalidWidth(f64),

    #[error("Viewport height must not be negative, got {0}")]
    InvalidHeight(f64),

    #[error("Content width {content} must exceed viewport width {viewport}")]
    ContentTooNarrow { content: f64, viewport: f64 },

    #[error("Field of view {0}° exceeds {max}°", max = MAX_FIELD_OF_VIEW_DEG)]
    FieldOfViewTooWide(f64),

    #[error("Field of view must be a finite number of degrees, got {0}")]
    NonFiniteFieldOfView(f64),
}

/// Fixed geometry the strip lays out against.
///
/// A zero or negative field of view is accepted: it yields a scale of zero
/// points per degree, collapsing all layout to a single point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StripGeometry {
    viewport_width: f64,
    viewport_height: f64,
    content_width: f64,
    field_of_view: f64,
}

impl StripGeometry {
    /// Validate and create strip geometry.
    pub fn new(
        viewport_width: f64,
        viewport_height: f64,
        field_of_view: f64,
        content_width: f64,
    ) -> Result<Self, GeometryError> {
        if !(viewport_width > 0.0) {
            return Err(GeometryError::InvalidWidth(viewport_width));
        }
        if !(viewport_height >= 0.0) {
            return Err(GeometryError::InvalidHeight(viewport_height));
        }
        if !(content_width > viewport_width) {
            return Err(GeometryError::ContentTooNarrow {
                content: content_width,
                viewport: viewport_width,
            });
        }
        if !field_of_view.is_finite() {
            return Err(GeometryError::NonFiniteFieldOfView(field_of_view));
        }
        if field_of_view > MAX_FIELD_OF_VIEW_DEG {
            return Err(GeometryError::FieldOfViewTooWide(field_of_view));
        }

        Ok(Self {
            viewport_width,
            viewport_height,
            content_width,
            field_of_view,
        })
    }

    /// Same geometry with a different viewport size.
    pub fn resized(&self, viewport_width: f64, viewport_height: f64) -> Result<Self, GeometryError> {
        Self::new(
            viewport_width,
            viewport_height,
            self.field_of_view,
            self.content_width,
        )
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    /// Pixels per degree of heading: `viewport_width / field_of_view`.
    ///
    /// Zero when the field of view is not positive.
    pub fn points_per_degree(&self) -> f64 {
        if self.field_of_view <= 0.0 {
            return 0.0;
        }
        self.viewport_width / self.field_of_view
    }

    /// Width of one 360° segment.
    pub fn segment_width(&self) -> f64 {
        360.0 * self.points_per_degree()
    }

    /// Scroll offset that centres the viewport on the content span.
    pub fn center_offset(&self) -> f64 {
        (self.content_width - self.viewport_width) / 2.0
    }

    /// Drift from the centre beyond which the strip re-centres.
    pub fn recenter_threshold(&self) -> f64 {
        self.content_width / 4.0
    }
}

/// Mutable scroll state, owned by the strip.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ViewportState {
    /// Left edge of the viewport in content coordinates.
    pub scroll_offset: f64,
    /// Heading applied by the most recent heading update.
    pub last_heading: f64,
    /// Current scale, derived from the geometry.
    pub points_per_degree: f64,
}

impl ViewportState {
    /// Visible span `[min_x, max_x]` in content coordinates.
    pub fn visible_bounds(&self, viewport_width: f64) -> (f64, f64) {
        (self.scroll_offset, self.scroll_offset + viewport_width)
    }
}
