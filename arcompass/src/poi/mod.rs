//! Points of interest shown on the heading strip.
//!
//! The registry keeps points in insertion order for the lifetime of a
//! session. Points are never mutated or removed once added; markers are laid
//! out in the same order they were registered.

use std::fmt;

use serde::Serialize;

use crate::geo::GeoPoint;

/// Identifier assigned to a point of interest when it is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PoiId(u32);

impl PoiId {
    /// Raw numeric value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "poi#{}", self.0)
    }
}

/// A geographic point with a caller-supplied label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointOfInterest {
    id: PoiId,
    label: String,
    location: GeoPoint,
}

impl PointOfInterest {
    /// Registry-assigned identifier.
    pub fn id(&self) -> PoiId {
        self.id
    }

    /// Opaque label given at registration.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Position of the point.
    pub fn location(&self) -> GeoPoint {
        self.location
    }
}

/// Ordered, append-only set of points of interest.
#[derive(Debug, Clone, Default)]
pub struct PoiRegistry {
    points: Vec<PointOfInterest>,
    next_id: u32,
}

impl PoiRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a point and return its identifier.
    pub fn add(&mut self, location: GeoPoint, label: impl Into<String>) -> PoiId {
        let id = PoiId(self.next_id);
        self.next_id += 1;
        self.points.push(PointOfInterest {
            id,
            label: label.into(),
            location,
        });
        id
    }

    /// Look up a point by identifier.
    pub fn get(&self, id: PoiId) -> Option<&PointOfInterest> {
        self.points.iter().find(|p| p.id == id)
    }

    /// All points in registration order.
    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    /// Number of registered points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no points have been registered.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Built-in landmark set used when no landmarks are configured.
pub const DEMO_LANDMARKS: &[(&str, GeoPoint)] = &[
    ("Cracow Old Town", GeoPoint::new(50.0611958, 19.9379069)),
    ("Leaning Tower of Pisa", GeoPoint::new(43.722952, 10.3944083)),
    ("Acropolis of Athens", GeoPoint::new(37.971421, 23.726166)),
    ("Eiffel Tower", GeoPoint::new(48.858222, 2.2945)),
    ("Big Ben", GeoPoint::new(51.5007292, -0.1268124)),
];
