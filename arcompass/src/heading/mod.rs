//! Heading synchronizer.
//!
//! Sensor collaborators deliver heading samples and device positions from
//! their own threads at whatever cadence the device reports. The
//! [`HeadingSynchronizer`] forwards them onto the overlay session's event
//! queue, so the strip itself is only ever touched by the session task.
//!
//! # Example
//!
//! ```ignore
//! use arcompass::heading::{HeadingSample, HeadingSynchronizer, SharedHeadingService};
//!
//! let service = SharedHeadingService::new();
//! let sync = HeadingSynchronizer::new(session_handle, service.clone());
//!
//! // From the sensor callback
//! let sample = HeadingSample::new(87.5, 3.0);
//! service.record(sample);
//! sync.on_heading_sample(sample)?;
//!
//! if sync.should_display_calibration() {
//!     // prompt the user to wave the device
//! }
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use crate::geo::{shortest_angle_delta, GeoPoint};
use crate::session::{SessionError, SessionHandle};

/// Accuracy (degrees) above which compass calibration is recommended.
pub const DEFAULT_CALIBRATION_THRESHOLD_DEG: f64 = 5.0;

/// One magnetic heading reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadingSample {
    /// Heading in degrees, nominally in `[0, 360)`.
    pub magnetic_heading: f64,
    /// Reported accuracy in degrees; negative means invalid.
    pub accuracy: f64,
}

impl HeadingSample {
    pub fn new(magnetic_heading: f64, accuracy: f64) -> Self {
        Self {
            magnetic_heading,
            accuracy,
        }
    }
}

/// Whether a sample with this accuracy calls for compass calibration.
pub fn needs_calibration(accuracy: f64, threshold: f64) -> bool {
    accuracy < 0.0 || accuracy > threshold
}

// =============================================================================
// Delta policy
// =============================================================================

/// How the difference between two headings is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum HeadingDeltaPolicy {
    /// Plain subtraction. Crossing north (359° → 1°) scrolls a full turn
    /// back instead of two degrees forward.
    #[default]
    Raw,
    /// Shortest signed arc, in `(−180°, 180°]`.
    ShortestArc,
}

impl HeadingDeltaPolicy {
    /// Heading change from `from` to `to`, in degrees.
    pub fn delta(self, from: f64, to: f64) -> f64 {
        match self {
            Self::Raw => to - from,
            Self::ShortestArc => shortest_angle_delta(from, to),
        }
    }
}

impl fmt::Display for HeadingDeltaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::ShortestArc => write!(f, "shortest"),
        }
    }
}

/// Unknown heading delta policy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown heading delta policy '{0}' (expected 'raw' or 'shortest')")]
pub struct ParsePolicyError(pub String);

impl FromStr for HeadingDeltaPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "shortest" | "shortest_arc" | "shortest-arc" => Ok(Self::ShortestArc),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

// =============================================================================
// Sensor services
// =============================================================================

/// Source of the most recent heading reading.
///
/// Implemented by whatever wraps the platform compass; injected into the
/// synchronizer rather than reached through global state.
pub trait HeadingService: Send + Sync {
    /// Latest sample, or `None` before the first reading arrives.
    fn latest_heading(&self) -> Option<HeadingSample>;
}

/// In-memory heading service shared between a sensor thread and readers.
#[derive(Debug, Clone, Default)]
pub struct SharedHeadingService {
    latest: Arc<RwLock<Option<HeadingSample>>>,
}

impl SharedHeadingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new reading, replacing the previous one.
    pub fn record(&self, sample: HeadingSample) {
        *self.latest.write() = Some(sample);
    }
}

impl HeadingService for SharedHeadingService {
    fn latest_heading(&self) -> Option<HeadingSample> {
        *self.latest.read()
    }
}

impl<T: HeadingService + ?Sized> HeadingService for Arc<T> {
    fn latest_heading(&self) -> Option<HeadingSample> {
        (**self).latest_heading()
    }
}

// =============================================================================
// Synchronizer
// =============================================================================

/// Forwards sensor callbacks onto the session's event queue.
///
/// Cheap to clone; every clone feeds the same session.
#[derive(Debug, Clone)]
pub struct HeadingSynchronizer<S> {
    session: SessionHandle,
    service: S,
    calibration_threshold: f64,
}

impl<S: HeadingService> HeadingSynchronizer<S> {
    pub fn new(session: SessionHandle, service: S) -> Self {
        Self {
            session,
            service,
            calibration_threshold: DEFAULT_CALIBRATION_THRESHOLD_DEG,
        }
    }

    /// Override the accuracy threshold used by the calibration query.
    pub fn with_calibration_threshold(mut self, threshold: f64) -> Self {
        self.calibration_threshold = threshold;
        self
    }

    pub fn calibration_threshold(&self) -> f64 {
        self.calibration_threshold
    }

    /// Forward a heading sample to the strip.
    pub fn on_heading_sample(&self, sample: HeadingSample) -> Result<(), SessionError> {
        trace!(
            heading = sample.magnetic_heading,
            accuracy = sample.accuracy,
            "Heading sample"
        );
        self.session.send_heading(sample)
    }

    /// Forward a device position; the session refreshes every visible segment.
    pub fn on_position_update(&self, position: GeoPoint) -> Result<(), SessionError> {
        trace!(%position, "Device position update");
        self.session.send_position(position)
    }

    /// Whether the compass should be calibrated, judged from the service's
    /// latest sample. Without any sample the answer is `true`.
    pub fn should_display_calibration(&self) -> bool {
        match self.service.latest_heading() {
            Some(sample) => needs_calibration(sample.accuracy, self.calibration_threshold),
            None => true,
        }
    }
}
