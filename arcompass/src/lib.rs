//! ARCompass - compass-relative landmark markers for camera overlays
//!
//! This library lays out markers for geographic points of interest on an
//! endless horizontal strip that scrolls with the device's magnetic heading.
//! A host (camera preview, terminal driver, test harness) feeds it heading
//! samples and device positions and renders the segments it produces.
//!
//! # Modules
//!
//! - [`geo`] - bearing and distance between two positions
//! - [`poi`] - points of interest and the demo landmark set
//! - [`layout`] - marker and compass-scale layout for one strip segment
//! - [`strip`] - the infinite, recycling heading strip
//! - [`heading`] - heading samples, delta policy, calibration query
//! - [`session`] - single-writer event loop publishing strip snapshots
//! - [`config`] - INI configuration
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod geo;
pub mod heading;
pub mod layout;
pub mod logging;
pub mod poi;
pub mod session;
pub mod strip;

pub use geo::{bearing_and_distance, Bearing, GeoPoint};
pub use heading::{HeadingDeltaPolicy, HeadingSample};
pub use layout::{MarkerLayoutBuilder, SegmentProvider};
pub use session::{OverlaySession, SessionEvent, SessionHandle, StripSnapshot};
pub use strip::InfiniteStrip;
