//! Bearing and distance calculations.
//!
//! Converts a pair of geographic positions into the compass azimuth used to
//! place a marker on the heading strip, plus the distance shown beneath it.
//!
//! # Accuracy
//!
//! The azimuth uses a planar (flat-earth) approximation: the latitude and
//! longitude deltas are treated as Cartesian offsets. This is accurate only
//! for points within a few hundred kilometres; it is kept as-is so marker
//! placement matches the overlay's established behaviour. Distance uses the
//! haversine great-circle formula.
//!
//! # Example
//!
//! ```
//! use arcompass::geo::{bearing_and_distance, GeoPoint};
//!
//! let here = GeoPoint::new(0.0, 0.0);
//! let east = GeoPoint::new(0.0, 1.0);
//!
//! let bearing = bearing_and_distance(&here, &east);
//! assert!((bearing.azimuth_deg - 90.0).abs() < 1e-9);
//! assert!((bearing.distance_m - 111_195.0).abs() < 1.0);
//! ```

mod types;

pub use types::{Bearing, GeoError, GeoPoint, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

use std::f64::consts::FRAC_PI_2;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distances above this are labelled in kilometres.
pub const KILOMETRE_LABEL_THRESHOLD_M: f64 = 100.0;

/// Computes the azimuth and distance from `from` to `to`.
///
/// Azimuth is in `[0, 360)`:
///
/// - east of `from` (Δlon > 0) yields `[0, 180)`
/// - west of `from` (Δlon < 0) yields `[180, 360)`
/// - due south (Δlon = 0, Δlat < 0) yields exactly 180
/// - due north, and identical points, yield exactly 0
#[inline]
pub fn bearing_and_distance(from: &GeoPoint, to: &GeoPoint) -> Bearing {
    Bearing {
        azimuth_deg: planar_azimuth(from, to),
        distance_m: haversine_distance(from, to),
    }
}

/// Planar azimuth from `from` to `to`, in degrees.
pub fn planar_azimuth(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let dlon = to.longitude() - from.longitude();
    let dlat = to.latitude() - from.latitude();

    let radians = if dlon > 0.0 {
        FRAC_PI_2 - (dlat / dlon).atan()
    } else if dlon < 0.0 {
        FRAC_PI_2 - (dlat / dlon).atan() + std::f64::consts::PI
    } else if dlat < 0.0 {
        std::f64::consts::PI
    } else {
        0.0
    };

    let degrees = radians.to_degrees();
    // atan saturates for extreme ratios; keep the result in [0, 360)
    if degrees >= 360.0 {
        degrees - 360.0
    } else {
        degrees
    }
}

/// Great-circle distance between two points in meters (haversine).
pub fn haversine_distance(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let delta_lat = (to.latitude() - from.latitude()).to_radians();
    let delta_lon = (to.longitude() - from.longitude()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Formats a distance the way markers label it.
///
/// Distances over 100 m are shown as `"%.2f km"`, everything else as
/// `"%.2f m"`.
pub fn format_distance(distance_m: f64) -> String {
    if distance_m > KILOMETRE_LABEL_THRESHOLD_M {
        format!("{:.2} km", distance_m / 1000.0)
    } else {
        format!("{:.2} m", distance_m)
    }
}

/// Normalize an angle to the `[0, 360)` range.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = ((degrees % 360.0) + 360.0) % 360.0;
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]`.
///
/// Handles wraparound (e.g., 359° to 1° is +2°, not -358°).
#[inline]
pub fn shortest_angle_delta(from: f64, to: f64) -> f64 {
    let delta = normalize_degrees(to - from);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}
