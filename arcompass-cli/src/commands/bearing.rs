//! Bearing command - azimuth and distance between two positions.

use arcompass::geo::{bearing_and_distance, format_distance, GeoPoint};
use serde::Serialize;

use super::common::print_json;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct BearingOutput {
    from: GeoPoint,
    to: GeoPoint,
    azimuth_deg: f64,
    distance_m: f64,
    distance_label: String,
}

/// Run the bearing command.
pub fn run(from: GeoPoint, to: GeoPoint, json: bool) -> Result<(), CliError> {
    let bearing = bearing_and_distance(&from, &to);
    let output = BearingOutput {
        from,
        to,
        azimuth_deg: bearing.azimuth_deg,
        distance_m: bearing.distance_m,
        distance_label: format_distance(bearing.distance_m),
    };

    if json {
        return print_json(&output);
    }

    println!("From:     {}", output.from);
    println!("To:       {}", output.to);
    println!("Azimuth:  {:.2}°", output.azimuth_deg);
    println!("Distance: {}", output.distance_label);
    Ok(())
}
