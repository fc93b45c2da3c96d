//! Landmarks command - bearing and distance to every configured landmark.

use arcompass::config::OverlayConfig;
use arcompass::geo::{bearing_and_distance, format_distance, GeoPoint};
use serde::Serialize;

use super::common::print_json;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct LandmarkRow {
    name: String,
    location: GeoPoint,
    azimuth_deg: f64,
    distance_m: f64,
    distance_label: String,
}

fn rows(config: &OverlayConfig, position: &GeoPoint) -> Vec<LandmarkRow> {
    config
        .landmarks_or_demo()
        .into_iter()
        .map(|(name, location)| {
            let bearing = bearing_and_distance(position, &location);
            LandmarkRow {
                name,
                location,
                azimuth_deg: bearing.azimuth_deg,
                distance_m: bearing.distance_m,
                distance_label: format_distance(bearing.distance_m),
            }
        })
        .collect()
}

/// Run the landmarks command.
pub fn run(config: &OverlayConfig, position: GeoPoint, json: bool) -> Result<(), CliError> {
    let rows = rows(config, &position);

    if json {
        return print_json(&rows);
    }

    println!("Landmarks seen from {}:", position);
    println!();
    println!("  {:<28} {:>10} {:>14}", "NAME", "AZIMUTH", "DISTANCE");
    for row in &rows {
        println!(
            "  {:<28} {:>9.2}° {:>14}",
            row.name, row.azimuth_deg, row.distance_label
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_demo_order() {
        let config = OverlayConfig::default();
        let rows = rows(&config, &GeoPoint::new(50.0, 20.0));

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].name, "Cracow Old Town");
        assert!(rows.iter().all(|r| (0.0..360.0).contains(&r.azimuth_deg)));
        assert!(rows[4].distance_label.ends_with(" km"));
    }
}
