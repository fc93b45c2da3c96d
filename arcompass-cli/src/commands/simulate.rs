//! Simulate command - replay heading samples through a live overlay session.
//!
//! A position update is sent first so markers have something to measure
//! from, then each heading is forwarded through a [`HeadingSynchronizer`] and
//! the snapshot published in response is printed.

use arcompass::config::OverlayConfig;
use arcompass::geo::GeoPoint;
use arcompass::heading::{HeadingSample, HeadingSynchronizer, SharedHeadingService};
use arcompass::session::{self, OverlaySession, SessionError, StripSnapshot};
use serde::Serialize;
use tokio::sync::watch;

use super::common::print_json;
use crate::error::CliError;

/// Arguments for the simulate command.
pub struct SimulateArgs {
    pub position: GeoPoint,
    pub headings: Vec<f64>,
    pub accuracy: f64,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Step<'a> {
    heading: f64,
    calibration_recommended: bool,
    snapshot: &'a StripSnapshot,
}

/// Run the simulate command.
pub fn run(config: &OverlayConfig, args: SimulateArgs) -> Result<(), CliError> {
    if args.headings.is_empty() {
        return Err(CliError::InvalidArgument(
            "at least one heading is required".to_string(),
        ));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|e| CliError::Output(format!("failed to start runtime: {}", e)))?;

    runtime.block_on(replay(config, args))
}

async fn next_snapshot(
    snapshots: &mut watch::Receiver<StripSnapshot>,
) -> Result<StripSnapshot, CliError> {
    snapshots
        .changed()
        .await
        .map_err(|_| CliError::Session(SessionError::Closed))?;
    Ok(snapshots.borrow_and_update().clone())
}

async fn replay(config: &OverlayConfig, args: SimulateArgs) -> Result<(), CliError> {
    let session = OverlaySession::from_config(config)?;
    let mut snapshots = session.subscribe();
    let (handle, rx) = session::channel();
    let task = session.start(rx);

    let service = SharedHeadingService::new();
    let sync = HeadingSynchronizer::new(handle, service.clone())
        .with_calibration_threshold(config.heading.calibration_threshold);

    sync.on_position_update(args.position)?;
    next_snapshot(&mut snapshots).await?;

    if !args.json {
        println!("Replaying {} heading samples from {}", args.headings.len(), args.position);
        println!();
    }

    for heading in args.headings {
        let sample = HeadingSample::new(heading, args.accuracy);
        service.record(sample);
        sync.on_heading_sample(sample)?;

        let snapshot = next_snapshot(&mut snapshots).await?;
        let step = Step {
            heading,
            calibration_recommended: sync.should_display_calibration(),
            snapshot: &snapshot,
        };

        if args.json {
            print_json(&step)?;
        } else {
            print_step(&step, config.viewport.width);
        }
    }

    drop(sync);
    task.await
        .map_err(|e| CliError::Output(format!("session task failed: {}", e)))?;
    Ok(())
}

fn print_step(step: &Step<'_>, viewport_width: f64) {
    let snapshot = step.snapshot;
    println!(
        "heading {:>7.2}°  offset {:>8.2}  segments {}{}",
        step.heading,
        snapshot.scroll_offset,
        snapshot.segments.len(),
        if step.calibration_recommended {
            "  (calibration recommended)"
        } else {
            ""
        }
    );

    for marker in snapshot.visible_markers(viewport_width) {
        println!(
            "    {:<28} {:>7.2}°  {:>12}  x={:.1}",
            marker.name, marker.azimuth_deg, marker.distance_label, marker.screen_x
        );
    }
}
