//! ARCompass CLI - Command-line interface
//!
//! A headless driver for the ARCompass library: computes bearings, lists
//! landmarks and replays heading samples through a live overlay session.

mod commands;
mod error;

use std::path::PathBuf;

use arcompass::config::config_file_path;
use arcompass::geo::GeoPoint;
use arcompass::heading::HeadingDeltaPolicy;
use arcompass::logging::{default_log_dir, default_log_file, init_logging};
use clap::{Parser, Subcommand};

use commands::common::{apply_overrides, load_config, ConfigOverrides};
use error::CliError;

#[derive(Parser)]
#[command(name = "arcompass")]
#[command(version, about = "Compass-relative landmark markers on an infinite heading strip", long_about = None)]
struct Cli {
    /// Configuration file (default: <config dir>/arcompass/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log file path (default: logs/arcompass.log)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Azimuth and distance from one position to another
    Bearing {
        /// Start position as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        from: GeoPoint,

        /// Target position as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        to: GeoPoint,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Bearing and distance to every configured landmark
    Landmarks {
        /// Device position as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        position: GeoPoint,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Replay heading samples through an overlay session
    Simulate {
        /// Device position as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        position: GeoPoint,

        /// Heading samples in degrees, comma separated
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        headings: Vec<f64>,

        /// Reported heading accuracy in degrees (negative = invalid)
        #[arg(long, default_value = "2", allow_hyphen_values = true)]
        accuracy: f64,

        /// Viewport width in pixels
        #[arg(long)]
        width: Option<f64>,

        /// Viewport height in pixels
        #[arg(long)]
        height: Option<f64>,

        /// Camera field of view in degrees
        #[arg(long)]
        fov: Option<f64>,

        /// Heading delta policy: raw or shortest
        #[arg(long)]
        policy: Option<HeadingDeltaPolicy>,

        /// Hide the compass scale
        #[arg(long)]
        no_scale: bool,

        /// Print one JSON snapshot per line
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let (log_dir, log_name) = match &cli.log_file {
        Some(path) => (
            path.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| default_log_file().to_string()),
        ),
        None => (default_log_dir(), default_log_file().to_string()),
    };
    let _guard = init_logging(&log_dir, &log_name, cli.verbose)
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    tracing::debug!(command = ?std::env::args().nth(1), "ARCompass CLI starting");

    match cli.command {
        Commands::Bearing { from, to, json } => commands::bearing::run(from, to, json),

        Commands::Landmarks { position, json } => {
            let config = load_config(cli.config.as_deref())?;
            commands::landmarks::run(&config, position, json)
        }

        Commands::Simulate {
            position,
            headings,
            accuracy,
            width,
            height,
            fov,
            policy,
            no_scale,
            json,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            apply_overrides(
                &mut config,
                &ConfigOverrides {
                    width,
                    height,
                    field_of_view: fov,
                    policy,
                    no_scale,
                },
            );
            commands::simulate::run(
                &config,
                commands::simulate::SimulateArgs {
                    position,
                    headings,
                    accuracy,
                    json,
                },
            )
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config_file_path);
            commands::init::run(&path, force)
        }
    }
}
