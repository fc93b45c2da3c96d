//! Init command - write a default configuration file.

use std::path::Path;

use arcompass::config::OverlayConfig;

use crate::error::CliError;

/// Run the init command.
///
/// An existing file is left alone unless `force` is set.
pub fn run(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    OverlayConfig::default().save_to(path)?;

    println!("Configuration file: {}", path.display());
    println!();
    println!("Edit this file to set the viewport, heading policy and landmarks.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
