//! Common types and utilities shared across CLI commands.

use std::path::Path;

use arcompass::config::OverlayConfig;
use arcompass::heading::HeadingDeltaPolicy;

use crate::error::CliError;

/// Viewport and heading overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub field_of_view: Option<f64>,
    pub policy: Option<HeadingDeltaPolicy>,
    pub no_scale: bool,
}

/// Load the configuration from `path`, or from the default location.
///
/// A missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<OverlayConfig, CliError> {
    let config = match path {
        Some(path) => OverlayConfig::load_from(path)?,
        None => OverlayConfig::load()?,
    };
    Ok(config)
}

/// Apply command-line overrides; CLI values take precedence over the file.
pub fn apply_overrides(config: &mut OverlayConfig, overrides: &ConfigOverrides) {
    if let Some(width) = overrides.width {
        config.viewport.width = width;
    }
    if let Some(height) = overrides.height {
        config.viewport.height = height;
    }
    if let Some(fov) = overrides.field_of_view {
        config.viewport.field_of_view = fov;
    }
    if let Some(policy) = overrides.policy {
        config.heading.delta_policy = policy;
    }
    if overrides.no_scale {
        config.overlay.display_compass_scale = false;
    }
}

/// Print one JSON document per line.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let line = serde_json::to_string(value).map_err(|e| CliError::Output(e.to_string()))?;
    println!("{}", line);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcompass::config::ConfigError;
    use arcompass::strip::GeometryError;

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = OverlayConfig::default();
        let overrides = ConfigOverrides {
            width: Some(800.0),
            field_of_view: Some(90.0),
            policy: Some(HeadingDeltaPolicy::ShortestArc),
            no_scale: true,
            ..Default::default()
        };

        apply_overrides(&mut config, &overrides);

        assert_eq!(config.viewport.width, 800.0);
        assert_eq!(config.viewport.height, 500.0);
        assert_eq!(config.viewport.field_of_view, 90.0);
        assert_eq!(config.heading.delta_policy, HeadingDeltaPolicy::ShortestArc);
        assert!(!config.overlay.display_compass_scale);
    }

    #[test]
    fn test_nan_fov_override_is_rejected() {
        let mut config = OverlayConfig::default();
        let overrides = ConfigOverrides {
            field_of_view: Some(f64::NAN),
            ..Default::default()
        };

        apply_overrides(&mut config, &overrides);

        assert!(matches!(
            config.strip_geometry(),
            Err(ConfigError::Geometry(GeometryError::NonFiniteFieldOfView(_)))
        ));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = load_config(Some(&temp_dir.path().join("none.ini"))).unwrap();
        assert_eq!(config, OverlayConfig::default());
    }
}
