//! Configuration file handling for `<config_dir>/arcompass/config.ini`.
//!
//! Loads and saves overlay settings with sensible defaults. Parsing lives in
//! [`parser`], serialization in [`writer`].

mod parser;
mod writer;

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::geo::GeoPoint;
use crate::heading::{HeadingDeltaPolicy, DEFAULT_CALIBRATION_THRESHOLD_DEG};
use crate::poi::DEMO_LANDMARKS;
use crate::strip::{GeometryError, StripGeometry, DEFAULT_CONTENT_WIDTH};

/// Default viewport width (pixels).
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 375.0;

/// Default viewport height (pixels).
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 500.0;

/// Default horizontal camera field of view (degrees).
pub const DEFAULT_FIELD_OF_VIEW_DEG: f64 = 60.0;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Viewport settings that cannot form a strip
    #[error("Invalid viewport: {0}")]
    Geometry(#[from] GeometryError),

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

/// `[overlay]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySettings {
    pub display_compass_scale: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            display_compass_scale: true,
        }
    }
}

/// `[viewport]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportSettings {
    pub width: f64,
    pub height: f64,
    pub field_of_view: f64,
    pub content_width: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            field_of_view: DEFAULT_FIELD_OF_VIEW_DEG,
            content_width: DEFAULT_CONTENT_WIDTH,
        }
    }
}

/// `[heading]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingSettings {
    pub delta_policy: HeadingDeltaPolicy,
    pub calibration_threshold: f64,
}

impl Default for HeadingSettings {
    fn default() -> Self {
        Self {
            delta_policy: HeadingDeltaPolicy::default(),
            calibration_threshold: DEFAULT_CALIBRATION_THRESHOLD_DEG,
        }
    }
}

/// Full overlay configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayConfig {
    pub overlay: OverlaySettings,
    pub viewport: ViewportSettings,
    pub heading: HeadingSettings,
    /// `[landmarks]` entries in file order.
    pub landmarks: Vec<(String, GeoPoint)>,
}

impl OverlayConfig {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        parser::parse_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text)
            .map_err(|e| ConfigError::ReadError(ini::Error::Parse(e)))?;
        parser::parse_ini(&ini)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::DirectoryError)?;
        }

        let content = writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    /// Strip geometry described by the `[viewport]` section.
    pub fn strip_geometry(&self) -> Result<StripGeometry, ConfigError> {
        let viewport = &self.viewport;
        Ok(StripGeometry::new(
            viewport.width,
            viewport.height,
            viewport.field_of_view,
            viewport.content_width,
        )?)
    }

    /// Configured landmarks, or the built-in demo set when none are listed.
    pub fn landmarks_or_demo(&self) -> Vec<(String, GeoPoint)> {
        if self.landmarks.is_empty() {
            return DEMO_LANDMARKS
                .iter()
                .map(|(name, point)| (name.to_string(), *point))
                .collect();
        }
        self.landmarks.clone()
    }
}

/// Path to the config directory (`<config_dir>/arcompass`).
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("arcompass")
}

/// Path to the config file (`<config_dir>/arcompass/config.ini`).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OverlayConfig::default();

        assert!(config.overlay.display_compass_scale);
        assert_eq!(config.viewport.width, 375.0);
        assert_eq!(config.viewport.height, 500.0);
        assert_eq!(config.viewport.field_of_view, 60.0);
        assert_eq!(config.viewport.content_width, 4000.0);
        assert_eq!(config.heading.delta_policy, HeadingDeltaPolicy::Raw);
        assert_eq!(config.heading.calibration_threshold, 5.0);
        assert!(config.landmarks.is_empty());
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = OverlayConfig::load_from(&config_path).unwrap();
        assert_eq!(config, OverlayConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = OverlayConfig::default();
        config.overlay.display_compass_scale = false;
        config.viewport.width = 414.0;
        config.heading.delta_policy = HeadingDeltaPolicy::ShortestArc;
        config
            .landmarks
            .push(("Wawel Castle".to_string(), GeoPoint::new(50.054, 19.9354)));
        config.save_to(&config_path).unwrap();

        let loaded = OverlayConfig::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_demo_landmarks_when_none_configured() {
        let config = OverlayConfig::default();
        let landmarks = config.landmarks_or_demo();
        assert_eq!(landmarks.len(), 5);
        assert_eq!(landmarks[0].0, "Cracow Old Town");
    }

    #[test]
    fn test_configured_landmarks_replace_demo() {
        let mut config = OverlayConfig::default();
        config
            .landmarks
            .push(("Home".to_string(), GeoPoint::new(1.0, 2.0)));
        assert_eq!(config.landmarks_or_demo().len(), 1);
    }

    #[test]
    fn test_strip_geometry_from_defaults() {
        let geometry = OverlayConfig::default().strip_geometry().unwrap();
        assert_eq!(geometry.points_per_degree(), 6.25);
    }

    #[test]
    fn test_config_file_path_ends_with_app_dir() {
        let path = config_file_path();
        assert!(path.ends_with("arcompass/config.ini"));
    }
}
