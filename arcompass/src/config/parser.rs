//! INI parsing logic for converting `Ini` → `OverlayConfig`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use tracing::warn;

use super::{ConfigError, OverlayConfig};
use crate::geo::GeoPoint;
use crate::strip::MAX_FIELD_OF_VIEW_DEG;

fn invalid(section: &str, key: &str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_bool(section: &str, key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(invalid(section, key, value, "expected true or false")),
    }
}

fn parse_f64(section: &str, key: &str, value: &str) -> Result<f64, ConfigError> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, "expected a number"))?;
    if !parsed.is_finite() {
        return Err(invalid(section, key, value, "must be finite"));
    }
    Ok(parsed)
}

/// Parse an `Ini` object into an `OverlayConfig`.
///
/// Starts from `OverlayConfig::default()` and overlays any values found.
pub(super) fn parse_ini(ini: &Ini) -> Result<OverlayConfig, ConfigError> {
    let mut config = OverlayConfig::default();

    // [overlay] section
    if let Some(section) = ini.section(Some("overlay")) {
        if let Some(v) = section.get("display_compass_scale") {
            config.overlay.display_compass_scale =
                parse_bool("overlay", "display_compass_scale", v)?;
        }
    }

    // [viewport] section
    if let Some(section) = ini.section(Some("viewport")) {
        if let Some(v) = section.get("width") {
            let width = parse_f64("viewport", "width", v)?;
            if width <= 0.0 {
                return Err(invalid("viewport", "width", v, "must be positive"));
            }
            config.viewport.width = width;
        }
        if let Some(v) = section.get("height") {
            let height = parse_f64("viewport", "height", v)?;
            if height <= 0.0 {
                return Err(invalid("viewport", "height", v, "must be positive"));
            }
            config.viewport.height = height;
        }
        if let Some(v) = section.get("field_of_view") {
            let fov = parse_f64("viewport", "field_of_view", v)?;
            if fov > MAX_FIELD_OF_VIEW_DEG {
                return Err(invalid(
                    "viewport",
                    "field_of_view",
                    v,
                    format!("must not exceed {}", MAX_FIELD_OF_VIEW_DEG),
                ));
            }
            if fov <= 0.0 {
                warn!(
                    field_of_view = fov,
                    "Non-positive field of view configured, markers will collapse to a point"
                );
            }
            config.viewport.field_of_view = fov;
        }
        if let Some(v) = section.get("content_width") {
            config.viewport.content_width = parse_f64("viewport", "content_width", v)?;
        }
    }

    if config.viewport.content_width <= config.viewport.width {
        return Err(invalid(
            "viewport",
            "content_width",
            &config.viewport.content_width.to_string(),
            "must be wider than the viewport",
        ));
    }

    // [heading] section
    if let Some(section) = ini.section(Some("heading")) {
        if let Some(v) = section.get("delta_policy") {
            config.heading.delta_policy = v
                .parse()
                .map_err(|e| invalid("heading", "delta_policy", v, format!("{}", e)))?;
        }
        if let Some(v) = section.get("calibration_threshold") {
            let threshold = parse_f64("heading", "calibration_threshold", v)?;
            if threshold < 0.0 {
                return Err(invalid(
                    "heading",
                    "calibration_threshold",
                    v,
                    "must not be negative",
                ));
            }
            config.heading.calibration_threshold = threshold;
        }
    }

    // [landmarks] section: name = lat,lon
    if let Some(section) = ini.section(Some("landmarks")) {
        for (name, value) in section.iter() {
            let point: GeoPoint = value
                .parse()
                .map_err(|e| invalid("landmarks", name, value, format!("{}", e)))?;
            config.landmarks.push((name.trim().to_string(), point));
        }
    }

    Ok(config)
}
