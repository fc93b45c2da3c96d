//! INI serialization logic for converting `OverlayConfig` → INI string.

use super::OverlayConfig;

/// Convert an `OverlayConfig` to a commented INI string for saving.
pub(super) fn to_config_string(config: &OverlayConfig) -> String {
    let landmarks: String = config
        .landmarks
        .iter()
        // Shortest round-trip form; GeoPoint's Display rounds to 6 places
        .map(|(name, point)| format!("{} = {},{}\n", name, point.latitude(), point.longitude()))
        .collect();

    format!(
        r#"[overlay]
; Draw the 0-350 degree compass scale under the markers
display_compass_scale = {}

[viewport]
; Viewport size in pixels
width = {}
height = {}
; Horizontal camera field of view in degrees (0 collapses the layout)
field_of_view = {}
; Scrollable content span in pixels; must be wider than the viewport
content_width = {}

[heading]
; How heading changes are turned into scroll distance:
;   raw      - plain subtraction (crossing north scrolls a full turn)
;   shortest - shortest arc between the two headings
delta_policy = {}
; Compass accuracy in degrees above which calibration is suggested
calibration_threshold = {}

[landmarks]
; name = latitude,longitude
; Leave empty to use the built-in demo landmarks
{}"#,
        config.overlay.display_compass_scale,
        config.viewport.width,
        config.viewport.height,
        config.viewport.field_of_view,
        config.viewport.content_width,
        config.heading.delta_policy,
        config.heading.calibration_threshold,
        landmarks,
    )
}
