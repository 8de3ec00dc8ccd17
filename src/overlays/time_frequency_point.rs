//! Crosshair marker at an annotated time and frequency.

use image::Rgba;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Overlay, OverlayContext, OverlayType};
use crate::render::{freq_to_view_row, time_to_view_column, DrawingSurface, Rect};
use crate::settings::ConfigurationError;

/// Settings of a time-frequency point overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeFrequencyPointSettings {
    /// Clip annotation holding the point time, in seconds from clip start
    pub time_annotation_name: String,
    /// Clip annotation holding the point frequency, in Hz
    pub frequency_annotation_name: String,
    /// Marker color as `#RRGGBB` or `#RRGGBBAA`, composited over the view
    pub color: String,
    /// Crosshair arm length in pixels
    pub marker_size: f64,
    pub line_width: f64,
}

impl Default for TimeFrequencyPointSettings {
    fn default() -> Self {
        Self {
            time_annotation_name: "Time".to_string(),
            frequency_annotation_name: "Frequency".to_string(),
            color: "#FF0000".to_string(),
            marker_size: 11.0,
            line_width: 1.0,
        }
    }
}

/// Draws a crosshair at the point given by two clip annotations.
///
/// Clips lacking either annotation, or whose annotation values are not
/// numbers, are left unmarked.
#[derive(Debug, Clone)]
pub struct TimeFrequencyPointOverlay {
    settings: TimeFrequencyPointSettings,
    color: Rgba<u8>,
}

impl TimeFrequencyPointOverlay {
    pub fn new(settings: TimeFrequencyPointSettings) -> Result<Self, ConfigurationError> {
        let color = parse_hex_color(&settings.color)
            .ok_or_else(|| ConfigurationError::InvalidColor(settings.color.clone()))?;
        Ok(Self { settings, color })
    }

    /// Build from a settings list entry. The `type` field is ignored.
    pub fn from_settings(value: &Value) -> Result<Self, ConfigurationError> {
        let settings = TimeFrequencyPointSettings::deserialize(value).map_err(|source| {
            ConfigurationError::MalformedOverlay {
                overlay_type: OverlayType::TimeFrequencyPoint.name().to_string(),
                source,
            }
        })?;
        Self::new(settings)
    }

    pub fn settings(&self) -> &TimeFrequencyPointSettings {
        &self.settings
    }
}

impl Overlay for TimeFrequencyPointOverlay {
    fn overlay_type(&self) -> OverlayType {
        OverlayType::TimeFrequencyPoint
    }

    fn render(&self, context: &OverlayContext<'_>, surface: &mut dyn DrawingSurface) {
        let clip = context.clip;
        let time = clip.numeric_annotation(&self.settings.time_annotation_name);
        let freq = clip.numeric_annotation(&self.settings.frequency_annotation_name);
        let (Some(time), Some(freq)) = (time, freq) else {
            return;
        };

        let (low_freq, high_freq) = context.frequency_range;
        let x = time_to_view_column(time, clip.span(), surface.width() as f64);
        let y = freq_to_view_row(freq, low_freq, high_freq, surface.height() as f64);

        let size = self.settings.marker_size;
        let line_width = self.settings.line_width;
        surface.fill_rect(
            Rect::new(x - size / 2.0, y - line_width / 2.0, size, line_width),
            self.color,
        );
        surface.fill_rect(
            Rect::new(x - line_width / 2.0, y - size / 2.0, line_width, size),
            self.color,
        );
    }
}

/// Parse hex color string (`#RRGGBB` or `#RRGGBBAA`) to RGBA.
fn parse_hex_color(hex: &str) -> Option<Rgba<u8>> {
    let hex = hex.trim_start_matches('#');
    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    let a = match hex.get(6..8) {
        Some(a) => u8::from_str_radix(a, 16).ok()?,
        None => 255,
    };
    Some(Rgba([r, g, b, a]))
}
