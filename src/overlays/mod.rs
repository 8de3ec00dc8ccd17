//! Spectrogram view overlays.
//!
//! Overlays draw on top of a spectrogram after it has been painted. Each
//! overlay is configured by one entry of the settings `overlays` list, whose
//! `type` field selects the implementation.

mod time_frequency_point;

pub use time_frequency_point::{TimeFrequencyPointOverlay, TimeFrequencyPointSettings};

use serde_json::Value;

use crate::audio::Clip;
use crate::render::DrawingSurface;
use crate::settings::ConfigurationError;

/// Available overlay types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayType {
    TimeFrequencyPoint,
}

impl OverlayType {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Time-Frequency Point Overlay" => Some(Self::TimeFrequencyPoint),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TimeFrequencyPoint => "Time-Frequency Point Overlay",
        }
    }

    pub fn all() -> &'static [OverlayType] {
        &[Self::TimeFrequencyPoint]
    }
}

/// What an overlay needs to know about the view it draws on.
#[derive(Debug, Clone, Copy)]
pub struct OverlayContext<'a> {
    pub clip: &'a Clip,
    /// View frequency range in Hz, bottom edge first
    pub frequency_range: (f64, f64),
}

/// A drawing layer painted over the spectrogram.
pub trait Overlay: std::fmt::Debug {
    fn overlay_type(&self) -> OverlayType;

    /// Draw onto the surface. The surface already holds the spectrogram.
    fn render(&self, context: &OverlayContext<'_>, surface: &mut dyn DrawingSurface);
}

/// Create an overlay from its settings entry.
///
/// Returns `Ok(None)` for entries whose type is missing or unrecognized.
pub fn create_overlay(settings: &Value) -> Result<Option<Box<dyn Overlay>>, ConfigurationError> {
    let Some(overlay_type) = settings
        .get("type")
        .and_then(Value::as_str)
        .and_then(OverlayType::from_str)
    else {
        return Ok(None);
    };

    let overlay: Box<dyn Overlay> = match overlay_type {
        OverlayType::TimeFrequencyPoint => {
            Box::new(TimeFrequencyPointOverlay::from_settings(settings)?)
        }
    };
    Ok(Some(overlay))
}

/// Create overlays for a settings list, in order.
///
/// Entries of unrecognized type are logged and skipped.
pub fn create_overlays(settings: &[Value]) -> Result<Vec<Box<dyn Overlay>>, ConfigurationError> {
    let mut overlays = Vec::with_capacity(settings.len());
    for entry in settings {
        match create_overlay(entry)? {
            Some(overlay) => overlays.push(overlay),
            None => log::warn!(
                "Unrecognized spectrogram view overlay type {}",
                entry.get("type").unwrap_or(&Value::Null)
            ),
        }
    }
    Ok(overlays)
}
