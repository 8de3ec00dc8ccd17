//! Spectrogram clip view settings.
//!
//! Settings arrive as JSON from the host. Two shapes are accepted:
//! - the current shape, with `computation`, `display`, and `overlays`
//! - the legacy shape, with raw sample counts and power bounds, which is
//!   migrated once at load time (see [`legacy`])

pub mod legacy;

pub use legacy::{legacy_to_current, LegacySpectrogramSettings};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reference power used when none is configured.
pub const DEFAULT_REFERENCE_POWER: f64 = 1e-10;

/// Frequency range assigned to migrated legacy settings, in Hz.
pub const DEFAULT_FREQUENCY_RANGE: [f64; 2] = [0.0, 12000.0];

/// Colormap used when none is configured.
pub const DEFAULT_COLORMAP: &str = "Gray";

/// Errors raised for invalid spectrogram settings.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Window duration must be non-negative, got {0} s")]
    NegativeWindowDuration(f64),

    #[error("Window of {0} s contains no samples")]
    EmptyWindow(f64),

    #[error("Window of {0} s is too long")]
    WindowTooLong(f64),

    #[error("Spectral interpolation factor {0} makes the DFT too large")]
    InterpolationFactorTooLarge(f64),

    #[error("Hop size must be non-negative, got {0}%")]
    NegativeHopSize(f64),

    #[error("Hop size of {0}% rounds to zero samples")]
    ZeroHopSize(f64),

    #[error("Sample rate must be positive, got {0} Hz")]
    NonPositiveSampleRate(f64),

    #[error("Reference power must be positive, got {0}")]
    NonPositiveReferencePower(f64),

    #[error("Unrecognized window type \"{0}\"")]
    UnknownWindowType(String),

    #[error("Unrecognized colormap \"{0}\"")]
    UnknownColormap(String),

    #[error("Power range [{0}, {1}] is degenerate")]
    DegeneratePowerRange(f64, f64),

    #[error("Frequency range [{0}, {1}] is invalid")]
    InvalidFrequencyRange(f64, f64),

    #[error("Invalid color \"{0}\"")]
    InvalidColor(String),

    #[error("Malformed {overlay_type} settings: {source}")]
    MalformedOverlay {
        overlay_type: String,
        source: serde_json::Error,
    },

    #[error("Malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Data window selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Window type name, e.g. "Hann"
    #[serde(rename = "type")]
    pub window_type: String,
    /// Window duration in seconds
    pub size: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            window_type: "Hann".to_string(),
            size: 0.005,
        }
    }
}

/// High-level spectrogram computation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputationSettings {
    pub window: WindowSettings,
    /// Hop size as a percentage of the window size
    pub hop_size: f64,
    /// DFT size multiplier, honored only for integer powers of two above one
    pub spectral_interpolation_factor: f64,
    /// Reference power for decibel conversion; `None` selects the default
    pub reference_power: Option<f64>,
}

impl Default for ComputationSettings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            hop_size: 50.0,
            spectral_interpolation_factor: 1.0,
            reference_power: None,
        }
    }
}

/// Spectrogram display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    /// View frequency range in Hz; `None` shows zero through Nyquist
    pub frequency_range: Option<[f64; 2]>,
    /// Power range mapped onto the colormap, in decibels
    pub power_range: [f64; 2],
    pub colormap: String,
    pub reverse_colormap: bool,
    /// Interpolate when stretching the spectrogram image
    pub smooth_image: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            frequency_range: None,
            power_range: [10.0, 80.0],
            colormap: DEFAULT_COLORMAP.to_string(),
            reverse_colormap: true,
            smooth_image: true,
        }
    }
}

impl DisplaySettings {
    /// Check the numeric ranges.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let [low_power, high_power] = self.power_range;
        if !low_power.is_finite() || !high_power.is_finite() || low_power == high_power {
            return Err(ConfigurationError::DegeneratePowerRange(low_power, high_power));
        }

        if let Some([low, high]) = self.frequency_range {
            if !low.is_finite() || !high.is_finite() || low < 0.0 || low >= high {
                return Err(ConfigurationError::InvalidFrequencyRange(low, high));
            }
        }

        Ok(())
    }

    /// View frequency range for a clip with the given Nyquist frequency.
    pub fn view_frequency_range(&self, nyquist: f64) -> (f64, f64) {
        match self.frequency_range {
            Some([low, high]) => (low, high),
            None => (0.0, nyquist),
        }
    }
}

/// Complete spectrogram settings in the current shape.
///
/// Overlay entries are kept as raw JSON; their `type` field selects the
/// overlay implementation when the view is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrogramSettings {
    pub computation: ComputationSettings,
    pub display: DisplaySettings,
    pub overlays: Vec<serde_json::Value>,
}

impl SpectrogramSettings {
    /// Parse settings from JSON, migrating the legacy shape if needed.
    ///
    /// The legacy shape is recognized by its lack of a `computation` field.
    /// Migration needs the clip sample rate since legacy sizes are in
    /// samples.
    pub fn from_json_value(
        value: serde_json::Value,
        sample_rate: f64,
    ) -> Result<Self, ConfigurationError> {
        if value.get("computation").is_some() {
            return Ok(serde_json::from_value(value)?);
        }

        let old: LegacySpectrogramSettings = serde_json::from_value(value)?;
        let settings = legacy_to_current(&old, sample_rate)?;
        log::info!(
            "Migrated legacy spectrogram settings (window {} samples, hop {} samples)",
            old.window_size,
            old.hop_size
        );
        Ok(settings)
    }

    /// Parse settings from a JSON string.
    pub fn from_json_str(json: &str, sample_rate: f64) -> Result<Self, ConfigurationError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value, sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_current_shape_parses_with_defaults() {
        let value = json!({
            "computation": {
                "window": { "type": "Hamming", "size": 0.01 },
                "hopSize": 25
            },
            "display": { "powerRange": [-10, 0], "reverseColormap": false }
        });

        let settings = SpectrogramSettings::from_json_value(value, 22050.0).unwrap();
        assert_eq!(settings.computation.window.window_type, "Hamming");
        assert_eq!(settings.computation.hop_size, 25.0);
        assert_eq!(settings.computation.spectral_interpolation_factor, 1.0);
        assert_eq!(settings.computation.reference_power, None);
        assert_eq!(settings.display.power_range, [-10.0, 0.0]);
        assert!(!settings.display.reverse_colormap);
        assert_eq!(settings.display.colormap, "Gray");
        assert!(settings.overlays.is_empty());
    }

    #[test]
    fn test_partial_window_takes_default_size() {
        let value = json!({ "computation": { "window": { "type": "Hamming" } } });
        let settings = SpectrogramSettings::from_json_value(value, 22050.0).unwrap();
        assert_eq!(settings.computation.window.window_type, "Hamming");
        assert_eq!(settings.computation.window.size, WindowSettings::default().size);

        let value = json!({ "computation": { "window": { "size": 0.02 } } });
        let settings = SpectrogramSettings::from_json_value(value, 22050.0).unwrap();
        assert_eq!(settings.computation.window.window_type, "Hann");
    }

    #[test]
    fn test_malformed_json_is_configuration_error() {
        let err = SpectrogramSettings::from_json_str("{ not json", 22050.0).unwrap_err();
        assert!(matches!(err, ConfigurationError::Json(_)));
    }

    #[test]
    fn test_display_validation() {
        let mut display = DisplaySettings::default();
        assert!(display.validate().is_ok());

        display.power_range = [5.0, 5.0];
        assert!(matches!(
            display.validate(),
            Err(ConfigurationError::DegeneratePowerRange(_, _))
        ));

        display.power_range = [0.0, 100.0];
        display.frequency_range = Some([4000.0, 1000.0]);
        assert!(matches!(
            display.validate(),
            Err(ConfigurationError::InvalidFrequencyRange(_, _))
        ));
    }

    #[test]
    fn test_view_frequency_range_defaults_to_nyquist() {
        let mut display = DisplaySettings::default();
        assert_eq!(display.view_frequency_range(11025.0), (0.0, 11025.0));

        display.frequency_range = Some([0.0, 12000.0]);
        assert_eq!(display.view_frequency_range(4000.0), (0.0, 12000.0));
    }
}
