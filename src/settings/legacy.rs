//! Migration of legacy spectrogram settings.
//!
//! Early clip views described spectrograms with raw sample counts and a
//! flat list of display options. These are translated into the current
//! shape once, when settings are loaded.

use serde::{Deserialize, Serialize};

use super::{
    ComputationSettings, ConfigurationError, DisplaySettings, SpectrogramSettings,
    WindowSettings, DEFAULT_COLORMAP, DEFAULT_FREQUENCY_RANGE,
};
use crate::analysis::params::power_of_two_ceil;

/// Legacy spectrogram settings, sizes in samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySpectrogramSettings {
    pub window_size: usize,
    pub hop_size: usize,
    pub dft_size: usize,
    #[serde(default)]
    pub reference_power: Option<f64>,
    pub low_power: f64,
    pub high_power: f64,
    #[serde(default)]
    pub smoothing_enabled: bool,
}

/// Translate legacy settings into the current shape.
///
/// Legacy views always used a Hann window and a reversed gray colormap.
pub fn legacy_to_current(
    old: &LegacySpectrogramSettings,
    sample_rate: f64,
) -> Result<SpectrogramSettings, ConfigurationError> {
    if !(sample_rate > 0.0) {
        return Err(ConfigurationError::NonPositiveSampleRate(sample_rate));
    }
    if old.window_size == 0 {
        return Err(ConfigurationError::EmptyWindow(0.0));
    }

    let window_size = old.window_size as f64;
    let window_ceil = power_of_two_ceil(old.window_size)
        .ok_or(ConfigurationError::WindowTooLong(window_size / sample_rate))?;

    let computation = ComputationSettings {
        window: WindowSettings {
            window_type: "Hann".to_string(),
            size: window_size / sample_rate,
        },
        hop_size: 100.0 * old.hop_size as f64 / window_size,
        spectral_interpolation_factor: old.dft_size as f64 / window_ceil as f64,
        reference_power: old.reference_power,
    };

    let display = DisplaySettings {
        frequency_range: Some(DEFAULT_FREQUENCY_RANGE),
        power_range: [old.low_power, old.high_power],
        colormap: DEFAULT_COLORMAP.to_string(),
        reverse_colormap: true,
        smooth_image: old.smoothing_enabled,
    };

    Ok(SpectrogramSettings {
        computation,
        display,
        overlays: Vec::new(),
    })
}
