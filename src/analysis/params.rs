//! Resolution of high-level computation settings into analysis parameters.

use super::window::{DataWindow, WindowType};
use crate::settings::{ComputationSettings, ConfigurationError, DEFAULT_REFERENCE_POWER};

/// Largest DFT size, and so the longest window in samples, that resolves.
pub const MAX_DFT_SIZE: usize = 1 << 24;

/// Low-level spectrogram analysis parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    /// Data window; its length is the rounded window size
    pub window: DataWindow,
    /// Window size in samples before rounding, used for frame timing
    pub exact_window_length: f64,
    /// Hop size in samples
    pub hop_size: usize,
    /// DFT size, always a power of two at least the window length
    pub dft_size: usize,
    /// Reference power for decibel conversion
    pub reference_power: f64,
}

impl AnalysisParams {
    /// Number of frequency bins per spectrum (DC through Nyquist).
    pub fn num_bins(&self) -> usize {
        self.dft_size / 2 + 1
    }

    /// Number of spectra computed from `num_samples` samples.
    ///
    /// Zero when there are fewer samples than one window.
    pub fn num_spectra(&self, num_samples: usize) -> usize {
        let window_length = self.window.len();
        if num_samples < window_length || self.hop_size == 0 {
            0
        } else {
            (num_samples - window_length) / self.hop_size + 1
        }
    }
}

/// Resolve computation settings for a clip with the given sample rate.
///
/// # Errors
/// Returns a [`ConfigurationError`] for a negative window duration or hop
/// size, a window or hop that rounds to zero samples, a window or DFT longer
/// than [`MAX_DFT_SIZE`], a non-positive sample rate or reference power, or
/// an unknown window type.
pub fn resolve(
    settings: &ComputationSettings,
    sample_rate: f64,
) -> Result<AnalysisParams, ConfigurationError> {
    if !(sample_rate > 0.0) || !sample_rate.is_finite() {
        return Err(ConfigurationError::NonPositiveSampleRate(sample_rate));
    }

    let duration = settings.window.size;
    if !(duration >= 0.0) {
        return Err(ConfigurationError::NegativeWindowDuration(duration));
    }

    let hop_percent = settings.hop_size;
    if !(hop_percent >= 0.0) {
        return Err(ConfigurationError::NegativeHopSize(hop_percent));
    }

    let window_type = WindowType::parse(&settings.window.window_type)?;

    let exact_window_length = duration * sample_rate;
    if !(exact_window_length <= MAX_DFT_SIZE as f64) {
        return Err(ConfigurationError::WindowTooLong(duration));
    }
    let window_length = exact_window_length.round_ties_even() as usize;
    if window_length == 0 {
        return Err(ConfigurationError::EmptyWindow(duration));
    }

    let hop_size = (hop_percent / 100.0 * exact_window_length).round_ties_even() as usize;
    if hop_size == 0 {
        return Err(ConfigurationError::ZeroHopSize(hop_percent));
    }

    let factor = settings.spectral_interpolation_factor;
    let dft_size = dft_size(window_length, factor)
        .ok_or(ConfigurationError::InterpolationFactorTooLarge(factor))?;
    let reference_power = reference_power(settings.reference_power)?;

    Ok(AnalysisParams {
        window: DataWindow::new(window_type, window_length),
        exact_window_length,
        hop_size,
        dft_size,
        reference_power,
    })
}

/// DFT size for a window length and spectral interpolation factor.
///
/// The factor applies only when it is an integer power of two greater than
/// one; any other factor falls back to the bare power-of-two ceiling.
/// Returns `None` when the size would exceed [`MAX_DFT_SIZE`].
pub fn dft_size(window_length: usize, interpolation_factor: f64) -> Option<usize> {
    let ceil = power_of_two_ceil(window_length)?;

    let f = interpolation_factor;
    let usable = f.is_finite() && f.fract() == 0.0 && f > 1.0 && (f as u64).is_power_of_two();

    let size = if usable {
        ceil.checked_mul(usize::try_from(f as u64).ok()?)?
    } else {
        ceil
    };
    (size <= MAX_DFT_SIZE).then_some(size)
}

/// Smallest positive power of two that is at least `n`, or `None` on overflow.
pub fn power_of_two_ceil(n: usize) -> Option<usize> {
    n.max(1).checked_next_power_of_two()
}

fn reference_power(configured: Option<f64>) -> Result<f64, ConfigurationError> {
    match configured {
        None => Ok(DEFAULT_REFERENCE_POWER),
        Some(p) if p > 0.0 && p.is_finite() => Ok(p),
        Some(p) => Err(ConfigurationError::NonPositiveReferencePower(p)),
    }
}
