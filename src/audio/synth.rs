//! Synthetic clip signals for tests, benches, and demos.

use std::f32::consts::PI;

/// Generate a sine tone.
///
/// # Arguments
/// * `frequency` - Frequency in Hz
/// * `sample_rate` - Sample rate in Hz
/// * `duration` - Duration in seconds
/// * `amplitude` - Peak amplitude (0.0 to 1.0)
pub fn generate_sine(frequency: f32, sample_rate: f32, duration: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (duration * sample_rate) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate;
            amplitude * (2.0 * PI * frequency * t).sin()
        })
        .collect()
}

/// Generate a cosine whose frequency falls exactly on DFT bin `bin` of a
/// `dft_size`-point transform.
///
/// With a rectangular window of `dft_size` samples all of the signal's
/// energy lands in that single bin, which makes expected spectra simple.
pub fn generate_bin_cosine(num_samples: usize, dft_size: usize, bin: usize) -> Vec<f32> {
    let phase_factor = 2.0 * std::f64::consts::PI * bin as f64 / dft_size as f64;
    (0..num_samples)
        .map(|n| (phase_factor * n as f64).cos() as f32)
        .collect()
}

/// Generate a linear chirp sweeping from `start_freq` to `end_freq`.
///
/// Chirps resemble the short frequency-modulated calls a clip view is
/// usually pointed at.
pub fn generate_chirp(
    start_freq: f32,
    end_freq: f32,
    sample_rate: f32,
    duration: f32,
    amplitude: f32,
) -> Vec<f32> {
    let num_samples = (duration * sample_rate) as usize;
    let rate = if duration > 0.0 {
        (end_freq - start_freq) / duration
    } else {
        0.0
    };

    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate;
            let phase = 2.0 * PI * (start_freq * t + 0.5 * rate * t * t);
            amplitude * phase.sin()
        })
        .collect()
}

/// Generate white noise.
///
/// Uses a simple linear congruential generator for reproducibility.
pub fn generate_white_noise(
    sample_rate: f32,
    duration: f32,
    amplitude: f32,
    seed: u64,
) -> Vec<f32> {
    let num_samples = (duration * sample_rate) as usize;

    let mut state = seed;
    let a: u64 = 6364136223846793005;
    let c: u64 = 1442695040888963407;

    (0..num_samples)
        .map(|_| {
            state = state.wrapping_mul(a).wrapping_add(c);
            let normalized = (state as f32 / u64::MAX as f32) * 2.0 - 1.0;
            amplitude * normalized
        })
        .collect()
}
