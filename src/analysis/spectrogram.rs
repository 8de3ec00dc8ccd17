//! Spectrogram computation using RustFFT.
//!
//! A spectrogram is the squared magnitude of the short-time Fourier
//! transform, stored in decibels relative to a reference power.

use rustfft::{num_complex::Complex, FftPlanner};

use super::params::AnalysisParams;
use super::power::linear_to_log;

/// Flattened spectrogram powers, frame-major.
///
/// Value `(frame, bin)` lives at `frame * num_bins + bin`. Bin 0 is DC.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerArray {
    values: Vec<f32>,
    num_bins: usize,
    num_spectra: usize,
}

impl PowerArray {
    /// Allocate zeroed storage for `num_spectra` spectra of `num_bins` bins.
    pub fn zeroed(num_bins: usize, num_spectra: usize) -> Self {
        Self {
            values: vec![0.0; num_bins * num_spectra],
            num_bins,
            num_spectra,
        }
    }

    /// Wrap existing frame-major values.
    ///
    /// Returns `None` unless `values.len() == num_bins * num_spectra`.
    pub fn from_values(values: Vec<f32>, num_bins: usize, num_spectra: usize) -> Option<Self> {
        (values.len() == num_bins * num_spectra).then_some(Self {
            values,
            num_bins,
            num_spectra,
        })
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    pub fn num_spectra(&self) -> usize {
        self.num_spectra
    }

    pub fn is_empty(&self) -> bool {
        self.num_spectra == 0
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Power of one bin of one spectrum.
    pub fn get(&self, spectrum: usize, bin: usize) -> Option<f32> {
        if spectrum < self.num_spectra && bin < self.num_bins {
            Some(self.values[spectrum * self.num_bins + bin])
        } else {
            None
        }
    }

    /// All bins of one spectrum.
    pub fn spectrum(&self, index: usize) -> Option<&[f32]> {
        if index >= self.num_spectra {
            return None;
        }
        let start = index * self.num_bins;
        Some(&self.values[start..start + self.num_bins])
    }

    /// Iterate over spectra in time order.
    pub fn spectra(&self) -> impl Iterator<Item = &[f32]> {
        self.values.chunks_exact(self.num_bins.max(1))
    }
}

/// Compute the spectrogram powers of `samples`.
///
/// Frames start at offset zero and advance by the hop size. Each frame is
/// windowed, zero-padded to the DFT size, and transformed. Powers are scaled
/// so that, for a rectangular window, a spectrum's bins sum to the frame's
/// energy, then converted to decibels relative to the reference power.
///
/// Fewer samples than one window yield an empty array.
pub fn compute_spectrogram(samples: &[f32], params: &AnalysisParams) -> PowerArray {
    let num_bins = params.num_bins();
    let num_spectra = params.num_spectra(samples.len());
    let mut powers = PowerArray::zeroed(num_bins, num_spectra);

    if num_spectra == 0 {
        return powers;
    }

    let dft_size = params.dft_size;
    let window = params.window.samples();
    let window_length = window.len();

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(dft_size);
    let mut buffer = vec![Complex::new(0.0f32, 0.0); dft_size];
    let mut scratch = vec![Complex::new(0.0f32, 0.0); fft.get_inplace_scratch_len()];

    let scale = 2.0 / dft_size as f32;

    for (i, spectrum) in powers.values.chunks_exact_mut(num_bins).enumerate() {
        let start = i * params.hop_size;
        let frame = &samples[start..start + window_length];

        for (slot, (s, w)) in buffer.iter_mut().zip(frame.iter().zip(window)) {
            *slot = Complex::new(s * w, 0.0);
        }
        buffer[window_length..].fill(Complex::new(0.0, 0.0));

        fft.process_with_scratch(&mut buffer, &mut scratch);

        for (p, c) in spectrum.iter_mut().zip(&buffer[..num_bins]) {
            *p = c.norm_sqr() * scale;
        }

        // DC and Nyquist have no negative-frequency partners.
        spectrum[0] *= 0.5;
        if num_bins > 1 {
            spectrum[num_bins - 1] *= 0.5;
        }
    }

    linear_to_log(&mut powers.values, params.reference_power);

    powers
}

/// A computed spectrogram with the metadata needed to place it in time
/// and frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    powers: PowerArray,
    sample_rate: f64,
    exact_window_length: f64,
    hop_size: usize,
    dft_size: usize,
}

impl Spectrogram {
    /// Compute the spectrogram of `samples` recorded at `sample_rate`.
    pub fn compute(samples: &[f32], sample_rate: f64, params: &AnalysisParams) -> Self {
        Self {
            powers: compute_spectrogram(samples, params),
            sample_rate,
            exact_window_length: params.exact_window_length,
            hop_size: params.hop_size,
            dft_size: params.dft_size,
        }
    }

    pub fn powers(&self) -> &PowerArray {
        &self.powers
    }

    pub fn num_bins(&self) -> usize {
        self.powers.num_bins()
    }

    pub fn num_spectra(&self) -> usize {
        self.powers.num_spectra()
    }

    /// Spectra per second.
    pub fn frame_rate(&self) -> f64 {
        self.sample_rate / self.hop_size as f64
    }

    /// Half the sample rate, the frequency of the last bin.
    pub fn max_freq(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Frequency spacing between adjacent bins in Hz.
    pub fn freq_spacing(&self) -> f64 {
        self.sample_rate / self.dft_size as f64
    }

    /// Center frequency of each bin in Hz.
    pub fn bin_freqs(&self) -> Vec<f64> {
        let spacing = self.freq_spacing();
        (0..self.num_bins()).map(|k| k as f64 * spacing).collect()
    }

    /// Time of each spectrum in seconds, measured at the window center.
    pub fn spectrum_times(&self) -> Vec<f64> {
        let offset = self.exact_window_length / 2.0 / self.sample_rate;
        let frame_rate = self.frame_rate();
        (0..self.num_spectra())
            .map(|i| offset + i as f64 / frame_rate)
            .collect()
    }

    /// Smallest power, or `None` when there are no spectra.
    pub fn min_value(&self) -> Option<f32> {
        self.powers.values().iter().copied().reduce(f32::min)
    }

    /// Largest power, or `None` when there are no spectra.
    pub fn max_value(&self) -> Option<f32> {
        self.powers.values().iter().copied().reduce(f32::max)
    }

    /// Bilinearly interpolated powers on the grid `times` x `freqs`.
    ///
    /// The result holds one spectrum per time with one value per frequency.
    /// Times and frequencies outside the spectrogram are clamped to its
    /// edges. Returns `None` when there are no spectra.
    pub fn interpolate(&self, times: &[f64], freqs: &[f64]) -> Option<PowerArray> {
        if self.powers.is_empty() {
            return None;
        }

        let start_time = self.exact_window_length / 2.0 / self.sample_rate;
        let spectrum_period = 1.0 / self.frame_rate();
        let freq_spacing = self.freq_spacing();

        let columns: Vec<_> = freqs
            .iter()
            .map(|&f| grid_position(f, 0.0, freq_spacing, self.num_bins()))
            .collect();

        let mut values = Vec::with_capacity(times.len() * freqs.len());
        for &t in times {
            let ((i0, i1), ti) = grid_position(t, start_time, spectrum_period, self.num_spectra());
            let s0 = self.powers.spectrum(i0)?;
            let s1 = self.powers.spectrum(i1)?;
            for &((k0, k1), tk) in &columns {
                let lerp = |s: &[f32]| f64::from(s[k0]) * (1.0 - tk) + f64::from(s[k1]) * tk;
                values.push((lerp(s0) * (1.0 - ti) + lerp(s1) * ti) as f32);
            }
        }

        PowerArray::from_values(values, freqs.len(), times.len())
    }
}

/// Neighboring indices and the fraction between them for `x` on a uniform
/// grid of `len` points, clamped to the grid.
fn grid_position(x: f64, start: f64, step: f64, len: usize) -> ((usize, usize), f64) {
    let last = len.saturating_sub(1);
    let position = ((x - start) / step).clamp(0.0, last as f64);
    if last == 0 || !position.is_finite() {
        return ((0, 0), 0.0);
    }
    let lower = (position.floor() as usize).min(last - 1);
    ((lower, lower + 1), position - lower as f64)
}
