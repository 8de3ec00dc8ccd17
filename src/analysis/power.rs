//! Conversions between linear and logarithmic spectral powers.

/// Floor substituted for tiny linear powers before taking logarithms.
pub const SMALL_POWER: f32 = 1e-30;

/// Convert linear powers to decibels relative to `reference_power`, in place.
///
/// Ratios are taken in `f64`, so reference powers outside the `f32` range
/// still give finite decibels.
pub fn linear_to_log(powers: &mut [f32], reference_power: f64) {
    let floor = f64::from(SMALL_POWER);
    for p in powers.iter_mut() {
        let ratio = f64::from(*p) / reference_power;
        *p = (10.0 * ratio.max(floor).log10()) as f32;
    }
}

/// Convert decibels relative to `reference_power` back to linear powers, in place.
pub fn log_to_linear(powers: &mut [f32], reference_power: f64) {
    let offset = reference_power.log10();
    for p in powers.iter_mut() {
        *p = 10f64.powf(f64::from(*p) / 10.0 + offset) as f32;
    }
}

/// Suppress stationary background in linear, frame-major spectra.
///
/// Every value that does not exceed its bin's median across time is zeroed.
pub fn denoise(powers: &mut [f32], num_bins: usize) {
    if num_bins == 0 || powers.is_empty() {
        return;
    }

    let num_spectra = powers.len() / num_bins;
    let mut column = Vec::with_capacity(num_spectra);

    for bin in 0..num_bins {
        column.clear();
        column.extend((0..num_spectra).map(|i| powers[i * num_bins + bin]));
        column.sort_by(|a, b| a.total_cmp(b));

        let median = if num_spectra % 2 == 1 {
            column[num_spectra / 2]
        } else {
            0.5 * (column[num_spectra / 2 - 1] + column[num_spectra / 2])
        };

        for i in 0..num_spectra {
            let p = &mut powers[i * num_bins + bin];
            if *p <= median {
                *p = 0.0;
            }
        }
    }
}
