//! Mapping of spectrogram powers to pixels.

use image::{Rgba, RgbaImage};

use super::colormap::Colormap;
use crate::analysis::PowerArray;
use crate::settings::{ConfigurationError, DisplaySettings};

/// Affine map from power to colormap intensity: `intensity = scale * power + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorCoefficients {
    pub scale: f64,
    pub offset: f64,
}

impl ColorCoefficients {
    /// Intensity for a power, clamped to the 8-bit range before rounding.
    pub fn intensity(&self, power: f32) -> u8 {
        let v = self.scale * power as f64 + self.offset;
        // NaN casts to zero
        v.clamp(0.0, 255.0).round() as u8
    }
}

/// Compute the power-to-intensity coefficients for display settings.
///
/// The start of the power range maps to intensity 0 and the end to 255, or
/// the other way around when the colormap is reversed.
pub fn color_coefficients(display: &DisplaySettings) -> Result<ColorCoefficients, ConfigurationError> {
    let [start_power, end_power] = display.power_range;
    if !start_power.is_finite() || !end_power.is_finite() || start_power == end_power {
        return Err(ConfigurationError::DegeneratePowerRange(start_power, end_power));
    }

    let (start_color, end_color) = if display.reverse_colormap {
        (255.0, 0.0)
    } else {
        (0.0, 255.0)
    };

    let scale = (end_color - start_color) / (end_power - start_power);
    let offset = end_color - scale * end_power;

    Ok(ColorCoefficients { scale, offset })
}

/// Rasterize spectrogram powers into an RGBA image.
///
/// The image is `num_spectra` pixels wide and `num_bins` pixels high. Row 0
/// holds the highest frequency bin, so frequency increases upward. Alpha is
/// always opaque.
pub fn rasterize(
    powers: &PowerArray,
    coefficients: ColorCoefficients,
    colormap: &Colormap,
) -> RgbaImage {
    let num_bins = powers.num_bins();
    let num_spectra = powers.num_spectra();
    let values = powers.values();

    let mut image = RgbaImage::new(num_spectra as u32, num_bins as u32);
    if num_spectra == 0 {
        return image;
    }

    for (row, pixels) in image.rows_mut().enumerate() {
        let bin = num_bins - 1 - row;
        for (spectrum, pixel) in pixels.enumerate() {
            let intensity = coefficients.intensity(values[spectrum * num_bins + bin]);
            let [r, g, b] = colormap.color(intensity);
            *pixel = Rgba([r, g, b, 255]);
        }
    }

    image
}
