//! Placement of a spectrogram image within a clip view.
//!
//! The whole spectrogram duration is always drawn. Each spectrum is placed
//! at the center time of its window, so the image usually starts a little
//! after the left edge of the view and ends a little before the right edge.
//! Vertically, the part of the spectrogram inside the view's frequency range
//! is stretched to the matching view rows.

use image::{Rgba, RgbaImage};

use super::coords::{freq_to_gram_row, freq_to_view_row};
use super::surface::{DrawingSurface, Rect, BACKGROUND_GRAY};
use crate::analysis::AnalysisParams;
use crate::audio::Clip;
use crate::settings::DisplaySettings;

/// Stretched copy of a region of the spectrogram image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blit {
    /// Region of the spectrogram image, in spectrogram pixels
    pub source: Rect,
    /// Destination region, in view pixels
    pub dest: Rect,
    pub smooth: bool,
}

/// Drawing commands for one paint of a spectrogram view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPlan {
    /// Full-surface background fill
    pub background: Rect,
    pub background_color: Rgba<u8>,
    /// Spectrogram copy, absent when no part of the spectrogram is visible
    pub blit: Option<Blit>,
}

impl DrawPlan {
    /// Paint the plan onto a surface.
    pub fn execute<S: DrawingSurface + ?Sized>(&self, image: &RgbaImage, surface: &mut S) {
        surface.fill_rect(self.background, self.background_color);
        if let Some(blit) = &self.blit {
            surface.draw_image(image, blit.source, blit.dest, blit.smooth);
        }
    }
}

/// Horizontal placement `(x, width)` of the spectrogram in view pixels.
///
/// Returns `None` when nothing can be placed: no spectra, a zero-width
/// view, or a clip whose span is not positive.
pub fn time_extent(
    clip: &Clip,
    params: &AnalysisParams,
    num_spectra: usize,
    view_width: u32,
) -> Option<(f64, f64)> {
    let sample_rate = clip.sample_rate;
    let span = clip.span();
    if num_spectra == 0 || view_width == 0 || span <= 0.0 || sample_rate <= 0.0 {
        return None;
    }

    let start_time = params.exact_window_length / 2.0 / sample_rate;
    let spectrum_period = params.hop_size as f64 / sample_rate;
    let end_time = start_time + (num_spectra - 1) as f64 * spectrum_period;
    let pixel_period = span / view_width as f64;

    Some((start_time / pixel_period, (end_time - start_time) / pixel_period))
}

/// Vertical placement of the spectrogram as `(source, dest)` row spans.
///
/// Each span is `(y, height)`. Returns `None` when the view's frequency
/// range lies entirely at or above the Nyquist frequency.
pub fn frequency_extent(
    nyquist: f64,
    num_bins: usize,
    display: &DisplaySettings,
    view_height: u32,
) -> Option<((f64, f64), (f64, f64))> {
    let (start_freq, end_freq) = display.view_frequency_range(nyquist);
    if start_freq >= nyquist {
        return None;
    }

    let gram_start_freq = start_freq;
    let gram_end_freq = end_freq.min(nyquist);

    // Frequency decreases with increasing row in both spaces, so the end
    // frequency gives the top of each span.
    let s_start_row = freq_to_gram_row(gram_start_freq, nyquist, num_bins);
    let s_end_row = freq_to_gram_row(gram_end_freq, nyquist, num_bins);

    let h = view_height as f64;
    let d_start_row = freq_to_view_row(gram_start_freq, start_freq, end_freq, h);
    let d_end_row = freq_to_view_row(gram_end_freq, start_freq, end_freq, h);

    Some((
        (s_end_row, s_start_row - s_end_row),
        (d_end_row, d_start_row - d_end_row),
    ))
}

/// Plan the paint of a spectrogram image onto a view of the given size.
pub fn plan_draw(
    clip: &Clip,
    image_size: (u32, u32),
    params: &AnalysisParams,
    display: &DisplaySettings,
    view_size: (u32, u32),
) -> DrawPlan {
    let (num_spectra, num_bins) = image_size;
    let (view_width, view_height) = view_size;

    let background = Rect::new(0.0, 0.0, view_width as f64, view_height as f64);

    let blit = time_extent(clip, params, num_spectra as usize, view_width).and_then(|(x, width)| {
        let ((sy, s_height), (dy, d_height)) =
            frequency_extent(clip.nyquist(), num_bins as usize, display, view_height)?;
        Some(Blit {
            source: Rect::new(0.0, sy, num_spectra as f64, s_height),
            dest: Rect::new(x, dy, width, d_height),
            smooth: display.smooth_image,
        })
    });

    DrawPlan {
        background,
        background_color: BACKGROUND_GRAY,
        blit,
    }
}

/// Paint a spectrogram image onto a surface, returning the executed plan.
pub fn draw_spectrogram<S: DrawingSurface + ?Sized>(
    clip: &Clip,
    image: &RgbaImage,
    params: &AnalysisParams,
    display: &DisplaySettings,
    surface: &mut S,
) -> DrawPlan {
    let plan = plan_draw(
        clip,
        image.dimensions(),
        params,
        display,
        (surface.width(), surface.height()),
    );
    plan.execute(image, surface);
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{DataWindow, WindowType};

    fn params(window_length: usize, hop_size: usize, dft_size: usize) -> AnalysisParams {
        AnalysisParams {
            window: DataWindow::new(WindowType::Hann, window_length),
            exact_window_length: window_length as f64,
            hop_size,
            dft_size,
            reference_power: 1e-10,
        }
    }

    #[test]
    fn test_time_extent() {
        // 1001 samples at 1000 Hz span exactly one second
        let clip = Clip::without_samples(1001, 1000.0);
        let p = params(100, 50, 128);
        let num_spectra = p.num_spectra(1001);
        assert_eq!(num_spectra, 19);

        let (x, width) = time_extent(&clip, &p, num_spectra, 1000).unwrap();
        // First window center at 50 ms, last at 50 ms + 18 * 50 ms
        assert!((x - 50.0).abs() < 1e-9);
        assert!((width - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_extent_guards() {
        let p = params(100, 50, 128);
        let clip = Clip::without_samples(1001, 1000.0);
        assert_eq!(time_extent(&clip, &p, 0, 1000), None);
        assert_eq!(time_extent(&clip, &p, 5, 0), None);

        let single = Clip::without_samples(1, 1000.0);
        assert_eq!(time_extent(&single, &p, 1, 1000), None);
    }

    #[test]
    fn test_frequency_extent_clips_at_nyquist() {
        let display = DisplaySettings {
            frequency_range: Some([0.0, 12000.0]),
            ..DisplaySettings::default()
        };

        let ((sy, s_height), (dy, d_height)) = frequency_extent(4000.0, 257, &display, 300).unwrap();
        assert_eq!(sy, 0.0);
        assert_eq!(s_height, 256.0);
        assert!((dy - 200.0).abs() < 1e-9);
        assert!((d_height - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_extent_above_nyquist_is_empty() {
        let display = DisplaySettings {
            frequency_range: Some([4000.0, 12000.0]),
            ..DisplaySettings::default()
        };
        assert_eq!(frequency_extent(4000.0, 257, &display, 300), None);
    }

    #[test]
    fn test_frequency_extent_default_range_fills_view() {
        let display = DisplaySettings::default();
        let ((sy, s_height), (dy, d_height)) = frequency_extent(11025.0, 65, &display, 80).unwrap();
        assert_eq!((sy, s_height), (0.0, 64.0));
        assert_eq!((dy, d_height), (0.0, 80.0));
    }

    #[test]
    fn test_plan_draw_always_fills_background() {
        let clip = Clip::without_samples(1001, 1000.0);
        let display = DisplaySettings {
            frequency_range: Some([600.0, 900.0]),
            ..DisplaySettings::default()
        };

        let plan = plan_draw(&clip, (19, 65), &params(100, 50, 128), &display, (400, 100));
        assert_eq!(plan.background, Rect::new(0.0, 0.0, 400.0, 100.0));
        assert_eq!(plan.background_color, BACKGROUND_GRAY);
        assert!(plan.blit.is_none());
    }
}
