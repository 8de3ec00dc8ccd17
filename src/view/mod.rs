//! Spectrogram clip view.
//!
//! [`SpectrogramClipView`] ties the pipeline together for one clip view in a
//! host application. The host notifies the view when the clip's samples
//! become available or go away, when settings change, and when the drawing
//! surface is resized. Each sample change discards and rebuilds the
//! spectrogram and its image; there is no incremental update.

use image::RgbaImage;

use crate::analysis::{resolve, AnalysisParams, Spectrogram};
use crate::audio::Clip;
use crate::overlays::{create_overlays, Overlay, OverlayContext};
use crate::render::{
    color_coefficients, draw_spectrogram, hit_test, rasterize, BoundingBox, ColorCoefficients,
    Colormap, ColormapTable, DrawingSurface, Rect, BACKGROUND_GRAY,
};
use crate::settings::{ConfigurationError, SpectrogramSettings};

/// Name under which hosts register view commands.
pub const COMMANDABLE_NAME: &str = "Spectrogram Clip View";

/// Everything derived from settings, resolved once per settings change.
#[derive(Debug)]
struct ResolvedSettings {
    sample_rate: f64,
    params: AnalysisParams,
    coefficients: ColorCoefficients,
    colormap: Colormap,
    overlays: Vec<Box<dyn Overlay>>,
}

impl ResolvedSettings {
    fn new(
        settings: &SpectrogramSettings,
        sample_rate: f64,
        colormaps: &ColormapTable,
    ) -> Result<Self, ConfigurationError> {
        settings.display.validate()?;
        Ok(Self {
            sample_rate,
            params: resolve(&settings.computation, sample_rate)?,
            coefficients: color_coefficients(&settings.display)?,
            colormap: colormaps.get(&settings.display.colormap)?.clone(),
            overlays: create_overlays(&settings.overlays)?,
        })
    }
}

/// Spectrogram view of one audio clip.
#[derive(Debug)]
pub struct SpectrogramClipView {
    settings: SpectrogramSettings,
    colormaps: ColormapTable,
    resolved: ResolvedSettings,
    spectrogram: Option<Spectrogram>,
    bitmap: Option<RgbaImage>,
}

impl SpectrogramClipView {
    /// Create a view for clips with the given sample rate.
    ///
    /// # Errors
    /// Fails on any invalid setting, unknown window type or colormap, or
    /// malformed overlay entry.
    pub fn new(
        settings: SpectrogramSettings,
        sample_rate: f64,
        colormaps: ColormapTable,
    ) -> Result<Self, ConfigurationError> {
        let resolved = ResolvedSettings::new(&settings, sample_rate, &colormaps)?;
        Ok(Self {
            settings,
            colormaps,
            resolved,
            spectrogram: None,
            bitmap: None,
        })
    }

    /// Create a view from JSON settings in either the current or legacy shape.
    pub fn from_json(
        json: &str,
        sample_rate: f64,
        colormaps: ColormapTable,
    ) -> Result<Self, ConfigurationError> {
        let settings = SpectrogramSettings::from_json_str(json, sample_rate)?;
        Self::new(settings, sample_rate, colormaps)
    }

    pub fn commandable_name(&self) -> &'static str {
        COMMANDABLE_NAME
    }

    pub fn settings(&self) -> &SpectrogramSettings {
        &self.settings
    }

    pub fn analysis_params(&self) -> &AnalysisParams {
        &self.resolved.params
    }

    /// Current spectrogram, absent while the clip has no samples.
    pub fn spectrogram(&self) -> Option<&Spectrogram> {
        self.spectrogram.as_ref()
    }

    /// Current spectrogram image, absent while the clip has no samples.
    pub fn bitmap(&self) -> Option<&RgbaImage> {
        self.bitmap.as_ref()
    }

    /// Respond to a change in the availability of the clip's samples.
    ///
    /// With samples present the spectrogram and its image are rebuilt from
    /// scratch and drawn. Without samples both are released.
    pub fn on_samples_changed<S: DrawingSurface + ?Sized>(
        &mut self,
        clip: &Clip,
        surface: &mut S,
    ) -> Result<(), ConfigurationError> {
        let Some(samples) = clip.samples.as_deref() else {
            self.release_artifacts(clip);
            return Ok(());
        };

        if clip.sample_rate != self.resolved.sample_rate {
            match ResolvedSettings::new(&self.settings, clip.sample_rate, &self.colormaps) {
                Ok(resolved) => self.resolved = resolved,
                Err(err) => {
                    // Artifacts of the previous clip must not outlive it
                    self.release_artifacts(clip);
                    self.render(clip, surface);
                    return Err(err);
                }
            }
        }

        let params = &self.resolved.params;
        let spectrogram = Spectrogram::compute(samples, clip.sample_rate, params);
        log::debug!(
            "Computed spectrogram: {} spectra x {} bins (window {}, hop {}, DFT {})",
            spectrogram.num_spectra(),
            spectrogram.num_bins(),
            params.window.len(),
            params.hop_size,
            params.dft_size
        );

        let bitmap = rasterize(
            spectrogram.powers(),
            self.resolved.coefficients,
            &self.resolved.colormap,
        );
        self.spectrogram = Some(spectrogram);
        self.bitmap = Some(bitmap);

        self.render(clip, surface);
        Ok(())
    }

    /// Replace the settings and rebuild everything derived from them.
    ///
    /// On error the view keeps its previous settings.
    pub fn on_settings_changed<S: DrawingSurface + ?Sized>(
        &mut self,
        settings: SpectrogramSettings,
        clip: &Clip,
        surface: &mut S,
    ) -> Result<(), ConfigurationError> {
        self.resolved = ResolvedSettings::new(&settings, clip.sample_rate, &self.colormaps)?;
        self.settings = settings;
        self.on_samples_changed(clip, surface)
    }

    fn release_artifacts(&mut self, clip: &Clip) {
        self.bitmap = None;
        if self.spectrogram.take().is_some() {
            log::debug!("Released spectrogram of {} sample clip", clip.length);
        }
    }

    /// Redraw the current spectrogram image, for example after a resize.
    ///
    /// Without an image only the background is painted.
    pub fn render<S: DrawingSurface + ?Sized>(&self, clip: &Clip, surface: &mut S) {
        let Some(bitmap) = &self.bitmap else {
            let (width, height) = (surface.width() as f64, surface.height() as f64);
            surface.fill_rect(Rect::new(0.0, 0.0, width, height), BACKGROUND_GRAY);
            return;
        };

        draw_spectrogram(
            clip,
            bitmap,
            &self.resolved.params,
            &self.settings.display,
            surface,
        );

        let context = OverlayContext {
            clip,
            frequency_range: self.settings.display.view_frequency_range(clip.nyquist()),
        };
        let mut surface = surface;
        for overlay in &self.resolved.overlays {
            overlay.render(&context, &mut surface);
        }
    }

    /// Clip time and frequency under the pointer, or `None` outside the view.
    pub fn mouse_time_and_frequency(
        &self,
        clip: &Clip,
        x: f64,
        y: f64,
        element: &BoundingBox,
    ) -> Option<(f64, f64)> {
        let (low_freq, high_freq) = self.settings.display.view_frequency_range(clip.nyquist());
        hit_test(x, y, element, clip.span(), low_freq, high_freq)
    }

    /// Pointer readout text, e.g. `"0.250 s  4000.0 Hz"`.
    pub fn mouse_text(&self, clip: &Clip, x: f64, y: f64, element: &BoundingBox) -> Option<String> {
        self.mouse_time_and_frequency(clip, x, y, element)
            .map(|(time, freq)| format!("{time:.3} s  {freq:.1} Hz"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ImageSurface;
    use crate::settings::DisplaySettings;

    fn view() -> SpectrogramClipView {
        SpectrogramClipView::new(SpectrogramSettings::default(), 8000.0, ColormapTable::default())
            .unwrap()
    }

    #[test]
    fn test_commandable_name() {
        assert_eq!(view().commandable_name(), "Spectrogram Clip View");
    }

    #[test]
    fn test_unknown_colormap_fails_fast() {
        let settings = SpectrogramSettings {
            display: DisplaySettings {
                colormap: "Viridis".to_string(),
                ..DisplaySettings::default()
            },
            ..SpectrogramSettings::default()
        };
        let result = SpectrogramClipView::new(settings, 8000.0, ColormapTable::default());
        assert!(matches!(result, Err(ConfigurationError::UnknownColormap(_))));
    }

    #[test]
    fn test_render_without_bitmap_paints_background() {
        let view = view();
        let clip = Clip::without_samples(8000, 8000.0);
        let mut surface = ImageSurface::new(4, 3);
        view.render(&clip, &mut surface);
        assert!(surface.image().pixels().all(|p| *p == BACKGROUND_GRAY));
    }

    #[test]
    fn test_unresolvable_sample_rate_releases_previous_artifacts() {
        let samples = crate::audio::synth::generate_sine(1000.0, 8000.0, 0.5, 0.8);
        let mut view = view();
        let mut surface = ImageSurface::new(40, 30);
        view.on_samples_changed(&Clip::new(samples, 8000.0), &mut surface).unwrap();
        assert!(view.bitmap().is_some());

        // A 5 ms window at 150 Hz leaves no room for a hop
        let slow = Clip::new(vec![0.1; 150], 150.0);
        let result = view.on_samples_changed(&slow, &mut surface);
        assert!(matches!(result, Err(ConfigurationError::ZeroHopSize(_))));
        assert!(view.spectrogram().is_none());
        assert!(view.bitmap().is_none());
        assert!(surface.image().pixels().all(|p| *p == BACKGROUND_GRAY));
    }

    #[test]
    fn test_mouse_text() {
        let view = view();
        // Span of exactly one second, Nyquist 4000 Hz
        let clip = Clip::without_samples(8001, 8000.0);
        let element = BoundingBox::new(0.0, 0.0, 200.0, 100.0);

        assert_eq!(
            view.mouse_text(&clip, 50.0, 0.0, &element).as_deref(),
            Some("0.250 s  4000.0 Hz")
        );
        assert_eq!(view.mouse_text(&clip, 201.0, 0.0, &element), None);
    }
}
