//! Integration tests for the spectrogram clip view.


use clip_fixtures::{chirp_clip, colormaps, green_settings, view_for};
use clipgram::render::{plan_draw, BACKGROUND_GRAY};
use clipgram::{BoundingBox, Clip, DrawingSurface, ImageSurface, SpectrogramClipView};
use image::Rgba;
use serde_json::json;

const WIDTH: u32 = 400;
const HEIGHT: u32 = 300;

fn is_spectrogram_pixel(pixel: Option<Rgba<u8>>) -> bool {
    // Green colormap pixels have no red, unlike the gray background
    matches!(pixel, Some(Rgba([0, _, 0, 255])))
}

#[test]
fn test_samples_changed_builds_and_draws() {
    let clip = chirp_clip(22050.0);
    let mut view = view_for(green_settings(), &clip);
    assert!(view.spectrogram().is_none());
    assert!(view.bitmap().is_none());

    let mut surface = ImageSurface::new(WIDTH, HEIGHT);
    view.on_samples_changed(&clip, &mut surface).unwrap();

    let spectrogram = view.spectrogram().unwrap();
    let bitmap = view.bitmap().unwrap();
    assert_eq!(
        bitmap.dimensions(),
        (spectrogram.num_spectra() as u32, spectrogram.num_bins() as u32)
    );
    assert!(bitmap.pixels().all(|p| p[3] == 255));

    // Default frequency range spans the whole view
    assert!(is_spectrogram_pixel(surface.pixel(WIDTH / 2, 5)));
    assert!(is_spectrogram_pixel(surface.pixel(WIDTH / 2, HEIGHT - 5)));
}

#[test]
fn test_samples_changed_is_idempotent() {
    let clip = chirp_clip(22050.0);
    let mut view = view_for(green_settings(), &clip);

    let mut first_surface = ImageSurface::new(WIDTH, HEIGHT);
    view.on_samples_changed(&clip, &mut first_surface).unwrap();
    let first = view.bitmap().unwrap().clone();

    let mut second_surface = ImageSurface::new(WIDTH, HEIGHT);
    view.on_samples_changed(&clip, &mut second_surface).unwrap();
    let second = view.bitmap().unwrap();

    assert_eq!(first.as_raw(), second.as_raw());
    assert_eq!(first_surface.image().as_raw(), second_surface.image().as_raw());
}

#[test]
fn test_missing_samples_release_artifacts() {
    let mut clip = chirp_clip(22050.0);
    let mut view = view_for(green_settings(), &clip);
    let mut surface = ImageSurface::new(WIDTH, HEIGHT);

    view.on_samples_changed(&clip, &mut surface).unwrap();
    assert!(view.spectrogram().is_some());

    clip.release_samples();
    view.on_samples_changed(&clip, &mut surface).unwrap();
    assert!(view.spectrogram().is_none());
    assert!(view.bitmap().is_none());
}

#[test]
fn test_tiny_reference_power_gives_finite_powers() {
    let clip = chirp_clip(22050.0);
    let mut settings = green_settings();
    settings.computation.reference_power = Some(1e-50);
    let mut view = view_for(settings, &clip);

    let mut surface = ImageSurface::new(WIDTH, HEIGHT);
    view.on_samples_changed(&clip, &mut surface).unwrap();

    let spectrogram = view.spectrogram().unwrap();
    let (min, max) = (spectrogram.min_value().unwrap(), spectrogram.max_value().unwrap());
    assert!(min.is_finite() && max.is_finite());
    assert!(min < max);
}

#[test]
fn test_new_clip_with_unresolvable_rate_clears_view() {
    let clip = chirp_clip(22050.0);
    let mut view = view_for(green_settings(), &clip);
    let mut surface = ImageSurface::new(WIDTH, HEIGHT);
    view.on_samples_changed(&clip, &mut surface).unwrap();
    assert!(view.bitmap().is_some());

    let slow = chirp_clip(150.0);
    assert!(view.on_samples_changed(&slow, &mut surface).is_err());
    assert!(view.spectrogram().is_none());
    assert!(view.bitmap().is_none());
    assert_eq!(surface.pixel(WIDTH / 2, HEIGHT / 2), Some(BACKGROUND_GRAY));
}

#[test]
fn test_translucent_overlay_blends_over_spectrogram() {
    let clip = chirp_clip(8000.0)
        .with_annotation("Time", 0.5)
        .with_annotation("Frequency", 2000.0);

    let mut settings = green_settings();
    settings.overlays = vec![json!({
        "type": "Time-Frequency Point Overlay",
        "color": "#FF00FF80"
    })];
    let mut view = view_for(settings, &clip);

    let mut surface = ImageSurface::new(WIDTH, HEIGHT);
    view.on_samples_changed(&clip, &mut surface).unwrap();

    let Some(Rgba([r, _, b, a])) = surface.pixel(200, 149) else {
        panic!("pixel inside surface");
    };
    assert!(a >= 254);
    assert!(r > 100 && b > 100);
}

#[test]
fn test_frequency_range_above_nyquist_is_clipped() {
    // 8 kHz clip viewed from 0 to 12 kHz: the spectrogram fills the bottom third
    let clip = chirp_clip(8000.0);
    let mut settings = green_settings();
    settings.display.frequency_range = Some([0.0, 12000.0]);
    let mut view = view_for(settings.clone(), &clip);

    let mut surface = ImageSurface::new(WIDTH, HEIGHT);
    view.on_samples_changed(&clip, &mut surface).unwrap();

    let bitmap = view.bitmap().unwrap();
    let plan = plan_draw(
        &clip,
        bitmap.dimensions(),
        view.analysis_params(),
        &settings.display,
        (WIDTH, HEIGHT),
    );
    let blit = plan.blit.unwrap();
    assert_eq!(blit.source.y, 0.0);
    assert_eq!(blit.source.height, (bitmap.height() - 1) as f64);
    assert!((blit.dest.y - 200.0).abs() < 1e-9);
    assert!((blit.dest.height - 100.0).abs() < 1e-9);

    assert_eq!(surface.pixel(WIDTH / 2, 150), Some(BACKGROUND_GRAY));
    assert_eq!(surface.pixel(WIDTH / 2, 195), Some(BACKGROUND_GRAY));
    assert!(is_spectrogram_pixel(surface.pixel(WIDTH / 2, 205)));
    assert!(is_spectrogram_pixel(surface.pixel(WIDTH / 2, 295)));
}

#[test]
fn test_frequency_floor_at_nyquist_draws_background_only() {
    let clip = chirp_clip(8000.0);
    let mut settings = green_settings();
    settings.display.frequency_range = Some([4000.0, 12000.0]);
    let mut view = view_for(settings, &clip);

    let mut surface = ImageSurface::new(WIDTH, HEIGHT);
    view.on_samples_changed(&clip, &mut surface).unwrap();

    assert!(view.bitmap().is_some());
    assert!(surface.image().pixels().all(|p| *p == BACKGROUND_GRAY));
}

#[test]
fn test_render_after_resize() {
    let clip = chirp_clip(22050.0);
    let mut view = view_for(green_settings(), &clip);
    let mut surface = ImageSurface::new(WIDTH, HEIGHT);
    view.on_samples_changed(&clip, &mut surface).unwrap();

    surface.resize(2 * WIDTH, HEIGHT / 2);
    view.render(&clip, &mut surface);

    assert_eq!((surface.width(), surface.height()), (2 * WIDTH, HEIGHT / 2));
    assert!(is_spectrogram_pixel(surface.pixel(WIDTH, HEIGHT / 4)));
}

#[test]
fn test_short_clip_draws_background_only() {
    // Shorter than one 5 ms window
    let clip = Clip::new(vec![0.5; 50], 22050.0);
    let mut view = view_for(green_settings(), &clip);
    let mut surface = ImageSurface::new(WIDTH, HEIGHT);

    view.on_samples_changed(&clip, &mut surface).unwrap();
    assert_eq!(view.spectrogram().unwrap().num_spectra(), 0);
    assert!(surface.image().pixels().all(|p| *p == BACKGROUND_GRAY));
}

#[test]
fn test_settings_change_rebuilds() {
    let clip = chirp_clip(22050.0);
    let mut view = view_for(green_settings(), &clip);
    let mut surface = ImageSurface::new(WIDTH, HEIGHT);
    view.on_samples_changed(&clip, &mut surface).unwrap();
    let before = view.bitmap().unwrap().clone();

    let mut settings = green_settings();
    settings.display.power_range = [40.0, 120.0];
    view.on_settings_changed(settings, &clip, &mut surface).unwrap();
    assert_ne!(before.as_raw(), view.bitmap().unwrap().as_raw());
    assert_eq!(view.settings().display.power_range, [40.0, 120.0]);

    // Invalid settings leave the view as it was
    let mut invalid = green_settings();
    invalid.display.colormap = "Nope".to_string();
    assert!(view.on_settings_changed(invalid, &clip, &mut surface).is_err());
    assert_eq!(view.settings().display.colormap, clip_fixtures::GREEN);
    assert_eq!(view.settings().display.power_range, [40.0, 120.0]);
}

#[test]
fn test_overlay_marks_annotated_point() {
    let clip = chirp_clip(8000.0)
        .with_annotation("Time", 0.5)
        .with_annotation("Frequency", 2000.0);

    let mut settings = green_settings();
    settings.overlays = vec![
        json!({ "type": "Time-Frequency Point Overlay", "color": "#FF00FF" }),
        json!({ "type": "Spectral Peak Overlay" }),
    ];
    let mut view = view_for(settings, &clip);

    let mut surface = ImageSurface::new(WIDTH, HEIGHT);
    view.on_samples_changed(&clip, &mut surface).unwrap();

    let magenta = Some(Rgba([255, 0, 255, 255]));
    assert_eq!(surface.pixel(200, 149), magenta);
    assert_eq!(surface.pixel(196, 149), magenta);
    assert_eq!(surface.pixel(200, 145), magenta);
    assert!(is_spectrogram_pixel(surface.pixel(100, 100)));
}

#[test]
fn test_mouse_hit_testing() {
    let clip = chirp_clip(8000.0);
    let view = view_for(green_settings(), &clip);
    let element = BoundingBox::new(10.4, 20.6, 410.4, 320.6);

    assert_eq!(
        view.mouse_time_and_frequency(&clip, 11.0, 21.0, &element),
        Some((0.0, 4000.0))
    );
    assert_eq!(
        view.mouse_time_and_frequency(&clip, 410.0, 320.0, &element),
        Some((clip.span(), 0.0))
    );
    assert_eq!(view.mouse_time_and_frequency(&clip, 10.5, 100.0, &element), None);
    assert_eq!(view.mouse_text(&clip, 100.0, 320.5, &element), None);
    assert!(view.mouse_text(&clip, 100.0, 100.0, &element).unwrap().ends_with(" Hz"));
}

#[test]
fn test_legacy_settings_view() {
    let json = r#"{
        "windowSize": 100,
        "hopSize": 50,
        "dftSize": 256,
        "referencePower": 1e-9,
        "lowPower": 10,
        "highPower": 100,
        "smoothingEnabled": false
    }"#;

    let view = SpectrogramClipView::from_json(json, 22050.0, colormaps()).unwrap();
    let params = view.analysis_params();
    assert_eq!(params.window.len(), 100);
    assert_eq!(params.hop_size, 50);
    assert_eq!(params.dft_size, 256);
    assert_eq!(params.reference_power, 1e-9);

    let display = &view.settings().display;
    assert_eq!(display.frequency_range, Some([0.0, 12000.0]));
    assert_eq!(display.power_range, [10.0, 100.0]);
    assert_eq!(display.colormap, "Gray");
    assert!(display.reverse_colormap);
    assert!(!display.smooth_image);
}

#[test]
fn test_save_png() {
    let clip = chirp_clip(22050.0);
    let mut view = view_for(green_settings(), &clip);
    let mut surface = ImageSurface::new(WIDTH, HEIGHT);
    view.on_samples_changed(&clip, &mut surface).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spectrogram.png");
    surface.save_png(&path).unwrap();

    let saved = image::open(&path).unwrap().to_rgba8();
    assert_eq!(saved.dimensions(), (WIDTH, HEIGHT));
    assert_eq!(saved.as_raw(), surface.image().as_raw());
}
