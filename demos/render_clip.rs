//! Example: Render a spectrogram clip view from a synthetic call.
//!
//! This example builds a clip holding a frequency-modulated chirp in noise,
//! marks the chirp's midpoint with a time-frequency point overlay, and
//! writes the rendered view to a PNG file.
//!
//! Run with:
//!     RUST_LOG=debug cargo run --example render_clip [output.png]

use anyhow::Context;
use clipgram::audio::{generate_chirp, generate_white_noise};
use clipgram::render::Colormap;
use clipgram::{BoundingBox, Clip, ColormapTable, ImageSurface, SpectrogramClipView};

const SETTINGS: &str = r##"{
    "computation": {
        "window": { "type": "Hann", "size": 0.01 },
        "hopSize": 25,
        "spectralInterpolationFactor": 2
    },
    "display": {
        "frequencyRange": [0, 11025],
        "powerRange": [20, 100],
        "colormap": "Heat",
        "reverseColormap": false
    },
    "overlays": [
        { "type": "Time-Frequency Point Overlay", "color": "#00FF88", "markerSize": 15 }
    ]
}"##;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "clip_spectrogram.png".to_string());

    println!("Clipgram - Spectrogram Clip View Example");
    println!("========================================\n");

    // Synthesize a 1 second clip: 3 kHz to 7 kHz chirp over light noise
    let sample_rate = 22050.0;
    let duration = 1.0;
    let chirp = generate_chirp(3000.0, 7000.0, sample_rate, duration, 0.5);
    let noise = generate_white_noise(sample_rate, duration, 0.01, 42);
    let samples: Vec<f32> = chirp.iter().zip(&noise).map(|(c, n)| c + n).collect();

    let clip = Clip::new(samples, sample_rate as f64)
        .with_annotation("Time", 0.5)
        .with_annotation("Frequency", 5000.0);

    println!("Clip:");
    println!("  Sample rate: {} Hz", clip.sample_rate);
    println!("  Samples: {}", clip.length);
    println!("  Span: {:.3} s\n", clip.span());

    let mut colormaps = ColormapTable::default();
    colormaps.register(Colormap::from_stops(
        "Heat",
        &[[0, 0, 0], [128, 0, 0], [255, 128, 0], [255, 255, 128], [255, 255, 255]],
    ));

    let mut view = SpectrogramClipView::from_json(SETTINGS, clip.sample_rate, colormaps)
        .context("invalid spectrogram settings")?;

    let params = view.analysis_params();
    println!("Analysis:");
    println!("  Window: {} samples ({})", params.window.len(), params.window.window_type().name());
    println!("  Hop: {} samples", params.hop_size);
    println!("  DFT size: {}\n", params.dft_size);

    let (width, height) = (800, 300);
    let mut surface = ImageSurface::new(width, height);
    view.on_samples_changed(&clip, &mut surface)?;

    if let Some(spectrogram) = view.spectrogram() {
        println!("Spectrogram:");
        println!("  {} spectra x {} bins", spectrogram.num_spectra(), spectrogram.num_bins());
        if let (Some(min), Some(max)) = (spectrogram.min_value(), spectrogram.max_value()) {
            println!("  Power range: {:.1} to {:.1} dB\n", min, max);
        }
    }

    let element = BoundingBox::new(0.0, 0.0, width as f64, height as f64);
    if let Some(text) = view.mouse_text(&clip, width as f64 / 2.0, height as f64 / 2.0, &element) {
        println!("Center of view: {}", text);
    }

    surface
        .save_png(&output_path)
        .with_context(|| format!("failed to write {}", output_path))?;
    println!("Wrote {}", output_path);

    Ok(())
}
