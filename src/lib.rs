//! Clipgram Core
//!
//! Spectrogram computation, color mapping, and viewport compositing for
//! audio clip views.
//!
//! # Features
//!
//! - Resolution of duration/percentage settings into window, hop, and DFT sizes
//! - Short-time Fourier analysis via RustFFT into decibel powers
//! - Power-to-color mapping through named colormaps into RGBA images
//! - Placement of spectrogram images on any canvas-like drawing surface
//! - Pointer hit testing in time and frequency
//! - JSON settings via serde, with migration of the legacy settings shape
//!
//! # Example
//! ```
//! use clipgram::{Clip, ColormapTable, ImageSurface, SpectrogramClipView, SpectrogramSettings};
//! use clipgram::audio::generate_sine;
//!
//! let clip = Clip::new(generate_sine(1000.0, 22050.0, 0.5, 0.8), 22050.0);
//! let mut view =
//!     SpectrogramClipView::new(SpectrogramSettings::default(), 22050.0, ColormapTable::default())
//!         .unwrap();
//!
//! let mut surface = ImageSurface::new(320, 120);
//! view.on_samples_changed(&clip, &mut surface).unwrap();
//! assert!(view.bitmap().is_some());
//! ```

pub mod analysis;
pub mod audio;
pub mod overlays;
pub mod render;
pub mod settings;
pub mod view;

// Re-export commonly used types
pub use analysis::{resolve, AnalysisParams, DataWindow, PowerArray, Spectrogram, WindowType};
pub use audio::Clip;
pub use overlays::{create_overlays, Overlay, OverlayType};
pub use render::{
    color_coefficients, hit_test, plan_draw, rasterize, BoundingBox, Colormap, ColormapTable,
    DrawPlan, DrawingSurface, ImageSurface, Rect,
};
pub use settings::{
    legacy_to_current, ComputationSettings, ConfigurationError, DisplaySettings,
    LegacySpectrogramSettings, SpectrogramSettings,
};
pub use view::SpectrogramClipView;
