//! Spectrogram rendering.
//!
//! This module provides:
//! - Named colormaps and the power-to-color mapping
//! - Rasterization of spectrogram powers into RGBA images
//! - A canvas-like drawing surface trait with a software implementation
//! - Placement of spectrogram images within a clip view
//! - Conversions between time/frequency and pixel coordinates

pub mod colormap;
pub mod compositor;
pub mod coords;
pub mod raster;
pub mod surface;

pub use colormap::{Colormap, ColormapTable};
pub use compositor::{draw_spectrogram, frequency_extent, plan_draw, time_extent, Blit, DrawPlan};
pub use coords::{
    freq_to_gram_row, freq_to_view_row, hit_test, pixel_to_freq, pixel_to_time,
    time_to_view_column, BoundingBox,
};
pub use raster::{color_coefficients, rasterize, ColorCoefficients};
pub use surface::{DrawingSurface, ImageSurface, Rect, BACKGROUND_GRAY};
