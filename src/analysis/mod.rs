//! Spectrogram analysis.
//!
//! This module provides:
//! - Data windows selected by name
//! - Resolution of user-facing settings into analysis parameters
//! - Short-time Fourier analysis via RustFFT into decibel powers
//! - Linear/logarithmic power conversions

pub mod params;
pub mod power;
pub mod spectrogram;
pub mod window;

pub use params::{dft_size, power_of_two_ceil, resolve, AnalysisParams, MAX_DFT_SIZE};
pub use power::{denoise, linear_to_log, log_to_linear};
pub use spectrogram::{compute_spectrogram, PowerArray, Spectrogram};
pub use window::{DataWindow, WindowType};
