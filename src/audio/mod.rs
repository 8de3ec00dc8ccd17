//! Audio clips and synthetic test signals.
//!
//! This module provides:
//! - The clip entity a view draws (sample rate, length, optional samples, annotations)
//! - Deterministic synthetic signals for tests, benches, and demos

pub mod clip;
pub mod synth;

// Re-export commonly used types
pub use clip::Clip;
pub use synth::{generate_bin_cosine, generate_chirp, generate_sine, generate_white_noise};
