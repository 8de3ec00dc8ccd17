//! Data windows for short-time spectral analysis.

use std::f64::consts::PI;

use crate::settings::ConfigurationError;

/// Available data window shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowType {
    /// w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,
    /// w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,
    /// w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    Hann,
    /// Four-term Blackman-Harris variant with very low sidelobes
    Nuttall,
    Rectangular,
    /// Bartlett-style triangle reaching zero at both ends
    Triangle,
}

impl WindowType {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "blackman" => Some(Self::Blackman),
            "hamming" => Some(Self::Hamming),
            "hann" | "hanning" => Some(Self::Hann),
            "nuttall" => Some(Self::Nuttall),
            "rectangular" | "boxcar" => Some(Self::Rectangular),
            "triangle" | "triangular" | "bartlett" => Some(Self::Triangle),
            _ => None,
        }
    }

    /// Parse a window type name from settings.
    pub fn parse(s: &str) -> Result<Self, ConfigurationError> {
        Self::from_str(s).ok_or_else(|| ConfigurationError::UnknownWindowType(s.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Blackman => "Blackman",
            Self::Hamming => "Hamming",
            Self::Hann => "Hann",
            Self::Nuttall => "Nuttall",
            Self::Rectangular => "Rectangular",
            Self::Triangle => "Triangle",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Blackman,
            Self::Hamming,
            Self::Hann,
            Self::Nuttall,
            Self::Rectangular,
            Self::Triangle,
        ]
    }
}

/// A data window: its shape and its coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct DataWindow {
    window_type: WindowType,
    samples: Vec<f32>,
}

impl DataWindow {
    /// Create a symmetric window of `length` samples.
    ///
    /// A one-sample window is `[1.0]` for every shape.
    pub fn new(window_type: WindowType, length: usize) -> Self {
        Self {
            window_type,
            samples: generate_window(window_type, length),
        }
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Window coefficients.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

fn generate_window(window_type: WindowType, length: usize) -> Vec<f32> {
    if length == 1 {
        return vec![1.0];
    }

    let m = (length as f64 - 1.0).max(1.0);

    let cosine_sum = |coefficients: &[f64]| -> Vec<f32> {
        (0..length)
            .map(|n| {
                let x = 2.0 * PI * n as f64 / m;
                coefficients
                    .iter()
                    .enumerate()
                    .map(|(k, &a)| {
                        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                        sign * a * (k as f64 * x).cos()
                    })
                    .sum::<f64>() as f32
            })
            .collect()
    };

    match window_type {
        WindowType::Blackman => cosine_sum(&[0.42, 0.5, 0.08]),
        WindowType::Hamming => cosine_sum(&[0.54, 0.46]),
        WindowType::Hann => cosine_sum(&[0.5, 0.5]),
        WindowType::Nuttall => cosine_sum(&[0.355768, 0.487396, 0.144232, 0.012604]),
        WindowType::Rectangular => vec![1.0; length],
        WindowType::Triangle => {
            let half = m / 2.0;
            (0..length)
                .map(|n| (1.0 - ((n as f64 - half) / half).abs()) as f32)
                .collect()
        }
    }
}
