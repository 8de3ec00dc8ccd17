//! Audio clips as seen by a clip view.

use std::collections::BTreeMap;

/// An audio clip under review.
///
/// Samples may be absent while the host is still fetching them, or after
/// the host has evicted them to bound memory.
#[derive(Debug, Clone, Default)]
pub struct Clip {
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Number of samples in the clip, known even when samples are absent
    pub length: usize,
    /// Mono samples (f32, normalized to -1.0..1.0)
    pub samples: Option<Vec<f32>>,
    /// Annotation values by name (for example a call's center frequency)
    pub annotations: BTreeMap<String, String>,
}

impl Clip {
    /// Create a clip whose samples are already available.
    pub fn new(samples: Vec<f32>, sample_rate: f64) -> Self {
        Self {
            sample_rate,
            length: samples.len(),
            samples: Some(samples),
            annotations: BTreeMap::new(),
        }
    }

    /// Create a clip whose samples have not been loaded yet.
    pub fn without_samples(length: usize, sample_rate: f64) -> Self {
        Self {
            sample_rate,
            length,
            samples: None,
            annotations: BTreeMap::new(),
        }
    }

    /// Attach an annotation, returning the clip.
    pub fn with_annotation(mut self, name: &str, value: impl ToString) -> Self {
        self.annotations.insert(name.to_string(), value.to_string());
        self
    }

    /// Look up a numeric annotation.
    pub fn numeric_annotation(&self, name: &str) -> Option<f64> {
        self.annotations.get(name)?.trim().parse().ok()
    }

    /// Half the sample rate.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Duration in seconds: the number of samples times the sample period.
    pub fn duration(&self) -> f64 {
        if self.sample_rate <= 0.0 {
            return 0.0;
        }
        self.length as f64 / self.sample_rate
    }

    /// Time elapsed from the first sample to the last sample.
    ///
    /// The span of zero samples is zero.
    pub fn span(&self) -> f64 {
        if self.length == 0 || self.sample_rate <= 0.0 {
            return 0.0;
        }
        (self.length - 1) as f64 / self.sample_rate
    }

    /// Drop the samples, keeping the clip's length and rate.
    pub fn release_samples(&mut self) {
        self.samples = None;
    }
}
