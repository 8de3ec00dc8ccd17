//! Conversions between time/frequency and pixel coordinates.
//!
//! Two pixel spaces are involved: spectrogram space, where row 0 is the
//! Nyquist frequency and the last row is DC, and view space, where row 0 is
//! the top of the view's frequency range and the bottom edge is its low end.

/// Spectrogram row coordinate of a frequency.
///
/// Maps `[0, nyquist]` linearly onto `[num_bins - 1, 0]`.
pub fn freq_to_gram_row(freq: f64, nyquist: f64, num_bins: usize) -> f64 {
    let last_row = num_bins.saturating_sub(1) as f64;
    if nyquist <= 0.0 {
        return last_row;
    }
    (1.0 - freq / nyquist) * last_row
}

/// View row coordinate of a frequency.
///
/// Maps `[low_freq, high_freq]` linearly onto `[view_height, 0]`.
pub fn freq_to_view_row(freq: f64, low_freq: f64, high_freq: f64, view_height: f64) -> f64 {
    let delta = high_freq - low_freq;
    if delta <= 0.0 {
        return view_height;
    }
    (1.0 - (freq - low_freq) / delta) * view_height
}

/// View column coordinate of a time within a clip.
///
/// Maps `[0, clip_span]` linearly onto `[0, view_width]`.
pub fn time_to_view_column(time: f64, clip_span: f64, view_width: f64) -> f64 {
    if clip_span <= 0.0 {
        return 0.0;
    }
    time / clip_span * view_width
}

/// Bounding box of a view element in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Snap fractional edges inward to whole pixels.
    ///
    /// Left and top round up, right and bottom round down, so that integer
    /// pointer coordinates on an edge are unambiguous.
    pub fn rounded(&self) -> Self {
        Self {
            left: self.left.ceil(),
            top: self.top.ceil(),
            right: self.right.floor(),
            bottom: self.bottom.floor(),
        }
    }

    /// Whether a point lies within the box, edges included.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Clip time under a pointer column.
///
/// The left edge is time zero and the right edge is the clip span.
/// Returns `None` outside the box's rounded horizontal extent.
pub fn pixel_to_time(x: f64, left: f64, right: f64, clip_span: f64) -> Option<f64> {
    let (left, right) = (left.ceil(), right.floor());
    if x < left || x > right || right <= left {
        return None;
    }
    Some((x - left) / (right - left) * clip_span)
}

/// Frequency under a pointer row.
///
/// The top edge is `high_freq` and the bottom edge is `low_freq`.
/// Returns `None` outside the box's rounded vertical extent.
pub fn pixel_to_freq(y: f64, top: f64, bottom: f64, low_freq: f64, high_freq: f64) -> Option<f64> {
    let (top, bottom) = (top.ceil(), bottom.floor());
    if y < top || y > bottom || bottom <= top {
        return None;
    }
    Some(high_freq - (y - top) / (bottom - top) * (high_freq - low_freq))
}

/// Time and frequency under a pointer, or `None` when it is outside the element.
pub fn hit_test(
    x: f64,
    y: f64,
    element: &BoundingBox,
    clip_span: f64,
    low_freq: f64,
    high_freq: f64,
) -> Option<(f64, f64)> {
    if !element.rounded().contains(x, y) {
        return None;
    }
    let time = pixel_to_time(x, element.left, element.right, clip_span)?;
    let freq = pixel_to_freq(y, element.top, element.bottom, low_freq, high_freq)?;
    Some((time, freq))
}
