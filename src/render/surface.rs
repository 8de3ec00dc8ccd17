//! Drawing surfaces.
//!
//! [`DrawingSurface`] is the canvas-like handle a host passes into a view
//! for the duration of one draw. [`ImageSurface`] is a software surface
//! backed by an RGBA image, used for offscreen rendering and tests.

use std::path::Path;

use image::{ImageResult, Pixel, Rgba, RgbaImage};

/// Neutral gray painted behind the spectrogram (CSS `gray`).
pub const BACKGROUND_GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Axis-aligned rectangle with fractional coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True for rectangles with no positive, finite area.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
    }
}

/// A canvas-like 2-D drawing target.
pub trait DrawingSurface {
    /// Width in device pixels.
    fn width(&self) -> u32;

    /// Height in device pixels.
    fn height(&self) -> u32;

    /// Resize the surface, clearing its contents.
    fn resize(&mut self, width: u32, height: u32);

    /// Fill a rectangle with a color composited over the existing contents.
    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>);

    /// Draw the `source` region of `image` stretched into `dest`.
    ///
    /// Both rectangles may have fractional coordinates. With `smooth` the
    /// stretch interpolates between pixels, otherwise it picks the nearest.
    fn draw_image(&mut self, image: &RgbaImage, source: Rect, dest: Rect, smooth: bool);
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        (**self).fill_rect(rect, color)
    }

    fn draw_image(&mut self, image: &RgbaImage, source: Rect, dest: Rect, smooth: bool) {
        (**self).draw_image(image, source, dest, smooth)
    }
}

/// Software drawing surface backed by an RGBA image.
#[derive(Debug, Clone)]
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Color of one pixel, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.image.width() && y < self.image.height()).then(|| *self.image.get_pixel(x, y))
    }

    /// Write the surface to a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
    }
}

impl DrawingSurface for ImageSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        if rect.is_empty() {
            return;
        }
        for py in covered_pixels(rect.y, rect.bottom(), self.image.height()) {
            for px in covered_pixels(rect.x, rect.right(), self.image.width()) {
                self.image.get_pixel_mut(px, py).blend(&color);
            }
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, source: Rect, dest: Rect, smooth: bool) {
        if source.is_empty() || dest.is_empty() {
            return;
        }

        // Source region clipped to the image
        let x0 = source.x.max(0.0);
        let x1 = source.right().min(image.width() as f64);
        let y0 = source.y.max(0.0);
        let y1 = source.bottom().min(image.height() as f64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let bounds = SampleBounds {
            min_x: x0.floor() as i64,
            max_x: x1.ceil() as i64 - 1,
            min_y: y0.floor() as i64,
            max_y: y1.ceil() as i64 - 1,
        };

        let x_ratio = source.width / dest.width;
        let y_ratio = source.height / dest.height;

        for py in covered_pixels(dest.y, dest.bottom(), self.image.height()) {
            let sy = source.y + (py as f64 + 0.5 - dest.y) * y_ratio;
            for px in covered_pixels(dest.x, dest.right(), self.image.width()) {
                let sx = source.x + (px as f64 + 0.5 - dest.x) * x_ratio;
                let color = if smooth {
                    sample_bilinear(image, sx, sy, &bounds)
                } else {
                    sample_nearest(image, sx, sy, &bounds)
                };
                self.image.put_pixel(px, py, color);
            }
        }
    }
}

/// Inclusive pixel index bounds that sampling may read.
struct SampleBounds {
    min_x: i64,
    max_x: i64,
    min_y: i64,
    max_y: i64,
}

impl SampleBounds {
    fn pixel<'a>(&self, image: &'a RgbaImage, x: i64, y: i64) -> &'a Rgba<u8> {
        let x = x.clamp(self.min_x, self.max_x) as u32;
        let y = y.clamp(self.min_y, self.max_y) as u32;
        image.get_pixel(x, y)
    }
}

/// Indices of pixels whose centers lie in `[start, end)`, within `0..size`.
fn covered_pixels(start: f64, end: f64, size: u32) -> std::ops::Range<u32> {
    let first = (start - 0.5).ceil().clamp(0.0, size as f64) as u32;
    let last = (end - 0.5).ceil().clamp(0.0, size as f64) as u32;
    first..last.max(first)
}

fn sample_nearest(image: &RgbaImage, sx: f64, sy: f64, bounds: &SampleBounds) -> Rgba<u8> {
    *bounds.pixel(image, sx.floor() as i64, sy.floor() as i64)
}

fn sample_bilinear(image: &RgbaImage, sx: f64, sy: f64, bounds: &SampleBounds) -> Rgba<u8> {
    let fx = sx - 0.5;
    let fy = sy - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = bounds.pixel(image, x0, y0);
    let p10 = bounds.pixel(image, x0 + 1, y0);
    let p01 = bounds.pixel(image, x0, y0 + 1);
    let p11 = bounds.pixel(image, x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for (c, value) in out.iter_mut().enumerate() {
        let top = p00[c] as f64 * (1.0 - tx) + p10[c] as f64 * tx;
        let bottom = p01[c] as f64 * (1.0 - tx) + p11[c] as f64 * tx;
        *value = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}
