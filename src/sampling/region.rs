//! Region averaging over an external pixel source
//!
//! Algorithm tag: `algo-region-average`

use image::RgbaImage;
use tracing::debug;

use crate::color::RgbColor;
use crate::constants::sampling::BYTES_PER_PIXEL;
use crate::error::SampleError;
use crate::geometry::{ImageSize, PixelCoord};
use crate::sampling::window::{SampleSize, SampleWindow};

/// Read access to the RGBA pixels of a displayed image
///
/// Implementations return the region `[x, x + width) × [y, y + height)` as a
/// flat row-major buffer with 4 bytes per pixel (R, G, B, A).
pub trait PixelReader {
    fn read_region(&self, x: u32, y: u32, width: u32, height: u32)
        -> Result<Vec<u8>, SampleError>;
}

impl<T: PixelReader + ?Sized> PixelReader for &T {
    fn read_region(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, SampleError> {
        (**self).read_region(x, y, width, height)
    }
}

impl PixelReader for RgbaImage {
    fn read_region(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, SampleError> {
        let (image_width, image_height) = self.dimensions();
        let fits = x.checked_add(width).is_some_and(|end| end <= image_width)
            && y.checked_add(height).is_some_and(|end| end <= image_height);
        if !fits {
            return Err(SampleError::ReadFailed {
                message: format!(
                    "region {width}x{height} at ({x}, {y}) exceeds {image_width}x{image_height} image"
                ),
            });
        }

        let raw = self.as_raw();
        let stride = image_width as usize * BYTES_PER_PIXEL;
        let row_len = width as usize * BYTES_PER_PIXEL;
        let mut buffer = Vec::with_capacity(row_len * height as usize);
        for row in y..y + height {
            let start = row as usize * stride + x as usize * BYTES_PER_PIXEL;
            buffer.extend_from_slice(&raw[start..start + row_len]);
        }
        Ok(buffer)
    }
}

/// Averages the colors in a square window around a source pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionSampler {
    sample_size: SampleSize,
}

impl RegionSampler {
    pub fn new(sample_size: SampleSize) -> Self {
        Self { sample_size }
    }

    pub fn sample_size(&self) -> SampleSize {
        self.sample_size
    }

    /// Mean RGB of the in-bounds pixels of the window around `center`
    ///
    /// The region is read once. Alpha is ignored and each channel mean is
    /// rounded to the nearest integer.
    ///
    /// # Errors
    ///
    /// `EmptyWindow` when the clamped window has no area, `BufferSize` when
    /// the reader returns a buffer of the wrong length, and whatever the
    /// reader itself reports.
    pub fn average_color<R>(
        &self,
        reader: &R,
        center: PixelCoord,
        bounds: ImageSize,
    ) -> Result<RgbColor, SampleError>
    where
        R: PixelReader + ?Sized,
    {
        let window = SampleWindow::around(center, self.sample_size, bounds)?;
        let pixels = reader.read_region(window.x, window.y, window.width, window.height)?;

        let expected = window.pixel_count() * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(SampleError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }

        let mut sums = [0u64; 3];
        for pixel in pixels.chunks_exact(BYTES_PER_PIXEL) {
            sums[0] += pixel[0] as u64;
            sums[1] += pixel[1] as u64;
            sums[2] += pixel[2] as u64;
        }

        let count = window.pixel_count() as f64;
        let mean = |sum: u64| (sum as f64 / count).round() as u8;
        let color = RgbColor::new(mean(sums[0]), mean(sums[1]), mean(sums[2]));

        debug!(
            x = center.x,
            y = center.y,
            pixels = window.pixel_count(),
            color = %color,
            "sampled region"
        );
        Ok(color)
    }
}

/// Mean color of a `sample_size` window around `center`
///
/// Shorthand for [`RegionSampler::average_color`].
pub fn average_color<R>(
    reader: &R,
    center: PixelCoord,
    sample_size: SampleSize,
    bounds: ImageSize,
) -> Result<RgbColor, SampleError>
where
    R: PixelReader + ?Sized,
{
    RegionSampler::new(sample_size).average_color(reader, center, bounds)
}
