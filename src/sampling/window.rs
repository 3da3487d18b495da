//! Sample window sizing and clamping

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::sampling::DEFAULT_SAMPLE_SIZE;
use crate::error::{AnalysisError, SampleError};
use crate::geometry::{ImageSize, PixelCoord};

/// Side length of the square averaging window, in source pixels
///
/// Always odd and at least 1, so the window has a center pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SampleSize(u32);

impl SampleSize {
    /// Validate a window side length
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for zero or even sizes.
    pub fn new(size: u32) -> Result<Self, AnalysisError> {
        if size == 0 || size % 2 == 0 {
            return Err(AnalysisError::invalid_parameter("sample_size", size));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Pixels on each side of the center, `floor(size / 2)`
    pub fn half(self) -> u32 {
        self.0 / 2
    }
}

impl Default for SampleSize {
    fn default() -> Self {
        Self(DEFAULT_SAMPLE_SIZE)
    }
}

impl TryFrom<u32> for SampleSize {
    type Error = AnalysisError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<SampleSize> for u32 {
    fn from(size: SampleSize) -> Self {
        size.0
    }
}

impl fmt::Display for SampleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rectangular region of source pixels, clamped to the image bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SampleWindow {
    /// Window of `size` centered on `center`, intersected with `[0, bounds)`
    ///
    /// Cells outside the image are dropped, so windows at an edge are smaller
    /// than `size × size`.
    ///
    /// # Errors
    ///
    /// Returns `SampleError::EmptyWindow` if nothing is left after clamping,
    /// which happens for zero-sized bounds or a center outside them.
    pub fn around(
        center: PixelCoord,
        size: SampleSize,
        bounds: ImageSize,
    ) -> Result<Self, SampleError> {
        let half = size.half();
        let x0 = center.x.saturating_sub(half);
        let y0 = center.y.saturating_sub(half);
        let x1 = bounds.width.min(center.x.saturating_add(half).saturating_add(1));
        let y1 = bounds.height.min(center.y.saturating_add(half).saturating_add(1));

        if x1 <= x0 || y1 <= y0 {
            return Err(SampleError::EmptyWindow {
                x: center.x,
                y: center.y,
                width: bounds.width,
                height: bounds.height,
            });
        }

        let window = Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        };
        trace!(?center, ?window, "clamped sample window");
        Ok(window)
    }

    /// Number of pixels covered
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
