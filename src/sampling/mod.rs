//! Region sampling module
//!
//! Averages the pixels of a small square window around a source pixel. The
//! pixels come from a [`PixelReader`] owned by whatever displays the image.

pub mod region;
pub mod window;

pub use region::{average_color, PixelReader, RegionSampler};
pub use window::{SampleSize, SampleWindow};
