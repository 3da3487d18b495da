//! # Pick Colors
//!
//! A Rust crate for sampling colors from on-screen images and measuring how
//! far they are from reference standards.
//!
//! This library provides:
//! - sRGB → XYZ → CIE L*a*b* conversion under a selectable illuminant
//! - ΔE*76 and ΔE*2000 color differences
//! - Pointer-to-pixel mapping for images shown letterboxed in a container
//! - Averaged region sampling through a pluggable [`PixelReader`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use pick_colors::{analyze_point, image_loader::load_image, ContainerSize,
//!     ImageCoordinateMapper, Point, SamplerSettings};
//! use std::path::Path;
//!
//! let surface = load_image(Path::new("photo.jpg"))?;
//! let mapper = ImageCoordinateMapper::new(surface.size(), ContainerSize::new(800.0, 600.0))?;
//! let reading = analyze_point(&surface, &mapper, Point::new(400.0, 300.0),
//!     &SamplerSettings::default(), None)?;
//! println!("Lab: {:?}, Hex: {}", reading.lab, reading.hex);
//! # Ok::<(), pick_colors::AnalysisError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod image_loader;
pub mod records;
pub mod sampling;

pub use color::{
    delta_e_2000, delta_e_76, rgb_to_hex, rgb_to_lab, ColorConverter, DeltaECategory,
    Illuminant, LabColor, Lch, RgbColor,
};
pub use config::SamplerSettings;
pub use error::{AnalysisError, GeometryError, ParseColorError, Result, SampleError};
pub use geometry::{
    ContainerSize, ImageCoordinateMapper, ImageSize, PixelCoord, Point, RenderedImageGeometry,
};
pub use image_loader::ImageSurface;
pub use records::{CaptureLog, CaptureReading, CaptureRecord, StandardColor, StandardLibrary};
pub use sampling::{PixelReader, RegionSampler, SampleSize};

/// A sampled color in every representation the display needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorReading {
    /// Center of the sampling window in source pixels
    pub source_pixel: PixelCoord,
    /// Window-averaged sRGB color
    pub rgb: RgbColor,
    /// Uppercase `#RRGGBB`
    pub hex: String,
    /// CIE L*a*b* under the reading's illuminant
    pub lab: LabColor,
    /// Cylindrical form of `lab`
    pub lch: Lch,
    pub illuminant: Illuminant,
    /// ΔE2000 against the standard, when one was given
    pub delta_e: Option<f64>,
}

impl ColorReading {
    /// Evaluate `rgb`, and its distance to `standard`, under `converter`'s illuminant
    pub fn evaluate(
        source_pixel: PixelCoord,
        rgb: RgbColor,
        converter: &ColorConverter,
        standard: Option<RgbColor>,
    ) -> Self {
        let lab = converter.rgb_to_lab(rgb);
        let delta_e = standard.map(|s| delta_e_2000(lab, converter.rgb_to_lab(s)));
        Self {
            source_pixel,
            rgb,
            hex: rgb.to_hex(),
            lab,
            lch: lab.to_lch(),
            illuminant: converter.illuminant(),
            delta_e,
        }
    }

    /// Perceptual category of `delta_e`
    pub fn category(&self) -> Option<DeltaECategory> {
        self.delta_e.map(DeltaECategory::from_delta_e)
    }
}

/// Sample the color under a pointer
///
/// This is the main entry point: pointer position → source pixel →
/// averaged color → Lab → ΔE2000 against the optional standard.
///
/// # Arguments
///
/// * `reader` - Pixels of the displayed image
/// * `mapper` - Geometry of the image inside its container
/// * `pointer` - Container-relative pointer position
/// * `settings` - Illuminant and sample window size
/// * `standard` - Reference color to compare against
///
/// # Errors
///
/// Returns `AnalysisError::Sample` if the window cannot be read. Mapping
/// itself cannot fail once the mapper exists.
pub fn analyze_point<R>(
    reader: &R,
    mapper: &ImageCoordinateMapper,
    pointer: Point,
    settings: &SamplerSettings,
    standard: Option<RgbColor>,
) -> Result<ColorReading>
where
    R: PixelReader + ?Sized,
{
    let source_pixel = mapper.to_source_pixel(pointer);
    let rgb = settings
        .sampler()
        .average_color(reader, source_pixel, mapper.natural())?;
    let reading = ColorReading::evaluate(source_pixel, rgb, &settings.converter(), standard);

    debug!(
        x = source_pixel.x,
        y = source_pixel.y,
        hex = %reading.hex,
        l = reading.lab.l,
        a = reading.lab.a,
        b = reading.lab.b,
        delta_e = ?reading.delta_e,
        "analyzed point"
    );
    Ok(reading)
}
