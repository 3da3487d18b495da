//! Image loading and upload validation
//!
//! This module turns an image file into an [`ImageSurface`], the in-memory
//! RGBA pixel source the sampler reads from. Files are checked against the
//! upload limits before decoding.
//!
//! ## Supported Formats
//!
//! Everything the `image` crate decodes with its default features:
//! - JPEG, PNG, GIF, WebP, TIFF, BMP, ICO, TGA, EXR, PNM, QOI, DDS, HDR
//!
//! ## Design
//!
//! All images are converted to 8-bit RGBA on load, which is the layout
//! [`PixelReader`] hands out. Multi-frame formats contribute their first frame.

use std::path::Path;

use image::{ImageReader, RgbaImage};
use tracing::debug;

use crate::constants::upload::MAX_FILE_SIZE_BYTES;
use crate::error::{AnalysisError, Result, SampleError};
use crate::geometry::ImageSize;
use crate::sampling::PixelReader;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image (first frame only)
    Gif,
    /// WebP image
    WebP,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
    /// ICO image
    Ico,
    /// TGA image
    Tga,
    /// OpenEXR image
    Exr,
    /// PNM image (PBM, PGM, PPM)
    Pnm,
    /// QOI image
    Qoi,
    /// DDS image
    Dds,
    /// HDR image
    Hdr,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "ico" => Some(ImageFormat::Ico),
            "tga" => Some(ImageFormat::Tga),
            "exr" => Some(ImageFormat::Exr),
            "pbm" | "pgm" | "ppm" | "pnm" => Some(ImageFormat::Pnm),
            "qoi" => Some(ImageFormat::Qoi),
            "dds" => Some(ImageFormat::Dds),
            "hdr" => Some(ImageFormat::Hdr),
            _ => None,
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::WebP => image::ImageFormat::WebP,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Ico => image::ImageFormat::Ico,
            ImageFormat::Tga => image::ImageFormat::Tga,
            ImageFormat::Exr => image::ImageFormat::OpenExr,
            ImageFormat::Pnm => image::ImageFormat::Pnm,
            ImageFormat::Qoi => image::ImageFormat::Qoi,
            ImageFormat::Dds => image::ImageFormat::Dds,
            ImageFormat::Hdr => image::ImageFormat::Hdr,
        }
    }
}

/// Decoded image held as 8-bit RGBA
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Wrap a row-major RGBA buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when the buffer length is not
    /// `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let len = pixels.len();
        let invalid = || {
            AnalysisError::invalid_parameter("pixels", format!("{len} bytes for {width}x{height}"))
        };
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(invalid)?;
        if len != expected {
            return Err(invalid());
        }
        RgbaImage::from_raw(width, height, pixels)
            .map(Self::from_image)
            .ok_or_else(invalid)
    }

    /// Natural dimensions
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.image.width(), self.image.height())
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl PixelReader for ImageSurface {
    fn read_region(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> std::result::Result<Vec<u8>, SampleError> {
        self.image.read_region(x, y, width, height)
    }
}

/// Reject files above the upload size limit
pub fn check_file_size(size: u64) -> Result<()> {
    if size > MAX_FILE_SIZE_BYTES {
        return Err(AnalysisError::FileTooLarge {
            size,
            limit: MAX_FILE_SIZE_BYTES,
        });
    }
    Ok(())
}

/// Check that a file may be loaded: within the size limit and of a known format
///
/// # Errors
///
/// - `ImageLoadError` if the file metadata cannot be read
/// - `FileTooLarge` above 10 MB
/// - `UnsupportedFormat` for unknown extensions
pub fn validate_upload(path: &Path) -> Result<ImageFormat> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;
    check_file_size(metadata.len())?;

    ImageFormat::from_extension(path).ok_or_else(|| AnalysisError::UnsupportedFormat {
        path: path.display().to_string(),
    })
}

/// Validate and decode an image file
///
/// # Example
///
/// ```rust,no_run
/// use pick_colors::image_loader::load_image;
/// use std::path::Path;
///
/// let surface = load_image(Path::new("photo.jpg"))?;
/// println!("Loaded image: {:?}", surface.size());
/// # Ok::<(), pick_colors::AnalysisError>(())
/// ```
pub fn load_image(path: &Path) -> Result<ImageSurface> {
    let format = validate_upload(path)?;

    let mut reader = ImageReader::open(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;
    reader.set_format(format.into());

    let image = reader.decode().map_err(|e| {
        AnalysisError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    let surface = ImageSurface::from_image(image.to_rgba8());
    debug!(
        path = %path.display(),
        ?format,
        width = surface.size().width,
        height = surface.size().height,
        "loaded image"
    );
    Ok(surface)
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico", "tga", "exr", "pbm",
        "pgm", "ppm", "pnm", "qoi", "dds", "hdr",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.jpg")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.JPEG")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.png")),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.webp")),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_extension(Path::new("photo.xyz")), None);
        assert_eq!(ImageFormat::from_extension(Path::new("photo")), None);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension("jpg"));
        assert!(is_supported_extension("JPEG"));
        assert!(is_supported_extension("png"));
        assert!(!is_supported_extension("xyz"));
        assert!(!is_supported_extension("doc"));

        for ext in supported_extensions() {
            let name = format!("image.{ext}");
            assert!(ImageFormat::from_extension(Path::new(&name)).is_some(), "{ext}");
        }
    }

    #[test]
    fn test_file_size_limit() {
        assert!(check_file_size(MAX_FILE_SIZE_BYTES).is_ok());
        assert!(matches!(
            check_file_size(MAX_FILE_SIZE_BYTES + 1),
            Err(AnalysisError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(
            validate_upload(&path),
            Err(AnalysisError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_validate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            validate_upload(&dir.path().join("gone.png")),
            Err(AnalysisError::ImageLoadError { .. })
        ));
    }

    #[test]
    fn test_load_png_as_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swatch.png");
        let image = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8 * 100, y as u8 * 100, 7, 255]));
        image.save(&path).unwrap();

        let surface = load_image(&path).unwrap();
        assert_eq!(surface.size(), ImageSize::new(3, 2));
        assert_eq!(surface.read_region(2, 1, 1, 1).unwrap(), vec![200, 100, 7, 255]);
    }

    #[test]
    fn test_corrupt_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"\x89PNG but not really").unwrap();
        assert!(matches!(
            load_image(&path),
            Err(AnalysisError::ImageLoadError { .. })
        ));
    }

    #[test]
    fn test_surface_from_rgba_checks_length() {
        assert!(ImageSurface::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            ImageSurface::from_rgba(2, 2, vec![0; 15]),
            Err(AnalysisError::InvalidParameter { .. })
        ));
    }
}
