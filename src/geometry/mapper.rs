//! Letterboxed image coordinate mapping
//!
//! An image shown with "contain" fitting is scaled uniformly until it touches
//! two opposite container edges and centered along the other axis. This
//! module converts between three coordinate spaces:
//!
//! - container: pointer positions relative to the container's top-left corner
//! - rendered: positions relative to the top-left corner of the scaled image
//! - source: integer pixel indices into the decoded image
//!
//! Algorithm tag: `algo-contain-fit-mapping`

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GeometryError;

/// Natural (decoded) image dimensions in source pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// On-screen container dimensions (fractional layout units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<ImageSize> for ContainerSize {
    fn from(size: ImageSize) -> Self {
        Self::new(size.width as f64, size.height as f64)
    }
}

/// A point in container or rendered-image space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Integer pixel index in source-image space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCoord {
    pub x: u32,
    pub y: u32,
}

impl PixelCoord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Size and position of a contain-fitted image inside its container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderedImageGeometry {
    pub rendered_width: f64,
    pub rendered_height: f64,
    /// Width of each left/right letterbox band
    pub offset_x: f64,
    /// Height of each top/bottom letterbox band
    pub offset_y: f64,
}

fn validate(natural: ImageSize, container: ContainerSize) -> Result<(), GeometryError> {
    if natural.width == 0 || natural.height == 0 {
        return Err(GeometryError::DegenerateImage {
            width: natural.width,
            height: natural.height,
        });
    }
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(container.width) || !usable(container.height) {
        return Err(GeometryError::DegenerateContainer {
            width: container.width,
            height: container.height,
        });
    }
    Ok(())
}

/// Compute the "contain" geometry of an image inside a container
///
/// A relatively wider image fills the container width and is centered
/// vertically; otherwise it fills the height and is centered horizontally.
///
/// # Errors
///
/// Returns `GeometryError` when any dimension is zero (or, for the
/// container, negative or not finite), since the aspect ratios are undefined.
pub fn compute_rendered_geometry(
    natural: ImageSize,
    container: ContainerSize,
) -> Result<RenderedImageGeometry, GeometryError> {
    validate(natural, container)?;

    let image_aspect = natural.width as f64 / natural.height as f64;
    let container_aspect = container.width / container.height;

    let geometry = if image_aspect > container_aspect {
        let rendered_height = container.width / image_aspect;
        RenderedImageGeometry {
            rendered_width: container.width,
            rendered_height,
            offset_x: 0.0,
            offset_y: (container.height - rendered_height) / 2.0,
        }
    } else {
        let rendered_width = container.height * image_aspect;
        RenderedImageGeometry {
            rendered_width,
            rendered_height: container.height,
            offset_x: (container.width - rendered_width) / 2.0,
            offset_y: 0.0,
        }
    };
    Ok(geometry)
}

/// Position relative to the rendered image, clamped to its extent
fn clamp_to_rendered(pointer: Point, geometry: &RenderedImageGeometry) -> Point {
    // clamp() would panic on a hand-built geometry with a negative extent
    Point::new(
        (pointer.x - geometry.offset_x)
            .max(0.0)
            .min(geometry.rendered_width),
        (pointer.y - geometry.offset_y)
            .max(0.0)
            .min(geometry.rendered_height),
    )
}

/// Scale one rendered-space coordinate to a source pixel index in `[0, extent - 1]`
fn scale_to_source(rendered: f64, rendered_extent: f64, natural_extent: u32) -> u32 {
    let scaled = (rendered * (natural_extent as f64 / rendered_extent)).floor();
    // `as` saturates: NaN and negatives become 0
    (scaled as u32).min(natural_extent.saturating_sub(1))
}

/// Map a container-relative pointer position to a source pixel
///
/// Positions over the letterbox bands clamp onto the nearest image edge;
/// the result is always inside `[0, width - 1] × [0, height - 1]`.
pub(crate) fn to_source_pixel(
    pointer: Point,
    geometry: &RenderedImageGeometry,
    natural: ImageSize,
) -> PixelCoord {
    let rendered = clamp_to_rendered(pointer, geometry);
    PixelCoord::new(
        scale_to_source(rendered.x, geometry.rendered_width, natural.width),
        scale_to_source(rendered.y, geometry.rendered_height, natural.height),
    )
}

/// Map a source pixel back to a container-relative point
///
/// The point is the pixel's top-left corner in container space. A zero
/// natural dimension maps every pixel onto the offset.
pub(crate) fn to_container_point(
    pixel: PixelCoord,
    geometry: &RenderedImageGeometry,
    natural: ImageSize,
) -> Point {
    let scale = |rendered: f64, extent: u32| {
        if extent == 0 {
            0.0
        } else {
            rendered / extent as f64
        }
    };
    Point::new(
        pixel.x as f64 * scale(geometry.rendered_width, natural.width) + geometry.offset_x,
        pixel.y as f64 * scale(geometry.rendered_height, natural.height) + geometry.offset_y,
    )
}

/// Coordinate mapper for one image shown in one container
///
/// Holds the validated geometry as an immutable value. When either the image
/// or the container changes size, build a new mapper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageCoordinateMapper {
    natural: ImageSize,
    container: ContainerSize,
    geometry: RenderedImageGeometry,
}

impl ImageCoordinateMapper {
    /// Compute the rendered geometry of `natural` inside `container`
    ///
    /// # Errors
    ///
    /// Returns `GeometryError` for degenerate dimensions.
    pub fn new(natural: ImageSize, container: ContainerSize) -> Result<Self, GeometryError> {
        let geometry = compute_rendered_geometry(natural, container)?;
        debug!(
            natural_width = natural.width,
            natural_height = natural.height,
            rendered_width = geometry.rendered_width,
            rendered_height = geometry.rendered_height,
            offset_x = geometry.offset_x,
            offset_y = geometry.offset_y,
            "computed rendered image geometry"
        );
        Ok(Self {
            natural,
            container,
            geometry,
        })
    }

    /// Mapper for an image displayed at its natural size
    pub fn identity(natural: ImageSize) -> Result<Self, GeometryError> {
        Self::new(natural, natural.into())
    }

    pub fn natural(&self) -> ImageSize {
        self.natural
    }

    pub fn container(&self) -> ContainerSize {
        self.container
    }

    pub fn geometry(&self) -> &RenderedImageGeometry {
        &self.geometry
    }

    /// Source pixels per rendered unit along (x, y)
    pub fn scale(&self) -> (f64, f64) {
        (
            self.natural.width as f64 / self.geometry.rendered_width,
            self.natural.height as f64 / self.geometry.rendered_height,
        )
    }

    /// Map a container-relative pointer to a source pixel, clamped to the image
    pub fn to_source_pixel(&self, pointer: Point) -> PixelCoord {
        to_source_pixel(pointer, &self.geometry, self.natural)
    }

    /// Map a source pixel back to its top-left corner in container space
    pub fn to_container_point(&self, pixel: PixelCoord) -> Point {
        to_container_point(pixel, &self.geometry, self.natural)
    }

    /// Pointer position relative to the rendered image, clamped to it
    pub fn pointer_to_rendered(&self, pointer: Point) -> Point {
        clamp_to_rendered(pointer, &self.geometry)
    }

    /// Picker position for a pointer: container-relative, kept off the letterbox bands
    pub fn clamp_pointer(&self, pointer: Point) -> Point {
        let rendered = self.pointer_to_rendered(pointer);
        Point::new(
            rendered.x + self.geometry.offset_x,
            rendered.y + self.geometry.offset_y,
        )
    }

    /// Center of the rendered image in container space
    pub fn rendered_center(&self) -> Point {
        Point::new(
            self.geometry.offset_x + self.geometry.rendered_width / 2.0,
            self.geometry.offset_y + self.geometry.rendered_height / 2.0,
        )
    }
}
