//! Magnified preview geometry
//!
//! Computes which part of the source image a zoomed preview shows, where the
//! sample-window highlight sits inside the preview, and where the preview is
//! placed next to the picker. Drawing is left to the caller.

use serde::{Deserialize, Serialize};

use crate::constants::magnifier::{OFFSET_X, OFFSET_Y, ZOOM_FACTOR};
use crate::geometry::mapper::{ImageCoordinateMapper, Point};
use crate::sampling::SampleSize;

/// Axis-aligned rectangle with fractional coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Everything needed to draw one preview frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnifierView {
    /// Source-image rectangle stretched over the whole canvas. May extend
    /// past the image edges; those parts are painted black.
    pub source: Rect,
    /// Outline of the sampling window, in canvas coordinates
    pub highlight: Rect,
    /// Container-relative position of the preview
    pub placement: Point,
}

/// Preview geometry for a square canvas of side `canvas_size`
///
/// `picker` is the container-relative picker position, normally the output of
/// [`ImageCoordinateMapper::clamp_pointer`].
pub fn magnifier_view(
    mapper: &ImageCoordinateMapper,
    picker: Point,
    canvas_size: f64,
    sample_size: SampleSize,
) -> MagnifierView {
    let side = canvas_size / ZOOM_FACTOR;
    let rendered = mapper.pointer_to_rendered(picker);
    let (scale_x, scale_y) = mapper.scale();

    let highlight_side = sample_size.get() as f64 * ZOOM_FACTOR;
    let highlight_origin = (canvas_size - highlight_side) / 2.0;

    MagnifierView {
        source: Rect {
            x: rendered.x * scale_x - side / 2.0,
            y: rendered.y * scale_y - side / 2.0,
            width: side,
            height: side,
        },
        highlight: Rect {
            x: highlight_origin,
            y: highlight_origin,
            width: highlight_side,
            height: highlight_side,
        },
        placement: Point::new(picker.x + OFFSET_X, picker.y + OFFSET_Y),
    }
}
