//! Screen-to-image geometry
//!
//! Maps pointer positions over a letterboxed, scaled image to source pixels,
//! and computes the magnified preview layout around the picker.

pub mod magnifier;
pub mod mapper;

pub use magnifier::{magnifier_view, MagnifierView, Rect};
pub use mapper::{
    compute_rendered_geometry, ContainerSize, ImageCoordinateMapper, ImageSize, PixelCoord, Point,
    RenderedImageGeometry,
};
