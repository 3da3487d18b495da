//! Color conversion and difference module
//!
//! This module handles the sRGB → XYZ → L*a*b* conversion under a
//! selectable reference illuminant, and the ΔE*76 / ΔE*2000 metrics
//! computed on the resulting Lab values.

pub mod conversion;
pub mod difference;
pub mod illuminant;
pub mod types;

pub use conversion::{rgb_to_hex, rgb_to_lab, rgb_to_xyz, xyz_to_lab, ColorConverter};
pub use difference::{delta_e_2000, delta_e_76, DeltaECategory};
pub use illuminant::{Illuminant, WhitePoint};
pub use types::{LabColor, Lch, RgbColor, Xyz};
