//! Color space conversion utilities
//!
//! Provides the device RGB → linear RGB → XYZ → L*a*b* pipeline:
//! - sRGB inverse gamma (IEC 61966-2-1)
//! - Fixed sRGB/D65 primaries matrix
//! - White point normalization by the selected illuminant
//! - CIE L*a*b* nonlinearity
//!
//! The RGB → XYZ matrix is always the sRGB/D65 one, whatever the illuminant.
//! Only the white point normalization changes with the illuminant, so non-D65
//! values are white-point-relative Lab values, not a chromatic adaptation.

use crate::color::difference::delta_e_2000;
use crate::color::illuminant::{Illuminant, WhitePoint};
use crate::color::types::{LabColor, RgbColor, Xyz};
use crate::constants::{cielab, srgb};

/// Decode one 8-bit sRGB channel to linear light on the 0..100 scale
#[inline]
fn linearize(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    let linear = if c > srgb::LINEAR_THRESHOLD {
        ((c + srgb::GAMMA_OFFSET) / srgb::GAMMA_SCALE).powf(srgb::GAMMA)
    } else {
        c / srgb::LINEAR_SLOPE
    };
    linear * 100.0
}

/// CIE L*a*b* companding function
#[inline]
fn lab_f(t: f64) -> f64 {
    if t > cielab::EPSILON {
        t.cbrt()
    } else {
        cielab::LINEAR_SLOPE * t + cielab::LINEAR_OFFSET
    }
}

/// Convert an 8-bit sRGB color to CIE XYZ (Y = 100 for white)
pub fn rgb_to_xyz(rgb: RgbColor) -> Xyz {
    let r = linearize(rgb.r);
    let g = linearize(rgb.g);
    let b = linearize(rgb.b);
    let [mx, my, mz] = srgb::TO_XYZ;
    Xyz::new(
        r * mx[0] + g * mx[1] + b * mx[2],
        r * my[0] + g * my[1] + b * my[2],
        r * mz[0] + g * mz[1] + b * mz[2],
    )
}

/// Convert XYZ to L*a*b* relative to the given white point
pub fn xyz_to_lab(xyz: Xyz, white: WhitePoint) -> LabColor {
    let fx = lab_f(xyz.x / white.xn);
    let fy = lab_f(xyz.y / white.yn);
    let fz = lab_f(xyz.z / white.zn);
    LabColor::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Convert an 8-bit sRGB color to L*a*b* under the given illuminant
pub fn rgb_to_lab(rgb: RgbColor, illuminant: Illuminant) -> LabColor {
    xyz_to_lab(rgb_to_xyz(rgb), illuminant.white_point())
}

/// Uppercase `#RRGGBB` representation
pub fn rgb_to_hex(rgb: RgbColor) -> String {
    rgb.to_hex()
}

/// Color converter bound to one reference illuminant
///
/// Every Lab value produced by the same converter is comparable with every
/// other. Build a new converter when the user selects another illuminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorConverter {
    illuminant: Illuminant,
}

impl ColorConverter {
    /// Create a converter normalizing to the given illuminant
    pub fn new(illuminant: Illuminant) -> Self {
        Self { illuminant }
    }

    /// The illuminant every Lab value of this converter refers to
    pub fn illuminant(&self) -> Illuminant {
        self.illuminant
    }

    /// Convert RGB (0-255) to Lab color space
    ///
    /// # Arguments
    ///
    /// * `rgb` - Device sRGB color
    ///
    /// # Returns
    ///
    /// Lab color relative to this converter's illuminant
    pub fn rgb_to_lab(&self, rgb: RgbColor) -> LabColor {
        rgb_to_lab(rgb, self.illuminant)
    }

    /// Normalize XYZ by this converter's white point
    pub fn xyz_to_lab(&self, xyz: Xyz) -> LabColor {
        xyz_to_lab(xyz, self.illuminant.white_point())
    }

    /// ΔE2000 between a sampled color and a reference standard
    ///
    /// Both colors are converted under the same illuminant before comparing.
    pub fn compare(&self, sample: RgbColor, standard: RgbColor) -> f64 {
        delta_e_2000(self.rgb_to_lab(sample), self.rgb_to_lab(standard))
    }
}
