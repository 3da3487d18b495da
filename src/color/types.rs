//! Color value types
//!
//! Plain immutable records for the three color spaces the pipeline passes
//! through. Conversions live in [`super::conversion`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseColorError;

/// A device-space sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl RgbColor {
    /// Create a color from its three channels
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as a `[R, G, B]` array
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Uppercase, zero-padded, `#`-prefixed hex representation
    ///
    /// ```
    /// use pick_colors::RgbColor;
    /// assert_eq!(RgbColor::new(255, 8, 0).to_hex(), "#FF0800");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`
    ///
    /// Parsing is case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        // Reject multi-byte input up front so the slicing below stays on char boundaries
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

/// CIE XYZ tristimulus values on the Y = 100 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A CIE L*a*b* color
///
/// Only meaningful together with the illuminant that produced it; never
/// compare values computed under different illuminants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabColor {
    /// Lightness (0..=100)
    pub l: f64,
    /// Green (-) to red (+)
    pub a: f64,
    /// Blue (-) to yellow (+)
    pub b: f64,
}

impl LabColor {
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma, the distance from the neutral axis
    #[inline]
    pub fn chroma(&self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Cylindrical representation with hue in degrees, [0, 360)
    pub fn to_lch(&self) -> Lch {
        let mut h = self.b.atan2(self.a).to_degrees();
        if h < 0.0 {
            h += 360.0;
        }
        Lch {
            l: self.l,
            c: self.chroma(),
            h,
        }
    }
}

/// CIE LCh(ab): lightness, chroma and hue angle of a [`LabColor`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    /// Hue angle in degrees
    pub h: f64,
}

impl From<RgbColor> for palette::Srgb<u8> {
    fn from(color: RgbColor) -> Self {
        palette::Srgb::new(color.r, color.g, color.b)
    }
}

impl From<palette::Srgb<u8>> for RgbColor {
    fn from(color: palette::Srgb<u8>) -> Self {
        RgbColor::new(color.red, color.green, color.blue)
    }
}

/// `palette` fixes the white point at compile time, so this is only
/// colorimetrically meaningful for values computed under D65.
impl From<LabColor> for palette::Lab<palette::white_point::D65, f64> {
    fn from(lab: LabColor) -> Self {
        palette::Lab::new(lab.l, lab.a, lab.b)
    }
}
