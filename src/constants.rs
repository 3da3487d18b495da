//! Colorimetric constants and reference values
//!
//! This module contains compile-time constants for the sRGB → XYZ → L*a*b*
//! pipeline, the supported reference white points, and the limits used by
//! the sampling and image loading layers.

/// CIE standard illuminant white points, scaled so that Yn = 100
///
/// Source: CIE 15:2004 Colorimetry, 3rd edition (2° observer)
pub mod white_points {
    /// D65: average daylight, 6504K. Default reference for displays.
    pub const D65: [f64; 3] = [95.047, 100.000, 108.883];

    /// A: tungsten / incandescent, 2856K
    pub const A: [f64; 3] = [109.850, 100.000, 35.585];

    /// F2: cool white fluorescent, 4230K
    pub const F2: [f64; 3] = [99.187, 100.000, 67.395];
}

/// sRGB transfer function and primaries (IEC 61966-2-1)
pub mod srgb {
    /// Encoded value above which the power segment of the inverse gamma applies
    pub const LINEAR_THRESHOLD: f64 = 0.04045;

    /// Slope of the linear segment near black
    pub const LINEAR_SLOPE: f64 = 12.92;

    /// Offset of the power segment
    pub const GAMMA_OFFSET: f64 = 0.055;

    /// Scale of the power segment, 1 + offset
    pub const GAMMA_SCALE: f64 = 1.055;

    /// Exponent of the power segment
    pub const GAMMA: f64 = 2.4;

    /// Linear RGB (0..100) to XYZ, D65 primaries. Rows are X, Y, Z.
    pub const TO_XYZ: [[f64; 3]; 3] = [
        [0.4124, 0.3576, 0.1805],
        [0.2126, 0.7152, 0.0722],
        [0.0193, 0.1192, 0.9505],
    ];
}

/// CIE L*a*b* nonlinearity
pub mod cielab {
    /// (6/29)^3, rounded as in CIE 15
    pub const EPSILON: f64 = 0.008856;

    /// Slope of the linear segment, (29/6)^2 / 3 rounded
    pub const LINEAR_SLOPE: f64 = 7.787;

    /// Offset of the linear segment
    pub const LINEAR_OFFSET: f64 = 16.0 / 116.0;
}

/// CIEDE2000 constants
pub mod ciede2000 {
    /// 25^7, the chroma reference in the G and R_C terms
    pub const CHROMA_REF_POW7: f64 = 6_103_515_625.0;
}

/// Perceptual thresholds for ΔE2000
pub mod thresholds {
    /// Below this the difference is not perceptible
    pub const IMPERCEPTIBLE: f64 = 1.0;

    /// Below this the difference is perceptible only through close observation
    pub const BARELY_PERCEPTIBLE: f64 = 2.0;

    /// Below this the difference is noticeable at a glance
    pub const NOTICEABLE: f64 = 10.0;

    /// Below this colors are more similar than opposite
    pub const DISTINCT: f64 = 50.0;
}

/// Region sampling parameters
pub mod sampling {
    /// Default side of the square averaging window, in source pixels
    pub const DEFAULT_SAMPLE_SIZE: u32 = 5;

    /// Bytes per pixel in buffers returned by a pixel reader (RGBA)
    pub const BYTES_PER_PIXEL: usize = 4;
}

/// Magnified preview geometry
pub mod magnifier {
    /// Screen pixels per source pixel in the preview
    pub const ZOOM_FACTOR: f64 = 10.0;

    /// Horizontal distance from the picker to the preview
    pub const OFFSET_X: f64 = 60.0;

    /// Vertical distance from the picker to the preview (upwards)
    pub const OFFSET_Y: f64 = -60.0;
}

/// Image upload limits
pub mod upload {
    /// Maximum accepted file size in megabytes
    pub const MAX_FILE_SIZE_MB: u64 = 10;

    /// Maximum accepted file size in bytes
    pub const MAX_FILE_SIZE_BYTES: u64 = MAX_FILE_SIZE_MB * 1024 * 1024;
}
