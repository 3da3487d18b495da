//! Perceptual color difference metrics
//!
//! - ΔE*76: Euclidean distance in L*a*b*
//! - ΔE*2000: CIEDE2000 (Sharma, Wu & Dalal, 2005), parametric factors 1
//!
//! Intermediate angles are carried in degrees and converted to radians
//! only at each trigonometric call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::types::LabColor;
use crate::constants::{ciede2000::CHROMA_REF_POW7, thresholds};

/// CIE 1976 color difference
pub fn delta_e_76(lab1: LabColor, lab2: LabColor) -> f64 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// `sqrt(c^7 / (c^7 + 25^7))`, shared by the G and R_C terms
#[inline]
fn chroma_ratio(c: f64) -> f64 {
    let c7 = c.powi(7);
    (c7 / (c7 + CHROMA_REF_POW7)).sqrt()
}

/// Hue angle in degrees, [0, 360)
#[inline]
fn hue_degrees(b: f64, a_prime: f64) -> f64 {
    let h = b.atan2(a_prime).to_degrees();
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

/// CIEDE2000 color difference
///
/// Total over finite inputs. Achromatic colors (C′ = 0) take the zero-chroma
/// branches for the hue difference and mean hue.
pub fn delta_e_2000(lab1: LabColor, lab2: LabColor) -> f64 {
    let LabColor { l: l1, a: a1, b: b1 } = lab1;
    let LabColor { l: l2, a: a2, b: b2 } = lab2;

    let c1 = a1.hypot(b1);
    let c2 = a2.hypot(b2);
    let c_mean = (c1 + c2) / 2.0;

    let g = 0.5 * (1.0 - chroma_ratio(c_mean));
    let a1p = (1.0 + g) * a1;
    let a2p = (1.0 + g) * a2;

    let c1p = a1p.hypot(b1);
    let c2p = a2p.hypot(b2);
    let h1p = hue_degrees(b1, a1p);
    let h2p = hue_degrees(b2, a2p);

    let dlp = l2 - l1;
    let dcp = c2p - c1p;

    let chroma_product = c1p * c2p;
    let dhp = if chroma_product == 0.0 {
        0.0
    } else {
        let d = h2p - h1p;
        if d > 180.0 {
            d - 360.0
        } else if d < -180.0 {
            d + 360.0
        } else {
            d
        }
    };
    let d_big_hp = 2.0 * chroma_product.sqrt() * (dhp / 2.0).to_radians().sin();

    let lp_mean = (l1 + l2) / 2.0;
    let cp_mean = (c1p + c2p) / 2.0;
    let hp_mean = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() > 180.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p) / 2.0
    };

    let t = 1.0 - 0.17 * (hp_mean - 30.0).to_radians().cos()
        + 0.24 * (2.0 * hp_mean).to_radians().cos()
        + 0.32 * (3.0 * hp_mean + 6.0).to_radians().cos()
        - 0.20 * (4.0 * hp_mean - 63.0).to_radians().cos();

    let lp_offset_sq = (lp_mean - 50.0).powi(2);
    let sl = 1.0 + (0.015 * lp_offset_sq) / (20.0 + lp_offset_sq).sqrt();
    let sc = 1.0 + 0.045 * cp_mean;
    let sh = 1.0 + 0.015 * cp_mean * t;

    let delta_theta = 30.0 * (-((hp_mean - 275.0) / 25.0).powi(2)).exp();
    let rc = 2.0 * chroma_ratio(cp_mean);
    let rt = -(2.0 * delta_theta).to_radians().sin() * rc;

    let term_l = dlp / sl;
    let term_c = dcp / sc;
    let term_h = d_big_hp / sh;

    // Round-off can push the sum slightly below zero
    (term_l * term_l + term_c * term_c + term_h * term_h + rt * term_c * term_h)
        .max(0.0)
        .sqrt()
}

/// Perceptual category of a ΔE2000 value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaECategory {
    /// ΔE00 < 1.0
    Imperceptible,
    /// ΔE00 1.0-2.0, perceptible through close observation
    BarelyPerceptible,
    /// ΔE00 2.0-10.0, perceptible at a glance
    Noticeable,
    /// ΔE00 10.0-50.0, colors more similar than opposite
    Distinct,
    /// ΔE00 >= 50.0
    VeryDistinct,
}

impl DeltaECategory {
    pub fn from_delta_e(delta_e: f64) -> Self {
        if delta_e < thresholds::IMPERCEPTIBLE {
            Self::Imperceptible
        } else if delta_e < thresholds::BARELY_PERCEPTIBLE {
            Self::BarelyPerceptible
        } else if delta_e < thresholds::NOTICEABLE {
            Self::Noticeable
        } else if delta_e < thresholds::DISTINCT {
            Self::Distinct
        } else {
            Self::VeryDistinct
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Imperceptible => "imperceptible",
            Self::BarelyPerceptible => "barely perceptible",
            Self::Noticeable => "noticeable",
            Self::Distinct => "distinct",
            Self::VeryDistinct => "very distinct",
        }
    }
}

impl fmt::Display for DeltaECategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sharma, Wu & Dalal (2005), Table 1: (L1, a1, b1, L2, a2, b2, ΔE00)
    const SHARMA_PAIRS: [(f64, f64, f64, f64, f64, f64, f64); 34] = [
        (50.0, 2.6772, -79.7751, 50.0, 0.0, -82.7485, 2.0425),
        (50.0, 3.1571, -77.2803, 50.0, 0.0, -82.7485, 2.8615),
        (50.0, 2.8361, -74.0200, 50.0, 0.0, -82.7485, 3.4412),
        (50.0, -1.3802, -84.2814, 50.0, 0.0, -82.7485, 1.0000),
        (50.0, -1.1848, -84.8006, 50.0, 0.0, -82.7485, 1.0000),
        (50.0, -0.9009, -85.5211, 50.0, 0.0, -82.7485, 1.0000),
        (50.0, 0.0, 0.0, 50.0, -1.0, 2.0, 2.3669),
        (50.0, -1.0, 2.0, 50.0, 0.0, 0.0, 2.3669),
        (50.0, 2.4900, -0.0010, 50.0, -2.4900, 0.0009, 7.1792),
        (50.0, 2.4900, -0.0010, 50.0, -2.4900, 0.0010, 7.1792),
        (50.0, 2.4900, -0.0010, 50.0, -2.4900, 0.0011, 7.2195),
        (50.0, 2.4900, -0.0010, 50.0, -2.4900, 0.0012, 7.2195),
        (50.0, -0.0010, 2.4900, 50.0, 0.0009, -2.4900, 4.8045),
        (50.0, -0.0010, 2.4900, 50.0, 0.0010, -2.4900, 4.8045),
        (50.0, -0.0010, 2.4900, 50.0, 0.0011, -2.4900, 4.7461),
        (50.0, 2.5, 0.0, 50.0, 0.0, -2.5, 4.3065),
        (50.0, 2.5, 0.0, 73.0, 25.0, -18.0, 27.1492),
        (50.0, 2.5, 0.0, 61.0, -5.0, 29.0, 22.8977),
        (50.0, 2.5, 0.0, 56.0, -27.0, -3.0, 31.9030),
        (50.0, 2.5, 0.0, 58.0, 24.0, 15.0, 19.4535),
        (50.0, 2.5, 0.0, 50.0, 3.1736, 0.5854, 1.0000),
        (50.0, 2.5, 0.0, 50.0, 3.2972, 0.0, 1.0000),
        (50.0, 2.5, 0.0, 50.0, 1.8634, 0.5757, 1.0000),
        (50.0, 2.5, 0.0, 50.0, 3.2592, 0.3350, 1.0000),
        (60.2574, -34.0099, 36.2677, 60.4626, -34.1751, 39.4387, 1.2644),
        (63.0109, -31.0961, -5.8663, 62.8187, -29.7946, -4.0864, 1.2630),
        (61.2901, 3.7196, -5.3901, 61.4292, 2.2480, -4.9620, 1.8731),
        (35.0831, -44.1164, 3.7933, 35.0232, -40.0716, 1.5901, 1.8645),
        (22.7233, 20.0904, -46.6940, 23.0331, 14.9730, -42.5619, 2.0373),
        (36.4612, 47.8580, 18.3852, 36.2715, 50.5065, 21.2231, 1.4146),
        (90.8027, -2.0831, 1.4410, 91.1528, -1.6435, 0.0447, 1.4441),
        (90.9257, -0.5406, -0.9208, 88.6381, -0.8985, -0.7239, 1.5381),
        (6.7747, -0.2908, -2.4247, 5.8714, -0.0985, -2.2286, 0.6377),
        (2.0776, 0.0795, -1.1350, 0.9033, -0.0636, -0.5514, 0.9082),
    ];

    #[test]
    fn test_ciede2000_reference_pairs() {
        for (i, &(l1, a1, b1, l2, a2, b2, expected)) in SHARMA_PAIRS.iter().enumerate() {
            let result = delta_e_2000(LabColor::new(l1, a1, b1), LabColor::new(l2, a2, b2));
            assert!(
                (result - expected).abs() < 1e-3,
                "pair {}: expected {expected:.4}, got {result:.4}",
                i + 1
            );
        }
    }

    #[test]
    fn test_ciede2000_first_pair_precise() {
        let de = delta_e_2000(
            LabColor::new(50.0, 2.6772, -79.7751),
            LabColor::new(50.0, 0.0, -82.7485),
        );
        assert!((de - 2.0425).abs() < 1e-4, "got {de}");
    }

    #[test]
    fn test_ciede2000_symmetric() {
        for &(l1, a1, b1, l2, a2, b2, _) in &SHARMA_PAIRS {
            let x = LabColor::new(l1, a1, b1);
            let y = LabColor::new(l2, a2, b2);
            assert!((delta_e_2000(x, y) - delta_e_2000(y, x)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_identity() {
        for lab in [
            LabColor::new(50.0, 25.0, -30.0),
            LabColor::new(0.0, 0.0, 0.0),
            LabColor::new(100.0, 0.0, 0.0),
            LabColor::new(30.0, -60.0, 90.0),
        ] {
            assert_eq!(delta_e_76(lab, lab), 0.0);
            assert_eq!(delta_e_2000(lab, lab), 0.0);
        }
    }

    #[test]
    fn test_delta_e_76_euclidean() {
        let de = delta_e_76(LabColor::new(50.0, 0.0, 0.0), LabColor::new(53.0, 4.0, 0.0));
        assert!((de - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_achromatic_pair_is_lightness_only() {
        // Both chromas are zero: no hue or chroma contribution
        let de = delta_e_2000(LabColor::new(50.0, 0.0, 0.0), LabColor::new(60.0, 0.0, 0.0));
        let sl = 1.0 + (0.015 * 25.0) / (20.0f64 + 25.0).sqrt();
        assert!((de - 10.0 / sl).abs() < 1e-12);
        assert!(de.is_finite());
    }

    #[test]
    fn test_black_and_white_are_far_apart() {
        let de = delta_e_2000(LabColor::new(0.0, 0.0, 0.0), LabColor::new(100.0, 0.0, 0.0));
        assert!(de > 50.0);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(DeltaECategory::from_delta_e(0.0), DeltaECategory::Imperceptible);
        assert_eq!(DeltaECategory::from_delta_e(1.0), DeltaECategory::BarelyPerceptible);
        assert_eq!(DeltaECategory::from_delta_e(2.0425), DeltaECategory::Noticeable);
        assert_eq!(DeltaECategory::from_delta_e(27.1), DeltaECategory::Distinct);
        assert_eq!(DeltaECategory::from_delta_e(50.0), DeltaECategory::VeryDistinct);
        assert_eq!(DeltaECategory::Noticeable.label(), "noticeable");
    }
}
