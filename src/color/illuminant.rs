//! Reference illuminants
//!
//! The L*a*b* conversion normalizes XYZ by a white point. The set of white
//! points offered to the user is fixed; selecting one is a configuration
//! choice passed explicitly into every conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::white_points;
use crate::error::AnalysisError;

/// Tristimulus values of a reference white, Yn = 100 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhitePoint {
    pub xn: f64,
    pub yn: f64,
    pub zn: f64,
}

impl WhitePoint {
    pub const fn from_array(xyz: [f64; 3]) -> Self {
        Self {
            xn: xyz[0],
            yn: xyz[1],
            zn: xyz[2],
        }
    }
}

/// Named illuminant presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Illuminant {
    /// Daylight
    #[default]
    D65,
    /// Tungsten / incandescent
    A,
    /// Cool white fluorescent
    F2,
}

impl Illuminant {
    /// Every preset, in display order
    pub const ALL: [Illuminant; 3] = [Illuminant::D65, Illuminant::A, Illuminant::F2];

    pub fn white_point(self) -> WhitePoint {
        match self {
            Illuminant::D65 => WhitePoint::from_array(white_points::D65),
            Illuminant::A => WhitePoint::from_array(white_points::A),
            Illuminant::F2 => WhitePoint::from_array(white_points::F2),
        }
    }

    /// Short preset name used in settings files
    pub fn name(self) -> &'static str {
        match self {
            Illuminant::D65 => "D65",
            Illuminant::A => "A",
            Illuminant::F2 => "F2",
        }
    }

    /// Human readable description
    pub fn description(self) -> &'static str {
        match self {
            Illuminant::D65 => "Daylight (default)",
            Illuminant::A => "Tungsten / incandescent",
            Illuminant::F2 => "Cool white fluorescent",
        }
    }
}

impl fmt::Display for Illuminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Illuminant {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|illuminant| illuminant.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AnalysisError::invalid_parameter("illuminant", wanted))
    }
}

impl TryFrom<String> for Illuminant {
    type Error = AnalysisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Illuminant> for String {
    fn from(illuminant: Illuminant) -> Self {
        illuminant.name().to_string()
    }
}
