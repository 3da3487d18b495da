//! Sampler settings for the pick_colors pipeline.
//!
//! The settings are the two user-selectable parameters of the core: the
//! reference illuminant for Lab conversion and the side of the averaging
//! window. They are passed by value to every call that needs them.
//!
//! # Configuration Loading
//!
//! ```no_run
//! use pick_colors::SamplerSettings;
//! use std::path::Path;
//!
//! // Load from file
//! let settings = SamplerSettings::from_json_file(Path::new("settings.json"))?;
//!
//! // Or use defaults (D65, 5x5 window)
//! let settings = SamplerSettings::default();
//! # Ok::<(), pick_colors::AnalysisError>(())
//! ```
//!
//! Stored settings are read leniently: an unknown illuminant name or an
//! invalid sample size is replaced by its default with a warning, so a stale
//! settings file never prevents sampling.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::{ColorConverter, Illuminant};
use crate::error::{AnalysisError, Result};
use crate::sampling::{RegionSampler, SampleSize};

/// User-selectable sampling parameters.
///
/// Serialized as `{"illuminant": "D65", "sampleSize": 5}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredSettings")]
pub struct SamplerSettings {
    /// Reference white for Lab conversion
    pub illuminant: Illuminant,

    /// Side of the square averaging window
    pub sample_size: SampleSize,
}

/// Settings as found on disk, before validation
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredSettings {
    illuminant: Option<String>,
    sample_size: Option<serde_json::Value>,
}

impl From<StoredSettings> for SamplerSettings {
    fn from(stored: StoredSettings) -> Self {
        let illuminant = match stored.illuminant {
            None => Illuminant::default(),
            Some(name) => name.parse().unwrap_or_else(|_| {
                warn!(illuminant = %name, "unknown illuminant in settings, using D65");
                Illuminant::default()
            }),
        };

        let sample_size = match stored.sample_size {
            None => SampleSize::default(),
            Some(value) => value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .and_then(|n| SampleSize::new(n).ok())
                .unwrap_or_else(|| {
                    warn!(sample_size = %value, "invalid sample size in settings, using default");
                    SampleSize::default()
                }),
        };

        Self {
            illuminant,
            sample_size,
        }
    }
}

impl SamplerSettings {
    pub fn new(illuminant: Illuminant, sample_size: SampleSize) -> Self {
        Self {
            illuminant,
            sample_size,
        }
    }

    /// Copy with another illuminant
    pub fn with_illuminant(self, illuminant: Illuminant) -> Self {
        Self { illuminant, ..self }
    }

    /// Copy with another window size
    pub fn with_sample_size(self, sample_size: SampleSize) -> Self {
        Self {
            sample_size,
            ..self
        }
    }

    /// Converter bound to the selected illuminant
    pub fn converter(&self) -> ColorConverter {
        ColorConverter::new(self.illuminant)
    }

    /// Sampler using the selected window size
    pub fn sampler(&self) -> RegionSampler {
        RegionSampler::new(self.sample_size)
    }

    /// Parse settings from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AnalysisError::config("invalid settings JSON", e))
    }

    /// Load settings from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("cannot read {}", path.display()), e)
        })?;
        Self::from_json_str(&content)
    }

    /// Save settings to a JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("cannot serialize settings", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("cannot write {}", path.display()), e)
        })?;
        Ok(())
    }
}
