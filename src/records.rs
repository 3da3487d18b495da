//! Saved standards and captured samples
//!
//! Records keep only raw RGB. Lab values and ΔE are recomputed whenever a
//! record is displayed, under whatever illuminant is selected at that moment,
//! so changing the illuminant re-evaluates the whole history consistently.
//!
//! Serialized shape, one entry of each list:
//!
//! ```json
//! {"id": 1718000000000, "r": 10, "g": 20, "b": 30, "createdAt": "2024-06-10T06:13:20Z"}
//! {"id": 1718000000001, "r": 10, "g": 20, "b": 30, "hex": "#0A141E",
//!  "standardUsedRgb": {"r": 12, "g": 22, "b": 28}, "createdAt": "2024-06-10T06:13:20.001Z"}
//! ```
//!
//! Fields written by older versions (`l`, `a`, `b_lab`, `deltaE`, `timestamp`)
//! are ignored on read. Entries without `createdAt` take their creation time
//! from the millisecond id.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{ColorConverter, LabColor, RgbColor};

/// Record identifier: creation time in milliseconds since the Unix epoch
pub type RecordId = i64;

/// Next id after `last`, at least the millisecond timestamp of `now`
fn next_id(last: Option<RecordId>, now: DateTime<Utc>) -> RecordId {
    let millis = now.timestamp_millis();
    match last {
        Some(last) if last >= millis => last + 1,
        _ => millis,
    }
}

/// A reference color saved from a sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredStandard")]
pub struct StandardColor {
    pub id: RecordId,
    #[serde(flatten)]
    pub rgb: RgbColor,
    pub created_at: DateTime<Utc>,
}

/// A sampled color, with the standard it was compared against if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredCapture")]
pub struct CaptureRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub rgb: RgbColor,
    pub hex: String,
    #[serde(rename = "standardUsedRgb")]
    pub standard_used: Option<RgbColor>,
    pub created_at: DateTime<Utc>,
}

/// Creation time of a record without `createdAt`, recovered from its id
fn created_at_from_id(id: RecordId) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(id).single().unwrap_or_default()
}

/// Standard as found on disk; older entries carry no `createdAt`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredStandard {
    id: RecordId,
    #[serde(flatten)]
    rgb: RgbColor,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<StoredStandard> for StandardColor {
    fn from(stored: StoredStandard) -> Self {
        Self {
            id: stored.id,
            rgb: stored.rgb,
            created_at: stored
                .created_at
                .unwrap_or_else(|| created_at_from_id(stored.id)),
        }
    }
}

/// Capture as found on disk; older entries carry no `createdAt`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCapture {
    id: RecordId,
    #[serde(flatten)]
    rgb: RgbColor,
    #[serde(default)]
    hex: Option<String>,
    #[serde(rename = "standardUsedRgb", default)]
    standard_used: Option<RgbColor>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<StoredCapture> for CaptureRecord {
    fn from(stored: StoredCapture) -> Self {
        Self {
            id: stored.id,
            rgb: stored.rgb,
            hex: stored.hex.unwrap_or_else(|| stored.rgb.to_hex()),
            standard_used: stored.standard_used,
            created_at: stored
                .created_at
                .unwrap_or_else(|| created_at_from_id(stored.id)),
        }
    }
}

/// Ordered list of saved standards with an optional selection
///
/// The selection is session state and is not serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StandardLibrary {
    standards: Vec<StandardColor>,
    #[serde(skip)]
    selected: Option<RecordId>,
}

impl StandardLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_standards(standards: Vec<StandardColor>) -> Self {
        Self {
            standards,
            selected: None,
        }
    }

    pub fn standards(&self) -> &[StandardColor] {
        &self.standards
    }

    pub fn len(&self) -> usize {
        self.standards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standards.is_empty()
    }

    /// Save `rgb` as a new standard
    pub fn add(&mut self, rgb: RgbColor) -> &StandardColor {
        self.add_at(rgb, Utc::now())
    }

    /// Save `rgb` as a new standard created at `now`
    pub fn add_at(&mut self, rgb: RgbColor, now: DateTime<Utc>) -> &StandardColor {
        let last = self.standards.iter().map(|s| s.id).max();
        let index = self.standards.len();
        self.standards.push(StandardColor {
            id: next_id(last, now),
            rgb,
            created_at: now,
        });
        &self.standards[index]
    }

    /// Select the standard with `id`, or clear the selection if it is already selected
    ///
    /// Returns the selected standard after the toggle. Unknown ids leave the
    /// selection unchanged.
    pub fn toggle_select(&mut self, id: RecordId) -> Option<&StandardColor> {
        if self.selected == Some(id) {
            self.selected = None;
        } else if self.standards.iter().any(|s| s.id == id) {
            self.selected = Some(id);
        }
        self.selected()
    }

    pub fn selected(&self) -> Option<&StandardColor> {
        let id = self.selected?;
        self.standards.iter().find(|s| s.id == id)
    }

    /// Delete the selected standard and clear the selection
    pub fn remove_selected(&mut self) -> Option<StandardColor> {
        let id = self.selected.take()?;
        let index = self.standards.iter().position(|s| s.id == id)?;
        Some(self.standards.remove(index))
    }
}

/// A capture evaluated under one illuminant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureReading {
    pub id: RecordId,
    pub rgb: RgbColor,
    pub hex: String,
    pub lab: LabColor,
    pub standard_used: Option<RgbColor>,
    pub delta_e: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Chronological list of captures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptureLog {
    captures: Vec<CaptureRecord>,
}

impl CaptureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_captures(captures: Vec<CaptureRecord>) -> Self {
        Self { captures }
    }

    /// Captures in the order they were taken
    pub fn captures(&self) -> &[CaptureRecord] {
        &self.captures
    }

    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    /// Record `rgb` together with the standard it is compared against
    pub fn capture(&mut self, rgb: RgbColor, standard: Option<&StandardColor>) -> &CaptureRecord {
        self.capture_at(rgb, standard, Utc::now())
    }

    pub fn capture_at(
        &mut self,
        rgb: RgbColor,
        standard: Option<&StandardColor>,
        now: DateTime<Utc>,
    ) -> &CaptureRecord {
        let last = self.captures.iter().map(|c| c.id).max();
        let index = self.captures.len();
        self.captures.push(CaptureRecord {
            id: next_id(last, now),
            rgb,
            hex: rgb.to_hex(),
            standard_used: standard.map(|s| s.rgb),
            created_at: now,
        });
        let record = &self.captures[index];
        debug!(id = record.id, hex = %record.hex, "captured color");
        record
    }

    /// Delete the capture with `id`
    pub fn remove(&mut self, id: RecordId) -> Option<CaptureRecord> {
        let index = self.captures.iter().position(|c| c.id == id)?;
        Some(self.captures.remove(index))
    }

    /// Evaluate every capture under `converter`, newest first
    pub fn readings(&self, converter: &ColorConverter) -> Vec<CaptureReading> {
        self.captures
            .iter()
            .rev()
            .map(|record| CaptureReading {
                id: record.id,
                rgb: record.rgb,
                hex: record.hex.clone(),
                lab: converter.rgb_to_lab(record.rgb),
                standard_used: record.standard_used,
                delta_e: record
                    .standard_used
                    .map(|standard| converter.compare(record.rgb, standard)),
                created_at: record.created_at,
            })
            .collect()
    }
}
