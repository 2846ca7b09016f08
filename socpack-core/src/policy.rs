use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Business rule deciding which parsed shipment rows are kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionRule {
    pub status_column: String,
    pub remark_column: String,
    /// Rows with this status are always kept.
    pub pending_status: String,
    /// Rows with this status are kept only when the remark carries every
    /// entry of `required_remarks`.
    pub abnormal_status: String,
    pub required_remarks: Vec<String>,
}

impl Default for AdmissionRule {
    fn default() -> Self {
        Self {
            status_column: "Receive Status".to_string(),
            remark_column: "Remark".to_string(),
            pending_status: "Pending Receive".to_string(),
            abnormal_status: "Abnormal".to_string(),
            required_remarks: vec!["Packed in another TO".to_string(), "Received in".to_string()],
        }
    }
}

/// Zero-based column positions removed from the re-export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportLayout {
    pub dropped_columns: Vec<usize>,
}

impl Default for ExportLayout {
    fn default() -> Self {
        // C:J, L, O:U, Y:AB, AD:AH
        let dropped_columns = (2..=9)
            .chain([11])
            .chain(14..=20)
            .chain(24..=27)
            .chain(29..=33)
            .collect();
        Self { dropped_columns }
    }
}

impl ExportLayout {
    pub fn is_dropped(&self, idx: usize) -> bool {
        self.dropped_columns.contains(&idx)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Reject archives listing more entries than this.
    pub max_entries: Option<u64>,
    /// Skip eligible members whose uncompressed size is above this.
    pub max_member_bytes: Option<u64>,
    pub admission: AdmissionRule,
    pub export: ExportLayout,
    pub facet_columns: Vec<String>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            max_entries: None,
            max_member_bytes: None,
            admission: AdmissionRule::default(),
            export: ExportLayout::default(),
            facet_columns: ["Current Station", "Receiver Type", "Journey Type", "Receive Status"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Policy {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a policy file; keys left out fall back to their defaults.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
