// socpack_core/src/domain.rs
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::stats::FileStats;

/// CSV member pulled out of an uploaded archive, decoded as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EligibleFile {
    pub name: String,
    pub text: String,
}

/// A parsed cell; `None` when the line had fewer fields than the header row.
pub type Cell = Option<String>;

/// One data line of a CSV file keyed by that file's own header row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedRecord {
    fields: Vec<(String, Cell)>,
}

impl ParsedRecord {
    pub fn new(fields: Vec<(String, Cell)>) -> Self {
        Self { fields }
    }

    /// Cell text for `column`; missing columns and null cells both read as `None`.
    /// When the header row repeats a name, the rightmost column wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .and_then(|(_, cell)| cell.as_deref())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every cell is null or the empty string.
    pub fn is_blank(&self) -> bool {
        self.fields
            .iter()
            .all(|(_, cell)| cell.as_deref().is_none_or(str::is_empty))
    }
}

/// One key per distinct column name, at its first position, holding the
/// value `get` returns.
impl Serialize for ParsedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (idx, (name, _)) in self.fields.iter().enumerate() {
            if self.fields[..idx].iter().any(|(seen, _)| seen == name) {
                continue;
            }
            map.serialize_entry(name, &self.get(name))?;
        }
        map.end()
    }
}

/// Output of the CSV adapter for one file.
#[derive(Clone, Debug, Default)]
pub struct ParsedFile {
    pub headers: Vec<String>,
    pub records: Vec<ParsedRecord>,
    /// Malformed lines that were logged and dropped.
    pub skipped_lines: usize,
    /// Lines with more fields than headers; kept, surplus dropped.
    pub overlong_lines: usize,
}

/// Who triggered an upload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uploader {
    pub display_name: String,
    pub employee_id: Option<String>,
}

impl Default for Uploader {
    fn default() -> Self {
        Self {
            display_name: "Unknown User".to_string(),
            employee_id: None,
        }
    }
}

/// Persisted summary of one uploaded CSV member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// `"<short date> | <uploader> | <original name>"`
    pub name: String,
    pub original_name: String,
    /// RFC 3339 upload timestamp; doubles as the delete key.
    pub date: String,
    /// Decoded character count, used as a size proxy.
    pub size: u64,
    pub uploaded_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub name: String,
    pub stats: FileStats,
}

/// A later file whose header set differs from the canonical headers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SchemaMismatch {
    pub file: String,
    /// Canonical columns the file lacks.
    pub missing: Vec<String>,
    /// Columns of the file that are not reachable through the canonical headers.
    pub extra: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ConsolidatedDataset {
    pub rows: Vec<ParsedRecord>,
    pub headers: Vec<String>,
    pub total_kept: usize,
    pub per_file: Vec<FileReport>,
    pub schema_mismatches: Vec<SchemaMismatch>,
}

impl ConsolidatedDataset {
    pub fn stats_for(&self, name: &str) -> Option<&FileStats> {
        self.per_file
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.stats)
    }

    pub fn file_count(&self) -> usize {
        self.per_file.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, Option<&str>)]) -> ParsedRecord {
        ParsedRecord::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
        )
    }

    #[test]
    fn blank_means_all_null_or_empty() {
        assert!(rec(&[("a", Some("")), ("b", None)]).is_blank());
        assert!(!rec(&[("a", Some("")), ("b", Some(" "))]).is_blank());
        assert!(ParsedRecord::default().is_blank());
    }

    #[test]
    fn get_reads_by_column_name() {
        let r = rec(&[("Receive Status", Some("Abnormal")), ("Remark", None)]);
        assert_eq!(r.get("Receive Status"), Some("Abnormal"));
        assert_eq!(r.get("Remark"), None);
        assert_eq!(r.get("Nope"), None);
    }

    #[test]
    fn record_serializes_as_ordered_object() {
        let r = rec(&[("b", Some("1")), ("a", None)]);
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"b":"1","a":null}"#);
    }

    #[test]
    fn repeated_column_name_reads_rightmost() {
        let r = rec(&[
            ("Remark", Some("")),
            ("Receive Status", Some("Abnormal")),
            ("Remark", Some("Received in Cebu")),
        ]);
        assert_eq!(r.get("Remark"), Some("Received in Cebu"));
        assert_eq!(
            serde_json::to_string(&r).unwrap(),
            r#"{"Remark":"Received in Cebu","Receive Status":"Abnormal"}"#
        );
    }

    #[test]
    fn metadata_uses_camel_case_keys() {
        let m = FileMetadata {
            name: "Oct 07, 3:45 PM | Ana | a.csv".into(),
            original_name: "a.csv".into(),
            date: "2026-10-07T15:45:00.000Z".into(),
            size: 12,
            uploaded_by: "Ana".into(),
            employee_id: Some("E1".into()),
        };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["originalName"], "a.csv");
        assert_eq!(v["uploadedBy"], "Ana");
        assert_eq!(v["employeeId"], "E1");
    }
}
