use std::collections::HashSet;

use tracing::{info, warn};

use crate::admission::Decision;
use crate::domain::{ConsolidatedDataset, FileReport, ParsedFile, SchemaMismatch};
use crate::error::{IngestError, Result};
use crate::policy::AdmissionRule;
use crate::stats::FileStats;

/// Accumulates admitted rows file by file, in the order files are pushed.
///
/// The first pushed file fixes the canonical headers. Later files are not
/// reconciled against them; a differing header set is only reported.
#[derive(Debug, Default)]
pub struct Consolidator {
    headers: Option<Vec<String>>,
    out: ConsolidatedDataset,
}

impl Consolidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_file(&mut self, name: &str, parsed: ParsedFile, rule: &AdmissionRule) {
        match &self.headers {
            None => self.headers = Some(parsed.headers.clone()),
            Some(canonical) => {
                if let Some(m) = schema_mismatch(name, canonical, &parsed.headers) {
                    warn!(
                        file = name,
                        missing = ?m.missing,
                        extra = ?m.extra,
                        "header row differs from the first file; columns are not reconciled"
                    );
                    self.out.schema_mismatches.push(m);
                }
            }
        }

        let mut stats = FileStats {
            initial_row_count: parsed.records.len(),
            skipped_lines: parsed.skipped_lines,
            overlong_lines: parsed.overlong_lines,
            ..Default::default()
        };
        for record in parsed.records {
            match rule.decide_record(&record) {
                Decision::KeepPending => stats.pending_receive += 1,
                Decision::KeepAbnormal => stats.abnormal += 1,
                Decision::Discard => continue,
            }
            stats.kept_row_count += 1;
            self.out.rows.push(record);
        }
        self.out.total_kept += stats.kept_row_count;

        info!(
            file = name,
            initial = stats.initial_row_count,
            kept = stats.kept_row_count,
            excluded = stats.excluded_row_count(),
            pending_receive = stats.pending_receive,
            abnormal = stats.abnormal,
            "filtered CSV rows"
        );
        self.out.per_file.push(FileReport {
            name: name.to_string(),
            stats,
        });
    }

    pub fn finish(self) -> Result<ConsolidatedDataset> {
        let mut out = self.out;
        if out.total_kept == 0 {
            return Err(IngestError::EmptyResult);
        }
        out.headers = self.headers.unwrap_or_default();
        Ok(out)
    }
}

fn schema_mismatch(file: &str, canonical: &[String], headers: &[String]) -> Option<SchemaMismatch> {
    let known: HashSet<&str> = canonical.iter().map(String::as_str).collect();
    let seen: HashSet<&str> = headers.iter().map(String::as_str).collect();
    let missing: Vec<String> = canonical
        .iter()
        .filter(|h| !seen.contains(h.as_str()))
        .cloned()
        .collect();
    let extra: Vec<String> = headers
        .iter()
        .filter(|h| !known.contains(h.as_str()))
        .cloned()
        .collect();
    if missing.is_empty() && extra.is_empty() {
        None
    } else {
        Some(SchemaMismatch {
            file: file.to_string(),
            missing,
            extra,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::records::parse_records;

    fn push(c: &mut Consolidator, name: &str, text: &str) {
        c.push_file(name, parse_records(name, text), &AdmissionRule::default());
    }

    #[test]
    fn appends_in_file_then_row_order() {
        let mut c = Consolidator::new();
        push(
            &mut c,
            "a.csv",
            "Id,Receive Status,Remark\n1,Pending Receive,\n2,In Transit,\n3,Pending Receive,x\n",
        );
        push(
            &mut c,
            "b.csv",
            "Id,Receive Status,Remark\n4,Abnormal,Packed in another TO / Received in Cebu\n",
        );
        let ds = c.finish().unwrap();
        let ids: Vec<_> = ds.rows.iter().map(|r| r.get("Id").unwrap()).collect();
        assert_eq!(ids, ["1", "3", "4"]);
        assert_eq!(ds.total_kept, 3);
        let a = ds.stats_for("a.csv").unwrap();
        assert_eq!((a.initial_row_count, a.kept_row_count), (3, 2));
        assert_eq!(a.excluded_row_count(), 1);
        assert_eq!(a.pending_receive, 2);
        let b = ds.stats_for("b.csv").unwrap();
        assert_eq!((b.kept_row_count, b.abnormal), (1, 1));
        assert!(ds.schema_mismatches.is_empty());
    }

    #[test]
    fn first_file_headers_are_canonical() {
        let mut c = Consolidator::new();
        push(&mut c, "a.csv", " Id ,Receive Status\n1,Pending Receive\n");
        push(&mut c, "b.csv", "Receive Status,Extra\nPending Receive,e\n");
        let ds = c.finish().unwrap();
        assert_eq!(ds.headers, ["Id", "Receive Status"]);
        assert_eq!(ds.rows.len(), 2);
        assert_eq!(
            ds.schema_mismatches,
            [SchemaMismatch {
                file: "b.csv".into(),
                missing: vec!["Id".into()],
                extra: vec!["Extra".into()],
            }]
        );
    }

    #[test]
    fn nothing_kept_is_empty_result() {
        let mut c = Consolidator::new();
        push(&mut c, "a.csv", "Receive Status\nIn Transit\nDelivered\n");
        assert!(matches!(c.finish(), Err(IngestError::EmptyResult)));
        assert!(matches!(Consolidator::new().finish(), Err(IngestError::EmptyResult)));
    }
}
