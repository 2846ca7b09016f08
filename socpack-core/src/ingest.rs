use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::consolidate::Consolidator;
use crate::domain::{ConsolidatedDataset, EligibleFile, FileMetadata, Uploader};
use crate::error::Result;
use crate::policy::Policy;
use crate::read::extract::{ExtractOptions, extract};
use crate::read::records::parse_records;
use crate::repo::MetadataStore;
use crate::util::sanitize::sanitize;
use crate::util::timefmt::{iso_timestamp, short_date_time};

#[derive(Clone, Default)]
pub struct IngestOptions {
    pub policy: Policy,
    pub uploader: Uploader,
    /// Fixed upload time; `None` uses the current UTC time.
    pub now: Option<OffsetDateTime>,
}

/// Run one uploaded archive through extract, sanitize, parse, admit and
/// consolidate, strictly in archive order.
///
/// When a store is given, one metadata entry per eligible member is appended
/// before parsing starts. A failing store is logged and otherwise ignored.
pub fn ingest(
    archive: &[u8],
    opts: Option<&IngestOptions>,
    store: Option<&dyn MetadataStore>,
) -> Result<ConsolidatedDataset> {
    let defaults = IngestOptions::default();
    let opts = opts.unwrap_or(&defaults);
    let policy = &opts.policy;

    let files = extract(archive, Some(&ExtractOptions::from(policy)))?;

    if let Some(store) = store {
        let now = opts.now.unwrap_or_else(OffsetDateTime::now_utc);
        match upload_metadata(&files, &opts.uploader, now) {
            Ok(entries) => {
                if let Err(e) = store.append(&entries) {
                    warn!(error = %e, "could not record uploaded files; continuing");
                }
            }
            Err(e) => warn!(error = %e, "could not build upload metadata; continuing"),
        }
    }

    let mut consolidator = Consolidator::new();
    for file in &files {
        let text = sanitize(&file.text);
        let parsed = parse_records(&file.name, &text);
        debug!(
            file = %file.name,
            headers = parsed.headers.len(),
            records = parsed.records.len(),
            "parsed CSV member"
        );
        consolidator.push_file(&file.name, parsed, &policy.admission);
    }
    consolidator.finish()
}

/// One history entry per member, all sharing the same upload timestamp.
pub fn upload_metadata(
    files: &[EligibleFile],
    uploader: &Uploader,
    now: OffsetDateTime,
) -> Result<Vec<FileMetadata>> {
    let short = short_date_time(now)?;
    let date = iso_timestamp(now)?;
    Ok(files
        .iter()
        .map(|f| FileMetadata {
            name: format!("{short} | {} | {}", uploader.display_name, f.name),
            original_name: f.name.clone(),
            date: date.clone(),
            size: f.text.chars().count() as u64,
            uploaded_by: uploader.display_name.clone(),
            employee_id: uploader.employee_id.clone(),
        })
        .collect())
}
