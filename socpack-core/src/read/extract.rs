use crate::domain::EligibleFile;
use crate::error::{IngestError, Result};
use crate::policy::Policy;

use std::io::{Cursor, Read};
use tracing::{debug, warn};
use zip::ZipArchive;

const MAC_METADATA_PREFIX: &str = "__MACOSX";

#[derive(Clone, Default)]
pub struct ExtractOptions {
    pub max_entries: Option<u64>,
    pub max_member_bytes: Option<u64>,
}

impl From<&Policy> for ExtractOptions {
    fn from(p: &Policy) -> Self {
        Self {
            max_entries: p.max_entries,
            max_member_bytes: p.max_member_bytes,
        }
    }
}

/// Case-sensitive: `.csv` suffix and not under the macOS resource-fork folder.
pub fn is_eligible(name: &str) -> bool {
    name.ends_with(".csv") && !name.starts_with(MAC_METADATA_PREFIX)
}

/// Pull every eligible CSV member out of an in-memory ZIP, in archive order.
pub fn extract(archive: &[u8], opts: Option<&ExtractOptions>) -> Result<Vec<EligibleFile>> {
    let mut zip = ZipArchive::new(Cursor::new(archive))?;

    if let Some(max) = opts.and_then(|o| o.max_entries) {
        if zip.len() as u64 > max {
            return Err(IngestError::TooManyEntries { max });
        }
    }
    let max_member = opts.and_then(|o| o.max_member_bytes);

    let mut files = Vec::new();
    let mut oversized = 0usize;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        if entry.is_dir() || !is_eligible(entry.name()) {
            continue;
        }
        let name = entry.name().to_string();

        if let Some(max) = max_member {
            if entry.size() > max {
                warn!(file = %name, size = entry.size(), max, "skipping oversized CSV member");
                oversized += 1;
                continue;
            }
        }

        let mut raw = Vec::with_capacity(entry.size().min(1 << 24) as usize);
        entry.read_to_end(&mut raw)?;
        let text = String::from_utf8_lossy(&raw).into_owned();
        debug!(file = %name, chars = text.chars().count(), "extracted CSV member");
        files.push(EligibleFile { name, text });
    }

    if files.is_empty() {
        return Err(match max_member {
            Some(max) if oversized > 0 => IngestError::OversizedMembers {
                count: oversized,
                max,
            },
            _ => IngestError::NoEligibleFiles,
        });
    }
    Ok(files)
}
