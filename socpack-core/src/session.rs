use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::info;

use crate::domain::ConsolidatedDataset;
use crate::error::{IngestError, Result};
use crate::ingest::{IngestOptions, ingest};
use crate::repo::MetadataStore;

/// Uploads are accepted only under a `.zip` name.
pub fn check_zip_name(file_name: &str) -> Result<()> {
    if file_name.ends_with(".zip") {
        Ok(())
    } else {
        Err(IngestError::NotZip {
            name: file_name.to_string(),
        })
    }
}

/// One user's upload slot: at most one archive in flight, and the published
/// dataset only changes when an upload succeeds.
pub struct UploadSession {
    opts: IngestOptions,
    store: Option<Arc<dyn MetadataStore>>,
    busy: AtomicBool,
    current: Mutex<Option<Arc<ConsolidatedDataset>>>,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl UploadSession {
    pub fn new(opts: IngestOptions, store: Option<Arc<dyn MetadataStore>>) -> Self {
        Self {
            opts,
            store,
            busy: AtomicBool::new(false),
            current: Mutex::new(None),
        }
    }

    /// Ingest `bytes` uploaded as `file_name` and publish the result.
    ///
    /// Fails with `NotZip` before reading anything when the name lacks a
    /// `.zip` suffix, and with `UploadInProgress` while another submission
    /// on this session is running.
    pub fn submit(&self, file_name: &str, bytes: &[u8]) -> Result<Arc<ConsolidatedDataset>> {
        check_zip_name(file_name)?;
        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(IngestError::UploadInProgress);
        }
        let _busy = BusyGuard(&self.busy);

        let dataset = Arc::new(ingest(bytes, Some(&self.opts), self.store.as_deref())?);
        *self.lock_current()? = Some(Arc::clone(&dataset));
        info!(
            archive = file_name,
            files = dataset.file_count(),
            rows = dataset.total_kept,
            "published consolidated dataset"
        );
        Ok(dataset)
    }

    pub fn current(&self) -> Result<Option<Arc<ConsolidatedDataset>>> {
        Ok(self.lock_current()?.clone())
    }

    /// Drop the published dataset, as a page reload would.
    pub fn clear(&self) -> Result<()> {
        *self.lock_current()? = None;
        Ok(())
    }

    fn lock_current(&self) -> Result<std::sync::MutexGuard<'_, Option<Arc<ConsolidatedDataset>>>> {
        self.current
            .lock()
            .map_err(|e| std::io::Error::other(e.to_string()).into())
    }
}
