use std::sync::Mutex;

use crate::domain::FileMetadata;
use crate::error::Result;
use crate::repo::MetadataStore;

#[derive(Debug, Default)]
pub struct MemMetadataStore {
    entries: Mutex<Vec<FileMetadata>>,
}

impl MemMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<FileMetadata>>> {
        self.entries
            .lock()
            .map_err(|e| std::io::Error::other(e.to_string()).into())
    }
}

impl MetadataStore for MemMetadataStore {
    fn append(&self, entries: &[FileMetadata]) -> Result<()> {
        self.lock()?.extend_from_slice(entries);
        Ok(())
    }

    fn list(&self) -> Result<Vec<FileMetadata>> {
        Ok(self.lock()?.clone())
    }

    fn delete_by_date(&self, date: &str) -> Result<usize> {
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|e| e.date != date);
        Ok(before - entries.len())
    }
}
