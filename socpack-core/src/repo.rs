// socpack_core/src/repo.rs
use crate::domain::FileMetadata;
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct StoreParams {
    pub path: std::path::PathBuf,
}

/// Append-only record of uploaded CSV members.
pub trait MetadataStore: Send + Sync {
    /// Add entries after the existing ones; never replaces prior entries.
    fn append(&self, entries: &[FileMetadata]) -> Result<()>;

    fn list(&self) -> Result<Vec<FileMetadata>>;

    /// Remove every entry whose `date` equals `date`; returns how many went.
    fn delete_by_date(&self, date: &str) -> Result<usize>;
}
