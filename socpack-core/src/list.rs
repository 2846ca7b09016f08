use crate::domain::FileMetadata;
use crate::error::Result;
use crate::repo::MetadataStore;

/// Uploaded-file history in the order it was recorded.
pub fn list_uploads(store: &dyn MetadataStore) -> Result<Vec<FileMetadata>> {
    store.list()
}

/// Same history filtered to one uploader.
pub fn list_uploads_by(store: &dyn MetadataStore, uploaded_by: &str) -> Result<Vec<FileMetadata>> {
    Ok(store
        .list()?
        .into_iter()
        .filter(|m| m.uploaded_by == uploaded_by)
        .collect())
}
