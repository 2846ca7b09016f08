use std::sync::Arc;

use crate::error::Result;
use crate::repo::{MetadataStore, StoreParams};
use crate::repo_fs::FsMetadataStore;
use crate::repo_mem::MemMetadataStore;

pub enum Backend {
    Fs,
    Memory,
}

pub fn open_store(backend: Backend, p: StoreParams) -> Result<Arc<dyn MetadataStore>> {
    match backend {
        Backend::Fs => Ok(Arc::new(FsMetadataStore::new(p)?)),
        Backend::Memory => Ok(Arc::new(MemMetadataStore::new())),
    }
}
