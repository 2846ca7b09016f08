#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod policy;
pub mod stats;

pub mod util {
    pub mod sanitize;
    pub mod timefmt;
}

pub mod read {
    pub mod extract;
    pub mod records;
}

pub mod admission;
pub mod consolidate;
pub mod export;
pub mod facet;
pub mod ingest;
pub mod preview;
pub mod session;

pub mod list;
pub mod repo;
pub mod repo_factory;
pub mod repo_fs;
pub mod repo_mem;

// Re-exports: stable API surface
pub use domain::{ConsolidatedDataset, FileMetadata, ParsedRecord, Uploader};
pub use error::{IngestError, Result};
pub use ingest::{IngestOptions, ingest};
pub use list::list_uploads;
pub use policy::Policy;
pub use read::extract::extract;
pub use session::UploadSession;
