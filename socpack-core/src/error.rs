use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to process ZIP file: {0}")]
    InvalidArchive(#[from] zip::result::ZipError),

    #[error("Please upload a ZIP file.")]
    NotZip { name: String },

    #[error("No CSV files found in the ZIP archive")]
    NoEligibleFiles,

    #[error("No valid data rows found in CSV files")]
    EmptyResult,

    #[error("All {count} CSV files in the ZIP archive exceed the size limit ({max} bytes)")]
    OversizedMembers { count: usize, max: u64 },

    #[error("Archive has too many entries (max {max})")]
    TooManyEntries { max: u64 },

    #[error("An upload is already being processed")]
    UploadInProgress,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Format error: {0}")]
    Format(String),
}

impl From<serde_json::Error> for IngestError {
    fn from(e: serde_json::Error) -> Self {
        IngestError::Format(e.to_string())
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, IngestError>;
