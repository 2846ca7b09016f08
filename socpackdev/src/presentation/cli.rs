use clap::{Parser, Subcommand, ValueEnum};
use socpack_core::export::{ExportFormat, ExportScope};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "socpackdev CLI: consolidate shipment CSV exports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum FormatArg {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ScopeArg {
    /// rows that pass the facet filters
    #[default]
    Filtered,
    /// every consolidated row
    All,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

impl From<ScopeArg> for ExportScope {
    fn from(s: ScopeArg) -> Self {
        match s {
            ScopeArg::Filtered => ExportScope::Filtered,
            ScopeArg::All => ExportScope::All,
        }
    }
}

#[derive(Subcommand)]
pub enum FilesCommands {
    /// Show the uploaded-files history
    List {
        #[arg(long, default_value = "uploads.json")]
        store: PathBuf,
        /// only entries recorded for this uploader
        #[arg(long)]
        user: Option<String>,
    },
    /// Delete history entries by their upload timestamp
    Rm {
        /// ISO `date` value (e.g. 2026-10-07T09:04:00.000Z) as shown by `files list`
        date: String,
        #[arg(long, default_value = "uploads.json")]
        store: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum Commands {
    /// Consolidate every CSV in a ZIP archive and report what was kept
    Ingest {
        archive: PathBuf,

        /// uploader display name recorded in the history
        #[arg(long, default_value = "Unknown User")]
        user: String,

        #[arg(long = "employee-id")]
        employee_id: Option<String>,

        /// uploaded-files history (JSON)
        #[arg(long, default_value = "uploads.json")]
        store: PathBuf,

        /// do not record the upload in the history
        #[arg(long)]
        no_store: bool,

        /// JSON policy file; omitted keys keep their defaults
        #[arg(long)]
        policy: Option<PathBuf>,

        /// facet filter COLUMN=VALUE (repeatable; same column ORs, columns AND)
        #[arg(long = "filter", value_name = "COLUMN=VALUE")]
        filters: Vec<String>,

        /// case-insensitive text to look for in any column of the preview
        #[arg(long)]
        search: Option<String>,

        /// preview sort order
        #[arg(long, value_name = "COLUMN[:asc|:desc]")]
        sort: Option<String>,

        /// print the first page of the preview as tab-separated lines
        #[arg(long)]
        preview: bool,

        /// write an export file; a directory gets a dated default name
        #[arg(long)]
        export: Option<PathBuf>,

        /// export columns in this order (comma-separated); without it CSV
        /// uses the policy's export layout and JSON uses every column
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        #[arg(long, value_enum, default_value = "csv")]
        format: FormatArg,

        #[arg(long, value_enum, default_value = "filtered")]
        scope: ScopeArg,

        /// print the dataset as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// List the distinct values of each facet column
    Facets {
        archive: PathBuf,
        #[arg(long)]
        policy: Option<PathBuf>,
    },

    #[command(subcommand)]
    /// Uploaded-files history
    Files(FilesCommands),
}
