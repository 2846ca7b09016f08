use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use socpack_core::domain::Uploader;
use socpack_core::error::{IngestError, Result};
use socpack_core::domain::ParsedRecord;
use socpack_core::export::{
    ExportFormat, ExportScope, default_export_name, export_file_name, kept_headers,
    select_columns, write_csv_columns, write_json,
};
use socpack_core::facet::{FacetFilter, facet_columns, unique_values};
use socpack_core::list::list_uploads_by;
use socpack_core::policy::ExportLayout;
use socpack_core::preview::{PREVIEW_ROWS, PreviewState, SortKey};
use socpack_core::repo::StoreParams;
use socpack_core::repo_factory::{Backend, open_store};
use socpack_core::session::check_zip_name;
use socpack_core::{IngestOptions, Policy, UploadSession, ingest, list_uploads};
use time::OffsetDateTime;
use tracing::debug;

pub struct IngestArgs {
    pub archive: PathBuf,
    pub user: String,
    pub employee_id: Option<String>,
    /// `None` when the upload should not be recorded.
    pub store: Option<PathBuf>,
    pub policy: Option<PathBuf>,
    pub filters: Vec<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub preview: bool,
    pub export: Option<PathBuf>,
    pub columns: Vec<String>,
    pub format: ExportFormat,
    pub scope: ExportScope,
    pub json: bool,
}

fn load_policy(path: Option<&Path>) -> Result<Policy> {
    match path {
        Some(p) => {
            debug!(policy = %p.display(), "loading policy");
            Policy::from_json_path(p)
        }
        None => Ok(Policy::default()),
    }
}

fn parse_filter(spec: &str) -> Result<(String, String)> {
    match spec.split_once('=') {
        Some((col, val)) if !col.trim().is_empty() => Ok((col.trim().to_string(), val.to_string())),
        _ => Err(IngestError::Format(format!(
            "filter must look like COLUMN=VALUE, got {spec:?}"
        ))),
    }
}

fn build_filter(specs: &[String]) -> Result<FacetFilter> {
    let mut filter = FacetFilter::new();
    for spec in specs {
        let (col, val) = parse_filter(spec)?;
        filter.select(&col, &val);
    }
    Ok(filter)
}

fn build_preview(search: Option<&str>, sort: Option<&str>) -> Result<PreviewState> {
    let mut preview = PreviewState::new();
    if let Some(term) = search {
        preview.set_search(term);
    }
    if let Some(text) = sort {
        let key = SortKey::parse(text).ok_or_else(|| {
            IngestError::Format(format!("sort must look like COLUMN[:asc|:desc], got {text:?}"))
        })?;
        preview.set_sort(Some(key));
    }
    Ok(preview)
}

/// Explicit columns win. Otherwise CSV follows the policy layout and JSON
/// carries every column.
fn export_columns<'a>(
    headers: &'a [String],
    selected: &'a [String],
    format: ExportFormat,
    layout: &ExportLayout,
) -> Vec<&'a str> {
    if selected.is_empty() && format == ExportFormat::Csv {
        kept_headers(headers, layout)
    } else {
        select_columns(headers, selected)
    }
}

/// The layout CSV of the filtered view keeps its `data-export-` name.
fn export_default_name(
    selected: &[String],
    format: ExportFormat,
    scope: ExportScope,
    now: OffsetDateTime,
) -> Result<String> {
    if selected.is_empty() && format == ExportFormat::Csv && scope == ExportScope::Filtered {
        default_export_name(now)
    } else {
        export_file_name(scope, format, now)
    }
}

fn print_preview(headers: &[String], rows: &[&ParsedRecord]) {
    println!("{}", headers.join("\t"));
    for row in rows {
        let cells: Vec<&str> = headers.iter().map(|h| row.get(h).unwrap_or("")).collect();
        println!("{}", cells.join("\t"));
    }
}

fn archive_name(archive: &Path) -> String {
    archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A directory (existing, or spelled with a trailing separator) gets
/// `default_name`.
fn resolve_export_path(out: &Path, default_name: &str) -> PathBuf {
    let trailing_sep = out
        .as_os_str()
        .to_string_lossy()
        .ends_with(std::path::MAIN_SEPARATOR);
    if out.is_dir() || trailing_sep {
        out.join(default_name)
    } else {
        out.to_path_buf()
    }
}

fn read_archive(archive: &Path) -> Result<(String, Vec<u8>)> {
    let name = archive_name(archive);
    check_zip_name(&name)?;
    let bytes = std::fs::read(archive)?;
    Ok((name, bytes))
}

pub fn handle_ingest(args: IngestArgs) -> Result<()> {
    let policy = load_policy(args.policy.as_deref())?;
    let filter = build_filter(&args.filters)?;
    let preview = build_preview(args.search.as_deref(), args.sort.as_deref())?;
    let (name, bytes) = read_archive(&args.archive)?;

    let store = args
        .store
        .map(|path| open_store(Backend::Fs, StoreParams { path }))
        .transpose()?;
    let opts = IngestOptions {
        policy,
        uploader: Uploader {
            display_name: args.user,
            employee_id: args.employee_id,
        },
        now: None,
    };
    let export_layout = opts.policy.export.clone();
    let session = UploadSession::new(opts, store);
    let ds = session.submit(&name, &bytes)?;
    let rows = filter.apply(&ds.rows);
    let shown = preview.apply(rows.iter().copied(), &ds.headers);

    if args.json {
        let doc = serde_json::json!({
            "headers": ds.headers,
            "total_kept": ds.total_kept,
            "per_file": ds.per_file,
            "schema_mismatches": ds.schema_mismatches,
            "filtered_count": rows.len(),
            "rows": shown,
        });
        let mut out = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &doc)?;
        writeln!(out)?;
    } else {
        for r in &ds.per_file {
            let s = &r.stats;
            println!(
                "{}  initial={} kept={} excluded={} pending={} abnormal={} skipped_lines={} overlong_lines={}",
                r.name,
                s.initial_row_count,
                s.kept_row_count,
                s.excluded_row_count(),
                s.pending_receive,
                s.abnormal,
                s.skipped_lines,
                s.overlong_lines
            );
        }
        for m in &ds.schema_mismatches {
            eprintln!(
                "warning: {} headers differ (missing: {:?}, not shown: {:?})",
                m.file, m.missing, m.extra
            );
        }
        if filter.is_active() {
            println!("total kept: {} (after filters: {})", ds.total_kept, rows.len());
        } else {
            println!("total kept: {}", ds.total_kept);
        }
        if args.search.is_some() {
            println!("matching search: {}", shown.len());
        }
        if args.preview {
            let mut page = shown.clone();
            page.truncate(PREVIEW_ROWS);
            print_preview(&ds.headers, &page);
        }
    }

    if let Some(out) = args.export {
        let name = export_default_name(&args.columns, args.format, args.scope, OffsetDateTime::now_utc())?;
        let path = resolve_export_path(&out, &name);
        let columns = export_columns(&ds.headers, &args.columns, args.format, &export_layout);
        let export_rows = match args.scope {
            ExportScope::Filtered => rows,
            ExportScope::All => ds.rows.iter().collect(),
        };
        let file = BufWriter::new(File::create(&path)?);
        let n = match args.format {
            ExportFormat::Csv => write_csv_columns(file, &columns, export_rows)?,
            ExportFormat::Json => write_json(file, &columns, export_rows)?,
        };
        eprintln!("export: {} rows -> {}", n, path.display());
    }
    Ok(())
}

pub fn handle_facets(archive: PathBuf, policy: Option<PathBuf>) -> Result<()> {
    let policy = load_policy(policy.as_deref())?;
    let (_, bytes) = read_archive(&archive)?;
    let opts = IngestOptions {
        policy,
        ..Default::default()
    };
    let ds = ingest(&bytes, Some(&opts), None)?;
    for col in facet_columns(&ds.headers, &opts.policy) {
        println!("{col}:");
        for v in unique_values(&ds.rows, col) {
            println!("  {v}");
        }
    }
    Ok(())
}

pub fn handle_files_list(store: PathBuf, user: Option<String>) -> Result<()> {
    let store = open_store(Backend::Fs, StoreParams { path: store })?;
    let entries = match user {
        Some(u) => list_uploads_by(store.as_ref(), &u)?,
        None => list_uploads(store.as_ref())?,
    };
    for e in entries {
        println!("{}  {:>10}  {}", e.date, e.size, e.name);
    }
    Ok(())
}

pub fn handle_files_rm(store: PathBuf, date: String) -> Result<()> {
    let store = open_store(Backend::Fs, StoreParams { path: store })?;
    let n = store.delete_by_date(&date)?;
    eprintln!("rm: {} entries dated {}", n, date);
    Ok(())
}
