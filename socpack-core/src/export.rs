use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::ser::{Serialize, SerializeMap, Serializer};
use time::OffsetDateTime;

use crate::domain::ParsedRecord;
use crate::error::Result;
use crate::policy::ExportLayout;
use crate::util::timefmt::iso_date;

/// Headers that survive the export, by position in the canonical list.
pub fn kept_headers<'a>(headers: &'a [String], layout: &ExportLayout) -> Vec<&'a str> {
    headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| !layout.is_dropped(*idx))
        .map(|(_, h)| h.as_str())
        .collect()
}

/// The user's column selection, or every header when nothing is selected.
pub fn select_columns<'a>(headers: &'a [String], selected: &'a [String]) -> Vec<&'a str> {
    let pick = if selected.is_empty() { headers } else { selected };
    pick.iter().map(String::as_str).collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Which rows an export covers: the facet-filtered view or the whole dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportScope {
    #[default]
    Filtered,
    All,
}

impl ExportScope {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportScope::Filtered => "filtered",
            ExportScope::All => "all",
        }
    }
}

/// Write the layout's kept columns as CSV.
pub fn write_csv<'r, W, I>(out: W, headers: &[String], rows: I, layout: &ExportLayout) -> Result<u64>
where
    W: Write,
    I: IntoIterator<Item = &'r ParsedRecord>,
{
    write_csv_columns(out, &kept_headers(headers, layout), rows)
}

/// Write the header line and one line per row. Null or missing cells are
/// written empty; a cell is quoted only when it needs to be.
pub fn write_csv_columns<'r, W, I>(out: W, columns: &[&str], rows: I) -> Result<u64>
where
    W: Write,
    I: IntoIterator<Item = &'r ParsedRecord>,
{
    let mut w = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(out);

    w.write_record(columns)?;
    let mut written = 0u64;
    for row in rows {
        w.write_record(columns.iter().map(|c| row.get(c).unwrap_or("")))?;
        written += 1;
    }
    w.flush()?;
    Ok(written)
}

struct Projected<'a> {
    row: &'a ParsedRecord,
    columns: &'a [&'a str],
}

impl Serialize for Projected<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for col in self.columns {
            map.serialize_entry(col, &self.row.get(col))?;
        }
        map.end()
    }
}

/// Pretty-printed JSON array, one object per row holding `columns` in order.
/// Null or missing cells are written as `null`.
pub fn write_json<'r, W, I>(mut out: W, columns: &[&str], rows: I) -> Result<u64>
where
    W: Write,
    I: IntoIterator<Item = &'r ParsedRecord>,
{
    let projected: Vec<Projected<'_>> = rows
        .into_iter()
        .map(|row| Projected { row, columns })
        .collect();
    serde_json::to_writer_pretty(&mut out, &projected)?;
    out.flush()?;
    Ok(projected.len() as u64)
}

/// `data-{filtered|all}-YYYY-MM-DD.{csv|json}`
pub fn export_file_name(scope: ExportScope, format: ExportFormat, at: OffsetDateTime) -> Result<String> {
    Ok(format!(
        "data-{}-{}.{}",
        scope.as_str(),
        iso_date(at)?,
        format.extension()
    ))
}

/// `data-export-YYYY-MM-DD.csv`
pub fn default_export_name(at: OffsetDateTime) -> Result<String> {
    Ok(format!("data-export-{}.csv", iso_date(at)?))
}
