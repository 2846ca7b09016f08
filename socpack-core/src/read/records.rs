use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::warn;

use crate::domain::{ParsedFile, ParsedRecord};

/// Turn sanitized CSV text into header-keyed records.
///
/// Line 1 is the header row (names trimmed). Empty lines and rows whose cells
/// are all empty are dropped. A line the reader rejects is logged and skipped;
/// the rest of the file still parses. Lines with fewer fields yield `None` for
/// the missing cells. Lines with more fields keep the cells under a header and
/// drop the surplus, with a warning.
pub fn parse_records(file: &str, text: &str) -> ParsedFile {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(str::to_string).collect(),
        Err(e) => {
            warn!(file, error = %e, "CSV header row unreadable");
            return ParsedFile::default();
        }
    };

    let mut parsed = ParsedFile {
        headers,
        ..Default::default()
    };

    let mut record = StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                let line = e.position().map(|p| p.line());
                warn!(file, ?line, error = %e, "skipping malformed CSV line");
                parsed.skipped_lines += 1;
                continue;
            }
        }

        if record.len() > parsed.headers.len() {
            let line = record.position().map(|p| p.line());
            warn!(
                file,
                ?line,
                fields = record.len(),
                expected = parsed.headers.len(),
                "ignoring surplus fields on CSV line"
            );
            parsed.overlong_lines += 1;
        }

        let row = ParsedRecord::new(
            parsed
                .headers
                .iter()
                .enumerate()
                .map(|(idx, h)| (h.clone(), record.get(idx).map(str::to_string)))
                .collect(),
        );
        if !row.is_blank() {
            parsed.records.push(row);
        }
    }

    parsed
}
