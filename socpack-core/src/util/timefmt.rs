use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::error::{IngestError, Result};

/// `Oct 07, 3:45 PM`
pub fn short_date_time(at: OffsetDateTime) -> Result<String> {
    let fmt = format_description!(
        "[month repr:short] [day], [hour repr:12 padding:none]:[minute] [period]"
    );
    at.format(&fmt)
        .map_err(|e| IngestError::Format(format!("timestamp: {e}")))
}

/// UTC with millisecond precision: `2026-10-07T09:04:00.000Z`
pub fn iso_timestamp(at: OffsetDateTime) -> Result<String> {
    let fmt = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    );
    at.to_offset(UtcOffset::UTC)
        .format(&fmt)
        .map_err(|e| IngestError::Format(format!("timestamp: {e}")))
}

/// `YYYY-MM-DD`
pub fn iso_date(at: OffsetDateTime) -> Result<String> {
    let fmt = format_description!("[year]-[month]-[day]");
    at.format(&fmt)
        .map_err(|e| IngestError::Format(format!("timestamp: {e}")))
}
