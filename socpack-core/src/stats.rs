use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    /// Rows after blank-row filtering, before the admission rule.
    pub initial_row_count: usize,
    pub kept_row_count: usize,
    /// Kept rows by status.
    pub pending_receive: usize,
    pub abnormal: usize,
    /// Lines the CSV reader rejected.
    pub skipped_lines: usize,
    /// Lines kept with their surplus fields dropped.
    pub overlong_lines: usize,
}

impl FileStats {
    pub fn excluded_row_count(&self) -> usize {
        self.initial_row_count.saturating_sub(self.kept_row_count)
    }
}
