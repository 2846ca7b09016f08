use std::cmp::Ordering;

use crate::domain::ParsedRecord;

/// Rows shown in one preview page.
pub const PREVIEW_ROWS: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// `COLUMN`, `COLUMN:asc` or `COLUMN:desc`.
    pub fn parse(text: &str) -> Option<Self> {
        let (column, direction) = match text.rsplit_once(':') {
            Some((col, "asc")) => (col, SortDirection::Asc),
            Some((col, "desc")) => (col, SortDirection::Desc),
            _ => (text, SortDirection::Asc),
        };
        let column = column.trim();
        (!column.is_empty()).then(|| Self {
            column: column.to_string(),
            direction,
        })
    }

    /// Null and missing cells go last in either direction; other values
    /// compare case-insensitively.
    pub fn compare(&self, a: &ParsedRecord, b: &ParsedRecord) -> Ordering {
        match (a.get(&self.column), b.get(&self.column)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => {
                let ord = x.to_lowercase().cmp(&y.to_lowercase());
                match self.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
        }
    }
}

/// Search text and sort order applied to the rows on display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviewState {
    search: String,
    sort: Option<SortKey>,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_lowercase();
    }

    pub fn set_sort(&mut self, key: Option<SortKey>) {
        self.sort = key;
    }

    pub fn sort(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    /// Clicking a column header: a new column sorts ascending, the same
    /// column goes ascending, then descending, then unsorted.
    pub fn cycle_sort(&mut self, column: &str) {
        self.sort = match self.sort.take() {
            Some(SortKey {
                column: current,
                direction: SortDirection::Asc,
            }) if current == column => Some(SortKey {
                column: current,
                direction: SortDirection::Desc,
            }),
            Some(SortKey {
                column: current,
                direction: SortDirection::Desc,
            }) if current == column => None,
            _ => Some(SortKey {
                column: column.to_string(),
                direction: SortDirection::Asc,
            }),
        };
    }

    /// Case-insensitive substring match over the given headers. An empty
    /// search matches everything.
    pub fn matches(&self, row: &ParsedRecord, headers: &[String]) -> bool {
        self.search.is_empty()
            || headers.iter().any(|h| {
                row.get(h)
                    .is_some_and(|v| v.to_lowercase().contains(&self.search))
            })
    }

    /// Matching rows, stably sorted when a sort key is set.
    pub fn apply<'r, I>(&self, rows: I, headers: &[String]) -> Vec<&'r ParsedRecord>
    where
        I: IntoIterator<Item = &'r ParsedRecord>,
    {
        let mut out: Vec<&ParsedRecord> = rows
            .into_iter()
            .filter(|r| self.matches(r, headers))
            .collect();
        if let Some(key) = &self.sort {
            out.sort_by(|a, b| key.compare(a, b));
        }
        out
    }

    /// The first `PREVIEW_ROWS` rows of `apply`.
    pub fn page<'r, I>(&self, rows: I, headers: &[String]) -> Vec<&'r ParsedRecord>
    where
        I: IntoIterator<Item = &'r ParsedRecord>,
    {
        let mut out = self.apply(rows, headers);
        out.truncate(PREVIEW_ROWS);
        out
    }
}
