use std::collections::{BTreeMap, BTreeSet};

use crate::domain::ParsedRecord;
use crate::policy::Policy;

/// Configured facet columns that the dataset actually has.
pub fn facet_columns<'a>(headers: &[String], policy: &'a Policy) -> Vec<&'a str> {
    policy
        .facet_columns
        .iter()
        .filter(|c| headers.iter().any(|h| h == *c))
        .map(String::as_str)
        .collect()
}

/// Sorted distinct non-empty values of `column`.
pub fn unique_values<'r, I>(rows: I, column: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'r ParsedRecord>,
{
    rows.into_iter()
        .filter_map(|r| r.get(column))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Per-column value selections; columns with nothing selected do not filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetFilter {
    selected: BTreeMap<String, BTreeSet<String>>,
}

impl FacetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, column: &str, value: &str) {
        self.selected
            .entry(column.to_string())
            .or_default()
            .insert(value.to_string());
    }

    /// Flip `value` in or out of the column's selection.
    pub fn toggle(&mut self, column: &str, value: &str) {
        let set = self.selected.entry(column.to_string()).or_default();
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    pub fn reset(&mut self) {
        self.selected.clear();
    }

    pub fn is_active(&self) -> bool {
        self.selected.values().any(|s| !s.is_empty())
    }

    pub fn matches(&self, row: &ParsedRecord) -> bool {
        self.selected.iter().all(|(col, values)| {
            values.is_empty() || values.contains(row.get(col).unwrap_or(""))
        })
    }

    /// Matching rows in their original order.
    pub fn apply<'r, I>(&self, rows: I) -> Vec<&'r ParsedRecord>
    where
        I: IntoIterator<Item = &'r ParsedRecord>,
    {
        rows.into_iter().filter(|r| self.matches(r)).collect()
    }
}
