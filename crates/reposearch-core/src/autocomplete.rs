//! Autocomplete over recent searches.

use crate::recent::SearchRecord;

/// Filters `records` down to those whose keyword contains `input`,
/// case-insensitively, preserving order.
///
/// Blank input returns every record so a freshly focused, empty search box
/// shows the whole history as suggestions.
pub fn filter<'a>(input: &str, records: &'a [SearchRecord]) -> Vec<&'a SearchRecord> {
    if input.trim().is_empty() {
        return records.iter().collect();
    }

    let needle = input.to_lowercase();
    records
        .iter()
        .filter(|record| record.keyword.to_lowercase().contains(&needle))
        .collect()
}
