//! Recent search domain models.
//!
//! The recency list is the only durable state in the application. It is kept
//! newest first and mirrored in full to the key-value store on every change.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of recent searches shown in the recents panel.
///
/// Storage keeps the full list; only the view is capped.
pub const RECENT_DISPLAY_LIMIT: usize = 10;

/// A single past search.
///
/// Identity is the keyword (case-sensitive, exact match). The `date` field is
/// serialized as an RFC 3339 string so stored data stays readable by other
/// clients of the same store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRecord {
    /// Trimmed, non-empty search keyword.
    pub keyword: String,
    /// When the keyword was last searched.
    pub date: DateTime<Utc>,
}

impl SearchRecord {
    pub fn new(keyword: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            keyword: keyword.into(),
            date,
        }
    }

    /// Short `"MM. DD."` label in the local time zone, shown next to suggestions.
    pub fn short_date(&self) -> String {
        self.short_date_in(&Local)
    }

    /// Short `"MM. DD."` label in the given time zone.
    pub fn short_date_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        self.date.with_timezone(tz).format("%m. %d.").to_string()
    }
}

/// Ordered list of past searches, newest first.
///
/// Invariants:
/// - at most one record per keyword
/// - strictly descending `date`
/// - no blank keywords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    records: Vec<SearchRecord>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from untrusted records (e.g. loaded from storage).
    ///
    /// Blank keywords are dropped, keywords are trimmed, duplicates keep their
    /// newest entry and the result is sorted newest first.
    pub fn from_records(records: Vec<SearchRecord>) -> Self {
        let mut cleaned: Vec<SearchRecord> = records
            .into_iter()
            .filter_map(|record| {
                let keyword = record.keyword.trim();
                if keyword.is_empty() {
                    None
                } else {
                    Some(SearchRecord::new(keyword, record.date))
                }
            })
            .collect();

        cleaned.sort_by(|a, b| b.date.cmp(&a.date));

        let mut records: Vec<SearchRecord> = Vec::with_capacity(cleaned.len());
        for record in cleaned {
            if records.iter().any(|r| r.keyword == record.keyword) {
                continue;
            }
            // Equal timestamps would break strict ordering; nudge older ones back.
            if let Some(last) = records.last()
                && record.date >= last.date
            {
                let date = last.date - Duration::milliseconds(1);
                records.push(SearchRecord::new(record.keyword, date));
                continue;
            }
            records.push(record);
        }

        Self { records }
    }

    /// All stored records, newest first.
    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    /// Records for the recents panel, capped at [`RECENT_DISPLAY_LIMIT`].
    pub fn display(&self) -> &[SearchRecord] {
        let end = self.records.len().min(RECENT_DISPLAY_LIMIT);
        &self.records[..end]
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.keyword.as_str())
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.records.iter().any(|r| r.keyword == keyword)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records a search with move-to-front semantics.
    ///
    /// Returns `false` (and leaves the list untouched) when the trimmed keyword
    /// is blank. If `now` does not advance past the current head, the new head
    /// is stamped one millisecond after it.
    pub fn record(&mut self, keyword: &str, now: DateTime<Utc>) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return false;
        }

        let date = match self.records.first() {
            Some(head) if now <= head.date => head.date + Duration::milliseconds(1),
            _ => now,
        };

        self.records.retain(|r| r.keyword != keyword);
        self.records.insert(0, SearchRecord::new(keyword, date));
        true
    }

    /// Removes the record for `keyword`. Returns whether anything was removed.
    pub fn remove(&mut self, keyword: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.keyword != keyword);
        self.records.len() != before
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
