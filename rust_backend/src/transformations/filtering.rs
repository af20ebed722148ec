use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::domain::{Dimension, MovieRecord, YearRange};

/// Which records the dashboard operates on at all.
///
/// Defaults to released films from 1970 onwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetScope {
    pub min_release_year: Option<i32>,
    pub status: Option<String>,
}

impl Default for DatasetScope {
    fn default() -> Self {
        Self {
            min_release_year: Some(1970),
            status: Some("Released".to_string()),
        }
    }
}

impl DatasetScope {
    /// A scope that keeps every record.
    pub fn unrestricted() -> Self {
        Self {
            min_release_year: None,
            status: None,
        }
    }

    pub fn includes(&self, record: &MovieRecord) -> bool {
        let year_ok = self
            .min_release_year
            .map(|min| record.release_year >= min)
            .unwrap_or(true);
        let status_ok = self
            .status
            .as_deref()
            .map(|s| record.status == s)
            .unwrap_or(true);
        year_ok && status_ok
    }
}

/// Records released within `range` whose `values_of` field lists `value`.
///
/// Lazy, so callers can group the matches without an intermediate vector.
pub fn matching_in_years<'a, F>(
    records: &'a [Arc<MovieRecord>],
    values_of: F,
    value: &'a str,
    range: YearRange,
) -> impl Iterator<Item = Arc<MovieRecord>> + 'a
where
    F: Fn(&MovieRecord) -> &[String] + 'a,
{
    records
        .iter()
        .filter(move |r| {
            let record: &MovieRecord = r;
            range.contains(record.release_year) && values_of(record).iter().any(|v| v == value)
        })
        .cloned()
}

/// Filter records by category and year range in one pass
pub fn filter_by_category_and_years(
    records: &[Arc<MovieRecord>],
    dimension: Dimension,
    value: &str,
    range: YearRange,
) -> Vec<Arc<MovieRecord>> {
    matching_in_years(records, move |r| r.values(dimension), value, range).collect()
}

/// Filter records by the dataset scope (minimum year and status)
pub fn filter_by_scope(records: &[Arc<MovieRecord>], scope: &DatasetScope) -> Vec<Arc<MovieRecord>> {
    records
        .iter()
        .filter(|r| scope.includes(r))
        .cloned()
        .collect()
}
