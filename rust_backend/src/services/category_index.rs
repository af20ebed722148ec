//! Selectable values of a dimension and how often each occurs.
//!
//! Values seen in fewer than `min_support` records are left out of the index.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::core::domain::{Dimension, MovieRecord};

/// Minimum number of records a value must appear in to be selectable.
pub const DEFAULT_MIN_SUPPORT: usize = 5;

/// A category value and the number of records listing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Selectable values of one dimension, sorted lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryIndex {
    pub dimension: Dimension,
    pub min_support: usize,
    pub entries: Vec<CategoryCount>,
}

/// Count, per value, how many records list it under `dimension`.
///
/// A record that lists the same value twice counts once.
fn count_records_per_value(
    records: &[Arc<MovieRecord>],
    dimension: Dimension,
) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let distinct: HashSet<&str> = record
            .values(dimension)
            .iter()
            .map(|v| v.as_str())
            .collect();
        for value in distinct {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    counts
}

impl CategoryIndex {
    /// Build the index of values occurring in at least `min_support` records.
    pub fn build(records: &[Arc<MovieRecord>], dimension: Dimension, min_support: usize) -> Self {
        let mut entries: Vec<CategoryCount> = count_records_per_value(records, dimension)
            .into_iter()
            .filter(|(_, count)| *count >= min_support)
            .map(|(value, count)| CategoryCount {
                value: value.to_string(),
                count,
            })
            .collect();

        entries.sort_by(|a, b| a.value.cmp(&b.value));

        log::debug!(
            "Built {} index with {} values (min_support={})",
            dimension,
            entries.len(),
            min_support
        );

        Self {
            dimension,
            min_support,
            entries,
        }
    }

    /// Selectable values in lexicographic order.
    pub fn values(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.value.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries
            .binary_search_by(|e| e.value.as_str().cmp(value))
            .is_ok()
    }

    pub fn count(&self, value: &str) -> Option<usize> {
        self.entries
            .binary_search_by(|e| e.value.as_str().cmp(value))
            .ok()
            .map(|i| self.entries[i].count)
    }

    /// The `n` most frequent values, ties broken lexicographically.
    pub fn top_by_frequency(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<&CategoryCount> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        ranked
            .into_iter()
            .take(n)
            .map(|e| e.value.clone())
            .collect()
    }
}

/// Sorted selectable values of `dimension` with at least `min_support` records.
pub fn build_index(
    records: &[Arc<MovieRecord>],
    dimension: Dimension,
    min_support: usize,
) -> Vec<String> {
    CategoryIndex::build(records, dimension, min_support).values()
}
