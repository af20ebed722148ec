//! Immutable in-memory store of loaded movie records.

use std::sync::Arc;

use crate::core::domain::{MovieRecord, YearRange};
use crate::error::DataFormatError;
use crate::parsing::csv_parser::{rows_to_records, RawMovieRow};
use crate::transformations::filtering::{filter_by_scope, DatasetScope};

/// Owns the loaded records and hands out shared read-only views.
///
/// Cloning a store is cheap: the record slice is reference counted, and so
/// is each record, which lets aggregates keep films for drill-down without
/// copying them.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Arc<[Arc<MovieRecord>]>,
}

impl RecordStore {
    /// Wrap already parsed records.
    pub fn new(records: Vec<MovieRecord>) -> Self {
        let records: Vec<Arc<MovieRecord>> = records.into_iter().map(Arc::new).collect();
        Self {
            records: records.into(),
        }
    }

    /// Parse raw rows into a store. Fails on the first malformed row.
    pub fn load(rows: &[RawMovieRow]) -> Result<Self, DataFormatError> {
        let records = rows_to_records(rows)?;
        log::info!("Loaded {} movie records", records.len());
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[Arc<MovieRecord>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest release year in the store.
    pub fn year_extent(&self) -> Option<YearRange> {
        let min = self.records.iter().map(|r| r.release_year).min()?;
        let max = self.records.iter().map(|r| r.release_year).max()?;
        Some(YearRange { min, max })
    }

    /// A new store restricted to the records inside `scope`.
    pub fn scoped(&self, scope: &DatasetScope) -> Self {
        let kept = filter_by_scope(&self.records, scope);
        log::debug!(
            "Dataset scope kept {} of {} records",
            kept.len(),
            self.records.len()
        );
        Self {
            records: kept.into(),
        }
    }
}

impl From<Vec<MovieRecord>> for RecordStore {
    fn from(records: Vec<MovieRecord>) -> Self {
        Self::new(records)
    }
}
