use anyhow::{Context, Result};
use std::path::Path;

use crate::io::store::RecordStore;
use crate::error::DataFormatError;
use crate::parsing::csv_parser;

/// Represents the source type of movie data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSourceType {
    Json,
    Csv,
}

/// Result of loading a dataset
#[derive(Debug)]
pub struct DatasetLoadResult {
    pub store: RecordStore,
    pub source_type: DatasetSourceType,
    pub num_records: usize,
}

impl DatasetLoadResult {
    pub fn new(store: RecordStore, source_type: DatasetSourceType) -> Self {
        let num_records = store.len();
        Self {
            store,
            source_type,
            num_records,
        }
    }
}

/// Unified interface for loading movie data from JSON or CSV
pub struct MovieLoader;

impl MovieLoader {
    /// Load movie data from a file (auto-detects JSON or CSV)
    pub fn load_from_file(path: &Path) -> Result<DatasetLoadResult> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        match extension.to_lowercase().as_str() {
            "json" => Self::load_from_json(path),
            "csv" => Self::load_from_csv(path),
            other => Err(DataFormatError::UnsupportedFormat(other.to_string()).into()),
        }
    }

    /// Load movie data from a CSV file
    pub fn load_from_csv(csv_path: &Path) -> Result<DatasetLoadResult> {
        let records = csv_parser::parse_movies_csv(csv_path)
            .with_context(|| format!("Failed to parse CSV file: {}", csv_path.display()))?;

        log::info!(
            "Loaded {} records from {}",
            records.len(),
            csv_path.display()
        );
        Ok(DatasetLoadResult::new(
            RecordStore::new(records),
            DatasetSourceType::Csv,
        ))
    }

    /// Load movie data from a CSV string
    pub fn load_from_csv_str(content: &str) -> Result<DatasetLoadResult> {
        let records =
            csv_parser::parse_movies_csv_str(content).context("Failed to parse CSV string")?;

        Ok(DatasetLoadResult::new(
            RecordStore::new(records),
            DatasetSourceType::Csv,
        ))
    }

    /// Load movie data from a JSON file
    pub fn load_from_json(json_path: &Path) -> Result<DatasetLoadResult> {
        let content = std::fs::read_to_string(json_path)
            .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;

        let result = Self::load_from_json_str(&content)
            .with_context(|| format!("Failed to parse JSON file: {}", json_path.display()))?;

        log::info!(
            "Loaded {} records from {}",
            result.num_records,
            json_path.display()
        );
        Ok(result)
    }

    /// Load movie data from a JSON string
    pub fn load_from_json_str(json_str: &str) -> Result<DatasetLoadResult> {
        let records =
            csv_parser::parse_movies_json_str(json_str).context("Failed to parse JSON string")?;

        Ok(DatasetLoadResult::new(
            RecordStore::new(records),
            DatasetSourceType::Json,
        ))
    }
}
