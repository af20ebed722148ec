//! Error types for the dashboard core.
//!
//! Load-time problems are fatal and surface as [`DataFormatError`]. Filter
//! mutations that break a constraint surface as [`FilterError`] and leave the
//! current state untouched. Numeric edge cases (zero budgets, empty quantiles)
//! are never errors: they show up as `NaN` fields or `None` statistics.

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Problems found while reading the raw movie dataset.
#[derive(Debug, thiserror::Error)]
pub enum DataFormatError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Row {row}: missing required field '{field}'")]
    MissingField { row: usize, field: &'static str },

    #[error("Row {row}: cannot determine release year from '{value}'")]
    InvalidReleaseYear { row: usize, value: String },

    #[error("Dataset has no records in scope")]
    EmptyDataset,

    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Constraint violations raised by the filter state manager.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("Selection limit exceeded: at most {limit} categories, got {attempted}")]
    SelectionLimitExceeded { limit: usize, attempted: usize },

    #[error("Invalid year range: {min}..={max}")]
    InvalidYearRange { min: i32, max: i32 },
}

/// Crate-level error type
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Data format error: {0}")]
    DataFormat(#[from] DataFormatError),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for DashboardError {
    fn from(e: csv::Error) -> Self {
        DashboardError::DataFormat(DataFormatError::Csv(e))
    }
}
