//! Record filtering utilities.
//!
//! This module provides the filters shared by the aggregation services:
//! films matching a category value within an inclusive year range, and the
//! dataset scope that decides which films the dashboard considers at all.
//!
//! # Example
//!
//! ```
//! use movie_dash::core::domain::{Dimension, YearRange};
//! use movie_dash::transformations::filter_by_category_and_years;
//!
//! let records = Vec::new();
//! let range = YearRange::new(1990, 1999).unwrap();
//! let dramas = filter_by_category_and_years(&records, Dimension::Genre, "Drama", range);
//! assert!(dramas.is_empty());
//! ```

pub mod filtering;

pub use filtering::{
    filter_by_category_and_years, filter_by_scope, matching_in_years, DatasetScope,
};
