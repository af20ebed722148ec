//! Parsers for the movie dataset.
//!
//! This module turns raw dataset rows into typed [`MovieRecord`]s and decodes
//! the query string used to seed a detail page.
//!
//! # Parsers
//!
//! - [`csv_parser`]: Parse CSV (or JSON) rows into movie records
//! - [`fields`]: Cell-level parsing of numbers, lists and release dates
//! - [`query`]: Extract a pre-selected category from a query string
//!
//! # Example
//!
//! ```no_run
//! use movie_dash::parsing::csv_parser::parse_movies_csv;
//! use std::path::Path;
//!
//! let records = parse_movies_csv(Path::new("data/movies.csv"))
//!     .expect("Failed to parse dataset");
//! ```
//!
//! [`MovieRecord`]: crate::core::domain::MovieRecord

pub mod csv_parser;
pub mod fields;
pub mod query;


pub use csv_parser::{RawMovieRow, REQUIRED_COLUMNS};
pub use query::seed_from_query;
