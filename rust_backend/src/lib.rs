//! Aggregation and cross-filtering engine for an interactive movie dashboard.
//!
//! Loads a movie dataset into an immutable record store, aggregates the
//! selected genres, directors or actors by release year, and derives the
//! box-plot, flow-graph and chart data a renderer draws from.
//!
//! ```no_run
//! use movie_dash::config::DashboardConfig;
//! use movie_dash::core::domain::Dimension;
//! use movie_dash::io::MovieLoader;
//! use movie_dash::services::Dashboard;
//! use std::path::Path;
//!
//! let loaded = MovieLoader::load_from_file(Path::new("data/movies.csv")).unwrap();
//! let config = DashboardConfig::default();
//! let mut dashboard = Dashboard::new(&loaded.store, Dimension::Genre, &config).unwrap();
//! dashboard.filters_mut().set_year_range(1990, 2000).unwrap();
//! let snapshot = dashboard.compute();
//! println!("{} series", snapshot.series.len());
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod services;
pub mod transformations;

pub use config::DashboardConfig;
pub use error::{DashboardError, DataFormatError, FilterError, Result};
