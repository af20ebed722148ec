//! Core domain models for the movie dashboard.
//!
//! This module defines the immutable movie record, the dimensions and metrics
//! the dashboard slices by, and the aggregate structures handed to the charts.

pub mod domain;
pub mod models;

pub use domain::{compute_roi, Dimension, Metric, MovieRecord, YearRange};
pub use models::{BoxPlotStats, CategorySeries, FlowGraph, FlowLink, FlowNode, YearAggregate};
