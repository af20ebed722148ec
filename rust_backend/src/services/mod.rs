//! Aggregation and cross-filtering services.
//!
//! The services turn the immutable record store into chart-ready data for a
//! given filter state. Data flows one way: category index and filter state
//! feed the aggregator, whose series feed the statistics, the flow graph and
//! the chart projections. [`dashboard`] runs that pipeline end to end.

pub mod aggregation;
pub mod category_index;
pub mod dashboard;
pub mod filter_state;
pub mod flow_graph;
pub mod statistics;
pub mod views;

pub use aggregation::{aggregate, aggregate_with, group_by_year};
pub use category_index::{build_index, CategoryIndex, DEFAULT_MIN_SUPPORT};
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use filter_state::{FilterLimits, FilterState, FilterStateManager, ListenerId};
pub use flow_graph::build_flow_graph;
pub use statistics::{box_plot_stats, finite_mean, quantile_sorted};
pub use views::{drill_down, drill_down_year, DetailTable};
