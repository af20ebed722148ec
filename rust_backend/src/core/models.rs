//! Output models produced by the aggregation pipeline.
//!
//! These are plain data consumed by whatever renders the charts. Statistics
//! that cannot be computed are `None` rather than zero.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::domain::{Dimension, Metric, MovieRecord, YearRange};

/// Aggregated values for one (category, year) cell.
///
/// Means are taken over the films of that year that have a finite value for
/// the field; `roi` ignores films with a zero budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearAggregate {
    pub year: i32,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub revenue: Option<f64>,
    pub budget: Option<f64>,
    pub roi: Option<f64>,
    pub films_released: usize,
    pub films: Vec<Arc<MovieRecord>>,
}

impl YearAggregate {
    /// Value of a metric for this year, if defined.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Popularity => self.popularity,
            Metric::VoteAverage => self.vote_average,
            Metric::Revenue => self.revenue,
            Metric::Budget => self.budget,
            Metric::Roi => self.roi,
            Metric::FilmsReleased => Some(self.films_released as f64),
        }
    }
}

/// Yearly aggregates for one selected category, sorted by year.
///
/// An empty `series` is a valid result: the category had no films in the
/// selected year range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySeries {
    pub category: String,
    pub dimension: Dimension,
    /// Position of the category in the selection. Charts color by this index,
    /// so the same value may get another color when the selection order changes.
    pub color_index: usize,
    pub series: Vec<YearAggregate>,
}

impl CategorySeries {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of films across all years.
    pub fn total_films(&self) -> usize {
        self.series.iter().map(|y| y.films_released).sum()
    }

    /// All films of the series, year by year.
    pub fn films(&self) -> impl Iterator<Item = &Arc<MovieRecord>> + '_ {
        self.series.iter().flat_map(|y| y.films.iter())
    }

    /// First and last year present in the series.
    pub fn year_span(&self) -> Option<YearRange> {
        match (self.series.first(), self.series.last()) {
            (Some(first), Some(last)) => Some(YearRange {
                min: first.year,
                max: last.year,
            }),
            _ => None,
        }
    }
}

/// Five-number summary for a box plot.
///
/// `min` and `max` are the whiskers, clamped to the Tukey fences. All fields
/// are `None` when the series had no finite ROI values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotStats {
    pub category: String,
    pub color_index: usize,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

impl BoxPlotStats {
    pub fn empty(category: impl Into<String>, color_index: usize) -> Self {
        Self {
            category: category.into(),
            color_index,
            min: None,
            q1: None,
            median: None,
            q3: None,
            max: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.median.is_none()
    }
}

/// Node of a flow graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    pub name: String,
}

/// Weighted edge between two node indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub weight: u32,
}

/// Bipartite co-occurrence graph (e.g. director → genre) for a Sankey layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub source_label: String,
    pub target_label: String,
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
}

impl FlowGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the node with the given name.
    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    /// Sum of the weights of all links leaving `node`.
    pub fn outgoing_weight(&self, node: usize) -> u32 {
        self.links
            .iter()
            .filter(|l| l.source == node)
            .map(|l| l.weight)
            .sum()
    }

    /// Sum of all link weights.
    pub fn total_weight(&self) -> u32 {
        self.links.iter().map(|l| l.weight).sum()
    }
}
