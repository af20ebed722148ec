//! Domain models for movie records and the dimensions they are sliced by.
//!
//! This module provides the immutable row type loaded from the dataset, the
//! categorical dimensions used for filtering (genre, director, actor), the
//! numeric metrics the charts can plot, and the inclusive year range.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

/// Computes the return on investment of a film, in percent.
///
/// The marketing spend is assumed to equal the production budget, hence the
/// doubled budget. Returns `NaN` when the budget is zero or either input is
/// not finite.
///
/// # Examples
///
/// ```
/// use movie_dash::core::domain::compute_roi;
///
/// assert_eq!(compute_roi(100.0, 400.0), 200.0);
/// assert!(compute_roi(0.0, 400.0).is_nan());
/// ```
pub fn compute_roi(budget: f64, revenue: f64) -> f64 {
    if !budget.is_finite() || !revenue.is_finite() || budget == 0.0 {
        return f64::NAN;
    }
    (revenue - 2.0 * budget) / budget * 100.0
}

/// One film of the dataset.
///
/// Records are created once by the loader and never mutated afterwards.
/// Numeric fields that could not be parsed hold `NaN`; consumers must skip
/// them rather than treat them as zero.
///
/// # Fields
///
/// * `genres`, `directors`, `cast` - multi-valued fields, deduplicated and kept
///   in the order the dataset lists them
/// * `roi` - derived with [`compute_roi`], `NaN` for zero budgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub release_year: i32,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub cast: Vec<String>,
    pub popularity: f64,
    pub vote_average: f64,
    pub budget: f64,
    pub revenue: f64,
    pub roi: f64,
    pub status: String,
}

impl MovieRecord {
    /// Values this record lists for the given dimension.
    pub fn values(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Genre => &self.genres,
            Dimension::Director => &self.directors,
            Dimension::Actor => &self.cast,
        }
    }

    /// Returns true if the record lists `value` under `dimension`.
    pub fn has_value(&self, dimension: Dimension, value: &str) -> bool {
        self.values(dimension).iter().any(|v| v == value)
    }

    /// Returns true if the ROI is defined for this record.
    pub fn has_roi(&self) -> bool {
        self.roi.is_finite()
    }
}

/// A multi-valued field a user can select categories from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Genre,
    Director,
    Actor,
}

impl Dimension {
    /// Name used for query parameters and flow graph labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Genre => "genre",
            Dimension::Director => "director",
            Dimension::Actor => "actor",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "genre" | "genres" => Ok(Dimension::Genre),
            "director" | "directors" => Ok(Dimension::Director),
            "actor" | "actors" | "cast" => Ok(Dimension::Actor),
            other => Err(format!(
                "Unknown dimension: {}. Use 'genre', 'director' or 'actor'",
                other
            )),
        }
    }
}

/// Numeric quantity a chart can plot for a yearly aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Popularity,
    VoteAverage,
    Revenue,
    Budget,
    Roi,
    FilmsReleased,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Popularity,
        Metric::VoteAverage,
        Metric::Revenue,
        Metric::Budget,
        Metric::Roi,
        Metric::FilmsReleased,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Popularity => "popularity",
            Metric::VoteAverage => "vote_average",
            Metric::Revenue => "revenue",
            Metric::Budget => "budget",
            Metric::Roi => "roi",
            Metric::FilmsReleased => "films_released",
        }
    }

    /// Value of this metric for a single film.
    ///
    /// `FilmsReleased` counts the film itself. Returns `None` when the
    /// underlying field is not finite.
    pub fn record_value(&self, record: &MovieRecord) -> Option<f64> {
        let value = match self {
            Metric::Popularity => record.popularity,
            Metric::VoteAverage => record.vote_average,
            Metric::Revenue => record.revenue,
            Metric::Budget => record.budget,
            Metric::Roi => record.roi,
            Metric::FilmsReleased => 1.0,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| format!("Unknown metric: {}", s))
    }
}

/// Inclusive range of release years.
///
/// # Examples
///
/// ```
/// use movie_dash::core::domain::YearRange;
///
/// let range = YearRange::new(2000, 2010).unwrap();
/// assert!(range.contains(2000));
/// assert!(range.contains(2010));
/// assert_eq!(range.span(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Creates a range, rejecting inverted bounds.
    pub fn new(min: i32, max: i32) -> Result<Self, FilterError> {
        if min > max {
            return Err(FilterError::InvalidYearRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }

    pub fn span(&self) -> i32 {
        self.max - self.min
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn movie(title: &str, year: i32, genres: &[&str]) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            release_year: year,
            genres: genres.iter().map(|s| s.to_string()).collect(),
            directors: vec!["Jane Doe".to_string()],
            cast: vec![],
            popularity: 10.0,
            vote_average: 7.0,
            budget: 100.0,
            revenue: 400.0,
            roi: compute_roi(100.0, 400.0),
            status: "Released".to_string(),
        }
    }

    #[test]
    fn test_compute_roi() {
        assert_eq!(compute_roi(50.0, 50.0), -100.0);
        assert_eq!(compute_roi(100.0, 200.0), 0.0);
        assert!(compute_roi(0.0, 0.0).is_nan());
        assert!(compute_roi(f64::NAN, 10.0).is_nan());
    }

    #[test]
    fn test_has_value_by_dimension() {
        let record = movie("Heat", 1995, &["Action", "Crime"]);
        assert!(record.has_value(Dimension::Genre, "Crime"));
        assert!(!record.has_value(Dimension::Genre, "Drama"));
        assert!(record.has_value(Dimension::Director, "Jane Doe"));
        assert!(record.values(Dimension::Actor).is_empty());
    }

    #[test]
    fn test_dimension_from_str() {
        assert_eq!("Director".parse::<Dimension>(), Ok(Dimension::Director));
        assert_eq!("cast".parse::<Dimension>(), Ok(Dimension::Actor));
        assert!("studio".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_metric_record_value() {
        let mut record = movie("Heat", 1995, &["Action"]);
        assert_eq!(Metric::Roi.record_value(&record), Some(200.0));
        assert_eq!(Metric::FilmsReleased.record_value(&record), Some(1.0));

        record.popularity = f64::NAN;
        assert_eq!(Metric::Popularity.record_value(&record), None);
        assert_eq!("vote_average".parse::<Metric>(), Ok(Metric::VoteAverage));
    }

    #[test]
    fn test_year_range() {
        assert!(YearRange::new(2010, 2000).is_err());
        let range = YearRange::new(1970, 2024).unwrap();
        assert!(!range.contains(1969));
        assert_eq!(range.to_string(), "1970 - 2024");
    }
}
