use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::domain::{Dimension, MovieRecord, YearRange};
use crate::core::models::{CategorySeries, YearAggregate};
use crate::services::statistics::finite_mean;
use crate::transformations::matching_in_years;

/// Build the aggregate for the films released in one year.
fn aggregate_year(year: i32, films: Vec<Arc<MovieRecord>>) -> YearAggregate {
    YearAggregate {
        year,
        popularity: finite_mean(films.iter().map(|f| f.popularity)),
        vote_average: finite_mean(films.iter().map(|f| f.vote_average)),
        revenue: finite_mean(films.iter().map(|f| f.revenue)),
        budget: finite_mean(films.iter().map(|f| f.budget)),
        roi: finite_mean(films.iter().map(|f| f.roi)),
        films_released: films.len(),
        films,
    }
}

/// Group films by release year into aggregates sorted by year.
///
/// Years without films produce no entry.
pub fn group_by_year(films: impl IntoIterator<Item = Arc<MovieRecord>>) -> Vec<YearAggregate> {
    let mut by_year: BTreeMap<i32, Vec<Arc<MovieRecord>>> = BTreeMap::new();
    for film in films {
        by_year.entry(film.release_year).or_default().push(film);
    }
    by_year
        .into_iter()
        .map(|(year, films)| aggregate_year(year, films))
        .collect()
}

/// Aggregate one series per selected value, using `values_of` to read the
/// multi-valued field a record is matched on.
///
/// The output order follows `selection`; a value without matching films
/// still yields a series, with no yearly entries.
pub fn aggregate_with<F>(
    records: &[Arc<MovieRecord>],
    dimension: Dimension,
    values_of: F,
    selection: &[String],
    year_range: YearRange,
) -> Vec<CategorySeries>
where
    F: Fn(&MovieRecord) -> &[String],
{
    selection
        .iter()
        .enumerate()
        .map(|(color_index, category)| {
            let series =
                group_by_year(matching_in_years(records, &values_of, category, year_range));
            log::debug!(
                "Aggregated {} '{}': {} years, {} films",
                dimension,
                category,
                series.len(),
                series.iter().map(|y| y.films_released).sum::<usize>()
            );

            CategorySeries {
                category: category.clone(),
                dimension,
                color_index,
                series,
            }
        })
        .collect()
}

/// Aggregate the selected categories of `dimension` by release year.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use movie_dash::core::domain::{compute_roi, Dimension, MovieRecord, YearRange};
/// use movie_dash::services::aggregation::aggregate;
///
/// let film = |budget: f64, revenue: f64| Arc::new(MovieRecord {
///     title: "Film".into(),
///     release_year: 2000,
///     genres: vec!["Drama".into()],
///     directors: vec![],
///     cast: vec![],
///     popularity: 1.0,
///     vote_average: 5.0,
///     budget,
///     revenue,
///     roi: compute_roi(budget, revenue),
///     status: "Released".into(),
/// });
/// let records = vec![film(100.0, 400.0), film(50.0, 50.0)];
///
/// let out = aggregate(
///     &records,
///     Dimension::Genre,
///     &["Drama".to_string()],
///     YearRange::new(2000, 2000).unwrap(),
/// );
/// assert_eq!(out[0].series.len(), 1);
/// assert_eq!(out[0].series[0].roi, Some(50.0));
/// assert_eq!(out[0].series[0].films_released, 2);
/// ```
pub fn aggregate(
    records: &[Arc<MovieRecord>],
    dimension: Dimension,
    selection: &[String],
    year_range: YearRange,
) -> Vec<CategorySeries> {
    aggregate_with(
        records,
        dimension,
        |r| r.values(dimension),
        selection,
        year_range,
    )
}
