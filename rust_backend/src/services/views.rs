//! Chart-ready projections of the aggregated series.
//!
//! Each chart gets its own small configuration value, passed by value, so two
//! charts never share scales or metric choices. The outputs are plain data
//! for an external renderer; every entry carries the `color_index` of its
//! category.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

use crate::core::domain::{Metric, MovieRecord, YearRange};
use crate::core::models::{BoxPlotStats, CategorySeries};
use crate::services::statistics::{box_plot_stats_all, series_metric_max, series_metric_mean};

/// One `(year, value)` point of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub category: String,
    pub color_index: usize,
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartData {
    pub metric: Metric,
    pub lines: Vec<LineSeries>,
    pub x_domain: Option<(i32, i32)>,
    pub y_domain: Option<(f64, f64)>,
}

/// Metric plotted over time, one line per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChartConfig {
    pub metric: Metric,
}

impl LineChartConfig {
    pub fn new(metric: Metric) -> Self {
        Self { metric }
    }

    /// Years whose metric is undefined are left out of the line, but still
    /// count towards the x domain.
    pub fn project(self, series: &[CategorySeries]) -> LineChartData {
        let lines: Vec<LineSeries> = series
            .iter()
            .map(|s| LineSeries {
                category: s.category.clone(),
                color_index: s.color_index,
                points: s
                    .series
                    .iter()
                    .filter_map(|y| {
                        y.metric(self.metric)
                            .filter(|v| v.is_finite())
                            .map(|value| LinePoint {
                                year: y.year,
                                value,
                            })
                    })
                    .collect(),
            })
            .collect();

        let years = series.iter().flat_map(|s| s.series.iter().map(|y| y.year));
        let x_domain = years.fold(None, |acc: Option<(i32, i32)>, year| match acc {
            Some((lo, hi)) => Some((lo.min(year), hi.max(year))),
            None => Some((year, year)),
        });

        let values = lines.iter().flat_map(|l| l.points.iter().map(|p| p.value));
        let y_domain = value_extent(values).map(|(min, max)| {
            let lower = if min < 0.0 { min * 2.0 } else { 0.0 };
            (lower, max * 1.1)
        });

        LineChartData {
            metric: self.metric,
            lines,
            x_domain,
            y_domain,
        }
    }
}

/// Minimum and maximum of the values, `None` when empty.
fn value_extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        None => Some((v, v)),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub category: String,
    pub color_index: usize,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartData {
    pub metric: Metric,
    pub bars: Vec<Bar>,
    pub max: Option<f64>,
}

/// One bar per category: the mean of the yearly values of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarChartConfig {
    pub metric: Metric,
}

impl BarChartConfig {
    pub fn new(metric: Metric) -> Self {
        Self { metric }
    }

    pub fn project(self, series: &[CategorySeries]) -> BarChartData {
        let bars: Vec<Bar> = series
            .iter()
            .map(|s| Bar {
                category: s.category.clone(),
                color_index: s.color_index,
                value: series_metric_mean(s, self.metric),
            })
            .collect();
        let max = bars.iter().filter_map(|b| b.value).reduce(f64::max);

        BarChartData {
            metric: self.metric,
            bars,
            max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBar {
    pub category: String,
    pub color_index: usize,
    pub values: [Option<f64>; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBarData {
    pub metrics: [Metric; 2],
    pub bars: Vec<StackedBar>,
    /// Largest yearly value of the second metric across all categories.
    pub y_max: Option<f64>,
}

/// Two metrics stacked per category, e.g. budget under revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackedBarConfig {
    pub metrics: [Metric; 2],
}

impl StackedBarConfig {
    pub fn new(lower: Metric, upper: Metric) -> Self {
        Self {
            metrics: [lower, upper],
        }
    }

    pub fn project(self, series: &[CategorySeries]) -> StackedBarData {
        let [lower, upper] = self.metrics;
        let bars = series
            .iter()
            .map(|s| StackedBar {
                category: s.category.clone(),
                color_index: s.color_index,
                values: [series_metric_mean(s, lower), series_metric_mean(s, upper)],
            })
            .collect();
        let y_max = series
            .iter()
            .filter_map(|s| series_metric_max(s, upper))
            .reduce(f64::max);

        StackedBarData {
            metrics: self.metrics,
            bars,
            y_max,
        }
    }
}

/// Box plots of yearly ROI with a shared y domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotData {
    pub stats: Vec<BoxPlotStats>,
    pub y_domain: Option<(f64, f64)>,
}

impl BoxPlotData {
    /// The domain is `[1.5 * lowest whisker, 1.1 * highest whisker]` over the
    /// non-empty plots.
    pub fn from_series(series: &[CategorySeries]) -> Self {
        let stats = box_plot_stats_all(series);
        let lows = stats.iter().filter_map(|s| s.min).reduce(f64::min);
        let highs = stats.iter().filter_map(|s| s.max).reduce(f64::max);
        let y_domain = lows.zip(highs).map(|(lo, hi)| (lo * 1.5, hi * 1.1));
        Self { stats, y_domain }
    }
}

/// One film in the drill-down table. Undefined numbers are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    pub title: String,
    pub release_year: i32,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub cast: Vec<String>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub budget: Option<f64>,
    pub revenue: Option<f64>,
    pub roi: Option<f64>,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

impl From<&MovieRecord> for DetailRow {
    fn from(record: &MovieRecord) -> Self {
        Self {
            title: record.title.clone(),
            release_year: record.release_year,
            genres: record.genres.clone(),
            directors: record.directors.clone(),
            cast: record.cast.clone(),
            popularity: finite(record.popularity),
            vote_average: finite(record.vote_average),
            budget: finite(record.budget),
            revenue: finite(record.revenue),
            roi: finite(record.roi),
        }
    }
}

/// Films behind a chart element, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailTable {
    pub category: String,
    pub color_index: usize,
    pub sort_by: Metric,
    pub year_span: Option<YearRange>,
    pub rows: Vec<DetailRow>,
}

impl DetailTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Descending by metric, undefined values last, then by title.
fn compare_films(sort_by: Metric, a: &MovieRecord, b: &MovieRecord) -> Ordering {
    let by_value = match (sort_by.record_value(a), sort_by.record_value(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_value.then_with(|| a.title.cmp(&b.title))
}

fn detail_table<'a>(
    series: &CategorySeries,
    films: impl Iterator<Item = &'a Arc<MovieRecord>>,
    year_span: Option<YearRange>,
    sort_by: Metric,
) -> DetailTable {
    let mut films: Vec<&MovieRecord> = films.map(|f| f.as_ref()).collect();
    films.sort_by(|a, b| compare_films(sort_by, a, b));

    DetailTable {
        category: series.category.clone(),
        color_index: series.color_index,
        sort_by,
        year_span,
        rows: films.into_iter().map(DetailRow::from).collect(),
    }
}

/// Every film of a series (a bar or box click).
pub fn drill_down(series: &CategorySeries, sort_by: Metric) -> DetailTable {
    detail_table(series, series.films(), series.year_span(), sort_by)
}

/// The films of one year of a series (a line point click). Empty when the
/// series has no films that year.
pub fn drill_down_year(series: &CategorySeries, year: i32, sort_by: Metric) -> DetailTable {
    let films = series
        .series
        .iter()
        .filter(|y| y.year == year)
        .flat_map(|y| y.films.iter());
    let span = Some(YearRange {
        min: year,
        max: year,
    });
    detail_table(series, films, span, sort_by)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{compute_roi, Dimension, YearRange};
    use crate::services::aggregation::aggregate;

    fn film(title: &str, year: i32, vote: f64, budget: f64, revenue: f64) -> Arc<MovieRecord> {
        Arc::new(MovieRecord {
            title: title.to_string(),
            release_year: year,
            genres: vec!["Drama".to_string()],
            directors: vec!["Greta Gerwig".to_string()],
            cast: vec![],
            popularity: 10.0,
            vote_average: vote,
            budget,
            revenue,
            roi: compute_roi(budget, revenue),
            status: "Released".to_string(),
        })
    }

    fn drama_series() -> Vec<CategorySeries> {
        let records = vec![
            film("A", 2000, 7.0, 100.0, 400.0),
            film("B", 2000, 5.0, 100.0, 100.0),
            film("C", 2002, f64::NAN, 0.0, 50.0),
            film("D", 2003, 9.0, 100.0, 1000.0),
        ];
        aggregate(
            &records,
            Dimension::Genre,
            &["Drama".to_string(), "Horror".to_string()],
            YearRange::new(1990, 2010).unwrap(),
        )
    }

    #[test]
    fn test_line_chart_skips_undefined_years() {
        let data = LineChartConfig::new(Metric::VoteAverage).project(&drama_series());

        assert_eq!(data.lines.len(), 2);
        let years: Vec<i32> = data.lines[0].points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2000, 2003]);
        assert_eq!(data.lines[0].points[0].value, 6.0);
        assert!(data.lines[1].points.is_empty());
        assert_eq!(data.x_domain, Some((2000, 2003)));
        let (lo, hi) = data.y_domain.unwrap();
        assert_eq!(lo, 0.0);
        assert!((hi - 9.9).abs() < 1e-9);
    }

    #[test]
    fn test_line_chart_negative_domain() {
        let data = LineChartConfig::new(Metric::Roi).project(&drama_series());
        // ROI per year: 2000 -> 50, 2003 -> 800
        let (lo, _) = data.y_domain.unwrap();
        assert_eq!(lo, 0.0);

        let records = vec![film("Flop", 2000, 5.0, 100.0, 50.0)];
        let series = aggregate(
            &records,
            Dimension::Genre,
            &["Drama".to_string()],
            YearRange::new(2000, 2005).unwrap(),
        );
        let data = LineChartConfig::new(Metric::Roi).project(&series);
        assert_eq!(data.y_domain, Some((-300.0, -150.0 * 1.1)));
    }

    #[test]
    fn test_line_chart_without_points() {
        let data = LineChartConfig::new(Metric::Popularity).project(&[]);
        assert!(data.lines.is_empty());
        assert_eq!(data.x_domain, None);
        assert_eq!(data.y_domain, None);
    }

    #[test]
    fn test_bar_chart_means_yearly_values() {
        let data = BarChartConfig::new(Metric::VoteAverage).project(&drama_series());
        // Yearly means 6.0 and 9.0; 2002 has no defined vote
        assert_eq!(data.bars[0].value, Some(7.5));
        assert_eq!(data.bars[1].value, None);
        assert_eq!(data.bars[1].color_index, 1);
        assert_eq!(data.max, Some(7.5));
    }

    #[test]
    fn test_stacked_bar() {
        let data = StackedBarConfig::new(Metric::Budget, Metric::Revenue).project(&drama_series());
        // Budgets per year: 100, 0, 100; revenues: 250, 50, 1000
        assert_eq!(data.bars[0].values[0], Some(200.0 / 3.0));
        assert_eq!(data.bars[0].values[1], Some(1300.0 / 3.0));
        assert_eq!(data.bars[1].values, [None, None]);
        assert_eq!(data.y_max, Some(1000.0));
    }

    #[test]
    fn test_box_plot_data_domain() {
        let data = BoxPlotData::from_series(&drama_series());
        assert_eq!(data.stats.len(), 2);
        assert!(data.stats[1].is_empty());

        let drama = &data.stats[0];
        assert_eq!(drama.min, Some(50.0));
        assert_eq!(drama.max, Some(800.0));
        assert_eq!(data.y_domain, Some((75.0, 800.0 * 1.1)));
    }

    #[test]
    fn test_drill_down_sorts_descending_with_undefined_last() {
        let series = drama_series();
        let table = drill_down(&series[0], Metric::VoteAverage);

        let titles: Vec<&str> = table.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["D", "A", "B", "C"]);
        assert_eq!(table.year_span, Some(YearRange { min: 2000, max: 2003 }));
        assert_eq!(table.rows[3].vote_average, None);
        assert_eq!(table.rows[3].roi, None);
    }

    #[test]
    fn test_drill_down_title_tiebreak() {
        let series = drama_series();
        let table = drill_down(&series[0], Metric::Popularity);
        let titles: Vec<&str> = table.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_drill_down_year() {
        let series = drama_series();
        let table = drill_down_year(&series[0], 2000, Metric::Roi);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].title, "A");
        assert_eq!(table.year_span, Some(YearRange { min: 2000, max: 2000 }));

        assert!(drill_down_year(&series[0], 1999, Metric::Roi).is_empty());
        assert!(drill_down(&series[1], Metric::Roi).is_empty());
    }
}
