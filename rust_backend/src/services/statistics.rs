use crate::core::domain::Metric;
use crate::core::models::{BoxPlotStats, CategorySeries};

/// Tukey fence multiplier applied to the interquartile range.
pub const TUKEY_FENCE: f64 = 1.5;

/// Arithmetic mean over the finite values only.
///
/// Returns `None` when no finite value is present.
pub fn finite_mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Quantile of an ascending slice using linear interpolation between order
/// statistics. Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use movie_dash::services::statistics::quantile_sorted;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile_sorted(&values, 0.5), Some(2.5));
/// assert_eq!(quantile_sorted(&values, 0.25), Some(1.75));
/// assert_eq!(quantile_sorted(&[], 0.5), None);
/// ```
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || p.is_nan() {
        return None;
    }
    if p <= 0.0 || n == 1 {
        return sorted.first().copied();
    }
    if p >= 1.0 {
        return sorted.last().copied();
    }

    let position = (n - 1) as f64 * p;
    let lower = position.floor() as usize;
    let fraction = position - lower as f64;
    let low = sorted[lower];
    let high = sorted[(lower + 1).min(n - 1)];
    Some(low + (high - low) * fraction)
}

/// Finite values sorted ascending.
fn sorted_finite(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Box-plot statistics over the yearly ROI means of a series.
///
/// Each year contributes one sample, not each film. Whiskers are the observed
/// extremes clamped to the Tukey fences, so they never reach past the data.
pub fn box_plot_stats(series: &CategorySeries) -> BoxPlotStats {
    let sorted = sorted_finite(series.series.iter().filter_map(|y| y.roi));

    let (Some(q1), Some(median), Some(q3)) = (
        quantile_sorted(&sorted, 0.25),
        quantile_sorted(&sorted, 0.5),
        quantile_sorted(&sorted, 0.75),
    ) else {
        return BoxPlotStats::empty(series.category.clone(), series.color_index);
    };

    let iqr = q3 - q1;
    let raw_min = sorted[0];
    let raw_max = sorted[sorted.len() - 1];

    BoxPlotStats {
        category: series.category.clone(),
        color_index: series.color_index,
        min: Some(raw_min.max(q1 - TUKEY_FENCE * iqr)),
        q1: Some(q1),
        median: Some(median),
        q3: Some(q3),
        max: Some(raw_max.min(q3 + TUKEY_FENCE * iqr)),
    }
}

/// Box-plot statistics for every series, in series order.
pub fn box_plot_stats_all(series: &[CategorySeries]) -> Vec<BoxPlotStats> {
    series.iter().map(box_plot_stats).collect()
}

/// Mean of a metric over the years of a series (one sample per year).
pub fn series_metric_mean(series: &CategorySeries, metric: Metric) -> Option<f64> {
    finite_mean(series.series.iter().filter_map(|y| y.metric(metric)))
}

/// Largest value of a metric over the years of a series.
pub fn series_metric_max(series: &CategorySeries, metric: Metric) -> Option<f64> {
    series
        .series
        .iter()
        .filter_map(|y| y.metric(metric))
        .filter(|v| v.is_finite())
        .reduce(f64::max)
}
