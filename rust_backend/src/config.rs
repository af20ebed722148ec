//! Dashboard configuration file support.
//!
//! Configuration is read from TOML. Every key has a default, so a missing
//! section or an empty file yields the stock dashboard: released films from
//! 1970 on, categories with at least five films, at most five selected.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::domain::Metric;
use crate::error::{DashboardError, Result};
use crate::services::category_index::DEFAULT_MIN_SUPPORT;
use crate::services::filter_state::FilterLimits;
use crate::services::views::{BarChartConfig, LineChartConfig, StackedBarConfig};
use crate::transformations::DatasetScope;

/// Configuration file name searched by [`DashboardConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "dashboard.toml";

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub categories: CategorySettings,
    #[serde(default)]
    pub filters: FilterLimits,
    #[serde(default)]
    pub charts: ChartSettings,
}

/// Dataset location and scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_min_release_year")]
    pub min_release_year: Option<i32>,
    #[serde(default = "default_status")]
    pub status: Option<String>,
}

/// Category index settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySettings {
    #[serde(default = "default_min_support")]
    pub min_support: usize,
    #[serde(default = "default_selection")]
    pub default_selection: usize,
}

/// Metrics shown by each chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_line_metric")]
    pub line_metric: Metric,
    #[serde(default = "default_bar_metric")]
    pub bar_metric: Metric,
    #[serde(default = "default_stacked_metrics")]
    pub stacked_metrics: [Metric; 2],
    #[serde(default = "default_bar_metric")]
    pub drill_down_sort: Metric,
}

fn default_min_release_year() -> Option<i32> {
    Some(1970)
}

fn default_status() -> Option<String> {
    Some("Released".to_string())
}

fn default_min_support() -> usize {
    DEFAULT_MIN_SUPPORT
}

fn default_selection() -> usize {
    3
}

fn default_line_metric() -> Metric {
    Metric::Popularity
}

fn default_bar_metric() -> Metric {
    Metric::VoteAverage
}

fn default_stacked_metrics() -> [Metric; 2] {
    [Metric::Budget, Metric::Revenue]
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: None,
            min_release_year: default_min_release_year(),
            status: default_status(),
        }
    }
}

impl Default for CategorySettings {
    fn default() -> Self {
        Self {
            min_support: default_min_support(),
            default_selection: default_selection(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            line_metric: default_line_metric(),
            bar_metric: default_bar_metric(),
            stacked_metrics: default_stacked_metrics(),
            drill_down_sort: default_bar_metric(),
        }
    }
}

impl ChartSettings {
    pub fn line_chart(&self) -> LineChartConfig {
        LineChartConfig::new(self.line_metric)
    }

    pub fn bar_chart(&self) -> BarChartConfig {
        BarChartConfig::new(self.bar_metric)
    }

    pub fn stacked_bar_chart(&self) -> StackedBarConfig {
        let [lower, upper] = self.stacked_metrics;
        StackedBarConfig::new(lower, upper)
    }
}

impl DatasetSettings {
    /// Records the dashboard works on.
    pub fn scope(&self) -> DatasetScope {
        DatasetScope {
            min_release_year: self.min_release_year,
            status: self.status.clone(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a configuration from TOML text.
    ///
    /// Errors name the offending key, e.g. `charts.line_metric`.
    ///
    /// # Examples
    ///
    /// ```
    /// use movie_dash::config::DashboardConfig;
    ///
    /// let config = DashboardConfig::from_toml_str("[filters]\nmax_selection = 3\n").unwrap();
    /// assert_eq!(config.filters.max_selection, 3);
    /// assert_eq!(config.filters.min_year_span, 5);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let deserializer = toml::Deserializer::new(content);
        let config: DashboardConfig =
            serde_path_to_error::deserialize(deserializer).map_err(|e| {
                DashboardError::Configuration(format!(
                    "Failed to parse config at '{}': {}",
                    e.path(),
                    e.inner()
                ))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DashboardError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded dashboard configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `dashboard.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> Result<Option<Self>> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("rust_backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in &search_paths {
            if path.exists() {
                return Self::from_file(path).map(Some);
            }
        }
        log::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
        Ok(None)
    }

    /// Explicit path when given, else the default location, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::from_default_location()?.unwrap_or_default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.filters.max_selection == 0 {
            return Err(DashboardError::Configuration(
                "filters.max_selection must be at least 1".to_string(),
            ));
        }
        if self.filters.min_year_span < 0 {
            return Err(DashboardError::Configuration(format!(
                "filters.min_year_span must not be negative, got {}",
                self.filters.min_year_span
            )));
        }
        if self.categories.default_selection > self.filters.max_selection {
            return Err(DashboardError::Configuration(format!(
                "categories.default_selection ({}) exceeds filters.max_selection ({})",
                self.categories.default_selection, self.filters.max_selection
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.dataset.min_release_year, Some(1970));
        assert_eq!(config.dataset.status.as_deref(), Some("Released"));
        assert_eq!(config.categories.min_support, 5);
        assert_eq!(config.categories.default_selection, 3);
        assert_eq!(config.filters.max_selection, 5);
        assert_eq!(config.charts.stacked_metrics, [Metric::Budget, Metric::Revenue]);
    }

    #[test]
    fn test_full_config() {
        let toml_str = r#"
[dataset]
path = "data/movies.csv"
min_release_year = 1990
status = "Released"

[categories]
min_support = 2
default_selection = 2

[filters]
max_selection = 4
min_year_span = 10

[charts]
line_metric = "roi"
bar_metric = "popularity"
stacked_metrics = ["revenue", "budget"]
drill_down_sort = "films_released"
"#;
        let config = DashboardConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.dataset.path, Some(PathBuf::from("data/movies.csv")));
        assert_eq!(config.dataset.scope().min_release_year, Some(1990));
        assert_eq!(config.categories.min_support, 2);
        assert_eq!(config.filters.min_year_span, 10);
        assert_eq!(config.charts.line_chart().metric, Metric::Roi);
        assert_eq!(config.charts.bar_chart().metric, Metric::Popularity);
        assert_eq!(
            config.charts.stacked_bar_chart().metrics,
            [Metric::Revenue, Metric::Budget]
        );
        assert_eq!(config.charts.drill_down_sort, Metric::FilmsReleased);
    }

    #[test]
    fn test_error_reports_key_path() {
        let err = DashboardConfig::from_toml_str("[charts]\nline_metric = \"gross\"\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("charts.line_metric"), "{}", message);
    }

    #[test]
    fn test_validation() {
        assert!(DashboardConfig::from_toml_str("[filters]\nmax_selection = 0\n").is_err());
        assert!(DashboardConfig::from_toml_str("[filters]\nmin_year_span = -1\n").is_err());
        assert!(DashboardConfig::from_toml_str(
            "[filters]\nmax_selection = 2\n[categories]\ndefault_selection = 3\n"
        )
        .is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[categories]\nmin_support = 1").unwrap();

        let config = DashboardConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.categories.min_support, 1);

        assert!(DashboardConfig::from_file("/nonexistent/dashboard.toml").is_err());
    }
}
