//! Orchestration of the full recompute cycle.
//!
//! A [`Dashboard`] ties one dimension (genre, director or actor) to the
//! record store, its category index and the filter state. Every snapshot is
//! computed in one synchronous pass:
//!
//! 1. aggregate the selected categories over the year range
//! 2. box-plot statistics per series
//! 3. the flow graph, for director and actor dashboards
//! 4. the chart projections
//!
//! Nothing is cached between passes, so the latest filter state always wins.

use serde::Serialize;
use std::sync::Arc;

use crate::config::{ChartSettings, DashboardConfig};
use crate::core::domain::{Dimension, Metric, YearRange};
use crate::core::models::{CategorySeries, FlowGraph};
use crate::error::{DataFormatError, Result};
use crate::io::RecordStore;
use crate::parsing::query::seed_from_query;
use crate::services::aggregation::aggregate;
use crate::services::category_index::CategoryIndex;
use crate::services::filter_state::{FilterState, FilterStateManager, ListenerId};
use crate::services::flow_graph::build_flow_graph;
use crate::services::views::{
    drill_down, drill_down_year, BarChartData, BoxPlotData, DetailTable, LineChartData,
    StackedBarData,
};

/// Everything the renderer needs for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub dimension: Dimension,
    pub filter: FilterState,
    pub series: Vec<CategorySeries>,
    pub box_plots: BoxPlotData,
    pub flow: Option<FlowGraph>,
    pub line_chart: LineChartData,
    pub bar_chart: BarChartData,
    pub stacked_bar_chart: StackedBarData,
    pub drill_down_sort: Metric,
}

impl DashboardSnapshot {
    pub fn series_for(&self, category: &str) -> Option<&CategorySeries> {
        self.series.iter().find(|s| s.category == category)
    }

    /// Selected categories without any film in the year range.
    pub fn empty_categories(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter(|s| s.is_empty())
            .map(|s| s.category.as_str())
            .collect()
    }

    /// Detail table for a bar or box click.
    pub fn drill_down(&self, category: &str) -> Option<DetailTable> {
        self.series_for(category)
            .map(|s| drill_down(s, self.drill_down_sort))
    }

    /// Detail table for a line point click, sorted by the line chart's metric.
    pub fn drill_down_year(&self, category: &str, year: i32) -> Option<DetailTable> {
        self.series_for(category)
            .map(|s| drill_down_year(s, year, self.line_chart.metric))
    }
}

/// The part of a dashboard needed to turn a filter state into a snapshot.
///
/// Cheap to clone; a copy lives inside the render listener.
#[derive(Debug, Clone)]
struct Pipeline {
    store: RecordStore,
    dimension: Dimension,
    charts: ChartSettings,
}

impl Pipeline {
    fn compute(&self, state: &FilterState) -> DashboardSnapshot {
        let series = aggregate(
            self.store.records(),
            self.dimension,
            &state.selected,
            state.year_range,
        );

        let box_plots = BoxPlotData::from_series(&series);
        let flow = match self.dimension {
            Dimension::Director | Dimension::Actor => {
                Some(build_flow_graph(&series, self.dimension.as_str()))
            }
            Dimension::Genre => None,
        };

        let snapshot = DashboardSnapshot {
            dimension: self.dimension,
            filter: state.clone(),
            box_plots,
            flow,
            line_chart: self.charts.line_chart().project(&series),
            bar_chart: self.charts.bar_chart().project(&series),
            stacked_bar_chart: self.charts.stacked_bar_chart().project(&series),
            drill_down_sort: self.charts.drill_down_sort,
            series,
        };

        log::debug!(
            "Computed {} snapshot: {} series, {} films, {} empty",
            self.dimension,
            snapshot.series.len(),
            snapshot.series.iter().map(|s| s.total_films()).sum::<usize>(),
            snapshot.empty_categories().len()
        );
        snapshot
    }
}

/// One dashboard page.
#[derive(Debug)]
pub struct Dashboard {
    pipeline: Pipeline,
    index: CategoryIndex,
    filters: FilterStateManager,
}

impl Dashboard {
    /// Dashboard seeded with the most frequent categories.
    pub fn new(store: &RecordStore, dimension: Dimension, config: &DashboardConfig) -> Result<Self> {
        Self::with_query(store, dimension, None, config)
    }

    /// Dashboard seeded from a query string such as `?actor=Tom%20Hanks`.
    ///
    /// Without a usable value for `dimension` in the query, the initial
    /// selection is the `default_selection` most frequent index values.
    pub fn with_query(
        store: &RecordStore,
        dimension: Dimension,
        query: Option<&str>,
        config: &DashboardConfig,
    ) -> Result<Self> {
        config.validate()?;

        let store = store.scoped(&config.dataset.scope());
        let year_range = store.year_extent().ok_or(DataFormatError::EmptyDataset)?;
        let index = CategoryIndex::build(store.records(), dimension, config.categories.min_support);

        let seed = query.and_then(|q| seed_from_query(q, dimension));
        let selection = match seed {
            Some(value) => {
                if !index.contains(&value) {
                    log::debug!("Seeded {} '{}' is below the index support", dimension, value);
                }
                vec![value]
            }
            None => index.top_by_frequency(config.categories.default_selection),
        };

        let filters = FilterStateManager::new(selection, year_range, config.filters)?;
        log::info!(
            "{} dashboard over {} records, {} selectable values, years {}",
            dimension,
            store.len(),
            index.len(),
            year_range
        );

        Ok(Self {
            pipeline: Pipeline {
                store,
                dimension,
                charts: config.charts.clone(),
            },
            index,
            filters,
        })
    }

    pub fn dimension(&self) -> Dimension {
        self.pipeline.dimension
    }

    /// Records in scope.
    pub fn store(&self) -> &RecordStore {
        &self.pipeline.store
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    /// Full year span of the records in scope.
    pub fn year_extent(&self) -> Option<YearRange> {
        self.pipeline.store.year_extent()
    }

    pub fn filters(&self) -> &FilterStateManager {
        &self.filters
    }

    /// Mutable access for the renderer's widget handlers.
    pub fn filters_mut(&mut self) -> &mut FilterStateManager {
        &mut self.filters
    }

    pub fn state(&self) -> Arc<FilterState> {
        self.filters.state()
    }

    /// Snapshot for the current filter state.
    pub fn compute(&self) -> DashboardSnapshot {
        self.pipeline.compute(&self.filters.state())
    }

    /// Snapshot for an arbitrary filter state, leaving the dashboard untouched.
    pub fn compute_for(&self, state: &FilterState) -> DashboardSnapshot {
        self.pipeline.compute(state)
    }

    /// Recompute and hand a fresh snapshot to `render` after every accepted
    /// filter mutation.
    pub fn on_render<F>(&mut self, mut render: F) -> ListenerId
    where
        F: FnMut(&DashboardSnapshot) + 'static,
    {
        let pipeline = self.pipeline.clone();
        self.filters
            .on_change(move |state| render(&pipeline.compute(state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{compute_roi, MovieRecord};
    use crate::error::{DashboardError, FilterError};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn movie(title: &str, year: i32, genres: &[&str], director: &str, status: &str) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            release_year: year,
            genres: genres.iter().map(|s| s.to_string()).collect(),
            directors: vec![director.to_string()],
            cast: vec!["Frances McDormand".to_string()],
            popularity: 20.0,
            vote_average: 7.0,
            budget: 10.0,
            revenue: 40.0,
            roi: compute_roi(10.0, 40.0),
            status: status.to_string(),
        }
    }

    fn store() -> RecordStore {
        let mut records = Vec::new();
        for i in 0..6 {
            records.push(movie(&format!("Coen {}", i), 1990 + i, &["Crime", "Comedy"], "Joel Coen", "Released"));
        }
        for i in 0..5 {
            records.push(movie(&format!("Gerwig {}", i), 2010 + i, &["Drama"], "Greta Gerwig", "Released"));
        }
        records.push(movie("Old", 1960, &["Drama"], "Joel Coen", "Released"));
        records.push(movie("Rumor", 2000, &["Drama"], "Joel Coen", "Rumored"));
        RecordStore::new(records)
    }

    #[test]
    fn test_default_selection_is_top_by_frequency() {
        let dashboard = Dashboard::new(&store(), Dimension::Genre, &DashboardConfig::default()).unwrap();

        // Scope drops the 1960 film and the rumored one
        assert_eq!(dashboard.store().len(), 11);
        assert_eq!(
            dashboard.state().selected,
            vec!["Comedy".to_string(), "Crime".to_string(), "Drama".to_string()]
        );
        assert_eq!(dashboard.state().year_range, YearRange { min: 1990, max: 2014 });
    }

    #[test]
    fn test_query_seed_overrides_default() {
        let dashboard = Dashboard::with_query(
            &store(),
            Dimension::Director,
            Some("?director=Greta%20Gerwig"),
            &DashboardConfig::default(),
        )
        .unwrap();
        assert_eq!(dashboard.state().selected, vec!["Greta Gerwig".to_string()]);

        let snapshot = dashboard.compute();
        let flow = snapshot.flow.unwrap();
        assert_eq!(flow.source_label, "director");
        assert_eq!(flow.total_weight(), 5);
    }

    #[test]
    fn test_genre_dashboard_has_no_flow_graph() {
        let dashboard = Dashboard::new(&store(), Dimension::Genre, &DashboardConfig::default()).unwrap();
        let snapshot = dashboard.compute();

        assert!(snapshot.flow.is_none());
        assert_eq!(snapshot.series.len(), 3);
        assert_eq!(snapshot.box_plots.stats.len(), 3);
        assert_eq!(snapshot.line_chart.lines.len(), 3);
        assert_eq!(snapshot.series_for("Drama").unwrap().total_films(), 5);
    }

    #[test]
    fn test_render_listener_sees_every_accepted_mutation() {
        let mut dashboard =
            Dashboard::new(&store(), Dimension::Director, &DashboardConfig::default()).unwrap();

        let rendered: Rc<RefCell<Vec<DashboardSnapshot>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&rendered);
        dashboard.on_render(move |snapshot| sink.borrow_mut().push(snapshot.clone()));

        dashboard.filters_mut().set_year_range(2010, 2012).unwrap();
        let err = dashboard
            .filters_mut()
            .set_selection((0..6).map(|i| i.to_string()).collect())
            .unwrap_err();
        assert!(matches!(err, FilterError::SelectionLimitExceeded { .. }));

        let rendered = rendered.borrow();
        assert_eq!(rendered.len(), 1);
        let snapshot = &rendered[0];
        assert_eq!(snapshot.filter.year_range, YearRange { min: 2010, max: 2015 });

        let coen = snapshot.series_for("Joel Coen").unwrap();
        assert!(coen.is_empty());
        assert_eq!(snapshot.empty_categories(), vec!["Joel Coen"]);
        assert_eq!(snapshot.series_for("Greta Gerwig").unwrap().total_films(), 5);
        assert_eq!(*snapshot, dashboard.compute());
    }

    #[test]
    fn test_drill_down_from_snapshot() {
        let dashboard =
            Dashboard::new(&store(), Dimension::Director, &DashboardConfig::default()).unwrap();
        let snapshot = dashboard.compute();

        let table = snapshot.drill_down("Joel Coen").unwrap();
        assert_eq!(table.rows.len(), 6);
        assert_eq!(table.sort_by, Metric::VoteAverage);

        let year = snapshot.drill_down_year("Joel Coen", 1993).unwrap();
        assert_eq!(year.rows.len(), 1);
        assert_eq!(year.rows[0].title, "Coen 3");

        assert!(snapshot.drill_down("Nobody").is_none());
    }

    #[test]
    fn test_line_click_sorts_by_line_metric() {
        let films = (0..5).map(|i| {
            let mut film = movie(&format!("F{}", i), 2000, &["Drama"], "Ang Lee", "Released");
            film.popularity = 10.0 + i as f64;
            film.vote_average = 9.0 - i as f64;
            film
        });
        let store = RecordStore::new(films.collect());
        let config = DashboardConfig::from_toml_str("[categories]\nmin_support = 1\n").unwrap();
        let snapshot = Dashboard::new(&store, Dimension::Director, &config).unwrap().compute();
        assert_eq!(snapshot.line_chart.metric, Metric::Popularity);

        let titles = |table: DetailTable| -> Vec<String> {
            table.rows.into_iter().map(|r| r.title).collect()
        };
        let by_year = snapshot.drill_down_year("Ang Lee", 2000).unwrap();
        assert_eq!(by_year.sort_by, Metric::Popularity);
        assert_eq!(titles(by_year), vec!["F4", "F3", "F2", "F1", "F0"]);

        // Bar and box clicks keep the configured sort
        let by_category = snapshot.drill_down("Ang Lee").unwrap();
        assert_eq!(titles(by_category), vec!["F0", "F1", "F2", "F3", "F4"]);
    }

    #[test]
    fn test_empty_scope_is_fatal() {
        let store = RecordStore::new(vec![movie("Old", 1950, &["Drama"], "X", "Released")]);
        let err = Dashboard::new(&store, Dimension::Genre, &DashboardConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::DataFormat(DataFormatError::EmptyDataset)
        ));
    }
}
