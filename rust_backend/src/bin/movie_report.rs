//! Headless dashboard report.
//!
//! Loads a movie dataset, builds one dashboard page and prints its snapshot
//! as JSON, which is handy for checking aggregates without a renderer.
//!
//! # Usage
//!
//! ```bash
//! movie-report data/movies.csv
//! movie-report data/movies.csv director "?director=Greta%20Gerwig"
//! movie-report data/movies.csv genre "" 1990 2000
//! ```
//!
//! The dataset path may be omitted when `dashboard.toml` sets
//! `dataset.path`.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use movie_dash::config::DashboardConfig;
use movie_dash::core::domain::Dimension;
use movie_dash::io::MovieLoader;
use movie_dash::services::Dashboard;

const USAGE: &str = "usage: movie-report [dataset.csv|dataset.json] [genre|director|actor] [query] [min_year max_year]";

struct Args {
    dataset: Option<PathBuf>,
    dimension: Dimension,
    query: Option<String>,
    years: Option<(i32, i32)>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let dataset = args.first().map(PathBuf::from);
    let dimension = match args.get(1) {
        Some(d) => d.parse::<Dimension>().map_err(|e| anyhow!("{}\n{}", e, USAGE))?,
        None => Dimension::Genre,
    };
    let query = args.get(2).filter(|q| !q.trim().is_empty()).cloned();
    let years = match (args.get(3), args.get(4)) {
        (Some(min), Some(max)) => Some((
            min.parse().with_context(|| format!("Invalid min year: {}", min))?,
            max.parse().with_context(|| format!("Invalid max year: {}", max))?,
        )),
        (None, None) => None,
        _ => return Err(anyhow!("Both min_year and max_year are required\n{}", USAGE)),
    };

    Ok(Args {
        dataset,
        dimension,
        query,
        years,
    })
}

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let config = DashboardConfig::load(None).context("Failed to load dashboard configuration")?;
    let dataset = args
        .dataset
        .or_else(|| config.dataset.path.clone())
        .ok_or_else(|| anyhow!("No dataset given\n{}", USAGE))?;

    info!("Loading dataset from {}", dataset.display());
    let loaded = MovieLoader::load_from_file(&dataset)?;

    let mut dashboard =
        Dashboard::with_query(&loaded.store, args.dimension, args.query.as_deref(), &config)
            .context("Failed to build dashboard")?;

    if let Some((min, max)) = args.years {
        let state = dashboard.filters_mut().set_year_range(min, max)?;
        info!("Year range set to {}", state.year_range);
    }
    info!("{}", dashboard.filters().selection_label());

    let snapshot = dashboard.compute();
    let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
    println!("{}", json);

    Ok(())
}
