use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

use movie_dash::core::domain::{compute_roi, Dimension, MovieRecord, YearRange};
use movie_dash::parsing::csv_parser::parse_movies_csv_str;
use movie_dash::services::aggregation::aggregate;
use movie_dash::services::category_index::CategoryIndex;
use movie_dash::services::flow_graph::build_flow_graph;
use movie_dash::services::statistics::box_plot_stats_all;

const GENRES: [&str; 8] = [
    "Action", "Adventure", "Comedy", "Crime", "Drama", "Horror", "Romance", "Thriller",
];

fn synthetic_records(n: usize) -> Vec<Arc<MovieRecord>> {
    (0..n)
        .map(|i| {
            let budget = ((i % 50) as f64) * 1_000_000.0;
            let revenue = ((i * 7 % 300) as f64) * 1_000_000.0;
            Arc::new(MovieRecord {
                title: format!("Film {}", i),
                release_year: 1970 + (i % 47) as i32,
                genres: vec![
                    GENRES[i % GENRES.len()].to_string(),
                    GENRES[(i / 3) % GENRES.len()].to_string(),
                ],
                directors: vec![format!("Director {}", i % 200)],
                cast: (0..4).map(|j| format!("Actor {}", (i + j * 31) % 900)).collect(),
                popularity: (i % 100) as f64,
                vote_average: (i % 10) as f64,
                budget,
                revenue,
                roi: compute_roi(budget, revenue),
                status: "Released".to_string(),
            })
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let selection: Vec<String> = GENRES[..5].iter().map(|s| s.to_string()).collect();
    let range = YearRange { min: 1970, max: 2016 };

    for size in [1_000usize, 5_000, 20_000] {
        let records = synthetic_records(size);
        group.bench_with_input(BenchmarkId::new("genres", size), &records, |b, records| {
            b.iter(|| aggregate(black_box(records), Dimension::Genre, &selection, range));
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let records = synthetic_records(5_000);
    let index = CategoryIndex::build(&records, Dimension::Director, 5);
    let selection = index.top_by_frequency(5);
    let range = YearRange { min: 1980, max: 2010 };

    group.bench_function("category_index", |b| {
        b.iter(|| CategoryIndex::build(black_box(&records), Dimension::Actor, 5));
    });

    group.bench_function("aggregate_stats_flow", |b| {
        b.iter(|| {
            let series = aggregate(black_box(&records), Dimension::Director, &selection, range);
            black_box(box_plot_stats_all(&series));
            black_box(build_flow_graph(&series, "director"));
        });
    });

    group.finish();
}

fn bench_csv_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_parsing");
    let mut content = String::from(
        "title,genres,cast,director,release_date,popularity,vote_average,budget,revenue,status\n",
    );
    for i in 0..1_000 {
        content.push_str(&format!(
            "Film {i},\"Drama, Crime\",\"Actor {i}, Actor {j}\",Director {d},{y}-05-01,{p}.5,7.1,{b},{r},Released\n",
            j = i + 1,
            d = i % 40,
            y = 1970 + i % 47,
            p = i % 90,
            b = i * 1000,
            r = i * 3500,
        ));
    }

    group.bench_function("parse_1000_rows", |b| {
        b.iter(|| parse_movies_csv_str(black_box(&content)));
    });

    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_pipeline, bench_csv_parsing);
criterion_main!(benches);
