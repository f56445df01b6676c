//! Benchmark comparing pairwise vs matrix-based correlation computation
//!
//! The matrix method only runs on complete tables with at least 15 numeric
//! columns; a single null forces the pairwise method on the same data.
//!
//! Run with: cargo bench --bench correlation_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use housestat::pipeline::{compute_correlation_matrix, generate_synthetic_table, pearson_correlation};

/// Random numeric columns; every fourth column tracks an earlier one with noise.
fn generate_test_dataframe(n_rows: usize, n_features: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut data: Vec<Vec<f64>> = Vec::with_capacity(n_features);

    for i in 0..n_features {
        let values: Vec<f64> = if i % 4 == 3 {
            data[i - 3]
                .iter()
                .map(|v| v + rng.gen::<f64>() * 10.0 - 5.0)
                .collect()
        } else {
            (0..n_rows).map(|_| rng.gen::<f64>() * 100.0).collect()
        };
        data.push(values);
    }

    let columns: Vec<Column> = data
        .into_iter()
        .enumerate()
        .map(|(i, values)| Column::new(format!("feature_{}", i).into(), values))
        .collect();

    DataFrame::new(columns).unwrap()
}

/// Same table with the first value of the first column set to null
fn with_one_null(df: &DataFrame) -> DataFrame {
    let first = df.get_columns()[0].clone();
    let mut values: Vec<Option<f64>> = first.f64().unwrap().into_iter().collect();
    values[0] = None;

    let mut out = df.clone();
    out.replace(first.name().as_str(), Series::new(first.name().clone(), values))
        .unwrap();
    out
}

fn bench_matrix_vs_pairwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_matrix");

    for &(rows, features) in &[(1_460, 20), (10_000, 20), (10_000, 40)] {
        let complete = generate_test_dataframe(rows, features, 42);
        let with_null = with_one_null(&complete);
        let label = format!("{}x{}", rows, features);

        group.throughput(Throughput::Elements((features * features) as u64));
        group.bench_with_input(BenchmarkId::new("matrix", &label), &complete, |b, df| {
            b.iter(|| compute_correlation_matrix(black_box(df)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("pairwise", &label), &with_null, |b, df| {
            b.iter(|| compute_correlation_matrix(black_box(df)).unwrap())
        });
    }

    group.finish();
}

fn bench_single_pair(c: &mut Criterion) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let x: Vec<Option<f64>> = (0..100_000).map(|_| Some(rng.gen::<f64>())).collect();
    let y: Vec<Option<f64>> = x
        .iter()
        .map(|v| v.map(|v| v * 2.0 + rng.gen::<f64>()))
        .collect();

    c.bench_function("pearson_100k", |b| {
        b.iter(|| pearson_correlation(black_box(&x), black_box(&y)))
    });
}

fn bench_synthetic_table(c: &mut Criterion) {
    let df = generate_synthetic_table(1_460, 42).unwrap();
    c.bench_function("correlation_synthetic_houses", |b| {
        b.iter(|| compute_correlation_matrix(black_box(&df)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_matrix_vs_pairwise,
    bench_single_pair,
    bench_synthetic_table
);
criterion_main!(benches);
