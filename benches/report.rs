use criterion::{criterion_group, criterion_main, Criterion};
use scorecard::{Datasets, Metric, ReportBuilder};
use std::hint::black_box;

/// Observed values on a parabola, predictions off by a small periodic error
fn gen_sample_data(n: usize) -> (Vec<f64>, Vec<f64>) {
    (1..=n)
        .map(|i| {
            let x = i as f64;
            let y = 1.0 + 3.0 * x + 5.3 * x * x;
            (y, y + (x * 0.37).sin() * 10.0)
        })
        .unzip()
}

fn gen_datasets(names: &[&str], n: usize) -> Datasets<f64> {
    let mut datasets = Datasets::new();
    for name in names {
        let (y_true, y_pred) = gen_sample_data(n);
        datasets.insert(*name, y_true, y_pred);
    }
    datasets
}

fn criterion_benchmark(c: &mut Criterion) {
    //
    // First we test how the full report scales with data size (2 datasets)
    println!("Benchmarking report vs n (train/test, all metrics)...");
    let mut group = c.benchmark_group("report_vs_n");
    for n in [100, 1_000, 10_000, 100_000, 1_000_000] {
        let datasets = gen_datasets(&["train", "test"], n);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| {
                ReportBuilder::new()
                    .build(black_box(&datasets))
                    .expect("Failed to build report")
            });
        });
    }
    group.finish();

    //
    // Now the same but scaling with the number of datasets
    println!("Benchmarking report vs datasets (n=10_000, all metrics)...");
    let names = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let mut group = c.benchmark_group("report_vs_datasets");
    for count in [1, 2, 4, 8] {
        let datasets = gen_datasets(&names[..count], 10_000);
        group.bench_function(format!("datasets={count}"), |b| {
            b.iter(|| {
                ReportBuilder::new()
                    .build(black_box(&datasets))
                    .expect("Failed to build report")
            });
        });
    }
    group.finish();

    //
    // Now we compare the metrics individually for the same data
    println!("Benchmarking report vs metric (n=10_000, 1 dataset)...");
    let datasets = gen_datasets(&["train"], 10_000);
    let mut group = c.benchmark_group("report_vs_metric");
    for metric in Metric::ALL {
        group.bench_function(metric.label(), |b| {
            b.iter(|| {
                ReportBuilder::new()
                    .metrics(&[metric])
                    .build(black_box(&datasets))
                    .expect("Failed to build report")
            });
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
