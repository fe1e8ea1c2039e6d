use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use polyinterp::{
    batch::{fit_each, SampleSet},
    chebyshev_nodes, fit_chebyshev_direct, fit_chebyshev_resampled, fit_cubic_spline,
    fit_polynomial,
    value::SteppedValues,
    Interpolator, NodeCount,
};
use std::hint::black_box;

/// A smooth sensor-like response sampled at `n` evenly spaced temperatures.
fn gen_sample_data(n: usize) -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = SteppedValues::linspace(-20.0..=80.0, n).collect();
    let y = x
        .iter()
        .map(|t| 0.8 + 0.04 * t - 1.5e-4 * t * t + 0.05 * (t / 7.0).sin())
        .collect();
    (x, y)
}

const SIZES: [usize; 5] = [4, 8, 12, 16, 24];

fn criterion_benchmark(c: &mut Criterion) {
    //
    // How the exact solvers scale with the number of samples
    println!("Benchmarking fit vs n...");
    let mut group = c.benchmark_group("fit_vs_n");
    for n in SIZES {
        let (x, y) = gen_sample_data(n);
        group.bench_with_input(BenchmarkId::new("Monomial", n), &n, |b, _| {
            b.iter(|| fit_polynomial(black_box(&x), black_box(&y)))
        });
        group.bench_with_input(BenchmarkId::new("Chebyshev", n), &n, |b, _| {
            b.iter(|| fit_chebyshev_direct(black_box(&x), black_box(&y), NodeCount::Samples))
        });
        group.bench_with_input(BenchmarkId::new("Spline", n), &n, |b, _| {
            b.iter(|| fit_cubic_spline(black_box(&x), black_box(&y)))
        });
    }
    group.finish();

    //
    // Resampling cost against node count, for a fixed set of samples
    println!("Benchmarking resampled fit vs nodes (n=24)...");
    let (x, y) = gen_sample_data(24);
    let mut group = c.benchmark_group("resampled_vs_nodes");
    for nodes in [3_usize, 6, 12, 24, 48] {
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &nodes, |b, &nodes| {
            b.iter(|| fit_chebyshev_resampled(black_box(&x), black_box(&y), nodes))
        });
    }
    group.finish();

    //
    // Node generation on its own
    let mut group = c.benchmark_group("chebyshev_nodes");
    for n in [8, 64, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| chebyshev_nodes(black_box(-20.0), black_box(80.0), n))
        });
    }
    group.finish();

    //
    // Evaluation over a dense grid, per basis
    println!("Benchmarking evaluation (n=16, 1000 points)...");
    let (x, y) = gen_sample_data(16);
    let grid: Vec<f64> = SteppedValues::linspace(-20.0..=80.0, 1000).collect();
    let mono = fit_polynomial(&x, &y).expect("Failed to fit data");
    let cheb = fit_chebyshev_direct(&x, &y, NodeCount::Samples).expect("Failed to fit data");
    let spline = fit_cubic_spline(&x, &y).expect("Failed to fit data");
    let mut group = c.benchmark_group("evaluate");
    group.bench_function("Monomial", |b| b.iter(|| mono.y_all(black_box(&grid))));
    group.bench_function("Chebyshev", |b| b.iter(|| cheb.y_all(black_box(&grid))));
    group.bench_function("Spline", |b| b.iter(|| spline.y_all(black_box(&grid))));
    group.finish();

    //
    // Many sensors at once; compare with and without the `parallel` feature
    println!("Benchmarking batch fit (256 sensors, n=12)...");
    let sets: Vec<SampleSet> = (0..256)
        .map(|i| {
            let (x, y) = gen_sample_data(12);
            let y = y.into_iter().map(|v| v + f64::from(i) * 1e-3).collect();
            SampleSet::new(format!("sensor-{i}"), x, y)
        })
        .collect();
    c.bench_function("batch_fit", |b| {
        b.iter(|| fit_each(black_box(&sets), |x, y| fit_chebyshev_resampled(x, y, None)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
