//! Thread-count and access-order comparison for power iteration.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use matvec_power::matrix::naive::power_iterate_naive;
use matvec_power::{Matrix, Method, RunConfig, initial_vector, power_iterate};
use std::hint::black_box;

const SIZE: usize = 512;
const ITERATIONS: usize = 20;

fn bench_methods(c: &mut Criterion) {
    let a = Matrix::from_fn(SIZE, |i, j| ((i * SIZE + j) % 100) as f64 / (100.0 * SIZE as f64))
        .unwrap();
    let v = initial_vector(SIZE).unwrap();

    for method in [Method::RowMajor, Method::ColumnMajor] {
        let mut group = c.benchmark_group(format!("power_{:?}", method));
        group.sample_size(20);

        group.bench_function("naive", |b| {
            b.iter(|| power_iterate_naive(black_box(&a), black_box(&v), ITERATIONS, method))
        });

        for threads in [1, 2, 4, 8] {
            let config = RunConfig::new(method, threads, ITERATIONS).unwrap();
            group.bench_with_input(BenchmarkId::new("threads", threads), &config, |b, cfg| {
                b.iter(|| power_iterate(black_box(&a), black_box(&v), cfg))
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_methods);
criterion_main!(benches);
