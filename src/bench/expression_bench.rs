//! Criterion benchmarks for the expression and its matrix product, one
//! group per strategy.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use matexpr::driver::{input_rng, seed_inputs};
use matexpr::{Executor, Strategy, evaluate, matmul_naive_ijk, multiply};

const SIZES: [usize; 3] = [64, 128, 256];

fn bench_width() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn bench_expression(c: &mut Criterion) {
    let mut group = c.benchmark_group("expression");
    group.sample_size(10);

    for strategy in Strategy::ALL {
        let exec = Executor::new(strategy, bench_width()).expect("worker pool");
        for size in SIZES {
            let (b, m) = seed_inputs(size, false, &mut input_rng(Some(42)));
            // three products dominate: 2n^3 flops each
            group.throughput(Throughput::Elements((3 * 2 * size * size * size) as u64));
            group.bench_with_input(BenchmarkId::new(strategy.name(), size), &size, |bench, _| {
                bench.iter(|| evaluate(&exec, &b, &m).expect("same order"))
            });
        }
    }
    group.finish();
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    group.sample_size(10);

    for size in SIZES {
        let (a, b) = seed_inputs(size, false, &mut input_rng(Some(7)));
        group.bench_with_input(BenchmarkId::new("naive", size), &size, |bench, _| {
            bench.iter(|| matmul_naive_ijk(&a, &b).expect("same order"))
        });
        for strategy in Strategy::ALL {
            let exec = Executor::new(strategy, bench_width()).expect("worker pool");
            group.bench_with_input(BenchmarkId::new(strategy.name(), size), &size, |bench, _| {
                bench.iter(|| multiply(&exec, &a, &b).expect("same order"))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_expression, bench_multiply);
criterion_main!(benches);
