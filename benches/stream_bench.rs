//! Benchmark for the lazy stream algebra.
//!
//! Measures pipeline throughput across stage counts and compares stream
//! combinators against equivalent `Iterator` chains to show the cost of
//! the boxed produce-next indirection.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rivulet::stream::Stream;
use std::hint::black_box;

// =============================================================================
// 1. Pipeline Throughput vs Iterator
// =============================================================================

fn benchmark_map_filter_fold(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map_filter_fold");

    for size in [256i64, 4096, 65536] {
        group.bench_with_input(BenchmarkId::new("stream", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let total = Stream::range(0, size, 1)
                    .map(|element| element * 3)
                    .filter(|element| element % 2 == 0)
                    .fold(0i64, |accumulator, element| accumulator + element);
                black_box(total)
            });
        });

        group.bench_with_input(BenchmarkId::new("iterator", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let total: i64 = (0..size)
                    .map(|element| element * 3)
                    .filter(|element| element % 2 == 0)
                    .sum();
                black_box(total)
            });
        });
    }

    group.finish();
}

// =============================================================================
// 2. Stage Depth
// =============================================================================

fn benchmark_stage_depth(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("stage_depth");

    for depth in [1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |bencher, &depth| {
            bencher.iter(|| {
                let mut stream = Stream::range(0, 1024, 1);
                for _ in 0..depth {
                    stream = stream.map(|element| element + 1);
                }
                black_box(stream.count())
            });
        });
    }

    group.finish();
}

// =============================================================================
// 3. Windowing
// =============================================================================

fn benchmark_chunks_and_groups(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("windowing");

    group.bench_function("chunks_64_of_65536", |bencher| {
        bencher.iter(|| {
            let windows = Stream::range(0, 65536, 1).chunks(64).count();
            black_box(windows)
        });
    });

    group.bench_function("group_adjacent_parity_65536", |bencher| {
        bencher.iter(|| {
            let runs = Stream::range(0, 65536, 1)
                .group_adjacent_by(|element| element % 2)
                .count();
            black_box(runs)
        });
    });

    group.finish();
}

// =============================================================================
// 4. Early Exit
// =============================================================================

fn benchmark_early_exit(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("early_exit");

    group.bench_function("exists_on_infinite_constant", |bencher| {
        bencher.iter(|| {
            let found = Stream::constant(7).exists(|element| *element == 7);
            black_box(found)
        });
    });

    group.bench_function("find_halfway_in_65536", |bencher| {
        bencher.iter(|| {
            let found = Stream::range(0, 65536, 1).find(|element| *element == 32768);
            black_box(found)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_map_filter_fold,
    benchmark_stage_depth,
    benchmark_chunks_and_groups,
    benchmark_early_exit,
);
criterion_main!(benches);
