//! Benchmarks for weighted-reservoir
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use weighted_reservoir::sampling::{TotalOrder, WeightedReservoirSampler};
use weighted_reservoir::traits::Sketch;

// ============================================================================
// Insertion Benchmarks
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.throughput(Throughput::Elements(1));

    for capacity in [100, 1000, 10000] {
        group.bench_function(format!("unit_cap{}", capacity), |b| {
            let mut sampler = WeightedReservoirSampler::<u64>::new(capacity);
            let mut i = 0u64;
            b.iter(|| {
                sampler.insert(i);
                i = i.wrapping_add(1);
            });
        });

        group.bench_function(format!("weighted_cap{}", capacity), |b| {
            let mut sampler = WeightedReservoirSampler::<u64>::new(capacity);
            let mut i = 0u64;
            b.iter(|| {
                sampler
                    .weighted_insert(i, (i % 16 + 1) as f64)
                    .unwrap();
                i = i.wrapping_add(1);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Query Benchmarks
// ============================================================================

fn bench_quantile(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantile");

    group.bench_function("sorted", |b| {
        let mut sampler = WeightedReservoirSampler::with_order(1000, TotalOrder);
        for i in 0..100_000u64 {
            sampler.insert(i as f64);
        }
        sampler.median().unwrap();
        b.iter(|| black_box(*sampler.quantile(black_box(0.99)).unwrap()));
    });

    // Alternate insertion and query so every query pays for a re-sort
    group.bench_function("resort_cap1000", |b| {
        let mut sampler = WeightedReservoirSampler::with_order(1000, TotalOrder);
        for i in 0..100_000u64 {
            sampler.insert(i as f64);
        }
        let mut i = 0u64;
        b.iter(|| {
            sampler.insert(i as f64);
            i = i.wrapping_add(1);
            black_box(*sampler.median().unwrap())
        });
    });

    group.bench_function("merge", |b| {
        let mut s1 = WeightedReservoirSampler::<u64>::with_seed(1000, 1);
        let mut s2 = WeightedReservoirSampler::<u64>::with_seed(1000, 2);
        for i in 0..10_000u64 {
            s1.insert(i);
            s2.insert(i + 10_000);
        }
        b.iter(|| {
            let mut s = s1.clone();
            s.merge(black_box(&s2)).unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(benches, bench_insert, bench_quantile);

criterion_main!(benches);
