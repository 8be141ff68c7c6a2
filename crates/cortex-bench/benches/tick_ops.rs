//! Criterion benchmarks for whole runs on the sequential and parallel engines.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use cortex_bench::{reference_profile, stress_profile};
use cortex_engine::{SequentialEngine, ThreadingConfig};

fn bench_step_10k(c: &mut Criterion) {
    let mut profile = reference_profile(42, 1);
    // Unbounded so criterion can step as often as it likes
    profile.config.num_ticks = u64::MAX;
    let mut engine = SequentialEngine::new(
        &profile.config,
        &profile.initial,
        Vec::new(),
        profile.inputs,
    )
    .unwrap();

    // Warm up: one tick so the scratch buffers have grown
    engine.execute_tick().unwrap().unwrap();

    c.bench_function("step_10k_sequential", |b| {
        b.iter(|| {
            let tick = engine.execute_tick().unwrap().unwrap();
            black_box(tick);
        });
    });
}

fn bench_1000_ticks_10k(c: &mut Criterion) {
    let mut group = c.benchmark_group("1000_ticks_10k");
    group.sample_size(20);
    for workers in [1, 2, 4, 8] {
        group.bench_function(format!("workers_{workers}"), |b| {
            b.iter(|| {
                let report = reference_profile(42, 1000)
                    .with_threading(ThreadingConfig::fixed(workers))
                    .simulation()
                    .unwrap()
                    .run()
                    .unwrap();
                black_box(&report);
            });
        });
    }
    group.finish();
}

fn bench_10_ticks_1m(c: &mut Criterion) {
    let mut group = c.benchmark_group("10_ticks_1m");
    group.sample_size(10);
    for workers in [1, 4, 8] {
        group.bench_function(format!("workers_{workers}"), |b| {
            b.iter(|| {
                let report = stress_profile(42, 10)
                    .with_threading(ThreadingConfig::fixed(workers))
                    .simulation()
                    .unwrap()
                    .run()
                    .unwrap();
                black_box(&report);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_step_10k,
    bench_1000_ticks_10k,
    bench_10_ticks_1m
);
criterion_main!(benches);
