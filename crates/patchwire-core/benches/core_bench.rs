//! Criterion benchmarks for patchwire-core
//!
//! Run with: cargo bench -p patchwire-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use patchwire_core::fast_math::{fast_exp2, fast_sin};
use patchwire_core::{BLOCK_LEN, Dup, Engine, Processor, Ticker, Value, zeroed_block};

// ============================================================================
// Fast math
// ============================================================================

fn bench_fast_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("FastMath");
    let inputs: Vec<f64> = (0..BLOCK_LEN).map(|i| i as f64 * 0.0713 - 9.0).collect();

    group.bench_function("fast_sin", |b| {
        b.iter(|| inputs.iter().map(|&x| fast_sin(black_box(x))).sum::<f64>())
    });
    group.bench_function("libm_sin", |b| {
        b.iter(|| inputs.iter().map(|&x| libm::sin(black_box(x))).sum::<f64>())
    });
    group.bench_function("fast_exp2", |b| {
        b.iter(|| inputs.iter().map(|&x| fast_exp2(black_box(x))).sum::<f64>())
    });
    group.bench_function("libm_exp2", |b| {
        b.iter(|| inputs.iter().map(|&x| libm::exp2(black_box(x))).sum::<f64>())
    });

    group.finish();
}

// ============================================================================
// Fan-out
// ============================================================================

fn bench_dup_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dup");

    for &fan_out in &[1usize, 2, 4, 8] {
        let dup = Dup::new(Value(0.5));
        let mut outputs: Vec<_> = (0..fan_out).map(|_| dup.output()).collect();
        let mut block = zeroed_block();

        group.bench_with_input(BenchmarkId::new("read", fan_out), &fan_out, |b, _| {
            b.iter(|| {
                for out in &mut outputs {
                    out.process(&mut block);
                }
                dup.tick();
                black_box(block[0])
            })
        });
    }

    group.finish();
}

fn bench_engine_block(c: &mut Criterion) {
    let engine = Engine::new();
    let dup = Dup::new(Value(0.25));
    engine.add_ticker(dup.ticker());
    engine.input("in", Box::new(dup.output())).unwrap();
    let mut block = zeroed_block();

    c.bench_function("Engine/process_into", |b| {
        b.iter(|| {
            engine.process_into(&mut block);
            black_box(block[0])
        })
    });
}

criterion_group!(benches, bench_fast_math, bench_dup_fan_out, bench_engine_block);
criterion_main!(benches);
