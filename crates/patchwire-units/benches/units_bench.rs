//! Criterion benchmarks for patchwire units
//!
//! Run with: cargo bench -p patchwire-units

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use patchwire_core::{Processor, Sink, Value, zeroed_block};
use patchwire_units::{Delay, Env, Sin, Square, TableOsc, Waveform};

fn bench_unit(c: &mut Criterion, name: &str, mut unit: impl Processor) {
    let mut block = zeroed_block();
    c.bench_function(name, |b| {
        b.iter(|| {
            unit.process(black_box(&mut block));
            black_box(block[0])
        })
    });
}

fn bench_oscillators(c: &mut Criterion) {
    bench_unit(c, "Osc/sin", Sin::new());
    bench_unit(c, "Osc/square", Square::new());
    for (name, w) in [
        ("Osc/bl_square", Waveform::Square),
        ("Osc/bl_triangle", Waveform::Triangle),
        ("Osc/bl_saw", Waveform::Saw),
    ] {
        bench_unit(c, name, TableOsc::with_waveform(w));
    }
}

fn bench_modulated_sin(c: &mut Criterion) {
    // pitch changes every sample, so the pitch law runs per sample
    let mut fm = Sin::new();
    let mut lfo = Sin::new();
    lfo.input("pitch", Box::new(Value(-0.5))).unwrap();
    fm.input("pitch", Box::new(lfo)).unwrap();
    bench_unit(c, "Osc/sin_fm", fm);
}

fn bench_env_delay(c: &mut Criterion) {
    let mut env = Env::new();
    env.input("att", Box::new(Value(0.01))).unwrap();
    env.input("dec", Box::new(Value(0.02))).unwrap();
    env.input("gate", Box::new(Square::new())).unwrap();
    bench_unit(c, "Env/square_gate", env);

    let mut delay = Delay::new();
    delay.input("in", Box::new(Sin::new())).unwrap();
    delay.input("len", Box::new(Value(0.25))).unwrap();
    bench_unit(c, "Delay/quarter_second", delay);
}

criterion_group!(benches, bench_oscillators, bench_modulated_sin, bench_env_delay);
criterion_main!(benches);
