//! Integration tests wiring units into patches.
//!
//! These run whole graphs (dups, feedback loops, the engine) rather than
//! single units, and pin the numeric results of the classic patches.

use std::sync::Arc;

use patchwire_core::{
    BLOCK_LEN, Dup, Engine, HEADROOM, Processor, SAMPLE_RATE, Sample, Sink, Ticker, Value,
    zeroed_block,
};
use patchwire_units::{Delay, Env, MidiGate, MidiNote, Mul, NoteCell, Sin, Sum};

const ONE_BLOCK: Sample = BLOCK_LEN as Sample / SAMPLE_RATE as Sample;

/// A one-sample unit impulse at the start of every block.
struct Impulse;

impl Processor for Impulse {
    fn process(&mut self, block: &mut [Sample]) {
        block.fill(0.0);
        block[0] = 1.0;
    }
}

// ============================================================================
// Delay feedback
// ============================================================================

#[test]
fn delay_feedback_accumulates_one_round_trip_per_block() {
    // sum = 1 + delay(sum), delay length one block, read through a dup
    let dup = Dup::new(Value(0.0));
    let mut out = dup.output();

    let mut sum = Sum::new();
    sum.input("a", Box::new(Value(1.0))).unwrap();
    sum.input("b", Box::new(dup.output())).unwrap();

    let mut delay = Delay::new();
    delay.input("in", Box::new(sum)).unwrap();
    delay.input("len", Box::new(Value(ONE_BLOCK))).unwrap();
    dup.set_source(Box::new(delay));

    let mut b = zeroed_block();
    for _ in 0..6 {
        dup.tick();
        out.process(&mut b);
    }
    assert_eq!(b[0], 3.0);
}

#[test]
fn delay_round_trip_reproduces_impulse_one_period_later() {
    let mut delay = Delay::new();
    delay.input("in", Box::new(Impulse)).unwrap();
    delay.input("len", Box::new(Value(ONE_BLOCK))).unwrap();

    let mut block = zeroed_block();
    delay.process(&mut block);
    assert!(block.iter().all(|&s| s == 0.0), "nothing written yet");

    for _ in 0..8 {
        delay.process(&mut block);
        assert_eq!(block[0], 1.0);
        assert!(block[1..].iter().all(|&s| s == 0.0));
    }
}

// ============================================================================
// Engine patches
// ============================================================================

#[test]
fn enveloped_sine_through_engine_is_bounded_by_headroom() {
    let engine = Engine::new();

    let osc = Dup::new(Sin::new());
    let mut env = Env::new();
    env.input("att", Box::new(Value(0.0001))).unwrap();
    env.input("dec", Box::new(Value(0.001))).unwrap();
    env.input("trig", Box::new(Value(1.0))).unwrap();
    let env = Dup::new(env);

    let mut vca = Mul::new();
    vca.input("a", Box::new(osc.output())).unwrap();
    vca.input("b", Box::new(env.output())).unwrap();
    let vca = Dup::new(vca);

    {
        let mut graph = engine.lock();
        for dup in [&osc, &env, &vca] {
            graph.add_ticker(dup.ticker());
        }
        graph.input("in", Box::new(vca.output())).unwrap();
    }

    let out = engine.render(40);
    assert_eq!(out.len(), 40 * BLOCK_LEN);
    assert!(out.iter().all(|s| s.abs() <= HEADROOM + 1e-9));
    assert!(out[..BLOCK_LEN].iter().any(|s| s.abs() > 0.1), "attack is audible");
    assert!(out[39 * BLOCK_LEN..].iter().all(|s| s.abs() < 1e-9), "decayed to silence");
}

#[test]
fn shared_oscillator_runs_once_per_block() {
    // the same sine feeds both inputs of a sum: output is exactly twice the sine
    let osc = Dup::new(Sin::new());
    let mut sum = Sum::new();
    sum.input("a", Box::new(osc.output())).unwrap();
    sum.input("b", Box::new(osc.output())).unwrap();

    let mut reference = Sin::new();
    let mut expected = zeroed_block();
    let mut block = zeroed_block();
    for _ in 0..4 {
        sum.process(&mut block);
        osc.tick();
        reference.process(&mut expected);
        for (got, want) in block.iter().zip(&expected) {
            assert_eq!(*got, 2.0 * want);
        }
    }
}

#[test]
fn midi_units_drive_an_oscillator() {
    let cell = Arc::new(NoteCell::new());
    let mut osc = Sin::new();
    osc.input("pitch", Box::new(MidiNote::new(cell.clone())))
        .unwrap();
    let mut vca = Mul::new();
    vca.input("a", Box::new(osc)).unwrap();
    vca.input("b", Box::new(MidiGate::new(cell.clone()))).unwrap();

    let mut block = zeroed_block();
    vca.process(&mut block);
    assert!(block.iter().all(|&s| s == 0.0), "gate closed");

    cell.set_note(81);
    cell.set_gate(true);
    vca.process(&mut block);
    assert!(block.iter().any(|&s| s != 0.0));
}
