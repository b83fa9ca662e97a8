//! Band-limited wavetable oscillator.
//!
//! Tables are built once by additive synthesis over the first eleven
//! harmonics and normalized so their positive peak is 1. The oscillator
//! indexes the table without interpolation.

use std::f64::consts::{PI, TAU};
use std::sync::LazyLock;

use patchwire_core::{Input, Processor, SAMPLE_RATE, Sample, Sink, Trigger};

use crate::osc::PitchTracker;

/// Entries per wavetable.
pub const TABLE_LEN: usize = 16 * 1024;

const ODD_HARMONICS: &[u32] = &[1, 3, 5, 7, 9, 11];
const ALL_HARMONICS: &[u32] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

static SQUARE: LazyLock<Vec<f64>> =
    LazyLock::new(|| harmonic_table(TABLE_LEN, ODD_HARMONICS, |k| 1.0 / f64::from(k)));

static TRIANGLE: LazyLock<Vec<f64>> = LazyLock::new(|| {
    harmonic_table(TABLE_LEN, ODD_HARMONICS, |k| {
        let k = f64::from(k);
        1.0 / (k * k)
    })
});

static SAW: LazyLock<Vec<f64>> = LazyLock::new(|| {
    harmonic_table(TABLE_LEN, ALL_HARMONICS, |k| {
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        2.0 / PI * sign / f64::from(k)
    })
});

/// Sums `sin(2*pi*k*x)` weighted by `amp(k)` over one period, then divides
/// by the largest positive value.
fn harmonic_table(len: usize, harmonics: &[u32], amp: impl Fn(u32) -> f64) -> Vec<f64> {
    assert!(len > 0, "wavetable must not be empty");
    let mut table: Vec<f64> = (0..len)
        .map(|i| {
            let pos = i as f64 / len as f64;
            harmonics
                .iter()
                .map(|&k| amp(k) * (TAU * f64::from(k) * pos).sin())
                .sum()
        })
        .collect();
    let peak = table.iter().copied().fold(0.0, f64::max);
    for v in &mut table {
        *v /= peak;
    }
    table
}

/// Band-limited waveform shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// Odd harmonics at 1/k.
    Square,
    /// Odd harmonics at 1/k².
    Triangle,
    /// All harmonics at (2/π)(-1)^k/k.
    Saw,
}

impl Waveform {
    /// The shared, lazily built table for this shape.
    pub fn table(self) -> &'static [f64] {
        match self {
            Waveform::Square => &SQUARE,
            Waveform::Triangle => &TRIANGLE,
            Waveform::Saw => &SAW,
        }
    }
}

/// Wavetable oscillator.
///
/// ## Inputs
///
/// | Name | Kind | Meaning |
/// |------|------|---------|
/// | `pitch` | raw | 0.1/octave, 0 = 440 Hz |
/// | `syn` | trigger | phase reset |
pub struct TableOsc {
    table: &'static [f64],
    pitch: Input,
    syn: Trigger,
    /// Read position in table entries.
    pos: f64,
}

impl TableOsc {
    /// An oscillator over `table`.
    ///
    /// # Panics
    ///
    /// Panics if `table` is empty.
    pub fn new(table: &'static [f64]) -> Self {
        assert!(!table.is_empty(), "wavetable must not be empty");
        Self {
            table,
            pitch: Input::new(),
            syn: Trigger::new(),
            pos: 0.0,
        }
    }

    /// An oscillator over one of the built-in band-limited tables.
    pub fn with_waveform(waveform: Waveform) -> Self {
        Self::new(waveform.table())
    }
}

impl Processor for TableOsc {
    fn process(&mut self, block: &mut [Sample]) {
        self.pitch.process(block);
        self.syn.process();

        let len = self.table.len() as f64;
        let rate = f64::from(SAMPLE_RATE);
        let mut p = self.pos;
        let mut tracker = PitchTracker::new(block[0]);
        for (i, s) in block.iter_mut().enumerate() {
            if self.syn.fire(i) {
                p = 0.0;
            }
            let hz = tracker.hz(*s);
            *s = self.table[p as usize];
            p += hz / rate * len;
            p = wrap_position(p, len);
        }
        self.pos = p;
    }

    fn as_sink(&self) -> Option<&dyn Sink> {
        Some(self)
    }

    fn as_sink_mut(&mut self) -> Option<&mut dyn Sink> {
        Some(self)
    }
}

/// Wraps a table position into `(-1, len - 1]` in constant time.
///
/// Positions past `len - 1` drop whole table lengths, so one step matches a
/// single subtraction. Increments too large to represent a position within
/// the table (and NaN) restart at 0.
fn wrap_position(p: f64, len: f64) -> f64 {
    let mut p = p;
    if p > len - 1.0 {
        p -= len * ((p - (len - 1.0)) / len).ceil();
    }
    if p > -1.0 && p <= len - 1.0 { p } else { 0.0 }
}

impl_sink!(TableOsc, "table", {
    "pitch" => Raw(pitch),
    "syn" => Trigger(syn),
});
