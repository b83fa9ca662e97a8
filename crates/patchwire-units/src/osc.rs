//! Naive phase-accumulator oscillators.
//!
//! Both oscillators read `pitch` straight into their output block and then
//! overwrite it sample by sample, so pitch costs no extra buffer. A rising
//! edge on `syn` resets the phase before that sample is produced.

use patchwire_core::fast_math::fast_sin;
use patchwire_core::{Input, Processor, SAMPLE_RATE, Sample, Sink, Trigger, pitch_to_hz};
use std::f64::consts::TAU;

const RATE: f64 = SAMPLE_RATE as f64;

/// Sine phase wraps after this many cycles to bound accumulated error.
const SIN_PHASE_WRAP: f64 = 100.0;

/// Frequency cache that only re-evaluates the pitch law when the pitch
/// sample changes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PitchTracker {
    pitch: Sample,
    hz: f64,
}

impl PitchTracker {
    /// Starts tracking from the first pitch sample of a block.
    #[inline]
    pub(crate) fn new(pitch: Sample) -> Self {
        Self {
            pitch,
            hz: pitch_to_hz(pitch),
        }
    }

    /// Frequency for `pitch`, recomputed only on change.
    #[inline]
    pub(crate) fn hz(&mut self, pitch: Sample) -> f64 {
        if pitch != self.pitch {
            self.pitch = pitch;
            self.hz = pitch_to_hz(pitch);
        }
        self.hz
    }
}

/// Sine oscillator.
///
/// ## Inputs
///
/// | Name | Kind | Meaning |
/// |------|------|---------|
/// | `pitch` | raw | 0.1/octave, 0 = 440 Hz |
/// | `syn` | trigger | phase reset |
pub struct Sin {
    pitch: Input,
    syn: Trigger,
    /// Phase in cycles, kept below [`SIN_PHASE_WRAP`].
    phase: f64,
}

impl Sin {
    /// A 440 Hz sine at phase zero.
    pub fn new() -> Self {
        Self {
            pitch: Input::new(),
            syn: Trigger::new(),
            phase: 0.0,
        }
    }
}

impl Default for Sin {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for Sin {
    fn process(&mut self, block: &mut [Sample]) {
        self.pitch.process(block);
        self.syn.process();

        let mut p = self.phase;
        let mut tracker = PitchTracker::new(block[0]);
        for (i, s) in block.iter_mut().enumerate() {
            if self.syn.fire(i) {
                p = 0.0;
            }
            let hz = tracker.hz(*s);
            *s = fast_sin(p * TAU);
            p += hz / RATE;
            if p > SIN_PHASE_WRAP {
                p -= SIN_PHASE_WRAP;
            }
        }
        self.phase = p;
    }

    fn as_sink(&self) -> Option<&dyn Sink> {
        Some(self)
    }

    fn as_sink_mut(&mut self) -> Option<&mut dyn Sink> {
        Some(self)
    }
}

impl_sink!(Sin, "sin", {
    "pitch" => Raw(pitch),
    "syn" => Trigger(syn),
});

/// Square oscillator, +1 for the first half period and -1 for the second.
///
/// The position advances by the frequency each sample and wraps at the
/// sample rate, so it counts in Hz-samples rather than cycles.
pub struct Square {
    pitch: Input,
    syn: Trigger,
    pos: f64,
}

impl Square {
    /// A 440 Hz square at position zero.
    pub fn new() -> Self {
        Self {
            pitch: Input::new(),
            syn: Trigger::new(),
            pos: 0.0,
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for Square {
    fn process(&mut self, block: &mut [Sample]) {
        self.pitch.process(block);
        self.syn.process();

        let mut p = self.pos;
        let mut tracker = PitchTracker::new(block[0]);
        for (i, s) in block.iter_mut().enumerate() {
            if self.syn.fire(i) {
                p = 0.0;
            }
            p += tracker.hz(*s);
            if p > RATE {
                p -= RATE;
            }
            *s = if p > RATE / 2.0 { -1.0 } else { 1.0 };
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

impl_sink!(Square, "square", {
    "pitch" => Raw(pitch),
    "syn" => Trigger(syn),
});

#[cfg(test)]
mod tests {
    use super::*;
    use patchwire_core::{BLOCK_LEN, Value, zeroed_block};

    fn zero_crossings(samples: &[Sample]) -> usize {
        samples
            .windows(2)
            .filter(|w| w[0] <= 0.0 && w[1] > 0.0)
            .count()
    }

    #[test]
    fn sin_starts_at_zero_phase() {
        let mut osc = Sin::new();
        let mut block = zeroed_block();
        osc.process(&mut block);
        assert!(block[0].abs() < 1e-4);
        // second sample is sin(2*pi*440/44100)
        let expected = (TAU * 440.0 / RATE).sin();
        assert!((block[1] - expected).abs() < 1e-4);
    }

    #[test]
    fn sin_frequency_follows_pitch() {
        let mut osc = Sin::new();
        osc.input("pitch", Box::new(Value(0.1))).unwrap();

        // 880 Hz over one second: 880 upward zero crossings, give or take one.
        let mut out = Vec::new();
        let mut block = zeroed_block();
        for _ in 0..(SAMPLE_RATE as usize / BLOCK_LEN) {
            osc.process(&mut block);
            out.extend_from_slice(&block);
        }
        let seconds = out.len() as f64 / RATE;
        let crossings = zero_crossings(&out) as f64;
        assert!(
            (crossings / seconds - 880.0).abs() < 3.0,
            "measured {} Hz",
            crossings / seconds
        );
    }

    #[test]
    fn sin_phase_is_continuous_across_blocks() {
        let mut osc = Sin::new();
        let mut a = zeroed_block();
        let mut b = zeroed_block();
        osc.process(&mut a);
        osc.process(&mut b);

        let step = TAU * 440.0 / RATE;
        let expected = (step * BLOCK_LEN as f64).sin();
        assert!((b[0] - expected).abs() < 1e-3);
    }

    #[test]
    fn sin_sync_resets_phase() {
        let mut osc = Sin::new();
        let mut block = zeroed_block();
        osc.process(&mut block);

        // a constant-high trigger fires once, at sample 0 of this block
        osc.input("syn", Box::new(Value(1.0))).unwrap();
        osc.process(&mut block);
        assert!(block[0].abs() < 1e-4);

        // no new edge while it stays high
        osc.process(&mut block);
        assert!(block[0].abs() > 1e-3);
    }

    #[test]
    fn square_is_bipolar_with_half_period_split() {
        let mut osc = Square::new();
        let mut block = zeroed_block();
        osc.process(&mut block);
        assert!(block.iter().all(|&s| s == 1.0 || s == -1.0));

        // at 440 Hz the position passes 22050 after 51 samples
        assert_eq!(block[49], 1.0);
        assert_eq!(block[50], -1.0);
    }

    #[test]
    fn square_sync_resets_position() {
        let mut osc = Square::new();
        let mut block = zeroed_block();
        osc.process(&mut block);
        assert_eq!(block[BLOCK_LEN - 1], -1.0);

        osc.input("syn", Box::new(Value(1.0))).unwrap();
        osc.process(&mut block);
        assert_eq!(&block[..50], &[1.0; 50][..]);
    }

    #[test]
    fn oscillator_inputs_are_sorted() {
        assert_eq!(Sin::new().inputs(), vec!["pitch", "syn"]);
        assert_eq!(Square::new().inputs(), vec!["pitch", "syn"]);
    }

    #[test]
    fn pitch_tracker_recomputes_on_change() {
        let mut t = PitchTracker::new(0.0);
        assert!((t.hz(0.0) - 440.0).abs() < 0.01);
        assert!((t.hz(-0.1) - 220.0).abs() < 0.01);
        assert!((t.hz(-0.1) - 220.0).abs() < 0.01);
    }
}
