//! Control voltages from MIDI note state.
//!
//! The units here do not talk to MIDI hardware. They read a [`NoteSource`]
//! once per block; `patchwire-midi` owns the listener that writes to the
//! shared [`NoteCell`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use patchwire_core::{Processor, Sample};

/// MIDI note number of A440, which maps to pitch 0.
pub const A440_NOTE: u8 = 69;

/// Converts a MIDI note number to pitch (0.1/octave, 0 = A440).
#[inline]
pub fn note_to_pitch(note: u8) -> Sample {
    (Sample::from(note) - Sample::from(A440_NOTE)) / 120.0
}

/// Narrow read interface over live note state.
pub trait NoteSource: Send + Sync {
    /// Current note as pitch.
    fn note_pitch(&self) -> Sample;

    /// Current gate, 0 or 1.
    fn gate_level(&self) -> Sample;
}

/// Lock-free note/gate cell shared between a MIDI listener and the graph.
#[derive(Debug)]
pub struct NoteCell {
    note: AtomicU8,
    gate: AtomicBool,
}

impl NoteCell {
    /// A closed gate on A440.
    pub fn new() -> Self {
        Self {
            note: AtomicU8::new(A440_NOTE),
            gate: AtomicBool::new(false),
        }
    }

    /// Stores the current note number.
    pub fn set_note(&self, note: u8) {
        self.note.store(note, Ordering::Relaxed);
    }

    /// Opens or closes the gate.
    pub fn set_gate(&self, open: bool) {
        self.gate.store(open, Ordering::Relaxed);
    }

    /// Current note number.
    pub fn note(&self) -> u8 {
        self.note.load(Ordering::Relaxed)
    }

    /// Whether the gate is open.
    pub fn gate(&self) -> bool {
        self.gate.load(Ordering::Relaxed)
    }
}

impl Default for NoteCell {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteSource for NoteCell {
    fn note_pitch(&self) -> Sample {
        note_to_pitch(self.note())
    }

    fn gate_level(&self) -> Sample {
        if self.gate() { 1.0 } else { 0.0 }
    }
}

/// Current MIDI note as a constant pitch block.
pub struct MidiNote {
    source: Arc<dyn NoteSource>,
}

impl MidiNote {
    /// Reads from `source`.
    pub fn new(source: Arc<dyn NoteSource>) -> Self {
        Self { source }
    }
}

impl Processor for MidiNote {
    fn process(&mut self, block: &mut [Sample]) {
        block.fill(self.source.note_pitch());
    }
}

/// Current MIDI gate as a constant 0/1 block.
pub struct MidiGate {
    source: Arc<dyn NoteSource>,
}

impl MidiGate {
    /// Reads from `source`.
    pub fn new(source: Arc<dyn NoteSource>) -> Self {
        Self { source }
    }
}

impl Processor for MidiGate {
    fn process(&mut self, block: &mut [Sample]) {
        block.fill(self.source.gate_level());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchwire_core::zeroed_block;

    #[test]
    fn note_to_pitch_is_tenth_volt_per_octave() {
        assert_eq!(note_to_pitch(69), 0.0);
        assert_eq!(note_to_pitch(81), 0.1);
        assert_eq!(note_to_pitch(57), -0.1);
    }

    #[test]
    fn units_follow_cell() {
        let cell = Arc::new(NoteCell::new());
        let mut note = MidiNote::new(cell.clone());
        let mut gate = MidiGate::new(cell.clone());
        let mut block = zeroed_block();

        gate.process(&mut block);
        assert!(block.iter().all(|&s| s == 0.0));

        cell.set_note(81);
        cell.set_gate(true);
        note.process(&mut block);
        assert!(block.iter().all(|&s| s == 0.1));
        gate.process(&mut block);
        assert!(block.iter().all(|&s| s == 1.0));
    }
}
