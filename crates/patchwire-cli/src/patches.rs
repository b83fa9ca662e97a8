//! Built-in demo patches.

use clap::ValueEnum;
use patchwire_core::{BLOCK_LEN, SAMPLE_RATE};
use patchwire_patch::{ENGINE_OBJECT, Patch};
use patchwire_units::NoteCell;

/// A patch the CLI can build without a patch file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoPatch {
    /// FM sine pinged by a slow clock, decay swept by an LFO
    Drone,
    /// MIDI-played band-limited saw through a gated envelope
    Keys,
}

impl DemoPatch {
    /// Creates and wires every object of the patch.
    pub fn build(self, patch: &mut Patch) -> patchwire_patch::Result<()> {
        match self {
            DemoPatch::Drone => build_drone(patch),
            DemoPatch::Keys => build_keys(patch),
        }
    }

    /// Whether the patch only makes sound when notes are played.
    pub fn needs_notes(self) -> bool {
        matches!(self, DemoPatch::Keys)
    }
}

/// (object, kind, constant)
type ObjectDef = (&'static str, &'static str, f64);
/// (from, to, input)
type WireDef = (&'static str, &'static str, &'static str);

fn apply(patch: &mut Patch, objects: &[ObjectDef], wires: &[WireDef]) -> patchwire_patch::Result<()> {
    for &(name, kind, value) in objects {
        patch.new_object(name, kind, value)?;
    }
    for &(from, to, input) in wires {
        patch.connect(from, to, input)?;
    }
    Ok(())
}

fn build_drone(patch: &mut Patch) -> patchwire_patch::Result<()> {
    apply(
        patch,
        &[
            ("mod_pitch", "value", -0.1),
            ("mod_osc", "sin", 0.0),
            ("mod_depth", "value", 0.1),
            ("mod_amp", "mul", 0.0),
            ("carrier", "sin", 0.0),
            ("sweep_pitch", "value", -1.0),
            ("sweep", "sin", 0.0),
            ("sweep_depth", "value", 0.02),
            ("sweep_amp", "mul", 0.0),
            ("dec_base", "value", 0.021),
            ("dec", "sum", 0.0),
            ("att", "value", 0.0001),
            ("clock_pitch", "value", -0.7),
            ("clock", "square", 0.0),
            ("env", "env", 0.0),
            ("vca", "mul", 0.0),
            ("level", "value", 0.5),
            ("out", "mul", 0.0),
        ],
        &[
            ("mod_pitch", "mod_osc", "pitch"),
            ("mod_osc", "mod_amp", "a"),
            ("mod_depth", "mod_amp", "b"),
            ("mod_amp", "carrier", "pitch"),
            ("sweep_pitch", "sweep", "pitch"),
            ("sweep", "sweep_amp", "a"),
            ("sweep_depth", "sweep_amp", "b"),
            ("sweep_amp", "dec", "a"),
            ("dec_base", "dec", "b"),
            ("att", "env", "att"),
            ("dec", "env", "dec"),
            ("clock_pitch", "clock", "pitch"),
            ("clock", "env", "trig"),
            ("carrier", "vca", "a"),
            ("env", "vca", "b"),
            ("vca", "out", "a"),
            ("level", "out", "b"),
            ("out", ENGINE_OBJECT, "in"),
        ],
    )
}

fn build_keys(patch: &mut Patch) -> patchwire_patch::Result<()> {
    apply(
        patch,
        &[
            ("note", "note", 0.0),
            ("gate", "gate", 0.0),
            ("saw", "bl-saw", 0.0),
            ("att", "value", 0.001),
            ("dec", "value", 0.05),
            ("env", "env", 0.0),
            ("vca", "mul", 0.0),
            ("level", "value", 0.5),
            ("out", "mul", 0.0),
        ],
        &[
            ("note", "saw", "pitch"),
            ("gate", "env", "gate"),
            ("att", "env", "att"),
            ("dec", "env", "dec"),
            ("saw", "vca", "a"),
            ("env", "vca", "b"),
            ("vca", "out", "a"),
            ("level", "out", "b"),
            ("out", ENGINE_OBJECT, "in"),
        ],
    )
}

/// A minor arpeggio, one note per quarter second.
const ARPEGGIO: [u8; 8] = [57, 60, 64, 69, 72, 69, 64, 60];
const NOTE_SECONDS: f64 = 0.25;

/// Plays the scripted arpeggio into `cell` for offline renders of note-driven
/// patches. Call once per rendered block; the gate closes for the second half
/// of every note.
pub fn script_notes(cell: &NoteCell, block: usize) {
    let t = (block * BLOCK_LEN) as f64 / f64::from(SAMPLE_RATE);
    let step = (t / NOTE_SECONDS) as usize;
    cell.set_note(ARPEGGIO[step % ARPEGGIO.len()]);
    cell.set_gate(t % NOTE_SECONDS < NOTE_SECONDS / 2.0);
}
