//! Unit registry and factory for patchwire.
//!
//! The set of unit kinds is closed: [`UnitKind`] lists every kind a patch
//! can instantiate, and both its metadata and its constructor are
//! exhaustive matches, so adding a unit is a one-place change.
//!
//! # Example
//!
//! ```rust
//! use patchwire_registry::{UnitContext, UnitKind, UnitRegistry};
//!
//! let registry = UnitRegistry::new();
//! for unit in registry.all_units() {
//!     println!("{}: {}", unit.id, unit.description);
//! }
//!
//! let kind: UnitKind = "env".parse().unwrap();
//! let env = kind.create(&UnitContext::default());
//! assert_eq!(env.as_sink().unwrap().inputs(), ["att", "dec", "gate", "trig"]);
//!
//! assert!("theremin".parse::<UnitKind>().is_err());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use patchwire_core::{Processor, Sample, Value};
use patchwire_units::{
    Clip, Delay, Env, MidiGate, MidiNote, Mul, NoteCell, NoteSource, Noise, Quant, Rand,
    Sequencer, Sin, Square, Sum, TableOsc, Waveform,
};
use thiserror::Error;

/// Registry lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No unit kind has this name.
    #[error("unknown unit kind '{0}'")]
    UnknownKind(String),
}

/// Functional grouping for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitCategory {
    /// Audio-rate sources with a pitch input.
    Oscillator,
    /// Level shapers driven by gates and triggers.
    Envelope,
    /// Arithmetic and shaping.
    Math,
    /// Delay lines.
    TimeBased,
    /// Noise and sample-and-hold.
    Random,
    /// Constants and sequencers.
    Control,
    /// Live MIDI note state.
    Midi,
}

impl UnitCategory {
    /// Returns a human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            UnitCategory::Oscillator => "Oscillator",
            UnitCategory::Envelope => "Envelope",
            UnitCategory::Math => "Math",
            UnitCategory::TimeBased => "Time-Based",
            UnitCategory::Random => "Random",
            UnitCategory::Control => "Control",
            UnitCategory::Midi => "MIDI",
        }
    }
}

/// Describes a unit kind in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDescriptor {
    /// Kind name used by patches (lowercase).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Brief description.
    pub description: &'static str,
    /// Category for organization.
    pub category: UnitCategory,
}

/// Every unit kind a patch can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
    /// [`Clip`]
    Clip,
    /// [`Delay`]
    Delay,
    /// [`Env`]
    Env,
    /// [`Mul`]
    Mul,
    /// [`Noise`]
    Noise,
    /// [`Quant`]
    Quant,
    /// [`Rand`]
    Rand,
    /// [`Sequencer`]
    Sequencer,
    /// [`Sin`]
    Sin,
    /// [`Square`]
    Square,
    /// [`TableOsc`] over [`Waveform::Square`]
    BlSquare,
    /// [`TableOsc`] over [`Waveform::Triangle`]
    BlTriangle,
    /// [`TableOsc`] over [`Waveform::Saw`]
    BlSaw,
    /// [`Sum`]
    Sum,
    /// [`Value`]
    Value,
    /// [`MidiGate`]
    Gate,
    /// [`MidiNote`]
    Note,
}

impl UnitKind {
    /// All kinds, in listing order.
    pub const ALL: [UnitKind; 17] = [
        UnitKind::Clip,
        UnitKind::Delay,
        UnitKind::Env,
        UnitKind::Mul,
        UnitKind::Noise,
        UnitKind::Quant,
        UnitKind::Rand,
        UnitKind::Sequencer,
        UnitKind::Sin,
        UnitKind::Square,
        UnitKind::BlSquare,
        UnitKind::BlTriangle,
        UnitKind::BlSaw,
        UnitKind::Sum,
        UnitKind::Value,
        UnitKind::Gate,
        UnitKind::Note,
    ];

    /// Kind name as used in patches.
    pub const fn id(self) -> &'static str {
        self.descriptor().id
    }

    /// Metadata for this kind.
    pub const fn descriptor(self) -> UnitDescriptor {
        let (id, name, description, category) = match self {
            UnitKind::Clip => ("clip", "Clip", "Hard clip to [-1, 1]", UnitCategory::Math),
            UnitKind::Delay => (
                "delay",
                "Delay",
                "One-second swap delay line, feedback-capable",
                UnitCategory::TimeBased,
            ),
            UnitKind::Env => (
                "env",
                "Envelope",
                "Attack/decay envelope following a gate, retriggerable",
                UnitCategory::Envelope,
            ),
            UnitKind::Mul => ("mul", "Multiply", "a * b", UnitCategory::Math),
            UnitKind::Noise => (
                "noise",
                "Noise",
                "Uniform white noise in [-1, 1)",
                UnitCategory::Random,
            ),
            UnitKind::Quant => (
                "quant",
                "Quantizer",
                "Round pitch to the nearest semitone",
                UnitCategory::Math,
            ),
            UnitKind::Rand => (
                "rand",
                "Random",
                "Sample-and-hold uniform random in [min, max)",
                UnitCategory::Random,
            ),
            UnitKind::Sequencer => (
                "sequencer",
                "Sequencer",
                "Eight-step sequencer advanced by trigger",
                UnitCategory::Control,
            ),
            UnitKind::Sin => (
                "sin",
                "Sine",
                "Sine oscillator with sync",
                UnitCategory::Oscillator,
            ),
            UnitKind::Square => (
                "square",
                "Square",
                "Naive square oscillator with sync",
                UnitCategory::Oscillator,
            ),
            UnitKind::BlSquare => (
                "bl-square",
                "Band-limited Square",
                "Wavetable square, odd harmonics to 11",
                UnitCategory::Oscillator,
            ),
            UnitKind::BlTriangle => (
                "bl-triangle",
                "Band-limited Triangle",
                "Wavetable triangle, odd harmonics to 11",
                UnitCategory::Oscillator,
            ),
            UnitKind::BlSaw => (
                "bl-saw",
                "Band-limited Saw",
                "Wavetable saw, harmonics to 11",
                UnitCategory::Oscillator,
            ),
            UnitKind::Sum => ("sum", "Sum", "a + b", UnitCategory::Math),
            UnitKind::Value => ("value", "Value", "Constant", UnitCategory::Control),
            UnitKind::Gate => (
                "gate",
                "MIDI Gate",
                "1 while a MIDI note is held, else 0",
                UnitCategory::Midi,
            ),
            UnitKind::Note => (
                "note",
                "MIDI Note",
                "Pitch of the last held MIDI note",
                UnitCategory::Midi,
            ),
        };
        UnitDescriptor {
            id,
            name,
            description,
            category,
        }
    }

    /// Builds a fresh unit of this kind.
    pub fn create(self, ctx: &UnitContext) -> Box<dyn Processor> {
        match self {
            UnitKind::Clip => Box::new(Clip::new()),
            UnitKind::Delay => Box::new(Delay::new()),
            UnitKind::Env => Box::new(Env::new()),
            UnitKind::Mul => Box::new(Mul::new()),
            UnitKind::Noise => Box::new(Noise::new()),
            UnitKind::Quant => Box::new(Quant::new()),
            UnitKind::Rand => Box::new(Rand::new()),
            UnitKind::Sequencer => Box::new(Sequencer::new()),
            UnitKind::Sin => Box::new(Sin::new()),
            UnitKind::Square => Box::new(Square::new()),
            UnitKind::BlSquare => Box::new(TableOsc::with_waveform(Waveform::Square)),
            UnitKind::BlTriangle => Box::new(TableOsc::with_waveform(Waveform::Triangle)),
            UnitKind::BlSaw => Box::new(TableOsc::with_waveform(Waveform::Saw)),
            UnitKind::Sum => Box::new(Sum::new()),
            UnitKind::Value => Box::new(Value(ctx.value)),
            UnitKind::Gate => Box::new(MidiGate::new(Arc::clone(&ctx.notes))),
            UnitKind::Note => Box::new(MidiNote::new(Arc::clone(&ctx.notes))),
        }
    }

    /// Sorted input names; empty for kinds without inputs.
    pub fn inputs(self) -> Vec<String> {
        self.create(&UnitContext::default())
            .as_sink()
            .map(|sink| sink.inputs())
            .unwrap_or_default()
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for UnitKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitKind::ALL
            .into_iter()
            .find(|k| k.id() == s)
            .ok_or_else(|| RegistryError::UnknownKind(s.to_owned()))
    }
}

/// What a factory needs beyond the kind.
pub struct UnitContext {
    /// Initial value for [`UnitKind::Value`].
    pub value: Sample,
    /// Note state read by the MIDI kinds.
    pub notes: Arc<dyn NoteSource>,
}

impl Default for UnitContext {
    fn default() -> Self {
        Self {
            value: 0.0,
            notes: Arc::new(NoteCell::new()),
        }
    }
}

/// Registry of all unit kinds with their descriptors.
pub struct UnitRegistry {
    entries: Vec<(UnitKind, UnitDescriptor)>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    /// Registry over every [`UnitKind`].
    pub fn new() -> Self {
        Self {
            entries: UnitKind::ALL.iter().map(|&k| (k, k.descriptor())).collect(),
        }
    }

    /// Descriptors for all kinds.
    pub fn all_units(&self) -> Vec<&UnitDescriptor> {
        self.entries.iter().map(|(_, d)| d).collect()
    }

    /// Descriptors for kinds in one category.
    pub fn units_in_category(&self, category: UnitCategory) -> Vec<&UnitDescriptor> {
        self.entries
            .iter()
            .filter(|(_, d)| d.category == category)
            .map(|(_, d)| d)
            .collect()
    }

    /// Descriptor by kind name.
    pub fn get(&self, id: &str) -> Option<&UnitDescriptor> {
        self.entries.iter().find(|(_, d)| d.id == id).map(|(_, d)| d)
    }

    /// Creates a unit by kind name.
    pub fn create(&self, id: &str, ctx: &UnitContext) -> Result<Box<dyn Processor>, RegistryError> {
        Ok(id.parse::<UnitKind>()?.create(ctx))
    }

    /// Every kind name mapped to its sorted input names.
    pub fn kind_inputs(&self) -> BTreeMap<&'static str, Vec<String>> {
        self.entries
            .iter()
            .map(|(k, d)| (d.id, k.inputs()))
            .collect()
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
