//! DSP unit library for the patchwire modular synthesizer.
//!
//! Every unit here is a [`Processor`](patchwire_core::Processor); units
//! with inputs are also [`Sink`](patchwire_core::Sink)s whose slots start
//! out wired to constant zero.
//!
//! - [`Sin`], [`Square`] - naive phase-accumulator oscillators
//! - [`TableOsc`] - band-limited wavetable oscillator ([`Waveform`])
//! - [`Env`] - attack/decay envelope following a gate
//! - [`Mul`], [`Sum`] - elementwise arithmetic
//! - [`Delay`] - one-second swap delay line
//! - [`Clip`], [`Quant`] - shaping
//! - [`Rand`], [`Noise`] - randomness
//! - [`Sequencer`] - eight-step trigger sequencer
//! - [`MidiNote`], [`MidiGate`] - control voltages read from a [`NoteSource`]
//!
//! ## Pitch
//!
//! Pitch inputs use 0.1 per octave with 0 at A440, so `hz = 440 * 2^(10 * pitch)`.
//!
//! ## Example
//!
//! ```rust
//! use patchwire_core::{Processor, Sink, Value, zeroed_block};
//! use patchwire_units::{Env, Sin};
//!
//! let mut osc = Sin::new();
//! osc.input("pitch", Box::new(Value(0.1))).unwrap(); // A880
//!
//! let mut env = Env::new();
//! env.input("att", Box::new(Value(0.001))).unwrap();
//! env.input("dec", Box::new(Value(0.01))).unwrap();
//! env.input("trig", Box::new(Value(1.0))).unwrap();
//!
//! let mut block = zeroed_block();
//! osc.process(&mut block);
//! env.process(&mut block);
//! assert!(block.iter().all(|&v| (0.0..=1.0).contains(&v)));
//! ```

/// Implements [`Sink`](patchwire_core::Sink) for a unit whose slots are
/// plain struct fields.
///
/// Slots must be listed in name order. Each entry names the slot, its
/// [`SlotKind`](patchwire_core::SlotKind) variant and the field holding it.
macro_rules! impl_sink {
    ($unit:ty, $name:literal, { $($slot:literal => $kind:ident($field:ident)),+ $(,)? }) => {
        impl ::patchwire_core::Sink for $unit {
            fn unit_name(&self) -> &'static str {
                $name
            }

            fn slots(&self) -> &'static [::patchwire_core::SlotSpec] {
                const SLOTS: &[::patchwire_core::SlotSpec] = &[$(
                    ::patchwire_core::SlotSpec {
                        name: $slot,
                        kind: ::patchwire_core::SlotKind::$kind,
                    }
                ),+];
                SLOTS
            }

            fn slot_mut(&mut self, name: &str) -> Option<::patchwire_core::SlotMut<'_>> {
                match name {
                    $($slot => Some(::patchwire_core::SlotMut::$kind(&mut self.$field)),)+
                    _ => None,
                }
            }
        }
    };
}

pub mod arith;
pub mod delay;
pub mod env;
pub mod midi;
pub mod osc;
pub mod random;
pub mod sequencer;
pub mod shape;
pub mod table;

pub use arith::{Mul, Sum};
pub use delay::{DELAY_CAPACITY, Delay};
pub use env::Env;
pub use midi::{MidiGate, MidiNote, NoteCell, NoteSource, note_to_pitch};
pub use osc::{Sin, Square};
pub use random::{Noise, Rand};
pub use sequencer::{SEQUENCER_STEPS, Sequencer};
pub use shape::{Clip, Quant};
pub use table::{TABLE_LEN, TableOsc, Waveform};
