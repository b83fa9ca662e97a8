//! The processor, sink and ticker contract.
//!
//! Every unit in a patch is a [`Processor`]: one call fills one block and
//! advances internal state by exactly one block. Units with inputs are also
//! [`Sink`]s. A sink declares its slots once, as a sorted static table of
//! [`SlotSpec`]s, and hands out a [`SlotMut`] for a name on request; the
//! provided [`Sink::input`] and [`Sink::inputs`] methods build the whole
//! naming scheme (including indexed ports such as `step0`..`step7`) on top
//! of those two.
//!
//! Slots are pre-wired to [`Value(0.0)`](Value), so a freshly built unit is
//! always safe to process.

use crate::error::GraphError;
use crate::inputs::{Input, Source, Trigger};
use crate::signal::Sample;

/// A unit that produces one block of samples per call.
///
/// `process` overwrites the whole block. The block must be exactly
/// [`BLOCK_LEN`](crate::BLOCK_LEN) samples; any other length is a contract
/// violation.
///
/// Processors that also accept inputs return themselves from
/// [`as_sink`](Processor::as_sink) / [`as_sink_mut`](Processor::as_sink_mut)
/// so code holding a `Box<dyn Processor>` can still rewire them.
pub trait Processor: Send {
    /// Fills `block` with the next block of output.
    fn process(&mut self, block: &mut [Sample]);

    /// This processor's input slots, if it has any.
    fn as_sink(&self) -> Option<&dyn Sink> {
        None
    }

    /// Mutable access to this processor's input slots, if it has any.
    fn as_sink_mut(&mut self) -> Option<&mut dyn Sink> {
        None
    }
}

impl<P: Processor + ?Sized> Processor for Box<P> {
    fn process(&mut self, block: &mut [Sample]) {
        (**self).process(block);
    }

    fn as_sink(&self) -> Option<&dyn Sink> {
        (**self).as_sink()
    }

    fn as_sink_mut(&mut self) -> Option<&mut dyn Sink> {
        (**self).as_sink_mut()
    }
}

/// Per-block bookkeeping, run after the block's samples are produced.
pub trait Ticker: Send + Sync {
    /// Advances to the next block.
    fn tick(&self);
}

/// Constant source: every sample equals the wrapped value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Value(pub Sample);

impl Processor for Value {
    fn process(&mut self, block: &mut [Sample]) {
        block.fill(self.0);
    }
}

/// How a slot stores and evaluates the processor wired into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Evaluated straight into the owner's output block.
    Raw,
    /// Evaluated into the slot's own block.
    Buffered,
    /// Buffered, plus rising-edge detection.
    Trigger,
    /// A fixed number of buffered ports named `name0`, `name1`, ...
    Indexed(usize),
}

/// One entry in a sink's slot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    /// Slot name (for indexed slots, the prefix).
    pub name: &'static str,
    /// Storage kind.
    pub kind: SlotKind,
}

impl SlotSpec {
    /// A raw slot.
    pub const fn raw(name: &'static str) -> Self {
        Self {
            name,
            kind: SlotKind::Raw,
        }
    }

    /// A buffered slot.
    pub const fn buffered(name: &'static str) -> Self {
        Self {
            name,
            kind: SlotKind::Buffered,
        }
    }

    /// A trigger slot.
    pub const fn trigger(name: &'static str) -> Self {
        Self {
            name,
            kind: SlotKind::Trigger,
        }
    }

    /// An indexed slot with `len` buffered ports.
    pub const fn indexed(name: &'static str, len: usize) -> Self {
        Self {
            name,
            kind: SlotKind::Indexed(len),
        }
    }
}

/// Mutable view of one slot, as returned by [`Sink::slot_mut`].
pub enum SlotMut<'a> {
    /// A raw slot.
    Raw(&'a mut Input),
    /// A buffered slot.
    Buffered(&'a mut Source),
    /// A trigger slot.
    Trigger(&'a mut Trigger),
    /// All ports of an indexed slot.
    Indexed(&'a mut [Source]),
}

/// A unit with named, rewireable input slots.
///
/// Implementors supply the static slot table and name lookup; wiring and
/// enumeration come from the provided methods.
///
/// # Example
///
/// ```rust
/// use patchwire_core::{Input, Processor, Sample, Sink, SlotMut, SlotSpec, Value};
///
/// struct Invert {
///     input: Input,
/// }
///
/// impl Processor for Invert {
///     fn process(&mut self, block: &mut [Sample]) {
///         self.input.process(block);
///         block.iter_mut().for_each(|s| *s = -*s);
///     }
/// }
///
/// impl Sink for Invert {
///     fn unit_name(&self) -> &'static str {
///         "invert"
///     }
///
///     fn slots(&self) -> &'static [SlotSpec] {
///         const SLOTS: &[SlotSpec] = &[SlotSpec::raw("in")];
///         SLOTS
///     }
///
///     fn slot_mut(&mut self, name: &str) -> Option<SlotMut<'_>> {
///         match name {
///             "in" => Some(SlotMut::Raw(&mut self.input)),
///             _ => None,
///         }
///     }
/// }
///
/// let mut inv = Invert { input: Input::new() };
/// inv.input("in", Box::new(Value(0.25))).unwrap();
/// assert!(inv.input("gain", Box::new(Value(1.0))).is_err());
/// assert_eq!(inv.inputs(), vec!["in".to_string()]);
/// ```
pub trait Sink {
    /// Short unit name used in error messages.
    fn unit_name(&self) -> &'static str;

    /// The fixed slot table, sorted by name.
    fn slots(&self) -> &'static [SlotSpec];

    /// Looks up a slot by its exact table name.
    fn slot_mut(&mut self, name: &str) -> Option<SlotMut<'_>>;

    /// Wires `processor` into the slot called `name`.
    ///
    /// Singular slots match exactly. Indexed slots are addressed as the
    /// slot name followed by a decimal port number (`step3`). Whatever was
    /// previously wired into the slot is dropped.
    fn input(&mut self, name: &str, processor: Box<dyn Processor>) -> Result<(), GraphError> {
        let unit = self.unit_name();
        if let Some(slot) = self.slot_mut(name) {
            return match slot {
                SlotMut::Raw(input) => {
                    input.set(processor);
                    Ok(())
                }
                SlotMut::Buffered(source) => {
                    source.set(processor);
                    Ok(())
                }
                SlotMut::Trigger(trigger) => {
                    trigger.set(processor);
                    Ok(())
                }
                SlotMut::Indexed(_) => Err(GraphError::IncompatibleInput {
                    unit,
                    input: name.to_owned(),
                }),
            };
        }

        let unknown = || GraphError::UnknownInput {
            unit,
            input: name.to_owned(),
        };
        let (base, index) = split_index(name).ok_or_else(unknown)?;
        match self.slot_mut(base) {
            Some(SlotMut::Indexed(ports)) => {
                let len = ports.len();
                let port = ports.get_mut(index).ok_or_else(|| GraphError::InputIndex {
                    unit,
                    input: name.to_owned(),
                    len,
                })?;
                port.set(processor);
                Ok(())
            }
            _ => Err(unknown()),
        }
    }

    /// All addressable input names, sorted. Indexed slots expand to one
    /// name per port.
    fn inputs(&self) -> Vec<String> {
        let mut names = Vec::new();
        for spec in self.slots() {
            match spec.kind {
                SlotKind::Indexed(len) => {
                    names.extend((0..len).map(|i| format!("{}{}", spec.name, i)));
                }
                _ => names.push(spec.name.to_owned()),
            }
        }
        names.sort();
        names
    }
}

/// Splits `step12` into `("step", 12)`.
fn split_index(name: &str) -> Option<(&str, usize)> {
    let base = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if base.is_empty() || base.len() == name.len() {
        return None;
    }
    let index = name[base.len()..].parse().ok()?;
    Some((base, index))
}
