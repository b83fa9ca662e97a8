//! Input slot storage.
//!
//! Three flavours, matching [`SlotKind`](crate::SlotKind):
//!
//! - [`Input`]: the owner evaluates the wired processor straight into its
//!   own output block. Cheapest; used for the "main" input of a unit.
//! - [`Source`]: owns a private block that is refilled on every read, so the
//!   owner can hold several inputs side by side.
//! - [`Trigger`]: a [`Source`] plus the last high/low state, for rising-edge
//!   detection across block boundaries.

use crate::processor::{Processor, Value};
use crate::signal::{Sample, TRIGGER_THRESHOLD, zeroed_block};

/// Unbuffered input slot.
pub struct Input {
    processor: Box<dyn Processor>,
}

impl Input {
    /// A slot wired to constant zero.
    pub fn new() -> Self {
        Self {
            processor: Box::new(Value(0.0)),
        }
    }

    /// Rewires the slot, dropping the previous processor.
    pub fn set(&mut self, processor: Box<dyn Processor>) {
        self.processor = processor;
    }

    /// Evaluates the wired processor into `block`.
    #[inline]
    pub fn process(&mut self, block: &mut [Sample]) {
        self.processor.process(block);
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

/// Buffered input slot with its own block.
pub struct Source {
    processor: Box<dyn Processor>,
    block: Vec<Sample>,
}

impl Source {
    /// A slot wired to constant zero.
    pub fn new() -> Self {
        Self {
            processor: Box::new(Value(0.0)),
            block: zeroed_block(),
        }
    }

    /// Rewires the slot, dropping the previous processor.
    pub fn set(&mut self, processor: Box<dyn Processor>) {
        self.processor = processor;
    }

    /// Refills the private block and returns it.
    #[inline]
    pub fn process(&mut self) -> &[Sample] {
        self.processor.process(&mut self.block);
        &self.block
    }

    /// The block produced by the last [`process`](Source::process).
    #[inline]
    pub fn block(&self) -> &[Sample] {
        &self.block
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::new()
    }
}

/// Buffered input slot that reports rising edges.
///
/// A sample is high when strictly above [`TRIGGER_THRESHOLD`]. An edge fires
/// on the low-to-high transition only, and the last state carries over into
/// the next block.
pub struct Trigger {
    source: Source,
    high: bool,
}

impl Trigger {
    /// A slot wired to constant zero, starting low.
    pub fn new() -> Self {
        Self {
            source: Source::new(),
            high: false,
        }
    }

    /// Rewires the slot, dropping the previous processor. Edge state is kept.
    pub fn set(&mut self, processor: Box<dyn Processor>) {
        self.source.set(processor);
    }

    /// Refills the private block. Call once per block before [`fire`](Trigger::fire).
    #[inline]
    pub fn process(&mut self) {
        self.source.process();
    }

    /// Whether sample `i` of the current block is a rising edge.
    ///
    /// Must be called for consecutive `i` in order; each call advances the
    /// edge state.
    #[inline]
    pub fn fire(&mut self, i: usize) -> bool {
        let high = self.source.block()[i] > TRIGGER_THRESHOLD;
        let edge = high && !self.high;
        self.high = high;
        edge
    }
}

impl Default for Trigger {
    fn default() -> Self {
        Self::new()
    }
}
