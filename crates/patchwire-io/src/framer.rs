//! Engine block to device buffer adaptation.
//!
//! Devices call back with interleaved `f32` buffers of whatever size they
//! like; the engine only produces mono blocks of exactly [`BLOCK_LEN`]
//! samples. [`BlockFramer`] keeps the unread tail of the last block and
//! renders a new one whenever it runs out.

use patchwire_core::{BLOCK_LEN, Sample};

/// Buffers engine blocks and spreads them over device frames.
#[derive(Debug)]
pub struct BlockFramer {
    block: Vec<Sample>,
    /// Next unread index; `block.len()` when exhausted.
    pos: usize,
    channels: usize,
}

impl BlockFramer {
    /// Framer for a device with `channels` interleaved channels.
    ///
    /// A channel count of zero is treated as mono.
    pub fn new(channels: u16) -> Self {
        Self {
            block: vec![0.0; BLOCK_LEN],
            pos: BLOCK_LEN,
            channels: usize::from(channels.max(1)),
        }
    }

    /// Number of interleaved channels written per frame.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Samples left over from the last rendered block.
    pub fn buffered(&self) -> usize {
        self.block.len() - self.pos
    }

    /// Fills `out` frame by frame, calling `render` for each new block.
    ///
    /// Every channel of a frame receives the same sample. A trailing partial
    /// frame (when `out.len()` is not a multiple of the channel count) is
    /// filled too.
    pub fn fill<F>(&mut self, out: &mut [f32], mut render: F)
    where
        F: FnMut(&mut [Sample]),
    {
        for frame in out.chunks_mut(self.channels) {
            if self.pos == self.block.len() {
                render(&mut self.block);
                self.pos = 0;
            }
            let s = self.block[self.pos] as f32;
            self.pos += 1;
            frame.fill(s);
        }
    }
}

/// Peak-following output limiter.
///
/// Tracks the largest magnitude seen so far and divides every sample by it
/// once it exceeds 1. The peak never decays, so a single loud transient
/// lowers the level for the rest of the stream.
#[derive(Debug, Clone)]
pub struct Limiter {
    peak: Sample,
}

impl Limiter {
    /// A limiter that has not engaged yet.
    pub fn new() -> Self {
        Self { peak: 1.0 }
    }

    /// Largest magnitude seen, at least 1.
    pub fn peak(&self) -> Sample {
        self.peak
    }

    /// Whether the output is currently being attenuated.
    pub fn is_engaged(&self) -> bool {
        self.peak > 1.0
    }

    /// Scales `block` in place.
    pub fn process(&mut self, block: &mut [Sample]) {
        let before = self.peak;
        for s in block.iter_mut() {
            let mag = s.abs();
            if mag > self.peak {
                self.peak = mag;
            }
            *s /= self.peak;
        }
        if self.peak > before {
            tracing::trace!(peak = self.peak, "limiter engaged");
        }
    }
}

impl Default for Limiter {
    fn default() -> Self {
        Self::new()
    }
}
