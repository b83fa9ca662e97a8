//! Swap delay line.
//!
//! Each sample is exchanged with the buffer slot under the write head, so
//! the output is whatever was written one delay period earlier. Feeding the
//! delay's own output back into its input (through a [`Dup`]) accumulates
//! one round trip per period.
//!
//! The delay time `len` is read per sample in seconds. Times shorter than
//! one block pass the input through untouched for that sample and leave
//! the head where it is. Times longer than the buffer are clamped.
//!
//! [`Dup`]: patchwire_core::Dup

use patchwire_core::{BLOCK_LEN, Input, Processor, SAMPLE_RATE, Sample, Sink, Source};

/// Buffer size in samples: one second.
pub const DELAY_CAPACITY: usize = SAMPLE_RATE as usize;

/// One-second swap delay.
///
/// ## Inputs
///
/// | Name | Kind | Meaning |
/// |------|------|---------|
/// | `in` | raw | signal |
/// | `len` | buffered | delay time in seconds |
pub struct Delay {
    input: Input,
    len: Source,
    head: usize,
    buf: Vec<Sample>,
}

impl Delay {
    /// An empty delay line with zero delay time (pass-through).
    pub fn new() -> Self {
        Self {
            input: Input::new(),
            len: Source::new(),
            head: 0,
            buf: vec![0.0; DELAY_CAPACITY],
        }
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for Delay {
    fn process(&mut self, block: &mut [Sample]) {
        self.input.process(block);
        let len = self.len.process();

        let mut p = self.head;
        for (s, &l) in block.iter_mut().zip(len) {
            let mut max = (l * f64::from(SAMPLE_RATE)) as usize;
            if max < BLOCK_LEN {
                continue;
            }
            if max > DELAY_CAPACITY {
                max = DELAY_CAPACITY;
            }
            if p >= max {
                p = 0;
            }
            std::mem::swap(s, &mut self.buf[p]);
            p += 1;
        }
        self.head = p;
    }

    fn as_sink(&self) -> Option<&dyn Sink> {
        Some(self)
    }

    fn as_sink_mut(&mut self) -> Option<&mut dyn Sink> {
        Some(self)
    }
}

impl_sink!(Delay, "delay", {
    "in" => Raw(input),
    "len" => Buffered(len),
});

#[cfg(test)]
mod tests {
    use super::*;
    use patchwire_core::{Value, zeroed_block};

    const ONE_BLOCK: f64 = BLOCK_LEN as f64 / SAMPLE_RATE as f64;

    #[test]
    fn one_block_delay_shifts_by_a_block() {
        let mut d = Delay::new();
        d.input("in", Box::new(Value(0.7))).unwrap();
        d.input("len", Box::new(Value(ONE_BLOCK))).unwrap();

        let mut block = zeroed_block();
        d.process(&mut block);
        assert!(block.iter().all(|&s| s == 0.0));
        d.process(&mut block);
        assert!(block.iter().all(|&s| s == 0.7));
    }

    #[test]
    fn short_times_pass_through() {
        let mut d = Delay::new();
        d.input("in", Box::new(Value(0.3))).unwrap();
        d.input("len", Box::new(Value(0.001))).unwrap(); // 44 samples
        let mut block = zeroed_block();
        d.process(&mut block);
        assert!(block.iter().all(|&s| s == 0.3));
        assert_eq!(d.head, 0);
    }

    #[test]
    fn negative_time_passes_through() {
        let mut d = Delay::new();
        d.input("in", Box::new(Value(0.3))).unwrap();
        d.input("len", Box::new(Value(-2.0))).unwrap();
        let mut block = zeroed_block();
        d.process(&mut block);
        assert!(block.iter().all(|&s| s == 0.3));
    }

    #[test]
    fn long_times_clamp_to_capacity() {
        let mut d = Delay::new();
        d.input("in", Box::new(Value(1.0))).unwrap();
        d.input("len", Box::new(Value(5.0))).unwrap();

        let blocks = DELAY_CAPACITY.div_ceil(BLOCK_LEN);
        let mut block = zeroed_block();
        for _ in 0..blocks {
            d.process(&mut block);
        }
        // the head wrapped at one second, so the tail of the last block is delayed input
        assert_eq!(block[BLOCK_LEN - 1], 1.0);
        assert!(d.head <= DELAY_CAPACITY);
    }

    #[test]
    fn inputs_are_sorted() {
        assert_eq!(Delay::new().inputs(), vec!["in", "len"]);
    }
}
