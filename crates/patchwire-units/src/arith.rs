//! Elementwise arithmetic on two signals.
//!
//! Input `a` is raw and evaluated into the output block; `b` is buffered.

use patchwire_core::{Input, Processor, Sample, Sink, Source};

/// `a * b`, sample by sample. Used as a VCA when one side is an envelope.
pub struct Mul {
    a: Input,
    b: Source,
}

impl Mul {
    /// Both inputs start at zero.
    pub fn new() -> Self {
        Self {
            a: Input::new(),
            b: Source::new(),
        }
    }
}

impl Default for Mul {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for Mul {
    fn process(&mut self, block: &mut [Sample]) {
        self.a.process(block);
        for (s, &b) in block.iter_mut().zip(self.b.process()) {
            *s *= b;
        }
    }

    fn as_sink(&self) -> Option<&dyn Sink> {
        Some(self)
    }

    fn as_sink_mut(&mut self) -> Option<&mut dyn Sink> {
        Some(self)
    }
}

impl_sink!(Mul, "mul", {
    "a" => Raw(a),
    "b" => Buffered(b),
});

/// `a + b`, sample by sample.
pub struct Sum {
    a: Input,
    b: Source,
}

impl Sum {
    /// Both inputs start at zero.
    pub fn new() -> Self {
        Self {
            a: Input::new(),
            b: Source::new(),
        }
    }
}

impl Default for Sum {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for Sum {
    fn process(&mut self, block: &mut [Sample]) {
        self.a.process(block);
        for (s, &b) in block.iter_mut().zip(self.b.process()) {
            *s += b;
        }
    }

    fn as_sink(&self) -> Option<&dyn Sink> {
        Some(self)
    }

    fn as_sink_mut(&mut self) -> Option<&mut dyn Sink> {
        Some(self)
    }
}

impl_sink!(Sum, "sum", {
    "a" => Raw(a),
    "b" => Buffered(b),
});
