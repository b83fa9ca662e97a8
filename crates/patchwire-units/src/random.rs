//! Random sources.
//!
//! Both units own a [`StdRng`]. `new` seeds it from the OS; `with_seed`
//! gives a reproducible stream for tests and offline renders.

use patchwire_core::{Input, Processor, Sample, Sink, Source, Trigger};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sample-and-hold random.
///
/// Each rising edge on `trig` draws a uniform value in `[min, max)` using
/// that sample's bounds and holds it, across blocks, until the next edge.
///
/// ## Inputs
///
/// | Name | Kind | Meaning |
/// |------|------|---------|
/// | `max` | buffered | upper bound |
/// | `min` | raw | lower bound |
/// | `trig` | trigger | draw |
pub struct Rand {
    min: Input,
    max: Source,
    trig: Trigger,
    held: Sample,
    rng: StdRng,
}

impl Rand {
    /// Seeded from OS entropy, holding zero.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic sequence for `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            min: Input::new(),
            max: Source::new(),
            trig: Trigger::new(),
            held: 0.0,
            rng,
        }
    }
}

impl Default for Rand {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for Rand {
    fn process(&mut self, block: &mut [Sample]) {
        self.min.process(block);
        self.trig.process();
        let max = self.max.process();

        let mut v = self.held;
        for (i, s) in block.iter_mut().enumerate() {
            if self.trig.fire(i) {
                let min = *s;
                v = min + self.rng.r#gen::<f64>() * (max[i] - min);
            }
            *s = v;
        }
        self.held = v;
    }

    fn as_sink(&self) -> Option<&dyn Sink> {
        Some(self)
    }

    fn as_sink_mut(&mut self) -> Option<&mut dyn Sink> {
        Some(self)
    }
}

impl_sink!(Rand, "rand", {
    "max" => Buffered(max),
    "min" => Raw(min),
    "trig" => Trigger(trig),
});

/// White noise, uniform in `[-1, 1)`.
pub struct Noise {
    rng: StdRng,
}

impl Noise {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic noise for `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for Noise {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for Noise {
    fn process(&mut self, block: &mut [Sample]) {
        for s in block.iter_mut() {
            *s = self.rng.gen_range(-1.0..1.0);
        }
    }
}
