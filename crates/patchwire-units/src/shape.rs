//! Waveshaping utilities.

use patchwire_core::{Input, Processor, Sample, Sink};

/// Quantization steps per unit of pitch: 12 semitones per 0.1 octave.
pub const QUANT_STEPS: Sample = 120.0;

/// Hard clipper to [-1, 1].
pub struct Clip {
    input: Input,
}

impl Clip {
    /// Unwired clipper.
    pub fn new() -> Self {
        Self {
            input: Input::new(),
        }
    }
}

impl Default for Clip {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for Clip {
    fn process(&mut self, block: &mut [Sample]) {
        self.input.process(block);
        for s in block.iter_mut() {
            if *s > 1.0 {
                *s = 1.0;
            } else if *s < -1.0 {
                *s = -1.0;
            }
        }
    }

    fn as_sink(&self) -> Option<&dyn Sink> {
        Some(self)
    }

    fn as_sink_mut(&mut self) -> Option<&mut dyn Sink> {
        Some(self)
    }
}

impl_sink!(Clip, "clip", {
    "in" => Raw(input),
});

/// Pitch quantizer: rounds to the nearest equal-tempered semitone.
pub struct Quant {
    input: Input,
}

impl Quant {
    /// Unwired quantizer.
    pub fn new() -> Self {
        Self {
            input: Input::new(),
        }
    }
}

impl Default for Quant {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for Quant {
    fn process(&mut self, block: &mut [Sample]) {
        self.input.process(block);
        for s in block.iter_mut() {
            *s = (*s * QUANT_STEPS).round() / QUANT_STEPS;
        }
    }

    fn as_sink(&self) -> Option<&dyn Sink> {
        Some(self)
    }

    fn as_sink_mut(&mut self) -> Option<&mut dyn Sink> {
        Some(self)
    }
}

impl_sink!(Quant, "quant", {
    "in" => Raw(input),
});

#[cfg(test)]
mod tests {
    use super::*;
    use patchwire_core::{Value, zeroed_block};

    fn run(p: &mut dyn Processor, v: Sample) -> Sample {
        p.as_sink_mut()
            .unwrap()
            .input("in", Box::new(Value(v)))
            .unwrap();
        let mut block = zeroed_block();
        p.process(&mut block);
        block[0]
    }

    #[test]
    fn clip_bounds_output() {
        let mut c = Clip::new();
        assert_eq!(run(&mut c, 3.0), 1.0);
        assert_eq!(run(&mut c, -3.0), -1.0);
        assert_eq!(run(&mut c, 0.4), 0.4);
        assert_eq!(run(&mut c, -1.0), -1.0);
    }

    #[test]
    fn clip_passes_nan_through() {
        let mut c = Clip::new();
        assert!(run(&mut c, Sample::NAN).is_nan());
    }

    #[test]
    fn quant_snaps_to_semitones() {
        let mut q = Quant::new();
        let semitone = 1.0 / QUANT_STEPS;
        assert_eq!(run(&mut q, 0.0), 0.0);
        assert_eq!(run(&mut q, 0.1), 12.0 / QUANT_STEPS);
        assert_eq!(run(&mut q, 3.4 * semitone), 3.0 / QUANT_STEPS);
        assert_eq!(run(&mut q, -2.6 * semitone), -3.0 / QUANT_STEPS);
    }
}
