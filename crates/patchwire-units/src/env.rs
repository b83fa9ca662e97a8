//! Attack/decay envelope.
//!
//! The envelope level chases its `gate` input: it rises toward the gate at
//! the attack rate and falls toward it at the decay rate, never crossing
//! it. A rising edge on `trig` overrides the gate and ramps the level all
//! the way to 1 before it starts following the gate again.
//!
//! Rates are per-sample increments of `1 / (time * SAMPLE_RATE * 10)`, so an
//! `att` of 0.1 reaches full scale in one second. A time of 0 or less
//! freezes movement in that direction.

use patchwire_core::{Input, Processor, SAMPLE_RATE, Sample, Sink, Source, Trigger};

const RATE_SCALE: f64 = SAMPLE_RATE as f64 * 10.0;

/// Gate-following attack/decay envelope.
///
/// ## Inputs
///
/// | Name | Kind | Meaning |
/// |------|------|---------|
/// | `att` | buffered | attack time |
/// | `dec` | buffered | decay time |
/// | `gate` | raw | level to follow |
/// | `trig` | trigger | force a full attack |
///
/// # Example
///
/// ```rust
/// use patchwire_core::{Processor, Sink, Value, zeroed_block};
/// use patchwire_units::Env;
///
/// let mut env = Env::new();
/// env.input("gate", Box::new(Value(0.5))).unwrap();
/// env.input("att", Box::new(Value(0.0001))).unwrap();
///
/// let mut block = zeroed_block();
/// env.process(&mut block);
/// assert_eq!(block[255], 0.5); // settled on the gate
/// ```
pub struct Env {
    gate: Input,
    trig: Trigger,
    att: Source,
    dec: Source,
    level: Sample,
    rising: bool,
}

impl Env {
    /// A closed envelope at level zero.
    pub fn new() -> Self {
        Self {
            gate: Input::new(),
            trig: Trigger::new(),
            att: Source::new(),
            dec: Source::new(),
            level: 0.0,
            rising: false,
        }
    }

    /// Current level.
    pub fn level(&self) -> Sample {
        self.level
    }

    /// Whether a triggered attack is in progress.
    pub fn is_rising(&self) -> bool {
        self.rising
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for Env {
    fn process(&mut self, block: &mut [Sample]) {
        self.gate.process(block);
        self.trig.process();
        let att = self.att.process();
        let dec = self.dec.process();

        let mut v = self.level;
        for (i, s) in block.iter_mut().enumerate() {
            let gate = *s;
            if self.trig.fire(i) {
                self.rising = true;
            }
            if !self.rising && v > gate {
                let d = dec[i];
                if d > 0.0 {
                    v -= 1.0 / (d * RATE_SCALE);
                    if v < gate {
                        v = gate;
                    }
                }
            }
            if self.rising || v < gate {
                let a = att[i];
                if a > 0.0 {
                    v += 1.0 / (a * RATE_SCALE);
                    if self.rising {
                        if v > 1.0 {
                            v = 1.0;
                            self.rising = false;
                        }
                    } else if v > gate {
                        v = gate;
                    }
                }
            }
            *s = v;
        }
        self.level = v;
    }

    fn as_sink(&self) -> Option<&dyn Sink> {
        Some(self)
    }

    fn as_sink_mut(&mut self) -> Option<&mut dyn Sink> {
        Some(self)
    }
}

impl_sink!(Env, "env", {
    "att" => Buffered(att),
    "dec" => Buffered(dec),
    "gate" => Raw(gate),
    "trig" => Trigger(trig),
});
