//! Eight-step trigger sequencer.

use patchwire_core::{Processor, Sample, Sink, SlotMut, SlotSpec, Source, Trigger};

/// Number of steps.
pub const SEQUENCER_STEPS: usize = 8;

/// Step sequencer.
///
/// Outputs the current step's input. Each rising edge on `trig` moves to
/// the next step, wrapping after the last. Every step input is evaluated
/// every block whether or not it is selected, so upstream units keep time.
///
/// ## Inputs
///
/// | Name | Kind | Meaning |
/// |------|------|---------|
/// | `step0`..`step7` | buffered | step values |
/// | `trig` | trigger | advance |
pub struct Sequencer {
    steps: [Source; SEQUENCER_STEPS],
    trig: Trigger,
    position: usize,
}

impl Sequencer {
    /// All steps at zero, positioned on `step0`.
    pub fn new() -> Self {
        Self {
            steps: std::array::from_fn(|_| Source::new()),
            trig: Trigger::new(),
            position: 0,
        }
    }

    /// Index of the step currently played.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for Sequencer {
    fn process(&mut self, block: &mut [Sample]) {
        self.trig.process();
        for step in &mut self.steps {
            step.process();
        }

        let mut pos = self.position;
        for (i, s) in block.iter_mut().enumerate() {
            if self.trig.fire(i) {
                pos = (pos + 1) % SEQUENCER_STEPS;
            }
            *s = self.steps[pos].block()[i];
        }
        self.position = pos;
    }

    fn as_sink(&self) -> Option<&dyn Sink> {
        Some(self)
    }

    fn as_sink_mut(&mut self) -> Option<&mut dyn Sink> {
        Some(self)
    }
}

impl Sink for Sequencer {
    fn unit_name(&self) -> &'static str {
        "sequencer"
    }

    fn slots(&self) -> &'static [SlotSpec] {
        const SLOTS: &[SlotSpec] = &[
            SlotSpec::indexed("step", SEQUENCER_STEPS),
            SlotSpec::trigger("trig"),
        ];
        SLOTS
    }

    fn slot_mut(&mut self, name: &str) -> Option<SlotMut<'_>> {
        match name {
            "step" => Some(SlotMut::Indexed(&mut self.steps)),
            "trig" => Some(SlotMut::Trigger(&mut self.trig)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchwire_core::{BLOCK_LEN, GraphError, Value, zeroed_block};

    /// Rising edges at the given sample indices (one sample wide).
    struct Edges(Vec<usize>);

    impl Processor for Edges {
        fn process(&mut self, block: &mut [Sample]) {
            block.fill(0.0);
            for &i in &self.0 {
                block[i] = 1.0;
            }
        }
    }

    fn sequencer() -> Sequencer {
        let mut seq = Sequencer::new();
        for i in 0..SEQUENCER_STEPS {
            seq.input(&format!("step{i}"), Box::new(Value(i as Sample)))
                .unwrap();
        }
        seq
    }

    #[test]
    fn holds_first_step_without_trigger() {
        let mut seq = sequencer();
        let mut block = zeroed_block();
        seq.process(&mut block);
        assert!(block.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn edges_advance_within_a_block() {
        let mut seq = sequencer();
        seq.input("trig", Box::new(Edges(vec![10, 20]))).unwrap();
        let mut block = zeroed_block();
        seq.process(&mut block);
        assert_eq!(block[9], 0.0);
        assert_eq!(block[10], 1.0);
        assert_eq!(block[19], 1.0);
        assert_eq!(block[20], 2.0);
        assert_eq!(block[BLOCK_LEN - 1], 2.0);
        assert_eq!(seq.position(), 2);
    }

    #[test]
    fn position_wraps_after_last_step() {
        let mut seq = sequencer();
        seq.input("trig", Box::new(Edges(vec![0]))).unwrap();
        let mut block = zeroed_block();
        for _ in 0..SEQUENCER_STEPS {
            seq.process(&mut block);
        }
        assert_eq!(seq.position(), 0);
        assert_eq!(block[0], 0.0);
    }

    #[test]
    fn step_ports_are_addressed_by_index() {
        let mut seq = Sequencer::new();
        assert!(seq.input("step7", Box::new(Value(1.0))).is_ok());
        assert!(matches!(
            seq.input("step8", Box::new(Value(1.0))),
            Err(GraphError::InputIndex { len: 8, .. })
        ));
        assert!(matches!(
            seq.input("step", Box::new(Value(1.0))),
            Err(GraphError::IncompatibleInput { .. })
        ));
    }

    #[test]
    fn inputs_expand_ports() {
        let inputs = Sequencer::new().inputs();
        assert_eq!(inputs.len(), SEQUENCER_STEPS + 1);
        assert_eq!(inputs[0], "step0");
        assert_eq!(inputs[SEQUENCER_STEPS], "trig");
    }
}
