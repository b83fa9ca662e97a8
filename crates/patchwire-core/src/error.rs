//! Error types for graph wiring and audio streams.

use thiserror::Error;

/// Wiring contract violations reported by [`Sink::input`](crate::Sink::input).
///
/// These indicate a bug in whatever is editing the patch. The render path
/// never produces them; the control plane decides how to surface them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No slot with this name is registered on the unit.
    #[error("unknown input '{input}' on {unit}")]
    UnknownInput {
        /// Unit that rejected the input.
        unit: &'static str,
        /// Slot name as given by the caller.
        input: String,
    },

    /// The slot exists but cannot take a single processor under this name.
    #[error("input '{input}' on {unit} is indexed; address one of its ports")]
    IncompatibleInput {
        /// Unit that rejected the input.
        unit: &'static str,
        /// Slot name as given by the caller.
        input: String,
    },

    /// An indexed slot was addressed past its last port.
    #[error("input '{input}' on {unit} is out of range (slot has {len} ports)")]
    InputIndex {
        /// Unit that rejected the input.
        unit: &'static str,
        /// Slot name as given by the caller.
        input: String,
        /// Number of ports the indexed slot has.
        len: usize,
    },

    /// The processor has no input slots at all.
    #[error("processor has no inputs (tried '{input}')")]
    NotASink {
        /// Slot name as given by the caller.
        input: String,
    },
}

/// Failures from the real-time audio stream.
///
/// These are environmental and recoverable: after any of them the engine is
/// left stopped and [`Engine::start`](crate::Engine::start) may be retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The backend could not open a stream.
    #[error("failed to open audio stream: {0}")]
    Open(String),

    /// The stream opened but would not start.
    #[error("failed to start audio stream: {0}")]
    Start(String),

    /// The stream could not be stopped.
    #[error("failed to stop audio stream: {0}")]
    Stop(String),

    /// The stream could not be released.
    #[error("failed to close audio stream: {0}")]
    Close(String),

    /// `start` was called while a stream is already running.
    #[error("engine is already running")]
    AlreadyRunning,

    /// `stop` was called with no running stream.
    #[error("engine is not running")]
    NotRunning,

    /// The thread owning the stream exited without reporting.
    #[error("audio stream thread exited unexpectedly")]
    ThreadPanicked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_input_names_unit_and_slot() {
        let err = GraphError::UnknownInput {
            unit: "env",
            input: "cutoff".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("env"), "got: {msg}");
        assert!(msg.contains("cutoff"), "got: {msg}");
    }

    #[test]
    fn input_index_reports_port_count() {
        let err = GraphError::InputIndex {
            unit: "sequencer",
            input: "step9".to_string(),
            len: 8,
        };
        assert!(err.to_string().contains("8 ports"));
    }

    #[test]
    fn stream_errors_carry_backend_message() {
        let err = StreamError::Open("device busy".to_string());
        assert_eq!(err.to_string(), "failed to open audio stream: device busy");
    }
}
