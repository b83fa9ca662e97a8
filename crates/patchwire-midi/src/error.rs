//! Error types for MIDI input.

use thiserror::Error;

/// MIDI port discovery and connection failures.
#[derive(Debug, Error)]
pub enum MidiError {
    /// The MIDI subsystem could not be initialized.
    #[error("failed to initialize MIDI input: {0}")]
    Init(String),

    /// The system has no MIDI input ports.
    #[error("no MIDI input ports available")]
    NoInputPorts,

    /// No port name contains the requested pattern.
    #[error("no MIDI input port matching '{0}'")]
    PortNotFound(String),

    /// A port's name could not be read.
    #[error("failed to read MIDI port info: {0}")]
    PortInfo(String),

    /// Connecting to the port failed.
    #[error("failed to connect to MIDI port: {0}")]
    Connect(String),
}

/// Result alias for MIDI operations.
pub type Result<T> = std::result::Result<T, MidiError>;
