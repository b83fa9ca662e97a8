//! MIDI input port connection.
//!
//! Uses midir for cross-platform MIDI input (ALSA on Linux, CoreMIDI on
//! macOS, WinMM on Windows). Messages are handled on midir's driver thread,
//! which only touches the held-note stack and the atomic note cell.

use std::sync::Arc;

use midir::{MidiInput, MidiInputConnection, MidiInputPort};
use patchwire_units::NoteCell;

use crate::error::{MidiError, Result};
use crate::event::NoteEvent;
use crate::held::HeldNotes;

const CLIENT_NAME: &str = "patchwire-midi-in";

/// State owned by the midir callback.
struct CallbackData {
    held: HeldNotes,
    cell: Arc<NoteCell>,
}

/// A live MIDI input feeding a [`NoteCell`]. Dropping it closes the port.
pub struct MidiListener {
    connection: MidiInputConnection<CallbackData>,
    port_name: String,
}

impl MidiListener {
    /// Connects to the first input port whose name contains `port_match`
    /// (case-insensitive), or to the first port if `port_match` is `None`.
    pub fn connect(port_match: Option<&str>, cell: Arc<NoteCell>) -> Result<Self> {
        let midi_in = MidiInput::new(CLIENT_NAME).map_err(|e| MidiError::Init(e.to_string()))?;
        let port = find_port(&midi_in, port_match)?;
        let port_name = midi_in
            .port_name(&port)
            .map_err(|e| MidiError::PortInfo(e.to_string()))?;

        let data = CallbackData {
            held: HeldNotes::new(),
            cell,
        };
        let connection = midi_in
            .connect(&port, "patchwire-notes", Self::on_message, data)
            .map_err(|e| MidiError::Connect(e.to_string()))?;

        tracing::info!(port = %port_name, "MIDI input connected");
        Ok(Self {
            connection,
            port_name,
        })
    }

    /// Name of the connected port.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Closes the port.
    pub fn close(self) {
        let (_, data) = self.connection.close();
        tracing::info!(port = %self.port_name, held = data.held.notes().len(), "MIDI input closed");
    }

    fn on_message(_timestamp: u64, message: &[u8], data: &mut CallbackData) {
        if let Some(event) = NoteEvent::parse(message) {
            tracing::trace!(?event, "MIDI note");
            data.held.apply(event, &data.cell);
        }
    }
}

/// Names of all MIDI input ports.
pub fn list_ports() -> Result<Vec<String>> {
    let midi_in = MidiInput::new(CLIENT_NAME).map_err(|e| MidiError::Init(e.to_string()))?;
    midi_in
        .ports()
        .iter()
        .map(|p| {
            midi_in
                .port_name(p)
                .map_err(|e| MidiError::PortInfo(e.to_string()))
        })
        .collect()
}

fn find_port(midi_in: &MidiInput, port_match: Option<&str>) -> Result<MidiInputPort> {
    let ports = midi_in.ports();
    if ports.is_empty() {
        return Err(MidiError::NoInputPorts);
    }
    let Some(pattern) = port_match else {
        return ports.into_iter().next().ok_or(MidiError::NoInputPorts);
    };

    let lower = pattern.to_lowercase();
    ports
        .into_iter()
        .find(|port| {
            midi_in
                .port_name(port)
                .is_ok_and(|name| name.to_lowercase().contains(&lower))
        })
        .ok_or_else(|| MidiError::PortNotFound(pattern.to_owned()))
}
