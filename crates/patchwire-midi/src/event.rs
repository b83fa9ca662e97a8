//! Raw MIDI message decoding.

/// A note message, on any channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEvent {
    /// Key pressed.
    On {
        /// Note number.
        note: u8,
        /// Strike velocity, never 0.
        velocity: u8,
    },
    /// Key released.
    Off {
        /// Note number.
        note: u8,
    },
}

impl NoteEvent {
    /// Decodes a note-on or note-off message. Note-on with velocity 0 is a
    /// note-off. Anything else, including truncated messages, is `None`.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let &[status, note, velocity, ..] = data else {
            return None;
        };
        match status & 0xF0 {
            0x80 => Some(Self::Off { note }),
            0x90 if velocity == 0 => Some(Self::Off { note }),
            0x90 => Some(Self::On { note, velocity }),
            _ => None,
        }
    }
}
