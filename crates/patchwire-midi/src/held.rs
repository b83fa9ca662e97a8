//! Held-note stack.

use patchwire_units::NoteCell;

use crate::event::NoteEvent;

/// Keys currently held, oldest first.
///
/// The cell always plays the most recently pressed key that is still down.
/// Pressing a held key again moves it to the top. Releasing the top key
/// falls back to the previous one; releasing the last closes the gate but
/// leaves the note, so envelopes decay at the old pitch. Releases of keys
/// that are not held change nothing.
#[derive(Debug, Default, Clone)]
pub struct HeldNotes {
    notes: Vec<u8>,
}

impl HeldNotes {
    /// No keys held.
    pub fn new() -> Self {
        Self {
            notes: Vec::with_capacity(128),
        }
    }

    /// Keys held, oldest first.
    pub fn notes(&self) -> &[u8] {
        &self.notes
    }

    /// Updates the stack and writes the result to `cell`.
    pub fn apply(&mut self, event: NoteEvent, cell: &NoteCell) {
        match event {
            NoteEvent::On { note, .. } => {
                self.notes.retain(|&n| n != note);
                self.notes.push(note);
                cell.set_note(note);
                cell.set_gate(true);
            }
            NoteEvent::Off { note } => {
                let before = self.notes.len();
                self.notes.retain(|&n| n != note);
                if self.notes.len() == before {
                    return;
                }
                match self.notes.last() {
                    Some(&last) => cell.set_note(last),
                    None => cell.set_gate(false),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(note: u8) -> NoteEvent {
        NoteEvent::On { note, velocity: 90 }
    }

    fn off(note: u8) -> NoteEvent {
        NoteEvent::Off { note }
    }

    #[test]
    fn last_pressed_key_plays() {
        let cell = NoteCell::new();
        let mut held = HeldNotes::new();
        held.apply(on(60), &cell);
        held.apply(on(67), &cell);
        assert_eq!(cell.note(), 67);
        assert!(cell.gate());
        assert_eq!(held.notes(), &[60, 67]);
    }

    #[test]
    fn releasing_top_key_falls_back() {
        let cell = NoteCell::new();
        let mut held = HeldNotes::new();
        held.apply(on(60), &cell);
        held.apply(on(64), &cell);
        held.apply(on(67), &cell);
        held.apply(off(67), &cell);
        assert_eq!(cell.note(), 64);
        held.apply(off(60), &cell);
        assert_eq!(cell.note(), 64);
        assert!(cell.gate());
    }

    #[test]
    fn releasing_last_key_closes_gate_and_keeps_note() {
        let cell = NoteCell::new();
        let mut held = HeldNotes::new();
        held.apply(on(72), &cell);
        held.apply(off(72), &cell);
        assert!(!cell.gate());
        assert_eq!(cell.note(), 72);
        assert!(held.notes().is_empty());
    }

    #[test]
    fn repeated_note_on_is_not_stacked_twice() {
        let cell = NoteCell::new();
        let mut held = HeldNotes::new();
        held.apply(on(60), &cell);
        held.apply(on(62), &cell);
        held.apply(on(60), &cell);
        assert_eq!(held.notes(), &[62, 60]);
        assert_eq!(cell.note(), 60);

        held.apply(off(62), &cell);
        assert_eq!(cell.note(), 60);
    }

    #[test]
    fn repressed_key_moves_to_top() {
        let cell = NoteCell::new();
        let mut held = HeldNotes::new();
        held.apply(on(60), &cell);
        held.apply(on(62), &cell);
        held.apply(on(60), &cell);
        assert_eq!(held.notes(), &[62, 60]);

        held.apply(off(50), &cell);
        assert_eq!(cell.note(), 60);
        assert!(cell.gate());
        assert_eq!(held.notes(), &[62, 60]);

        held.apply(off(60), &cell);
        assert_eq!(cell.note(), 62);
        assert!(cell.gate());
    }

    #[test]
    fn stray_note_off_is_harmless() {
        let cell = NoteCell::new();
        let mut held = HeldNotes::new();
        held.apply(off(50), &cell);
        assert!(!cell.gate());

        held.apply(on(64), &cell);
        held.apply(off(50), &cell);
        assert_eq!(cell.note(), 64);
        assert!(cell.gate());
    }
}
