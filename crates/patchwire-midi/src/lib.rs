//! MIDI note input for patchwire.
//!
//! A [`MidiListener`] connects to a MIDI input port and keeps a shared
//! [`NoteCell`](patchwire_units::NoteCell) up to date with the most recently
//! held note and whether any note is held. The `note` and `gate` units read
//! that cell once per block.
//!
//! Message handling is split from the port so it can be exercised without
//! hardware: [`NoteEvent::parse`] decodes raw bytes and [`HeldNotes`] applies
//! them to a cell.
//!
//! # Example
//!
//! ```rust
//! use patchwire_midi::{HeldNotes, NoteEvent};
//! use patchwire_units::NoteCell;
//!
//! let cell = NoteCell::new();
//! let mut held = HeldNotes::new();
//! for msg in [[0x90, 60, 100], [0x90, 64, 100], [0x80, 64, 0]] {
//!     if let Some(event) = NoteEvent::parse(&msg) {
//!         held.apply(event, &cell);
//!     }
//! }
//! assert_eq!(cell.note(), 60);
//! assert!(cell.gate());
//! ```

pub mod error;
pub mod event;
pub mod held;
pub mod listener;

pub use error::{MidiError, Result};
pub use event::NoteEvent;
pub use held::HeldNotes;
pub use listener::{MidiListener, list_ports};
