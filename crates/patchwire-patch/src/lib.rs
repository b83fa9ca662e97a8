//! Patch controller for patchwire.
//!
//! A [`Patch`] owns the named objects of a running synthesizer and applies
//! edits to the engine's graph: creating units, wiring an object's output
//! into another object's input, changing constants, and tearing objects
//! down. Every edit takes the engine lock for its whole duration, so the
//! audio thread only ever sees complete edits.
//!
//! Each unit object is wrapped in a [`Dup`](patchwire_core::Dup) registered
//! as an engine ticker, which lets one object feed any number of inputs.
//! The object named `engine` is built in and stands for the engine's root
//! input.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use patchwire_core::{Engine, HEADROOM};
//! use patchwire_patch::Patch;
//! use patchwire_units::NoteCell;
//!
//! let engine = Arc::new(Engine::new());
//! let mut patch = Patch::new(Arc::clone(&engine), Arc::new(NoteCell::new()));
//!
//! patch.new_object("level", "value", 0.5).unwrap();
//! patch.new_object("clip", "clip", 0.0).unwrap();
//! patch.connect("level", "clip", "in").unwrap();
//! patch.connect("clip", "engine", "in").unwrap();
//!
//! assert_eq!(engine.process()[0], 0.5 * HEADROOM);
//!
//! patch.set("level", 4.0).unwrap();
//! assert_eq!(engine.process()[0], HEADROOM);
//! ```

pub mod error;
pub mod patch;

pub use error::{PatchError, Result};
pub use patch::{Connection, ENGINE_OBJECT, ObjectInfo, Patch};
