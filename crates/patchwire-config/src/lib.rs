//! Settings for the patchwire synthesizer.
//!
//! One TOML file configures the audio device, the MIDI input and the log
//! filter. Every field has a default, so an empty file (or no file at all)
//! is a valid configuration.
//!
//! ```toml
//! [audio]
//! device = "USB"
//! channels = 2
//!
//! [midi]
//! enabled = true
//! port = "Keystation"
//!
//! [log]
//! filter = "patchwire=debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use patchwire_config::Settings;
//!
//! let settings = Settings::from_toml("[audio]\nchannels = 2\n").unwrap();
//! assert_eq!(settings.audio.channels, 2);
//! assert!(!settings.midi.enabled);
//! assert_eq!(settings.log.filter, "info");
//! ```

pub mod error;
pub mod paths;
mod settings;

pub use error::ConfigError;
pub use settings::{AudioSettings, LogSettings, MidiSettings, Settings};
