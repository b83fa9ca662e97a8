//! Audio output for the patchwire engine.
//!
//! This crate provides:
//!
//! - **Real-time output**: [`CpalBackend`], an [`AudioBackend`] over cpal
//!   that [`Engine::start`] drives from the device callback
//! - **Block framing**: [`BlockFramer`] adapts 256-sample engine blocks to
//!   whatever buffer size and channel count the device asks for
//! - **Output safety**: [`Limiter`] keeps the device from ever clipping
//! - **WAV export**: [`write_wav`] and [`render_to_wav`] via hound
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use patchwire_core::{Engine, StreamConfig};
//! use patchwire_io::CpalBackend;
//!
//! let engine = Arc::new(Engine::new());
//! // ... wire a patch into engine input "in" ...
//! engine.start(Box::new(CpalBackend::new()), StreamConfig::default())?;
//! std::thread::sleep(std::time::Duration::from_secs(2));
//! engine.stop()?;
//! ```
//!
//! [`AudioBackend`]: patchwire_core::AudioBackend
//! [`Engine::start`]: patchwire_core::Engine::start

mod backend;
mod devices;
mod framer;
mod wav;

pub use backend::{CpalBackend, CpalStream};
pub use devices::{AudioDevice, default_output_device, list_devices};
pub use framer::{BlockFramer, Limiter};
pub use wav::{WavSpec, render_to_wav, render_to_wav_with, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Audio device not found: {0}")]
    DeviceNotFound(String),

    /// Underlying I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
