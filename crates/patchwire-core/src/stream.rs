//! Real-time audio stream abstraction consumed by the engine.
//!
//! The engine does not talk to audio hardware itself. It asks an
//! [`AudioBackend`] to open an [`OutputStream`] that calls a
//! [`RenderCallback`] once per block from the device thread. Backends live
//! outside this crate (`patchwire-io` provides one over cpal); tests use
//! in-process fakes.
//!
//! Each stream call is fallible and reported as a [`StreamError`].

use crate::error::StreamError;
use crate::signal::{BLOCK_LEN, SAMPLE_RATE, Sample};

/// Produces the next block of mono samples. Called on the audio thread.
pub type RenderCallback = Box<dyn FnMut(&mut [Sample]) + Send>;

/// Parameters for opening an output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Device channel count. The mono signal is copied to every channel.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Samples per render callback.
    pub block_len: usize,
    /// Output device name filter; `None` for the system default.
    pub device: Option<String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            block_len: BLOCK_LEN,
            device: None,
        }
    }
}

/// Opens output streams.
///
/// The backend is moved onto the thread that owns the stream, so it must be
/// `Send`; the stream itself never leaves that thread.
pub trait AudioBackend: Send {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Opens (but does not start) an output stream driven by `render`.
    fn open(
        &self,
        config: &StreamConfig,
        render: RenderCallback,
    ) -> Result<Box<dyn OutputStream>, StreamError>;
}

/// An opened output stream.
pub trait OutputStream {
    /// Starts calling the render callback.
    fn start(&mut self) -> Result<(), StreamError>;

    /// Stops calling the render callback. No callback runs after this returns.
    fn stop(&mut self) -> Result<(), StreamError>;

    /// Releases the stream.
    fn close(self: Box<Self>) -> Result<(), StreamError>;
}
