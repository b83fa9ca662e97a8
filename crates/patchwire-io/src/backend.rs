//! cpal-based [`AudioBackend`].
//!
//! [`CpalBackend`] opens an `f32` output stream on the default host
//! (ALSA on Linux, CoreAudio on macOS, WASAPI on Windows). The device
//! callback pulls engine blocks through a [`BlockFramer`] and a
//! [`Limiter`], so the engine never sees the device's buffer size and the
//! device never receives a sample outside [-1, 1].

use cpal::traits::{DeviceTrait, StreamTrait};
use patchwire_core::{AudioBackend, OutputStream, RenderCallback, Sample, StreamConfig, StreamError};

use crate::devices::{device_name, find_output_device};
use crate::framer::{BlockFramer, Limiter};

/// Output backend over the platform's default cpal host.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalBackend;

impl CpalBackend {
    /// Creates the backend. No device is touched until [`AudioBackend::open`].
    pub fn new() -> Self {
        Self
    }
}

impl AudioBackend for CpalBackend {
    fn name(&self) -> &str {
        "cpal"
    }

    fn open(
        &self,
        config: &StreamConfig,
        mut render: RenderCallback,
    ) -> Result<Box<dyn OutputStream>, StreamError> {
        let host = cpal::default_host();
        let device = find_output_device(&host, config.device.as_deref())
            .map_err(|e| StreamError::Open(e.to_string()))?;
        let name = device_name(&device).unwrap_or_else(|_| "<unnamed>".to_owned());

        let stream_config = cpal::StreamConfig {
            channels: config.channels,
            sample_rate: config.sample_rate,
            buffer_size: cpal::BufferSize::Fixed(config.block_len as u32),
        };

        let mut framer = BlockFramer::new(config.channels);
        let mut limiter = Limiter::new();
        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    framer.fill(data, |block: &mut [Sample]| {
                        render(block);
                        limiter.process(block);
                    });
                },
                |err| tracing::warn!(error = %err, "output stream error"),
                None,
            )
            .map_err(|e| StreamError::Open(e.to_string()))?;

        tracing::info!(
            host = host.id().name(),
            device = %name,
            channels = config.channels,
            sample_rate = config.sample_rate,
            buffer = config.block_len,
            "output stream opened"
        );
        Ok(Box::new(CpalStream { stream }))
    }
}

/// A cpal output stream opened by [`CpalBackend`].
pub struct CpalStream {
    stream: cpal::Stream,
}

impl OutputStream for CpalStream {
    fn start(&mut self) -> Result<(), StreamError> {
        self.stream
            .play()
            .map_err(|e| StreamError::Start(e.to_string()))
    }

    fn stop(&mut self) -> Result<(), StreamError> {
        self.stream
            .pause()
            .map_err(|e| StreamError::Stop(e.to_string()))
    }

    fn close(self: Box<Self>) -> Result<(), StreamError> {
        drop(self.stream);
        tracing::debug!("output stream closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_name() {
        assert_eq!(CpalBackend::new().name(), "cpal");
    }

    #[test]
    fn unknown_device_fails_to_open() {
        let config = StreamConfig {
            device: Some("no-such-device-9f3a".into()),
            ..StreamConfig::default()
        };
        let result = CpalBackend::new().open(&config, Box::new(|block| block.fill(0.0)));
        assert!(matches!(result, Err(StreamError::Open(_))));
    }
}
