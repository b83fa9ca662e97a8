//! CLI command implementations.

pub mod devices;
pub mod kinds;
pub mod play;
pub mod render;

use patchwire_core::{BLOCK_LEN, SAMPLE_RATE};

/// Number of whole blocks covering `seconds` of audio.
pub(crate) fn blocks_for(seconds: f64) -> anyhow::Result<usize> {
    anyhow::ensure!(
        seconds.is_finite() && seconds > 0.0,
        "duration must be a positive number of seconds, got {seconds}"
    );
    Ok((seconds * f64::from(SAMPLE_RATE) / BLOCK_LEN as f64).ceil() as usize)
}
