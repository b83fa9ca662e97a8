//! Process-wide signal constants.
//!
//! Every block in the graph has exactly [`BLOCK_LEN`] samples and the whole
//! engine runs at [`SAMPLE_RATE`]. Pitch signals use 0.1 per octave with
//! 0.0 at A4 (440 Hz), so a semitone is 1/120.

use crate::fast_math::fast_exp2;

/// One signal value. Nominally in [-1, 1] but never clamped by the type.
pub type Sample = f64;

/// Number of samples in one block.
pub const BLOCK_LEN: usize = 256;

/// Engine sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44100;

/// Attenuation applied to every block the engine hands to its caller.
pub const HEADROOM: Sample = 0.9;

/// Trigger and gate inputs are high when strictly above this level.
pub const TRIGGER_THRESHOLD: Sample = 0.5;

/// Converts a pitch signal to a frequency in Hz.
///
/// `440 × 2^(10 × pitch)`: 0.0 is A4, +0.1 is one octave up.
///
/// # Examples
///
/// ```
/// use patchwire_core::pitch_to_hz;
///
/// assert!((pitch_to_hz(0.0) - 440.0).abs() < 1e-3);
/// assert!((pitch_to_hz(0.1) - 880.0).abs() < 1e-3);
/// assert!((pitch_to_hz(-0.1) - 220.0).abs() < 1e-3);
/// ```
#[inline]
pub fn pitch_to_hz(pitch: Sample) -> f64 {
    440.0 * fast_exp2(pitch * 10.0)
}

/// Allocates a silent block of [`BLOCK_LEN`] samples.
pub fn zeroed_block() -> Vec<Sample> {
    vec![0.0; BLOCK_LEN]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semitone_steps_follow_equal_temperament() {
        let a4 = pitch_to_hz(0.0);
        let a_sharp4 = pitch_to_hz(1.0 / 120.0);
        let ratio = a_sharp4 / a4;
        let expected = libm::exp2(1.0 / 12.0);
        assert!(
            (ratio - expected).abs() < 1e-6,
            "semitone ratio {ratio}, expected {expected}"
        );
    }

    #[test]
    fn zeroed_block_has_block_len() {
        let block = zeroed_block();
        assert_eq!(block.len(), BLOCK_LEN);
        assert!(block.iter().all(|&s| s == 0.0));
    }
}
