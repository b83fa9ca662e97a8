//! WAV export.

use std::path::Path;

use hound::{SampleFormat, WavWriter};
use patchwire_core::{Engine, SAMPLE_RATE, Sample, zeroed_block};

use crate::Result;

/// WAV output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels. The mono signal is copied to each.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth: 32 writes IEEE float, anything else integer PCM.
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 32,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels.max(1),
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Writes mono samples to a WAV file, duplicating them across channels.
///
/// Integer formats clamp to the representable range.
///
/// # Example
/// ```ignore
/// let samples = engine.render(172); // about one second
/// write_wav("out.wav", &samples, WavSpec::default())?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[Sample], spec: WavSpec) -> Result<()> {
    let mut writer = WavWriter::create(path, spec.into())?;
    write_samples(&mut writer, samples, spec)?;
    writer.finalize()?;
    Ok(())
}

/// Renders `blocks` blocks from `engine` into a mono float WAV file at the
/// engine sample rate. Returns the number of samples written.
pub fn render_to_wav<P: AsRef<Path>>(engine: &Engine, blocks: usize, path: P) -> Result<usize> {
    render_to_wav_with(engine, blocks, path, WavSpec::default(), |_| {})
}

/// Like [`render_to_wav`] with an explicit spec. `progress` is called after
/// each block with the number of blocks rendered so far.
pub fn render_to_wav_with<P, F>(
    engine: &Engine,
    blocks: usize,
    path: P,
    spec: WavSpec,
    mut progress: F,
) -> Result<usize>
where
    P: AsRef<Path>,
    F: FnMut(usize),
{
    let path = path.as_ref();
    let mut writer = WavWriter::create(path, spec.into())?;
    let mut block = zeroed_block();
    for n in 1..=blocks {
        engine.process_into(&mut block);
        write_samples(&mut writer, &block, spec)?;
        progress(n);
    }
    writer.finalize()?;

    let written = blocks * block.len();
    tracing::info!(path = %path.display(), samples = written, "rendered WAV");
    Ok(written)
}

fn write_samples<W>(writer: &mut WavWriter<W>, samples: &[Sample], spec: WavSpec) -> Result<()>
where
    W: std::io::Write + std::io::Seek,
{
    let channels = spec.channels.max(1);
    if spec.bits_per_sample == 32 {
        for &sample in samples {
            for _ in 0..channels {
                writer.write_sample(sample as f32)?;
            }
        }
    } else {
        let max_val = f64::from(1i32 << (spec.bits_per_sample - 1));
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            for _ in 0..channels {
                writer.write_sample(int_sample)?;
            }
        }
    }
    Ok(())
}
