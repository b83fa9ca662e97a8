//! Offline render command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use patchwire_core::Engine;
use patchwire_io::{WavSpec, render_to_wav_with};
use patchwire_patch::Patch;
use patchwire_units::NoteCell;

use super::blocks_for;
use crate::patches::{DemoPatch, script_notes};

#[derive(Args)]
pub struct RenderArgs {
    /// Duration in seconds
    #[arg(short, long, default_value_t = 5.0)]
    seconds: f64,

    /// Output WAV file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Built-in patch to render
    #[arg(short, long, value_enum, default_value_t = DemoPatch::Drone)]
    patch: DemoPatch,

    /// Output channel count
    #[arg(long, default_value_t = 1)]
    channels: u16,

    /// Bit depth (32 writes float)
    #[arg(long, default_value_t = 32)]
    bits: u16,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let blocks = blocks_for(args.seconds)?;
    anyhow::ensure!(
        matches!(args.bits, 16 | 24 | 32),
        "unsupported bit depth: {}",
        args.bits
    );

    let engine = Arc::new(Engine::new());
    let notes = Arc::new(NoteCell::new());
    let mut patch = Patch::new(Arc::clone(&engine), notes.clone());
    args.patch.build(&mut patch)?;
    println!(
        "Rendering {:?} ({} objects), {:.2}s...",
        args.patch,
        patch.objects().len(),
        args.seconds
    );

    let pb = ProgressBar::new(blocks as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} blocks")?
            .progress_chars("##-"),
    );

    let scripted = args.patch.needs_notes();
    if scripted {
        script_notes(&notes, 0);
    }
    let spec = WavSpec {
        channels: args.channels,
        bits_per_sample: args.bits,
        ..WavSpec::default()
    };
    let written = render_to_wav_with(&engine, blocks, &args.output, spec, |n| {
        if scripted {
            script_notes(&notes, n);
        }
        pb.set_position(n as u64);
    })?;
    pb.finish_with_message("done");

    patch.clear();
    println!("Wrote {} samples to {}", written, args.output.display());
    Ok(())
}
