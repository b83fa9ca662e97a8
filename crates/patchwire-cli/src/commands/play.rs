//! Real-time playback command.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use clap::Args;
use patchwire_config::Settings;
use patchwire_core::Engine;
use patchwire_io::CpalBackend;
use patchwire_midi::MidiListener;
use patchwire_patch::Patch;
use patchwire_units::NoteCell;

use super::blocks_for;
use crate::patches::DemoPatch;

#[derive(Args)]
pub struct PlayArgs {
    /// Stop after this many seconds (runs until Ctrl+C otherwise)
    #[arg(short, long)]
    seconds: Option<f64>,

    /// Built-in patch to play
    #[arg(short, long, value_enum, default_value_t = DemoPatch::Drone)]
    patch: DemoPatch,

    /// Output device (partial name), overrides the settings file
    #[arg(short, long)]
    device: Option<String>,

    /// Open a MIDI input even if the settings file does not enable it
    #[arg(long)]
    midi: bool,

    /// MIDI input port (partial name), overrides the settings file
    #[arg(long)]
    midi_port: Option<String>,
}

pub fn run(args: PlayArgs, settings: &Settings) -> anyhow::Result<()> {
    let limit = args
        .seconds
        .map(|s| blocks_for(s).map(|_| Duration::from_secs_f64(s)))
        .transpose()?;

    let mut config = settings.audio.stream_config();
    if args.device.is_some() {
        config.device = args.device;
    }

    let engine = Arc::new(Engine::new());
    let notes = Arc::new(NoteCell::new());
    let mut patch = Patch::new(Arc::clone(&engine), notes.clone());
    args.patch.build(&mut patch)?;

    let listener = if args.midi || settings.midi.enabled {
        let port = args.midi_port.as_deref().or(settings.midi.port.as_deref());
        let listener = MidiListener::connect(port, Arc::clone(&notes))?;
        println!("MIDI input: {}", listener.port_name());
        Some(listener)
    } else {
        if args.patch.needs_notes() {
            tracing::warn!("patch plays MIDI notes but no MIDI input is enabled");
        }
        None
    };

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        r.store(false, Ordering::SeqCst);
    })?;

    engine.start(Box::new(CpalBackend::new()), config)?;
    println!("Playing {:?}... Press Ctrl+C to stop.", args.patch);

    let started = Instant::now();
    while running.load(Ordering::SeqCst) {
        if limit.is_some_and(|limit| started.elapsed() >= limit) {
            break;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    engine.stop()?;
    if let Some(listener) = listener {
        listener.close();
    }
    patch.clear();
    println!("Done!");
    Ok(())
}
