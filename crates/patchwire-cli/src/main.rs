//! patchwire CLI - play and render patches on the patchwire engine.

mod commands;
mod patches;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use patchwire_config::{Settings, paths};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "patchwire")]
#[command(author, version, about = "patchwire modular synthesizer", long_about = None)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List unit kinds and their inputs
    Kinds(commands::kinds::KindsArgs),

    /// List audio output devices and MIDI inputs
    Devices(commands::devices::DevicesArgs),

    /// Render a built-in patch to a WAV file
    Render(commands::render::RenderArgs),

    /// Play a built-in patch on the audio device
    Play(commands::play::PlayArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings_path = cli.config.unwrap_or_else(paths::default_settings_path);
    let settings = Settings::load_or_default(&settings_path)?;
    init_tracing(&settings.log.filter);
    tracing::debug!(path = %settings_path.display(), "settings loaded");

    match cli.command {
        Commands::Kinds(args) => commands::kinds::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Play(args) => commands::play::run(args, &settings),
    }
}

/// `RUST_LOG` wins over the settings filter; an unparsable filter falls
/// back to `info`.
fn init_tracing(settings_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
