//! Device listing command.

use clap::Args;
use patchwire_io::list_devices;

#[derive(Args)]
pub struct DevicesArgs {
    /// Skip MIDI input ports
    #[arg(long)]
    no_midi: bool,
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    let devices = list_devices()?;

    println!("Audio Output Devices");
    println!("====================\n");
    if devices.is_empty() {
        println!("  (none)");
    }
    for (idx, device) in devices.iter().enumerate() {
        let default = if device.is_default { " (default)" } else { "" };
        println!(
            "  [{}] {} ({} Hz, {} ch){}",
            idx, device.name, device.default_sample_rate, device.channels, default
        );
    }

    if !args.no_midi {
        println!("\nMIDI Input Ports");
        println!("================\n");
        match patchwire_midi::list_ports() {
            Ok(ports) if ports.is_empty() => println!("  (none)"),
            Ok(ports) => {
                for (idx, port) in ports.iter().enumerate() {
                    println!("  [{idx}] {port}");
                }
            }
            Err(e) => println!("  unavailable: {e}"),
        }
    }

    println!();
    println!("Tip: pass a partial name in the [audio] device or [midi] port setting.");
    Ok(())
}
