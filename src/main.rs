//! Noteframe CLI - hold MIDI notes to show images

use clap::Parser;
use noteframe::app::{App, DEFAULT_FPS};
use noteframe::config::Config;
use noteframe::display::TerminalDisplay;
use noteframe::images::ImageLibrary;
use noteframe::midi_input::MidiInputHandler;
use noteframe::NoteFrameError;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "noteframe")]
#[command(about = "Realtime MIDI -> images (display while note held) in a grid", long_about = None)]
struct Cli {
    /// Path to JSON config
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// MIDI input port name (substring match allowed)
    #[arg(short, long)]
    port: Option<String>,

    /// List MIDI input ports and exit
    #[arg(short, long)]
    list: bool,

    /// Ticks per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Stop after this many frames (runs until Esc/q when omitted)
    #[arg(long)]
    frames: Option<u64>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so they stay out of the terminal display
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    if cli.list {
        let ports = MidiInputHandler::port_names()?;
        if ports.is_empty() {
            println!("No MIDI input ports found.");
        }
        for (i, name) in ports.iter().enumerate() {
            println!("{}: {}", i, name);
        }
        return Ok(());
    }

    let config = Config::load(&cli.config)?;

    let mut midi = MidiInputHandler::new();
    if let Err(e) = midi.connect(cli.port.as_deref()) {
        report_port_error(&e);
        std::process::exit(1);
    }

    let library = ImageLibrary::load(&config.image_folder, &config.note_files());
    let mut app = App::from_config(&config, library).with_frame_limit(cli.frames.unwrap_or(0));

    let mut display = TerminalDisplay::new()?;
    let result = app.run(&mut midi, &mut display, cli.fps);
    display.restore()?;
    midi.disconnect();

    result?;
    println!("Goodbye.");
    Ok(())
}

fn report_port_error(error: &NoteFrameError) {
    eprintln!("{}", error);
    if let NoteFrameError::PortNotFound { available, .. } = error {
        eprintln!("Available ports:");
        for port in available {
            eprintln!("   {}", port);
        }
    }
}
