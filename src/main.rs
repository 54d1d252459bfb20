//! Squeezebox CLI — inspect the mapping tables, preview practice keys, and
//! play decoded songs through a MIDI output.

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};

use squeezebox::config::{DataPaths, Settings};
use squeezebox::mapper::{BassMapper, Mapper, KEYBOARD_LAYOUT};
use squeezebox::midi::{MidiOutput, ToneGenerator};
use squeezebox::perform::FULL_VELOCITY;
use squeezebox::song::{self, practice};

#[derive(Parser)]
#[command(name = "squeezebox", version, about = "A keyboard-driven accordion core")]
struct Cli {
    /// Data directory holding scales.txt, modes.txt, basses.txt, and MIDI/.
    /// Overrides the configured directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available MIDI output devices.
    Devices,
    /// Show the loaded scale, key, mode, and bass tables.
    Tables,
    /// Print the pitch each physical key plays under a selection.
    Map {
        #[arg(long, default_value_t = 0)]
        scale: usize,
        #[arg(long, default_value_t = 0)]
        key: usize,
        #[arg(long, default_value_t = 0)]
        mode: usize,
    },
    /// Print the four-key practice assignment for a song.
    Practice { file: PathBuf },
    /// List songs in the data directory.
    Songs,
    /// Play a decoded song through a MIDI output.
    Play {
        file: PathBuf,
        /// MIDI output device name (substring match).
        #[arg(long)]
        device: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let settings = Settings::load().unwrap_or_default();
    let data_dir = cli.data_dir.unwrap_or_else(|| settings.data_dir());
    let paths = DataPaths::in_dir(&data_dir);

    match cli.command {
        Command::Devices => {
            let devices = MidiOutput::list_devices();
            if devices.is_empty() {
                println!("no MIDI output devices found");
            }
            for name in devices {
                println!("{name}");
            }
        }

        Command::Tables => {
            let (mapper, bass) = load_mappers(&paths)?;
            println!("scales:");
            for name in mapper.scale_names() {
                println!("  {name}");
            }
            println!("keys:");
            for name in mapper.key_names() {
                println!("  {name}");
            }
            println!("modes:");
            for name in mapper.mode_names() {
                println!("  {name}");
            }
            println!("bass keys:");
            for name in bass.key_names() {
                println!("  {name}");
            }
        }

        Command::Map { scale, key, mode } => {
            let (mut mapper, _) = load_mappers(&paths)?;
            mapper.try_set_scale_index(scale)?;
            mapper.try_set_key_index(key)?;
            mapper.try_set_mode_index(mode)?;

            println!(
                "scale {} / key {} / mode {}",
                mapper.scale_names()[scale],
                mapper.key_names()[key],
                mapper.mode_names()[mode],
            );
            for (i, ch) in KEYBOARD_LAYOUT.chars().enumerate() {
                match mapper.pitch(ch) {
                    Some(pitch) => print!("{ch}:{pitch:>3}"),
                    None => print!("{ch}:  -"),
                }
                if i % 10 == 9 {
                    println!();
                } else {
                    print!("  ");
                }
            }
        }

        Command::Practice { file } => {
            let clusters = song::load_song(&file)?;
            let keys = practice::assign(&clusters);
            if keys.is_empty() {
                println!("song has no notes");
                return Ok(());
            }
            for (i, (cluster, key)) in clusters.iter().zip(&keys).enumerate() {
                println!(
                    "{i:>4}  {key}  top {:>3}  ({} note{})",
                    cluster.top_pitch(),
                    cluster.notes.len(),
                    if cluster.notes.len() == 1 { "" } else { "s" },
                );
            }
        }

        Command::Songs => {
            let files = song::midi_files(&paths.songs)?;
            if files.is_empty() {
                println!("no songs in {}", paths.songs.display());
            }
            for file in files {
                println!("{}", file.display());
            }
        }

        Command::Play { file, device } => {
            let clusters = song::load_song(&file)?;
            if clusters.is_empty() {
                println!("song has no notes");
                return Ok(());
            }

            let device = device.or(settings.device_name.clone());
            let mut out = MidiOutput::connect(device.as_deref())?;
            println!("playing {} on {}", file.display(), out.port_name());

            let channel = settings.channel;
            out.program_change(channel, settings.program());
            // Channel volume; key presses themselves are full velocity.
            out.control_change(channel, 7, 100);

            let running = Arc::new(AtomicBool::new(true));
            let flag = Arc::clone(&running);
            ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))?;

            for cluster in &clusters {
                if !running.load(Ordering::SeqCst) {
                    break;
                }
                for note in &cluster.notes {
                    out.note_on(channel, note.pitch, FULL_VELOCITY);
                }
                thread::sleep(Duration::from_secs_f64(cluster.duration().max(0.05)));
                for note in &cluster.notes {
                    out.note_off(channel, note.pitch);
                }
            }

            out.all_notes_off(channel);
        }
    }

    Ok(())
}

fn load_mappers(paths: &DataPaths) -> io::Result<(Mapper, BassMapper)> {
    let mut mapper = Mapper::new();
    mapper.init(&paths.scales, &paths.modes)?;
    let mut bass = BassMapper::new();
    bass.init(&paths.basses)?;
    Ok((mapper, bass))
}
