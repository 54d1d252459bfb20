//! Tone generators — dispatch logical MIDI commands to a real output port
//! or, for tests and dry runs, an in-memory log.

use std::io;

use midir::{MidiOutput as MidirOutput, MidiOutputConnection};

use super::command::MidiCommand;

/// Anything that accepts the engine's MIDI commands.
pub trait ToneGenerator {
    fn send(&mut self, command: MidiCommand);

    fn note_on(&mut self, channel: u8, pitch: u8, velocity: u8) {
        self.send(MidiCommand::NoteOn {
            channel,
            pitch,
            velocity,
        });
    }

    fn note_off(&mut self, channel: u8, pitch: u8) {
        self.send(MidiCommand::NoteOff { channel, pitch });
    }

    fn control_change(&mut self, channel: u8, controller: u8, value: u8) {
        self.send(MidiCommand::ControlChange {
            channel,
            controller,
            value,
        });
    }

    fn program_change(&mut self, channel: u8, program: u8) {
        self.send(MidiCommand::ProgramChange { channel, program });
    }

    fn all_notes_off(&mut self, channel: u8) {
        self.send(MidiCommand::AllNotesOff { channel });
    }
}

/// A connected MIDI output port.
pub struct MidiOutput {
    connection: MidiOutputConnection,
    port_name: String,
}

impl MidiOutput {
    /// Connect to an output port matching `device_name` as a substring, or
    /// the first available port.
    pub fn connect(device_name: Option<&str>) -> io::Result<Self> {
        let midi_out = MidirOutput::new("squeezebox")
            .map_err(|e| io::Error::other(format!("MIDI init: {e}")))?;

        let ports = midi_out.ports();
        if ports.is_empty() {
            return Err(io::Error::other("no MIDI output ports available"));
        }

        let (port, port_name) = if let Some(name_filter) = device_name {
            ports
                .iter()
                .find_map(|p| {
                    let name = midi_out.port_name(p).unwrap_or_default();
                    if name.contains(name_filter) {
                        Some((p.clone(), name))
                    } else {
                        None
                    }
                })
                .ok_or_else(|| {
                    io::Error::other(format!("MIDI device matching '{name_filter}' not found"))
                })?
        } else {
            let p = ports[0].clone();
            let name = midi_out
                .port_name(&p)
                .unwrap_or_else(|_| "unknown".to_string());
            (p, name)
        };

        let connection = midi_out
            .connect(&port, "squeezebox-output")
            .map_err(|e| io::Error::other(format!("MIDI connect: {e}")))?;

        Ok(Self {
            connection,
            port_name,
        })
    }

    /// Get the connected port name.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// List all available MIDI output device names.
    pub fn list_devices() -> Vec<String> {
        let Ok(midi_out) = MidirOutput::new("squeezebox-list") else {
            return Vec::new();
        };
        midi_out
            .ports()
            .iter()
            .filter_map(|p| midi_out.port_name(p).ok())
            .collect()
    }
}

impl ToneGenerator for MidiOutput {
    fn send(&mut self, command: MidiCommand) {
        // A failed send is not actionable mid-performance; drop it.
        let _ = self.connection.send(&command.to_bytes());
    }
}

/// Records every command instead of playing it.
#[derive(Debug, Default)]
pub struct CommandLog {
    commands: Vec<MidiCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[MidiCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl ToneGenerator for CommandLog {
    fn send(&mut self, command: MidiCommand) {
        self.commands.push(command);
    }
}
