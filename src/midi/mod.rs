//! Outbound MIDI — the command model the mapping engine emits and the tone
//! generators that dispatch it.

pub mod command;
pub mod output;

pub use command::MidiCommand;
pub use output::{CommandLog, MidiOutput, ToneGenerator};
