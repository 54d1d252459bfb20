//! MIDI command model — the logical messages the engine produces.

/// All Notes Off controller number.
const CC_ALL_NOTES_OFF: u8 = 123;

/// A logical MIDI command. The mapping engine only ever emits these; it
/// never synthesizes audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiCommand {
    NoteOn { channel: u8, pitch: u8, velocity: u8 },
    NoteOff { channel: u8, pitch: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    ProgramChange { channel: u8, program: u8 },
    AllNotesOff { channel: u8 },
}

impl MidiCommand {
    /// Wire bytes for this command.
    ///
    /// - Note On:  `[0x90 | channel, pitch, velocity]`
    /// - Note Off: `[0x80 | channel, pitch, 0]`
    /// - CC:       `[0xB0 | channel, controller, value]`
    /// - Program:  `[0xC0 | channel, program]`
    pub fn to_bytes(self) -> Vec<u8> {
        match self {
            MidiCommand::NoteOn {
                channel,
                pitch,
                velocity,
            } => vec![0x90 | (channel & 0x0F), pitch & 0x7F, velocity & 0x7F],
            MidiCommand::NoteOff { channel, pitch } => {
                vec![0x80 | (channel & 0x0F), pitch & 0x7F, 0]
            }
            MidiCommand::ControlChange {
                channel,
                controller,
                value,
            } => vec![0xB0 | (channel & 0x0F), controller & 0x7F, value & 0x7F],
            MidiCommand::ProgramChange { channel, program } => {
                vec![0xC0 | (channel & 0x0F), program & 0x7F]
            }
            MidiCommand::AllNotesOff { channel } => {
                vec![0xB0 | (channel & 0x0F), CC_ALL_NOTES_OFF, 0]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_on_bytes() {
        let cmd = MidiCommand::NoteOn {
            channel: 1,
            pitch: 60,
            velocity: 127,
        };
        assert_eq!(cmd.to_bytes(), vec![0x91, 60, 127]);
    }

    #[test]
    fn note_off_bytes() {
        let cmd = MidiCommand::NoteOff {
            channel: 0,
            pitch: 64,
        };
        assert_eq!(cmd.to_bytes(), vec![0x80, 64, 0]);
    }

    #[test]
    fn control_change_bytes() {
        let cmd = MidiCommand::ControlChange {
            channel: 2,
            controller: 7,
            value: 100,
        };
        assert_eq!(cmd.to_bytes(), vec![0xB2, 7, 100]);
    }

    #[test]
    fn program_change_is_two_bytes() {
        let cmd = MidiCommand::ProgramChange {
            channel: 0,
            program: 21,
        };
        assert_eq!(cmd.to_bytes(), vec![0xC0, 21]);
    }

    #[test]
    fn all_notes_off_is_cc_123() {
        let cmd = MidiCommand::AllNotesOff { channel: 3 };
        assert_eq!(cmd.to_bytes(), vec![0xB3, 123, 0]);
    }

    #[test]
    fn data_bytes_are_masked_to_seven_bits() {
        let cmd = MidiCommand::NoteOn {
            channel: 0,
            pitch: 200,
            velocity: 255,
        };
        assert_eq!(cmd.to_bytes(), vec![0x90, 72, 127]);
    }
}
