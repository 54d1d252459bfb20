//! Performance session — routes key presses and releases through the
//! mappers and tracks what is sounding.
//!
//! The session owns both mappers and the practice-mode state. It emits
//! [`MidiCommand`]s and leaves dispatch to the caller's tone generator, so
//! every path here is testable without a MIDI port.

use std::collections::{HashMap, HashSet};

use crate::mapper::{BassMapper, Mapper};
use crate::midi::MidiCommand;
use crate::song::{practice, Cluster};

/// Key presses always strike at full velocity; dynamics come from the
/// bellows (volume control), not the keyboard.
pub const FULL_VELOCITY: u8 = 127;

/// Presses closer together than this are treated as an accidental mash.
const DEBOUNCE_MS: u64 = 35;

/// Which lookup a key press goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// One key, one pitch, via the melodic mapper.
    Melodic,
    /// One key, one chord, via the bass mapper.
    Bass,
    /// Keys trigger the next cluster of a loaded song.
    Practice,
}

/// Live performance state over the two mappers.
pub struct Session {
    mapper: Mapper,
    bass: BassMapper,
    channel: u8,
    mode: PlayMode,
    hard_mode: bool,
    playing: HashSet<u8>,
    pressed: HashSet<char>,
    song: Vec<Cluster>,
    song_keys: Vec<char>,
    position: usize,
    held_clusters: HashMap<char, usize>,
    last_press_ms: Option<u64>,
}

impl Session {
    /// Build a session around initialized mappers.
    pub fn new(mapper: Mapper, bass: BassMapper, channel: u8) -> Self {
        Self {
            mapper,
            bass,
            channel,
            mode: PlayMode::Melodic,
            hard_mode: false,
            playing: HashSet::new(),
            pressed: HashSet::new(),
            song: Vec::new(),
            song_keys: Vec::new(),
            position: 0,
            held_clusters: HashMap::new(),
            last_press_ms: None,
        }
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn bass(&self) -> &BassMapper {
        &self.bass
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn hard_mode(&self) -> bool {
        self.hard_mode
    }

    pub fn set_hard_mode(&mut self, on: bool) {
        self.hard_mode = on;
    }

    /// Switch between melodic and bass play. Leaving practice goes through
    /// [`Session::stop_practice`] so nothing keeps ringing.
    pub fn set_mode(&mut self, mode: PlayMode) -> Vec<MidiCommand> {
        let mut commands = Vec::new();
        if self.mode == PlayMode::Practice && mode != PlayMode::Practice {
            commands = self.stop_practice();
        }
        self.mode = mode;
        commands
    }

    /// Advance to the next scale, wrapping at the end of the table.
    pub fn next_scale(&mut self) -> Option<usize> {
        let len = self.mapper.scale_names().len();
        let current = self.mapper.selection()?.scale;
        let next = (current + 1) % len;
        self.mapper.set_scale_index(next);
        Some(next)
    }

    /// Advance to the next mode, wrapping at the end of the table.
    pub fn next_mode(&mut self) -> Option<usize> {
        let len = self.mapper.mode_names().len();
        let current = self.mapper.selection()?.mode;
        let next = (current + 1) % len;
        self.mapper.set_mode_index(next);
        Some(next)
    }

    /// Advance to the next key, keeping the bass mapper's key in step.
    pub fn next_key(&mut self) -> Option<usize> {
        let len = self.mapper.key_names().len();
        let current = self.mapper.selection()?.key;
        let next = (current + 1) % len;
        self.mapper.set_key_index(next);
        self.bass.set_key_index(next);
        Some(next)
    }

    /// Load a decoded song and enter practice mode. An empty song is
    /// rejected and the session stays in its current mode.
    pub fn start_practice(&mut self, song: Vec<Cluster>) -> bool {
        let keys = practice::assign(&song);
        if keys.is_empty() {
            return false;
        }
        self.song = song;
        self.song_keys = keys;
        self.position = 0;
        self.held_clusters.clear();
        self.last_press_ms = None;
        self.mode = PlayMode::Practice;
        true
    }

    /// Leave practice mode, silencing everything.
    pub fn stop_practice(&mut self) -> Vec<MidiCommand> {
        self.song.clear();
        self.song_keys.clear();
        self.position = 0;
        self.held_clusters.clear();
        self.pressed.clear();
        self.playing.clear();
        self.mode = PlayMode::Melodic;
        vec![MidiCommand::AllNotesOff {
            channel: self.channel,
        }]
    }

    /// The practice key that advances the song next (hard-mode highlight).
    pub fn highlight(&self) -> Option<char> {
        self.song_keys.get(self.position).copied()
    }

    /// The practice keys after the highlight, for preview display.
    pub fn upcoming(&self, count: usize) -> &[char] {
        let start = (self.position + 1).min(self.song_keys.len());
        let end = (start + count).min(self.song_keys.len());
        &self.song_keys[start..end]
    }

    /// Whether every cluster of the practice song has been triggered.
    pub fn finished(&self) -> bool {
        self.mode == PlayMode::Practice && self.position >= self.song.len()
    }

    /// Handle a key press at `now_ms` (caller-supplied monotonic
    /// milliseconds, used only for practice debouncing).
    pub fn key_pressed(&mut self, key: char, now_ms: u64) -> Vec<MidiCommand> {
        match self.mode {
            PlayMode::Melodic => self.press_melodic(key),
            PlayMode::Bass => self.press_bass(key),
            PlayMode::Practice => self.press_practice(key, now_ms),
        }
    }

    /// Handle a key release.
    pub fn key_released(&mut self, key: char) -> Vec<MidiCommand> {
        match self.mode {
            PlayMode::Melodic => self.release_melodic(key),
            PlayMode::Bass => self.release_bass(key),
            PlayMode::Practice => self.release_practice(key),
        }
    }

    fn press_melodic(&mut self, key: char) -> Vec<MidiCommand> {
        let Some(pitch) = self.mapper.pitch(key) else {
            return Vec::new();
        };
        if !self.playing.insert(pitch) {
            return Vec::new();
        }
        self.pressed.insert(key);
        vec![MidiCommand::NoteOn {
            channel: self.channel,
            pitch,
            velocity: FULL_VELOCITY,
        }]
    }

    fn release_melodic(&mut self, key: char) -> Vec<MidiCommand> {
        let Some(pitch) = self.mapper.pitch(key) else {
            return Vec::new();
        };
        if !self.playing.remove(&pitch) {
            return Vec::new();
        }
        self.pressed.remove(&key);
        vec![MidiCommand::NoteOff {
            channel: self.channel,
            pitch,
        }]
    }

    fn press_bass(&mut self, key: char) -> Vec<MidiCommand> {
        let mut commands = Vec::new();
        for pitch in self.bass.pitches(key) {
            if !self.playing.insert(pitch) {
                continue;
            }
            commands.push(MidiCommand::NoteOn {
                channel: self.channel,
                pitch,
                velocity: FULL_VELOCITY,
            });
        }
        if !commands.is_empty() {
            self.pressed.insert(key);
        }
        commands
    }

    fn release_bass(&mut self, key: char) -> Vec<MidiCommand> {
        let mut commands = Vec::new();
        for pitch in self.bass.pitches(key) {
            if !self.playing.remove(&pitch) {
                continue;
            }
            commands.push(MidiCommand::NoteOff {
                channel: self.channel,
                pitch,
            });
        }
        self.pressed.remove(&key);
        commands
    }

    fn press_practice(&mut self, key: char, now_ms: u64) -> Vec<MidiCommand> {
        if !self.pressed.insert(key) {
            return Vec::new();
        }
        if self.held_clusters.contains_key(&key) || self.position >= self.song.len() {
            return Vec::new();
        }
        if let Some(last) = self.last_press_ms {
            if now_ms.saturating_sub(last) < DEBOUNCE_MS {
                return Vec::new();
            }
        }
        if self.hard_mode && self.song_keys[self.position] != key {
            return Vec::new();
        }

        self.held_clusters.insert(key, self.position);
        let commands = self.song[self.position]
            .notes
            .iter()
            .map(|note| MidiCommand::NoteOn {
                channel: self.channel,
                pitch: note.pitch,
                velocity: FULL_VELOCITY,
            })
            .collect();
        self.last_press_ms = Some(now_ms);
        self.position += 1;
        commands
    }

    fn release_practice(&mut self, key: char) -> Vec<MidiCommand> {
        self.pressed.remove(&key);
        let Some(position) = self.held_clusters.remove(&key) else {
            return Vec::new();
        };
        let mut commands: Vec<MidiCommand> = self.song[position]
            .notes
            .iter()
            .map(|note| MidiCommand::NoteOff {
                channel: self.channel,
                pitch: note.pitch,
            })
            .collect();

        // Last cluster released after the song ran out: practice is over.
        if self.position >= self.song.len() {
            commands.extend(self.stop_practice());
        }
        commands
    }
}
