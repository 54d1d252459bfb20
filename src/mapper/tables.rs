//! Configuration tables — pitch-class keys, scales, modes, and bass presets
//! parsed from line-oriented text.
//!
//! One record per line: a name token followed by integer tokens. Parsing is
//! deliberately lenient — a non-numeric token simply stops consumption for
//! that line, it never fails the load.

use std::collections::HashMap;

/// The twelve pitch classes, in chromatic order from C.
pub const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

/// MIDI base for the melodic mapper: C maps to middle C.
pub const MELODIC_ANCHOR: i32 = 60;

/// MIDI base for the bass mapper: one octave below the melodic anchor.
pub const BASS_ANCHOR: i32 = 48;

/// The fixed table of the twelve keys and their MIDI base offsets.
#[derive(Debug, Clone)]
pub struct KeyTable {
    bases: [i32; 12],
}

impl KeyTable {
    /// Build the key table around an octave anchor (`anchor + chromatic index`).
    pub fn new(anchor: i32) -> Self {
        let mut bases = [0; 12];
        for (i, base) in bases.iter_mut().enumerate() {
            *base = anchor + i as i32;
        }
        Self { bases }
    }

    /// MIDI base offset for the key at `index`.
    ///
    /// Panics if `index >= 12`; the lenient selection setters do not validate,
    /// so an out-of-range selection surfaces here.
    pub fn base(&self, index: usize) -> i32 {
        self.bases[index]
    }

    /// Number of keys. Always 12.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Never true; present for the usual container pairing with `len`.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Display names of the twelve keys, in table order.
    pub fn names(&self) -> Vec<&str> {
        PITCH_CLASSES.to_vec()
    }
}

/// A named scale: relative semitone offsets for one octave of degrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    pub name: String,
    pub offsets: Vec<i32>,
}

/// A named mode: one pitch-window index per physical keyboard position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    pub name: String,
    pub indices: Vec<usize>,
}

/// Parse scale records. Underscores in names render as spaces
/// (`Harmonic_Minor` → `Harmonic Minor`). Records without a single offset
/// are dropped so that every loaded scale has at least one degree.
pub fn parse_scales(text: &str) -> Vec<Scale> {
    let mut scales = Vec::new();
    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else { continue };
        let offsets: Vec<i32> = tokens.map_while(|t| t.parse().ok()).collect();
        if offsets.is_empty() {
            continue;
        }
        scales.push(Scale {
            name: name.replace('_', " "),
            offsets,
        });
    }
    scales
}

/// Parse mode records. A full record carries 30 window indices, one per
/// physical key; short or overlong records are kept as parsed and guarded
/// at lookup time.
pub fn parse_modes(text: &str) -> Vec<Mode> {
    let mut modes = Vec::new();
    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else { continue };
        let indices: Vec<usize> = tokens.map_while(|t| t.parse().ok()).collect();
        modes.push(Mode {
            name: name.replace('_', " "),
            indices,
        });
    }
    modes
}

/// Parse bass chord presets: the first character of a line keys an ordered
/// list of signed semitone offsets.
pub fn parse_chords(text: &str) -> HashMap<char, Vec<i32>> {
    let mut presets = HashMap::new();
    for line in text.lines() {
        let trimmed = line.trim_start();
        let Some(key) = trimmed.chars().next() else { continue };
        let rest = &trimmed[key.len_utf8()..];
        let offsets: Vec<i32> = rest
            .split_whitespace()
            .map_while(|t| t.parse().ok())
            .collect();
        presets.insert(key, offsets);
    }
    presets
}
