//! Bass mapper — one physical key, a whole chord.
//!
//! Each preset is an ordered list of signed semitone offsets; the selected
//! key's base (anchored an octave below the melodic mapper) is added to each
//! offset and the results are clamped independently to the MIDI range.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use super::tables::{self, KeyTable, BASS_ANCHOR};
use super::SelectionError;

/// Maps single input characters to chords under the current key.
#[derive(Debug, Clone, Default)]
pub struct BassMapper {
    keys: Option<KeyTable>,
    presets: HashMap<char, Vec<i32>>,
    key_index: usize,
}

impl BassMapper {
    /// Create an uninitialized bass mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load chord presets from a file.
    pub fn init(&mut self, chord_path: &Path) -> io::Result<()> {
        let text = std::fs::read_to_string(chord_path)?;
        self.init_from(&text);
        Ok(())
    }

    /// Parse chord presets from in-memory text and build the 12-key table.
    /// Preset completeness is not validated; an absent preset simply plays
    /// nothing.
    pub fn init_from(&mut self, chord_text: &str) {
        self.presets = tables::parse_chords(chord_text);
        self.keys = Some(KeyTable::new(BASS_ANCHOR));
        self.key_index = 0;
    }

    /// Whether initialization has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.keys.is_some()
    }

    /// Set the key index without bounds checking, returning the previous
    /// value, or `None` before initialization.
    pub fn set_key_index(&mut self, index: usize) -> Option<usize> {
        self.keys.as_ref()?;
        Some(std::mem::replace(&mut self.key_index, index))
    }

    /// Bounds-checked variant of [`BassMapper::set_key_index`].
    pub fn try_set_key_index(&mut self, index: usize) -> Result<usize, SelectionError> {
        let Some(keys) = self.keys.as_ref() else {
            return Err(SelectionError::Uninitialized);
        };
        if index >= keys.len() {
            return Err(SelectionError::OutOfRange {
                index,
                len: keys.len(),
            });
        }
        Ok(std::mem::replace(&mut self.key_index, index))
    }

    /// Chord pitches for an input character: preset offsets plus the current
    /// key base, each clamped to 0–127, in declaration order. Empty when the
    /// character has no preset or the mapper is uninitialized.
    pub fn pitches(&self, input: char) -> Vec<u8> {
        let Some(keys) = self.keys.as_ref() else {
            return Vec::new();
        };
        let Some(offsets) = self.presets.get(&input) else {
            return Vec::new();
        };
        let base = keys.base(self.key_index);
        offsets
            .iter()
            .map(|offset| (base + offset).clamp(0, 127) as u8)
            .collect()
    }

    /// Key names in table order, for display.
    pub fn key_names(&self) -> Vec<&str> {
        self.keys.as_ref().map(|k| k.names()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESETS: &str = "a 0 4 7\ns 0 3 7\nd -12 0 12\nf 0 0 7\n";

    fn bass() -> BassMapper {
        let mut b = BassMapper::new();
        b.init_from(PRESETS);
        b
    }

    #[test]
    fn chord_is_offsets_plus_key_base() {
        let b = bass();
        // Key 0 is C at base 48.
        assert_eq!(b.pitches('a'), vec![48, 52, 55]);
        assert_eq!(b.pitches('s'), vec![48, 51, 55]);
    }

    #[test]
    fn chord_size_matches_preset_size() {
        let b = bass();
        assert_eq!(b.pitches('a').len(), 3);
        assert_eq!(b.pitches('d').len(), 3);
    }

    #[test]
    fn key_change_transposes_every_note() {
        let mut b = bass();
        b.set_key_index(7); // G, base 55
        assert_eq!(b.pitches('a'), vec![55, 59, 62]);
    }

    #[test]
    fn duplicates_are_preserved_in_order() {
        let b = bass();
        assert_eq!(b.pitches('f'), vec![48, 48, 55]);
    }

    #[test]
    fn each_note_clamps_independently() {
        let mut b = BassMapper::new();
        b.init_from("x -60 0 200");
        assert_eq!(b.pitches('x'), vec![0, 48, 127]);
    }

    #[test]
    fn absent_preset_plays_nothing() {
        let b = bass();
        assert!(b.pitches('q').is_empty());
    }

    #[test]
    fn uninitialized_mapper_is_inert() {
        let mut b = BassMapper::new();
        assert!(b.pitches('a').is_empty());
        assert_eq!(b.set_key_index(3), None);
        assert_eq!(b.try_set_key_index(0), Err(SelectionError::Uninitialized));
    }

    #[test]
    fn checked_setter_validates_bounds() {
        let mut b = bass();
        assert_eq!(b.try_set_key_index(11), Ok(0));
        assert_eq!(
            b.try_set_key_index(12),
            Err(SelectionError::OutOfRange { index: 12, len: 12 })
        );
    }

    #[test]
    fn setter_returns_previous_value() {
        let mut b = bass();
        assert_eq!(b.set_key_index(5), Some(0));
        assert_eq!(b.set_key_index(2), Some(5));
    }

    #[test]
    fn init_resets_key_index() {
        let mut b = bass();
        b.set_key_index(9);
        b.init_from(PRESETS);
        assert_eq!(b.pitches('a'), vec![48, 52, 55]);
    }
}
