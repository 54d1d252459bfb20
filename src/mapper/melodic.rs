//! Melodic mapper — one physical key, one MIDI pitch.
//!
//! Pitches come from a 30-slot window built around the selected key's base:
//! slot `i + 10` holds the pitch `i` scale degrees away from the tonic, for
//! `i` in `-10..=19`. The selected mode then assigns each physical keyboard
//! position one of those slots.

use std::io;
use std::path::Path;

use super::tables::{self, KeyTable, Mode, Scale, MELODIC_ANCHOR};
use super::{layout, SelectionError};

/// Width of the pitch window; the tonic sits at slot 10.
pub const WINDOW_SIZE: usize = 30;
const TONIC_SLOT: i32 = 10;

/// Snapshot of the three selection indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub scale: usize,
    pub mode: usize,
    pub key: usize,
}

/// Maps physical keys to MIDI pitches under the current scale, mode, and key.
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    keys: Option<KeyTable>,
    scales: Vec<Scale>,
    modes: Vec<Mode>,
    selection: Selection,
}

impl Mapper {
    /// Create an uninitialized mapper. Every lookup and setter is inert
    /// until [`Mapper::init`] (or [`Mapper::init_from`]) succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load scale and mode tables from files.
    pub fn init(&mut self, scale_path: &Path, mode_path: &Path) -> io::Result<()> {
        let scale_text = std::fs::read_to_string(scale_path)?;
        let mode_text = std::fs::read_to_string(mode_path)?;
        if self.init_from(&scale_text, &mode_text) {
            Ok(())
        } else {
            Err(io::Error::other("scale or mode table is empty"))
        }
    }

    /// Parse tables from in-memory text. Returns false — leaving the mapper
    /// uninitialized — if either parsed table ends up empty. On success all
    /// three selection indices reset to 0.
    pub fn init_from(&mut self, scale_text: &str, mode_text: &str) -> bool {
        self.keys = None;
        self.scales = tables::parse_scales(scale_text);
        self.modes = tables::parse_modes(mode_text);

        if self.scales.is_empty() || self.modes.is_empty() {
            return false;
        }

        self.keys = Some(KeyTable::new(MELODIC_ANCHOR));
        self.selection = Selection::default();
        true
    }

    /// Whether initialization has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.keys.is_some()
    }

    /// Current selection, once initialized.
    pub fn selection(&self) -> Option<Selection> {
        self.keys.as_ref().map(|_| self.selection)
    }

    /// Set the scale index without bounds checking, returning the previous
    /// value, or `None` before initialization. An out-of-range index is the
    /// caller's responsibility and will panic inside a later lookup.
    pub fn set_scale_index(&mut self, index: usize) -> Option<usize> {
        self.keys.as_ref()?;
        Some(std::mem::replace(&mut self.selection.scale, index))
    }

    /// Set the mode index; same contract as [`Mapper::set_scale_index`].
    pub fn set_mode_index(&mut self, index: usize) -> Option<usize> {
        self.keys.as_ref()?;
        Some(std::mem::replace(&mut self.selection.mode, index))
    }

    /// Set the key index; same contract as [`Mapper::set_scale_index`].
    pub fn set_key_index(&mut self, index: usize) -> Option<usize> {
        self.keys.as_ref()?;
        Some(std::mem::replace(&mut self.selection.key, index))
    }

    /// Bounds-checked variant of [`Mapper::set_scale_index`].
    pub fn try_set_scale_index(&mut self, index: usize) -> Result<usize, SelectionError> {
        checked(index, self.scales.len(), self.is_initialized())?;
        Ok(std::mem::replace(&mut self.selection.scale, index))
    }

    /// Bounds-checked variant of [`Mapper::set_mode_index`].
    pub fn try_set_mode_index(&mut self, index: usize) -> Result<usize, SelectionError> {
        checked(index, self.modes.len(), self.is_initialized())?;
        Ok(std::mem::replace(&mut self.selection.mode, index))
    }

    /// Bounds-checked variant of [`Mapper::set_key_index`].
    pub fn try_set_key_index(&mut self, index: usize) -> Result<usize, SelectionError> {
        let len = self.keys.as_ref().map(KeyTable::len).unwrap_or(0);
        checked(index, len, self.is_initialized())?;
        Ok(std::mem::replace(&mut self.selection.key, index))
    }

    /// MIDI pitch for a physical key under the current selection, saturated
    /// to 0–127.
    ///
    /// `None` for keys outside the 30-key layout, before initialization, or
    /// when the mode table hands back a slot outside the window (a
    /// configuration error). Panics if a lenient setter stored an
    /// out-of-range selection index.
    pub fn pitch(&self, key: char) -> Option<u8> {
        let keys = self.keys.as_ref()?;
        let scale = &self.scales[self.selection.scale];
        let mode = &self.modes[self.selection.mode];
        let base = keys.base(self.selection.key);

        let window = build_window(base, &scale.offsets);
        let pos = layout::position(key)?;
        let slot = *mode.indices.get(pos)?;
        let pitch = *window.get(slot)?;
        Some(pitch.clamp(0, 127) as u8)
    }

    /// Raw mode-window index for a physical key: how many slots from the
    /// window start the key plays, out of 30.
    pub fn scale_position(&self, key: char) -> Option<usize> {
        self.keys.as_ref()?;
        let mode = &self.modes[self.selection.mode];
        mode.indices.get(layout::position(key)?).copied()
    }

    /// Scale names in table order, for display.
    pub fn scale_names(&self) -> Vec<&str> {
        self.scales.iter().map(|s| s.name.as_str()).collect()
    }

    /// Mode names in table order, for display.
    pub fn mode_names(&self) -> Vec<&str> {
        self.modes.iter().map(|m| m.name.as_str()).collect()
    }

    /// Key names in table order, for display.
    pub fn key_names(&self) -> Vec<&str> {
        self.keys.as_ref().map(|k| k.names()).unwrap_or_default()
    }
}

/// Build the 30-slot pitch window for a key base and scale offsets.
///
/// Slot `i + 10` holds `base + 12 * floor(i / L) + offsets[i mod L]` with
/// Euclidean division, so the octave term and the degree index both behave
/// for negative `i` and the window climbs in scale order across octave
/// boundaries.
fn build_window(base: i32, offsets: &[i32]) -> [i32; WINDOW_SIZE] {
    let len = offsets.len() as i32;
    let mut window = [0; WINDOW_SIZE];
    for i in -TONIC_SLOT..(WINDOW_SIZE as i32 - TONIC_SLOT) {
        let octave = i.div_euclid(len);
        let degree = i.rem_euclid(len) as usize;
        window[(i + TONIC_SLOT) as usize] = base + 12 * octave + offsets[degree];
    }
    window
}

fn checked(index: usize, len: usize, initialized: bool) -> Result<(), SelectionError> {
    if !initialized {
        return Err(SelectionError::Uninitialized);
    }
    if index >= len {
        return Err(SelectionError::OutOfRange { index, len });
    }
    Ok(())
}
