//! Pitch mapping — turns physical key presses into MIDI pitches through
//! configurable scales, modes (keyboard layouts), and transposable keys.
//!
//! The [`Mapper`] handles the melodic side: it builds a 30-slot pitch window
//! from the selected scale and key, then routes each physical key through the
//! selected mode's window indices. The [`BassMapper`] maps single keys to
//! whole chords. Both load their tables once from line-oriented text files
//! and afterwards mutate nothing but the selection indices.

pub mod bass;
pub mod layout;
pub mod melodic;
pub mod tables;

pub use bass::BassMapper;
pub use layout::{position, KEYBOARD_LAYOUT};
pub use melodic::{Mapper, Selection};
pub use tables::{KeyTable, Mode, Scale, BASS_ANCHOR, MELODIC_ANCHOR};

use std::fmt;

/// Error returned by the checked selection setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// The mapper has not been initialized yet.
    Uninitialized,
    /// The index does not fit the table it selects into.
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::Uninitialized => write!(f, "mapper not initialized"),
            SelectionError::OutOfRange { index, len } => {
                write!(f, "selection index {index} out of range (table has {len} entries)")
            }
        }
    }
}

impl std::error::Error for SelectionError {}
