//! Songs — decoding Standard MIDI Files into note clusters and reducing
//! them to a four-key practice control scheme.

pub mod decode;
pub mod library;
pub mod practice;
pub mod types;

pub use decode::{decode_song, load_song, DecodeError};
pub use library::midi_files;
pub use practice::{assign, PRACTICE_KEYS};
pub use types::{Cluster, NoteEvent};
