//! Squeezebox — a keyboard-driven accordion core: scales, modes, and keys to MIDI.

pub mod config;
pub mod mapper;
pub mod midi;
pub mod perform;
pub mod song;
