//! Song data model — notes and simultaneous-note clusters.

/// A single decoded note: an absolute MIDI pitch and its length in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    /// MIDI pitch, 0–127.
    pub pitch: u8,
    /// Sounding length in seconds.
    pub duration: f64,
}

/// Notes struck at the same instant. A decoded melody is an ordered
/// sequence of clusters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cluster {
    pub notes: Vec<NoteEvent>,
}

impl Cluster {
    /// Highest pitch in the cluster; 0 for an empty cluster (the decoder
    /// never produces one).
    pub fn top_pitch(&self) -> u8 {
        self.notes.iter().map(|n| n.pitch).max().unwrap_or(0)
    }

    /// Longest note duration in the cluster, in seconds.
    pub fn duration(&self) -> f64 {
        self.notes.iter().map(|n| n.duration).fold(0.0, f64::max)
    }
}
