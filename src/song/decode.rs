//! SMF decoding — turns a Standard MIDI File into an ordered sequence of
//! simultaneous-note clusters with per-note durations in seconds.
//!
//! All tracks are merged by absolute tick. Note-ons landing on the same tick
//! form one cluster; durations come from the matching note-off through the
//! file's tempo map.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

use super::types::{Cluster, NoteEvent};

/// Microseconds per beat before the first tempo event: 120 BPM.
const DEFAULT_TEMPO: f64 = 500_000.0;

/// An error while reading or parsing a song file.
#[derive(Debug)]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "song decode: {}", self.message)
    }
}

impl std::error::Error for DecodeError {}

impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> Self {
        Self::new(format!("read: {err}"))
    }
}

impl From<midly::Error> for DecodeError {
    fn from(err: midly::Error) -> Self {
        Self::new(format!("SMF parse: {err}"))
    }
}

/// Load and decode a song file.
pub fn load_song(path: &Path) -> Result<Vec<Cluster>, DecodeError> {
    let bytes = std::fs::read(path)?;
    decode_song(&bytes)
}

/// Decode SMF bytes into clusters. An empty or note-free file decodes to an
/// empty sequence.
pub fn decode_song(bytes: &[u8]) -> Result<Vec<Cluster>, DecodeError> {
    let smf = Smf::parse(bytes)?;
    let events = merge_tracks(&smf);
    let tempo = TempoMap::build(smf.header.timing, &events);

    let mut clusters: Vec<Cluster> = Vec::new();
    let mut last_tick = None;
    // Open notes by (channel, key), FIFO: (cluster, note index, on tick).
    let mut open: HashMap<(u8, u8), Vec<(usize, usize, u64)>> = HashMap::new();

    for &(tick, ref kind) in &events {
        let TrackEventKind::Midi { channel, message } = kind else {
            continue;
        };
        let channel = channel.as_int();
        match message {
            MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                if last_tick != Some(tick) {
                    clusters.push(Cluster::default());
                    last_tick = Some(tick);
                }
                let cluster_idx = clusters.len() - 1;
                let notes = &mut clusters[cluster_idx].notes;
                notes.push(NoteEvent {
                    pitch: key.as_int(),
                    duration: 0.0,
                });
                open.entry((channel, key.as_int())).or_default().push((
                    cluster_idx,
                    notes.len() - 1,
                    tick,
                ));
            }
            MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => {
                let Some(pending) = open.get_mut(&(channel, key.as_int())) else {
                    continue;
                };
                if pending.is_empty() {
                    continue;
                }
                let (cluster_idx, note_idx, on_tick) = pending.remove(0);
                let duration = tempo.seconds_at(tick) - tempo.seconds_at(on_tick);
                clusters[cluster_idx].notes[note_idx].duration = duration.max(0.0);
            }
            _ => {}
        }
    }

    Ok(clusters)
}

/// All track events flattened to (absolute tick, kind), ordered by tick.
fn merge_tracks<'a>(smf: &'a Smf<'a>) -> Vec<(u64, TrackEventKind<'a>)> {
    let mut events = Vec::new();
    for track in &smf.tracks {
        let mut tick = 0u64;
        for event in track {
            tick += u64::from(event.delta.as_int());
            events.push((tick, event.kind));
        }
    }
    // Stable sort keeps intra-track order for same-tick events.
    events.sort_by_key(|&(tick, _)| tick);
    events
}

/// Converts absolute ticks to seconds, honoring every tempo event.
enum TempoMap {
    Metrical {
        ticks_per_beat: f64,
        // (tick, seconds at that tick, microseconds per beat from there).
        segments: Vec<(u64, f64, f64)>,
    },
    Timecode {
        seconds_per_tick: f64,
    },
}

impl TempoMap {
    fn build(timing: Timing, events: &[(u64, TrackEventKind)]) -> Self {
        match timing {
            Timing::Timecode(fps, subframe) => TempoMap::Timecode {
                seconds_per_tick: 1.0 / (f64::from(fps.as_f32()) * f64::from(subframe)),
            },
            Timing::Metrical(ticks_per_beat) => {
                let ticks_per_beat = f64::from(ticks_per_beat.as_int());
                let mut segments = vec![(0u64, 0.0, DEFAULT_TEMPO)];
                for &(tick, ref kind) in events {
                    let TrackEventKind::Meta(MetaMessage::Tempo(us_per_beat)) = kind else {
                        continue;
                    };
                    let (last_tick, last_seconds, last_tempo) =
                        *segments.last().unwrap_or(&(0, 0.0, DEFAULT_TEMPO));
                    let seconds = last_seconds
                        + (tick - last_tick) as f64 / ticks_per_beat * last_tempo / 1e6;
                    segments.push((tick, seconds, f64::from(us_per_beat.as_int())));
                }
                TempoMap::Metrical {
                    ticks_per_beat,
                    segments,
                }
            }
        }
    }

    fn seconds_at(&self, tick: u64) -> f64 {
        match self {
            TempoMap::Timecode { seconds_per_tick } => tick as f64 * seconds_per_tick,
            TempoMap::Metrical {
                ticks_per_beat,
                segments,
            } => {
                let (seg_tick, seg_seconds, tempo) = segments
                    .iter()
                    .rev()
                    .find(|&&(seg_tick, _, _)| seg_tick <= tick)
                    .copied()
                    .unwrap_or((0, 0.0, DEFAULT_TEMPO));
                seg_seconds + (tick - seg_tick) as f64 / ticks_per_beat * tempo / 1e6
            }
        }
    }
}
