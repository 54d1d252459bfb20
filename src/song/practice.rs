//! Practice-key assignment — reduces a decoded melody to a four-key control
//! scheme.
//!
//! One key per cluster. Small melodic intervals rotate one or two keys
//! through the alphabet, large ones jump three, so the key sequence traces
//! the melody's contour under the player's fingers.

use super::types::Cluster;

/// The four practice keys, home-row, left to right.
pub const PRACTICE_KEYS: [char; 4] = ['f', 'g', 'h', 'j'];

/// Alphabet index assigned to the first cluster.
const START_INDEX: i32 = 2;

/// Assign one practice key per cluster. Empty melody, empty result.
pub fn assign(melody: &[Cluster]) -> Vec<char> {
    let Some(first) = melody.first() else {
        return Vec::new();
    };

    let mut keys = Vec::with_capacity(melody.len());
    let mut index = START_INDEX;
    keys.push(PRACTICE_KEYS[index as usize]);
    let mut last_top = i32::from(first.top_pitch());

    for cluster in &melody[1..] {
        let top = i32::from(cluster.top_pitch());
        let diff = top - last_top;
        index = (index + key_step(diff)).rem_euclid(PRACTICE_KEYS.len() as i32);
        keys.push(PRACTICE_KEYS[index as usize]);
        last_top = top;
    }

    keys
}

/// Signed alphabet step for a pitch interval. The bands are checked in this
/// exact order; intervals of five or more semitones down fall through to the
/// final jump.
fn key_step(diff: i32) -> i32 {
    if diff == 0 {
        0
    } else if diff > 0 && diff < 3 {
        1
    } else if diff > 2 && diff < 5 {
        2
    } else if diff < 0 && diff > -3 {
        -1
    } else if diff < -2 && diff > -5 {
        -2
    } else if diff > 4 {
        3
    } else {
        -3
    }
}
