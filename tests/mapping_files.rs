//! Table-file loading tests — the mappers initialized from on-disk
//! configuration, exercised across every key and selection.

use std::fs;
use std::path::PathBuf;

use squeezebox::mapper::{BassMapper, Mapper, KEYBOARD_LAYOUT};

const SCALES: &str = "\
Major 0 2 4 5 7 9 11
Natural_Minor 0 2 3 5 7 8 10
Pentatonic 0 2 4 7 9
Chromatic 0 1 2 3 4 5 6 7 8 9 10 11
";

const BASSES: &str = "\
a 0 4 7
s 0 3 7
d -12 0 12
";

/// Three plausible modes: identity, rows-as-octaves, and everything-tonic.
fn modes_text() -> String {
    let linear: Vec<String> = (0..30).map(|i| i.to_string()).collect();
    let rows: Vec<String> = (0..30).map(|i| (10 + i % 10).to_string()).collect();
    let tonic = vec!["10"; 30];
    format!(
        "Linear {}\nRows {}\nDrone {}\n",
        linear.join(" "),
        rows.join(" "),
        tonic.join(" ")
    )
}

struct Fixture {
    _dir: tempfile::TempDir,
    scales: PathBuf,
    modes: PathBuf,
    basses: PathBuf,
}

fn write_fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let scales = dir.path().join("scales.txt");
    let modes = dir.path().join("modes.txt");
    let basses = dir.path().join("basses.txt");
    fs::write(&scales, SCALES).unwrap();
    fs::write(&modes, modes_text()).unwrap();
    fs::write(&basses, BASSES).unwrap();
    Fixture {
        _dir: dir,
        scales,
        modes,
        basses,
    }
}

#[test]
fn mapper_loads_from_files() {
    let fx = write_fixture();
    let mut mapper = Mapper::new();
    mapper.init(&fx.scales, &fx.modes).unwrap();

    assert_eq!(
        mapper.scale_names(),
        vec!["Major", "Natural Minor", "Pentatonic", "Chromatic"]
    );
    assert_eq!(mapper.mode_names(), vec!["Linear", "Rows", "Drone"]);
    assert_eq!(mapper.pitch('a'), Some(60));
}

#[test]
fn missing_file_fails_init_and_leaves_mapper_inert() {
    let fx = write_fixture();
    let mut mapper = Mapper::new();
    let missing = fx.scales.with_file_name("nope.txt");
    assert!(mapper.init(&missing, &fx.modes).is_err());
    assert!(!mapper.is_initialized());
    assert_eq!(mapper.pitch('a'), None);
}

#[test]
fn empty_table_file_fails_init() {
    let fx = write_fixture();
    let empty = fx.scales.with_file_name("empty.txt");
    fs::write(&empty, "").unwrap();

    let mut mapper = Mapper::new();
    assert!(mapper.init(&empty, &fx.modes).is_err());
    assert!(!mapper.is_initialized());
}

#[test]
fn every_selection_and_key_stays_in_midi_range() {
    let fx = write_fixture();
    let mut mapper = Mapper::new();
    mapper.init(&fx.scales, &fx.modes).unwrap();

    let scales = mapper.scale_names().len();
    let modes = mapper.mode_names().len();
    let keys = mapper.key_names().len();

    for scale in 0..scales {
        for mode in 0..modes {
            for key in 0..keys {
                mapper.try_set_scale_index(scale).unwrap();
                mapper.try_set_mode_index(mode).unwrap();
                mapper.try_set_key_index(key).unwrap();
                for ch in KEYBOARD_LAYOUT.chars() {
                    let pitch = mapper
                        .pitch(ch)
                        .unwrap_or_else(|| panic!("{ch:?} under {scale}/{mode}/{key}"));
                    assert!(pitch <= 127);
                }
            }
        }
    }
}

#[test]
fn octave_consistency_across_the_window() {
    let fx = write_fixture();
    let mut mapper = Mapper::new();
    mapper.init(&fx.scales, &fx.modes).unwrap();
    // Pentatonic, length 5, linear mode: slots i and i+5 differ by an octave.
    mapper.try_set_scale_index(2).unwrap();

    let layout: Vec<char> = KEYBOARD_LAYOUT.chars().collect();
    for i in 0..(30 - 5) {
        let low = mapper.pitch(layout[i]).unwrap();
        let high = mapper.pitch(layout[i + 5]).unwrap();
        if low > 0 && high < 127 {
            assert_eq!(high - low, 12);
        }
    }
}

#[test]
fn bass_mapper_loads_from_file() {
    let fx = write_fixture();
    let mut bass = BassMapper::new();
    bass.init(&fx.basses).unwrap();

    assert_eq!(bass.pitches('a'), vec![48, 52, 55]);
    assert_eq!(bass.pitches('d'), vec![36, 48, 60]);
    assert!(bass.pitches('x').is_empty());
}

#[test]
fn bass_chords_clamp_per_note_in_every_key() {
    let fx = write_fixture();
    let mut bass = BassMapper::new();
    bass.init(&fx.basses).unwrap();

    for key in 0..12 {
        bass.try_set_key_index(key).unwrap();
        for input in ['a', 's', 'd'] {
            let pitches = bass.pitches(input);
            assert_eq!(pitches.len(), 3);
            assert!(pitches.iter().all(|&p| p <= 127));
        }
    }
}
