//! Song library — finds playable MIDI files in a data directory.

use std::io;
use std::path::{Path, PathBuf};

/// The `.mid` files directly inside `dir`, sorted by file name.
pub fn midi_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("mid"))
        })
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn finds_only_midi_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.mid", "a.mid", "notes.txt", "c.MID"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let files = midi_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.mid", "b.mid", "c.MID"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(midi_files(&gone).is_err());
    }

    #[test]
    fn empty_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(midi_files(dir.path()).unwrap().is_empty());
    }
}
