//! Settings — device and instrument preferences loaded from
//! ~/.squeezebox/config.yaml, plus data-file path resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// User settings loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Preferred MIDI output device name (substring match). None = first
    /// available.
    #[serde(default)]
    pub device_name: Option<String>,
    /// MIDI channel to emit on (0-15).
    #[serde(default)]
    pub channel: u8,
    /// General MIDI instrument number, 1-based as printed in patch lists.
    /// 22 is Accordion.
    #[serde(default = "Settings::default_instrument")]
    pub instrument: u8,
    /// Directory holding scales.txt, modes.txt, basses.txt, and songs.
    /// None = ./data.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the standard path (~/.squeezebox/config.yaml).
    /// Returns None if the file doesn't exist (graceful fallback).
    pub fn load() -> Option<Self> {
        let home = dirs::home_dir()?;
        let path = home.join(".squeezebox").join("config.yaml");
        let content = std::fs::read_to_string(path).ok()?;
        serde_yaml::from_str(&content).ok()
    }

    fn default_instrument() -> u8 {
        22
    }

    /// The 0-based MIDI program number for [`Settings::instrument`].
    pub fn program(&self) -> u8 {
        self.instrument.saturating_sub(1).min(127)
    }

    /// The effective data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("data"))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device_name: None,
            channel: 0,
            instrument: Self::default_instrument(),
            data_dir: None,
        }
    }
}

/// Locations of the table files inside a data directory.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub scales: PathBuf,
    pub modes: PathBuf,
    pub basses: PathBuf,
    pub songs: PathBuf,
}

impl DataPaths {
    /// Standard file names under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            scales: dir.join("scales.txt"),
            modes: dir.join("modes.txt"),
            basses: dir.join("basses.txt"),
            songs: dir.join("MIDI"),
        }
    }
}
