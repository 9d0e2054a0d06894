//! Instrument configuration loaded once at startup
//!
//! The file is JSON:
//!
//! ```json
//! {
//!   "image_folder": "images",
//!   "window": { "width": 800, "height": 600, "bg_color": [0, 0, 0] },
//!   "scale_mode": "fit",
//!   "notes": { "60": "kick.png", "64": "snare.png" },
//!   "grid": { "padding": 8, "cell_margin": 8, "min_cell_size": 24 }
//! }
//! ```
//!
//! Every key is optional. A missing `window` block means an 800x600 black
//! canvas; a `window` block that omits a key falls back to 1280x720 black.

use crate::error::{NoteFrameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_image_folder")]
    pub image_folder: PathBuf,

    #[serde(default)]
    pub window: WindowConfig,

    /// Carried through for compatibility, not interpreted
    #[serde(default = "default_scale_mode")]
    pub scale_mode: String,

    /// Note id (as a decimal string) to image file name, relative to `image_folder`
    #[serde(default)]
    pub notes: BTreeMap<String, String>,

    #[serde(default)]
    pub grid: GridConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,
    #[serde(default = "default_window_height")]
    pub height: u32,
    #[serde(default)]
    pub bg_color: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Space between cells and around the grid border
    #[serde(default = "default_grid_spacing")]
    pub padding: u32,
    /// Space inside a cell between the image and the cell edge
    #[serde(default = "default_grid_spacing")]
    pub cell_margin: u32,
    #[serde(default = "default_min_cell_size")]
    pub min_cell_size: u32,
}

fn default_image_folder() -> PathBuf {
    PathBuf::from("images")
}

fn default_scale_mode() -> String {
    "fit".to_string()
}

fn default_window_width() -> u32 {
    1280
}

fn default_window_height() -> u32 {
    720
}

fn default_grid_spacing() -> u32 {
    8
}

fn default_min_cell_size() -> u32 {
    24
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_folder: default_image_folder(),
            window: WindowConfig::default(),
            scale_mode: default_scale_mode(),
            notes: BTreeMap::new(),
            grid: GridConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            bg_color: [0, 0, 0],
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            padding: default_grid_spacing(),
            cell_margin: default_grid_spacing(),
            min_cell_size: default_min_cell_size(),
        }
    }
}

impl Config {
    /// Read and parse a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            NoteFrameError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Note mapping with numeric keys
    ///
    /// Keys that are not a MIDI note number (0-127) are skipped with a warning.
    pub fn note_files(&self) -> BTreeMap<u8, String> {
        let mut files = BTreeMap::new();
        for (key, file) in &self.notes {
            match key.trim().parse::<u8>() {
                Ok(note) if note <= 127 => {
                    files.insert(note, file.clone());
                }
                _ => warn!("Ignoring note mapping with invalid note id {:?} -> {}", key, file),
            }
        }
        files
    }
}
