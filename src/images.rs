//! Decoded note images
//!
//! Images are loaded once at startup. A file that is missing or fails to
//! decode is reported with a warning and its note simply never shows.

use crate::notes::ImageHandle;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Images keyed by note number
#[derive(Debug, Default, Clone)]
pub struct ImageLibrary {
    images: HashMap<u8, ImageHandle>,
    missing: Vec<(u8, PathBuf)>,
}

impl ImageLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every mapped file from `folder`
    pub fn load(folder: impl AsRef<Path>, note_files: &BTreeMap<u8, String>) -> Self {
        let folder = folder.as_ref();
        let mut library = Self::new();

        for (&note, file) in note_files {
            let path = folder.join(file);
            if !path.is_file() {
                library.missing.push((note, path));
                continue;
            }
            match image::open(&path) {
                Ok(decoded) => {
                    library.insert(note, decoded.to_rgba8());
                }
                Err(e) => {
                    warn!("Failed to load image {}: {}", path.display(), e);
                    library.missing.push((note, path));
                }
            }
        }

        if !library.missing.is_empty() {
            warn!("Some mapped images were not found or failed to load:");
            for (note, path) in &library.missing {
                warn!("  note {} -> {}", note, path.display());
            }
        }
        info!("Loaded {} of {} note images", library.len(), note_files.len());

        library
    }

    pub fn insert(&mut self, note: u8, image: image::RgbaImage) {
        self.images.insert(note, Arc::new(image));
    }

    pub fn get(&self, note: u8) -> Option<ImageHandle> {
        self.images.get(&note).cloned()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Notes whose image could not be loaded, with the path that was tried
    pub fn missing(&self) -> &[(u8, PathBuf)] {
        &self.missing
    }
}
