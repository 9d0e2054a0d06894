//! Set of currently held notes and the image each one shows

use crate::midi_input::{MidiEvent, MidiMessageType};
use image::RgbaImage;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Shared handle to a decoded image
pub type ImageHandle = Arc<RgbaImage>;

/// Display record for one held note
#[derive(Debug, Clone)]
pub struct ActiveNote {
    pub image: ImageHandle,
    pub activated_at: Instant,
}

/// Notes currently held, keyed by note number
///
/// Storage order is irrelevant; [`ActiveNoteSet::snapshot`] always yields
/// ascending note numbers so grid placement does not jump between frames.
#[derive(Debug, Default)]
pub struct ActiveNoteSet {
    active: HashMap<u8, ActiveNote>,
}

impl ActiveNoteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start showing `image` for `note`, replacing any existing record
    pub fn note_on(&mut self, note: u8, image: ImageHandle, now: Instant) {
        self.active.insert(
            note,
            ActiveNote {
                image,
                activated_at: now,
            },
        );
    }

    /// Stop showing `note`; returns whether it was held
    pub fn note_off(&mut self, note: u8) -> bool {
        self.active.remove(&note).is_some()
    }

    /// Apply one MIDI event, looking images up with `image_for`
    ///
    /// Note-ons for notes without an image are ignored.
    pub fn apply<F>(&mut self, event: &MidiEvent, now: Instant, image_for: F)
    where
        F: Fn(u8) -> Option<ImageHandle>,
    {
        match event.message_type {
            MidiMessageType::NoteOn { note, velocity } if velocity > 0 => match image_for(note) {
                Some(image) => {
                    debug!(
                        timestamp_us = event.timestamp_us,
                        "note on {} ({})",
                        note,
                        MidiEvent::midi_to_note_name(note)
                    );
                    self.note_on(note, image, now);
                }
                None => debug!("note on {} has no image, ignoring", note),
            },
            MidiMessageType::NoteOff { note, .. } | MidiMessageType::NoteOn { note, .. } => {
                if self.note_off(note) {
                    debug!(
                        timestamp_us = event.timestamp_us,
                        "note off {} ({})",
                        note,
                        MidiEvent::midi_to_note_name(note)
                    );
                }
            }
            _ => {}
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn contains(&self, note: u8) -> bool {
        self.active.contains_key(&note)
    }

    pub fn get(&self, note: u8) -> Option<&ActiveNote> {
        self.active.get(&note)
    }

    /// Held notes in ascending note order
    pub fn snapshot(&self) -> Vec<(u8, ActiveNote)> {
        let mut notes: Vec<_> = self
            .active
            .iter()
            .map(|(&note, record)| (note, record.clone()))
            .collect();
        notes.sort_unstable_by_key(|(note, _)| *note);
        notes
    }

    /// Ascending note numbers only
    pub fn sorted_notes(&self) -> Vec<u8> {
        let mut notes: Vec<u8> = self.active.keys().copied().collect();
        notes.sort_unstable();
        notes
    }
}
