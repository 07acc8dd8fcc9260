//! Notes kept in the local store, never sent to the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use deskboard_core::StorageError;

use crate::local_store::{LocalStore, NOTES_KEY};

/// Only the newest notes are shown.
pub const MAX_VISIBLE_NOTES: usize = 6;

pub const DEFAULT_NOTE_TITLE: &str = "Untitled";

/// Longest title kept, in characters.
pub const MAX_TITLE_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Creation time in milliseconds since the epoch.
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub text: String,
}

impl Note {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_NOTE_TITLE
        } else {
            &self.title
        }
    }
}

/// All notes in creation order.
#[derive(Debug, Default)]
pub struct NoteModel {
    notes: Vec<Note>,
}

impl NoteModel {
    /// Notes saved in `store`, or none if the stored value is unreadable.
    pub fn load(store: &LocalStore) -> Self {
        Self {
            notes: store.get(NOTES_KEY).unwrap_or_default(),
        }
    }

    pub fn save(&self, store: &LocalStore) -> Result<(), StorageError> {
        store.set(NOTES_KEY, &self.notes)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Add a note. Returns `None` without adding anything if `text` is blank.
    pub fn add(&mut self, title: &str, text: &str, now: DateTime<Utc>) -> Option<&Note> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let title: String = title.trim().chars().take(MAX_TITLE_CHARS).collect();
        let title = if title.is_empty() {
            DEFAULT_NOTE_TITLE.to_string()
        } else {
            title
        };

        self.notes.push(Note {
            id: now.timestamp_millis(),
            title,
            text: text.to_string(),
        });
        self.notes.last()
    }

    /// The newest [`MAX_VISIBLE_NOTES`] notes, newest first.
    pub fn visible(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().rev().take(MAX_VISIBLE_NOTES)
    }
}
