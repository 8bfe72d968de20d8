//! In-memory journal storage.

use chrono::Utc;

use crate::types::{EntryDraft, JournalEntry};

/// Transient list of journal entries. There is no update operation and no
/// persistence; a new process starts empty.
#[derive(Debug, Default)]
pub struct JournalStore {
    entries: Vec<JournalEntry>,
    last_id: i64,
}

impl JournalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry built from a form draft, returning its assigned
    /// id.
    ///
    /// Ids are millisecond timestamps, bumped past the previous id when
    /// two entries land in the same millisecond.
    pub fn add(&mut self, draft: EntryDraft) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;

        tracing::debug!("Adding journal entry {} ({})", id, draft.title);
        self.entries.push(JournalEntry {
            id,
            title: draft.title,
            image: draft.image,
            date: draft.date,
            location: draft.location,
            notes: draft.notes,
            equipment: draft.equipment,
        });

        id
    }

    /// Remove the entry with the given id. Returns whether anything was
    /// removed.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
