//! New-entry form state.
//!
//! Mirrors the original form lifecycle: open, fill fields, attach an
//! image, then submit (which appends to the store and resets everything)
//! or cancel.

use std::path::Path;

use crate::attachment::{sniff_image, ImageAttachment};
use crate::error::JournalError;
use crate::store::JournalStore;
use crate::types::{Equipment, EntryDraft};

#[derive(Debug, Default)]
pub struct EntryForm {
    draft: EntryDraft,
    open: bool,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.draft.date = date.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.draft.location = location.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = notes.into();
    }

    pub fn set_equipment(&mut self, equipment: Equipment) {
        self.draft.equipment = equipment;
    }

    /// Attach an image by path, sniffing its format first.
    ///
    /// On rejection the previous attachment (if any) is left untouched and
    /// the error carries the user-facing message.
    pub fn attach_image(&mut self, path: &Path) -> Result<(), JournalError> {
        let attachment = sniff_image(path)?;
        self.draft.image = Some(attachment);
        Ok(())
    }

    pub fn attachment(&self) -> Option<&ImageAttachment> {
        self.draft.image.as_ref()
    }

    /// Current draft contents, for rendering the form.
    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    /// Append the draft to the store, then reset and close the form.
    /// Returns the new entry's id.
    pub fn submit(&mut self, store: &mut JournalStore) -> i64 {
        let draft = std::mem::take(&mut self.draft);
        self.open = false;
        store.add(draft)
    }

    /// Discard the draft (pending attachment included) and close.
    pub fn cancel(&mut self) {
        self.draft = EntryDraft::default();
        self.open = false;
    }
}
