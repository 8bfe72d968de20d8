//! Observation journal for Skyyard.
//!
//! In-memory log of astrophotography sessions: entry storage, the
//! new-entry form, and image-attachment intake. Entirely local; nothing
//! here touches the network and nothing survives the process.

pub mod attachment;
pub mod error;
pub mod form;
pub mod store;
pub mod types;

pub use attachment::{sniff_image, ImageAttachment, ImageKind};
pub use error::JournalError;
pub use form::EntryForm;
pub use store::JournalStore;
pub use types::{EntryDraft, Equipment, JournalEntry};
