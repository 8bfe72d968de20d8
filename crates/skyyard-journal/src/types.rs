//! Journal entry types. All user-facing fields are free text, matching the
//! form they are typed into.

use serde::{Deserialize, Serialize};

use crate::attachment::ImageAttachment;

/// Capture-equipment metadata for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub exposures: String,
    pub exposure_time: String,
    pub iso: String,
    pub focal_length: String,
    pub telescope: String,
    pub camera: String,
    pub mount: String,
    pub filters: String,
}

/// One logged observation session.
///
/// Ids are creation-time derived (millisecond timestamps), unique, and
/// monotonically non-decreasing within a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub title: String,
    pub image: Option<ImageAttachment>,
    pub date: String,
    pub location: String,
    pub notes: String,
    pub equipment: Equipment,
}

/// Fields gathered by the entry form; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub title: String,
    pub image: Option<ImageAttachment>,
    pub date: String,
    pub location: String,
    pub notes: String,
    pub equipment: Equipment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_equipment_group() {
        let entry = JournalEntry {
            id: 1,
            title: "M42 - Orion Nebula".to_string(),
            image: None,
            date: "2025-01-20".to_string(),
            location: "San Francisco, CA".to_string(),
            notes: "First light".to_string(),
            equipment: Equipment {
                exposures: "100".to_string(),
                exposure_time: "60".to_string(),
                iso: "3200".to_string(),
                ..Default::default()
            },
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("M42 - Orion Nebula"));
        assert!(json.contains("\"iso\":\"3200\""));
    }
}
