//! Dated note record.

use super::{require_text, RecordId, ValidationError};
use crate::collection::CollectionItem;
use crate::event::CollectionKind;
use crate::store::keys;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `date` serializes as an ISO calendar date (`2023-10-15`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: RecordId,
    pub date: NaiveDate,
    pub content: String,
}

/// Input for a new note; `date` is normally the caller's local today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub date: NaiveDate,
    pub content: String,
}

impl NoteDraft {
    pub fn new(date: NaiveDate, content: impl Into<String>) -> Self {
        Self {
            date,
            content: content.into(),
        }
    }
}

/// Replacement content; the note keeps its original date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePatch {
    pub content: String,
}

impl NotePatch {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Note {
    pub fn new(id: RecordId, date: NaiveDate, content: impl Into<String>) -> Self {
        Self {
            id,
            date,
            content: content.into(),
        }
    }
}

impl CollectionItem for Note {
    type Draft = NoteDraft;
    type Patch = NotePatch;

    const KIND: CollectionKind = CollectionKind::Notes;
    const STORAGE_KEY: &'static str = keys::NOTES;
    const ENTITY_NAME: &'static str = "note";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NoteDraft) -> Result<Self, ValidationError> {
        let content = require_text("content", &draft.content)?;
        Ok(Self::new(id, draft.date, content))
    }

    fn normalize_patch(patch: NotePatch) -> Result<NotePatch, ValidationError> {
        Ok(NotePatch::new(require_text("content", &patch.content)?))
    }

    fn apply_patch(&mut self, patch: NotePatch) {
        self.content = patch.content;
    }

    fn default_items() -> Vec<Self> {
        vec![
            Self::new(
                1,
                seed_date(2023, 10, 15),
                "Remember to check the budget app for monthly expenses.",
            ),
            Self::new(
                2,
                seed_date(2023, 10, 14),
                "Meeting with team at 2 PM tomorrow.",
            ),
            Self::new(
                3,
                seed_date(2023, 10, 13),
                "Great workout today! Feeling energized.",
            ),
        ]
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::Note;
    use chrono::NaiveDate;

    #[test]
    fn date_round_trips_as_iso_string() {
        let note = Note::new(2, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), "Leap day");
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(json, r#"{"id":2,"date":"2024-02-29","content":"Leap day"}"#);
    }

    #[test]
    fn rejects_non_iso_date_text() {
        let parsed = serde_json::from_str::<Note>(r#"{"id":1,"date":"10/15/2023","content":"x"}"#);
        assert!(parsed.is_err());
    }
}
