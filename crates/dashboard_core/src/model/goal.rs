//! Goal record with a clamped progress percentage.

use super::{require_text, RecordId, ValidationError};
use crate::collection::CollectionItem;
use crate::event::CollectionKind;
use crate::store::keys;
use serde::{Deserialize, Deserializer, Serialize};

const MAX_PROGRESS: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: RecordId,
    pub text: String,
    /// Percent complete, always within `0..=100`. Stored values outside the
    /// range are clamped on load.
    #[serde(deserialize_with = "deserialize_progress")]
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDraft {
    pub text: String,
    pub progress: i64,
}

impl GoalDraft {
    pub fn new(text: impl Into<String>, progress: i64) -> Self {
        Self {
            text: text.into(),
            progress,
        }
    }
}

/// Full replacement of a goal's text and progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalPatch {
    pub text: String,
    pub progress: i64,
}

impl GoalPatch {
    pub fn new(text: impl Into<String>, progress: i64) -> Self {
        Self {
            text: text.into(),
            progress,
        }
    }
}

impl Goal {
    pub fn new(id: RecordId, text: impl Into<String>, progress: i64) -> Self {
        Self {
            id,
            text: text.into(),
            progress: clamp_progress(progress),
        }
    }
}

/// Maps any integer onto the `0..=100` percentage range.
pub fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, i64::from(MAX_PROGRESS)) as u8
}

fn deserialize_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_progress)
}

impl CollectionItem for Goal {
    type Draft = GoalDraft;
    type Patch = GoalPatch;

    const KIND: CollectionKind = CollectionKind::Goals;
    const STORAGE_KEY: &'static str = keys::GOALS;
    const ENTITY_NAME: &'static str = "goal";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: GoalDraft) -> Result<Self, ValidationError> {
        let text = require_text("text", &draft.text)?;
        Ok(Self::new(id, text, draft.progress))
    }

    fn normalize_patch(patch: GoalPatch) -> Result<GoalPatch, ValidationError> {
        let text = require_text("text", &patch.text)?;
        Ok(GoalPatch::new(text, i64::from(clamp_progress(patch.progress))))
    }

    fn apply_patch(&mut self, patch: GoalPatch) {
        self.text = patch.text;
        self.progress = clamp_progress(patch.progress);
    }

    fn default_items() -> Vec<Self> {
        vec![
            Self::new(1, "Learn React.js", 65),
            Self::new(2, "Run a marathon", 30),
            Self::new(3, "Save $5,000", 45),
            Self::new(4, "Read 12 books this year", 25),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp_progress, Goal};

    #[test]
    fn progress_is_clamped_into_percentage_range() {
        assert_eq!(clamp_progress(-20), 0);
        assert_eq!(clamp_progress(42), 42);
        assert_eq!(clamp_progress(250), 100);
        assert_eq!(Goal::new(1, "Stretch daily", 180).progress, 100);
    }

    #[test]
    fn stored_progress_outside_range_is_clamped_on_decode() {
        let goals: Vec<Goal> = serde_json::from_str(
            r#"[{"id":1,"text":"a","progress":150},
                {"id":2,"text":"b","progress":300},
                {"id":3,"text":"c","progress":-4}]"#,
        )
        .unwrap();
        let progress: Vec<u8> = goals.iter().map(|goal| goal.progress).collect();
        assert_eq!(progress, vec![100, 100, 0]);
    }
}
