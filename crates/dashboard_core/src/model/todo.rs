//! To-do record.

use super::{require_text, RecordId, ValidationError};
use crate::collection::CollectionItem;
use crate::event::CollectionKind;
use crate::store::keys;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: RecordId,
    pub text: String,
    pub completed: bool,
}

/// Input for a new to-do. Text is trimmed on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub text: String,
}

impl TodoDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Replacement text for an existing to-do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoPatch {
    pub text: String,
}

impl TodoPatch {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Todo {
    pub fn new(id: RecordId, text: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            text: text.into(),
            completed,
        }
    }
}

impl CollectionItem for Todo {
    type Draft = TodoDraft;
    type Patch = TodoPatch;

    const KIND: CollectionKind = CollectionKind::Todos;
    const STORAGE_KEY: &'static str = keys::TODOS;
    const ENTITY_NAME: &'static str = "task";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: TodoDraft) -> Result<Self, ValidationError> {
        let text = require_text("text", &draft.text)?;
        Ok(Self::new(id, text, false))
    }

    fn normalize_patch(patch: TodoPatch) -> Result<TodoPatch, ValidationError> {
        Ok(TodoPatch::new(require_text("text", &patch.text)?))
    }

    fn apply_patch(&mut self, patch: TodoPatch) {
        self.text = patch.text;
    }

    fn default_items() -> Vec<Self> {
        vec![
            Self::new(1, "Complete dashboard design", true),
            Self::new(2, "Review monthly budget", false),
            Self::new(3, "Prepare presentation for meeting", false),
            Self::new(4, "Buy groceries", false),
            Self::new(5, "Call mom", false),
            Self::new(6, "Finish reading book", false),
        ]
    }
}
