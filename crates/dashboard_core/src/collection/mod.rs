//! Ordered, id-keyed widget collections with write-through persistence.
//!
//! # Responsibility
//! - Provide one CRUD implementation shared by todos, goals and notes.
//! - Persist the whole collection after every successful mutation.
//! - Publish `CollectionChanged` so renderers can refresh.
//!
//! # Invariants
//! - In-memory items and the persisted copy are equal after every call that
//!   returns `Ok`.
//! - New id = max existing id + 1, or 1 when empty.
//! - Validation failures and missing ids leave state untouched.

use crate::event::{CollectionKind, DashboardEvent, EventBus};
use crate::model::goal::Goal;
use crate::model::note::Note;
use crate::model::todo::Todo;
use crate::model::{RecordId, ValidationError};
use crate::port::Confirmer;
use crate::store::{self, PersistentStore, StoreError};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

const PENDING_TODO_SUMMARY_LIMIT: usize = 3;

pub type CollectionResult<T> = Result<T, CollectionError>;

#[derive(Debug)]
pub enum CollectionError {
    Validation(ValidationError),
    Store(StoreError),
    /// The largest stored id is already `RecordId::MAX`.
    IdExhausted(CollectionKind),
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::IdExhausted(kind) => write!(f, "no id left to assign in `{}`", kind.as_str()),
        }
    }
}

impl Error for CollectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::IdExhausted(_) => None,
        }
    }
}

impl From<ValidationError> for CollectionError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for CollectionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Record type that can live in a [`ListCollection`].
pub trait CollectionItem: Clone + Serialize + DeserializeOwned {
    /// Raw user input for a new record.
    type Draft;
    /// Raw user input for editing a record.
    type Patch;

    const KIND: CollectionKind;
    const STORAGE_KEY: &'static str;
    /// Noun used in the delete confirmation prompt.
    const ENTITY_NAME: &'static str;

    fn id(&self) -> RecordId;

    /// Validates `draft` and builds the record under `id`.
    fn from_draft(id: RecordId, draft: Self::Draft) -> Result<Self, ValidationError>;

    /// Validates and normalizes an edit before any record is touched.
    fn normalize_patch(patch: Self::Patch) -> Result<Self::Patch, ValidationError>;

    /// Applies an already normalized patch.
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Seed data used when nothing usable is stored.
    fn default_items() -> Vec<Self>;
}

pub struct ListCollection<T: CollectionItem> {
    items: Vec<T>,
    store: Rc<dyn PersistentStore>,
    events: Rc<EventBus>,
}

impl<T: CollectionItem> ListCollection<T> {
    /// Loads the collection from `store`, falling back to seed data when the
    /// key is unset or malformed.
    pub fn load(store: Rc<dyn PersistentStore>, events: Rc<EventBus>) -> CollectionResult<Self> {
        let stored = store::load::<Vec<T>>(store.as_ref(), T::STORAGE_KEY)?;
        let source = if stored.is_some() { "stored" } else { "default" };
        let items = stored.unwrap_or_else(T::default_items);
        info!(
            "event=collection_load module=collection status=ok kind={} source={} count={}",
            T::KIND.as_str(),
            source,
            items.len()
        );
        Ok(Self {
            items,
            store,
            events,
        })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Id the next `add` will assign.
    ///
    /// # Errors
    /// `IdExhausted` when the largest id is `RecordId::MAX`.
    pub fn next_id(&self) -> CollectionResult<RecordId> {
        match self.items.iter().map(CollectionItem::id).max() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or(CollectionError::IdExhausted(T::KIND)),
        }
    }

    /// Validates and appends a new record.
    ///
    /// # Errors
    /// - `Validation` when the required text is blank; nothing is stored.
    /// - `Store` when the write fails; the in-memory append is rolled back.
    /// - `IdExhausted` when no id is left; nothing is stored.
    pub fn add(&mut self, draft: T::Draft) -> CollectionResult<T> {
        let item = T::from_draft(self.next_id()?, draft)?;
        self.items.push(item.clone());
        if let Err(err) = self.persist() {
            self.items.pop();
            return Err(err);
        }
        info!(
            "event=collection_add module=collection status=ok kind={} id={}",
            T::KIND.as_str(),
            item.id()
        );
        self.publish();
        Ok(item)
    }

    /// Edits the record with `id`. Returns `Ok(None)` when no record matches.
    pub fn update(&mut self, id: RecordId, patch: T::Patch) -> CollectionResult<Option<T>> {
        let patch = T::normalize_patch(patch)?;
        self.mutate(id, "update", |item| item.apply_patch(patch))
    }

    /// Removes the record with `id` after the user confirms.
    ///
    /// Unknown ids return `Ok(false)` without prompting; a declined prompt
    /// also returns `Ok(false)`.
    pub fn remove(&mut self, id: RecordId, confirmer: &dyn Confirmer) -> CollectionResult<bool> {
        let Some(position) = self.position(id) else {
            debug!(
                "event=collection_remove module=collection status=skipped kind={} id={} reason=not_found",
                T::KIND.as_str(),
                id
            );
            return Ok(false);
        };

        let prompt = format!("Are you sure you want to delete this {}?", T::ENTITY_NAME);
        if !confirmer.confirm(&prompt) {
            info!(
                "event=collection_remove module=collection status=cancelled kind={} id={}",
                T::KIND.as_str(),
                id
            );
            return Ok(false);
        }

        let removed = self.items.remove(position);
        if let Err(err) = self.persist() {
            self.items.insert(position, removed);
            return Err(err);
        }
        info!(
            "event=collection_remove module=collection status=ok kind={} id={}",
            T::KIND.as_str(),
            id
        );
        self.publish();
        Ok(true)
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Runs `change` on the record with `id`, then persists and publishes.
    /// Restores the previous record if the write fails.
    fn mutate(
        &mut self,
        id: RecordId,
        operation: &'static str,
        change: impl FnOnce(&mut T),
    ) -> CollectionResult<Option<T>> {
        let Some(position) = self.position(id) else {
            debug!(
                "event=collection_{} module=collection status=skipped kind={} id={} reason=not_found",
                operation,
                T::KIND.as_str(),
                id
            );
            return Ok(None);
        };

        let previous = self.items[position].clone();
        change(&mut self.items[position]);
        if let Err(err) = self.persist() {
            self.items[position] = previous;
            return Err(err);
        }
        info!(
            "event=collection_{} module=collection status=ok kind={} id={}",
            operation,
            T::KIND.as_str(),
            id
        );
        self.publish();
        Ok(Some(self.items[position].clone()))
    }

    fn persist(&self) -> CollectionResult<()> {
        store::save(self.store.as_ref(), T::STORAGE_KEY, &self.items)?;
        Ok(())
    }

    fn publish(&self) {
        self.events
            .publish(DashboardEvent::CollectionChanged(T::KIND));
    }
}

impl ListCollection<Todo> {
    /// Flips `completed` on the to-do with `id`.
    pub fn toggle(&mut self, id: RecordId) -> CollectionResult<Option<Todo>> {
        self.mutate(id, "toggle", |todo| todo.completed = !todo.completed)
    }

    /// First incomplete to-dos in list order, for the compact dashboard card.
    pub fn pending_summary(&self) -> Vec<&Todo> {
        self.items
            .iter()
            .filter(|todo| !todo.completed)
            .take(PENDING_TODO_SUMMARY_LIMIT)
            .collect()
    }
}

impl ListCollection<Goal> {
    /// The first goal in the list is treated as the current one.
    pub fn current_goal(&self) -> Option<&Goal> {
        self.items.first()
    }
}

impl ListCollection<Note> {
    /// Notes newest date first; equal dates keep insertion order.
    pub fn sorted_by_date_desc(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.items.iter().collect();
        notes.sort_by(|a, b| b.date.cmp(&a.date));
        notes
    }
}
