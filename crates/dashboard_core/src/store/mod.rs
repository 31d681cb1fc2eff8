//! Key-value persistence for widget state.
//!
//! # Responsibility
//! - Define the storage contract shared by every widget.
//! - Encode records as JSON text under stable per-widget keys.
//!
//! # Invariants
//! - `load` never fails on malformed stored text; it reports `None` instead.
//! - Writes are synchronous: a returned `Ok(())` means the value is durable
//!   for the backend in use.

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::db::DbError;

pub mod memory;
pub mod sqlite;

/// Stable storage keys. Renaming one orphans previously saved state.
pub mod keys {
    pub const TODOS: &str = "dashboardTodos";
    pub const GOALS: &str = "dashboardGoals";
    pub const NOTES: &str = "dashboardNotes";
    pub const TRACKER_TIME: &str = "trackerTime";
    pub const MOOD_HISTORY: &str = "moodHistory";
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode { key, source } => write!(f, "failed to encode `{key}`: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw text storage contract.
///
/// Implementations only move strings; JSON handling lives in [`load`] and
/// [`save`] so every backend treats malformed data the same way.
pub trait PersistentStore {
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>>;
    fn write_raw(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Loads and decodes the value stored under `key`.
///
/// Returns `Ok(None)` when the key is unset or its text does not decode as
/// `T`; only backend failures are errors.
pub fn load<T: DeserializeOwned>(store: &dyn PersistentStore, key: &str) -> StoreResult<Option<T>> {
    let Some(raw) = store.read_raw(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(
                "event=store_load module=store status=malformed key={} line={} column={}",
                key,
                err.line(),
                err.column()
            );
            Ok(None)
        }
    }
}

/// Encodes `value` as JSON and writes it under `key`.
pub fn save<T: Serialize + ?Sized>(
    store: &dyn PersistentStore,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    let encoded = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.write_raw(key, &encoded)
}
