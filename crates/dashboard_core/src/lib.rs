//! Core domain logic for the personal dashboard.
//! This crate owns every widget's state and its persistence; renderers only
//! observe it through the event bus.

pub mod app;
pub mod clock;
pub mod collection;
pub mod config;
pub mod db;
pub mod event;
pub mod logging;
pub mod model;
pub mod mood;
pub mod port;
pub mod store;
pub mod timer;
pub mod view;

pub use app::{
    DashboardApp, DashboardCollaborators, DashboardError, DashboardSummary, EditForm, EditTarget,
    UiAction,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use collection::{CollectionError, CollectionItem, CollectionResult, ListCollection};
pub use config::{ConfigError, DashboardConfig};
pub use event::{CollectionKind, DashboardEvent, EventBus};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::goal::{Goal, GoalDraft, GoalPatch};
pub use model::mood::{Mood, MoodEntry};
pub use model::note::{Note, NoteDraft, NotePatch};
pub use model::todo::{Todo, TodoDraft, TodoPatch};
pub use model::{RecordId, ValidationError};
pub use mood::{format_mood_label, MoodLog};
pub use port::{Confirmer, LogNotifier, Notice, Notifier, StaticConfirmer};
pub use store::memory::MemoryStore;
pub use store::sqlite::SqliteStore;
pub use store::{PersistentStore, StoreError, StoreResult};
pub use timer::countdown::{CountdownTick, CountdownTimer};
pub use timer::pomodoro::{PomodoroDurations, PomodoroMode, PomodoroState, PomodoroTimer};
pub use timer::scheduler::{ManualScheduler, Scheduler, ThreadScheduler, TickHandle, TickId};
pub use timer::tracker::{ElapsedTracker, TimerState, DEFAULT_TRACKER_LABEL};
pub use timer::TimerPhase;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
