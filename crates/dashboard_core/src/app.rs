//! Dashboard composition root.
//!
//! # Responsibility
//! - Build every widget component from one config and a set of injected
//!   collaborators.
//! - Translate opaque UI triggers into component calls.
//! - Route scheduler ticks to the timer that owns them.
//!
//! # Invariants
//! - Validation failures from UI triggers become an `EmptyInput` notice,
//!   never an error.
//! - Components share one store, one event bus and one notifier.

use crate::clock::{Clock, SystemClock};
use crate::collection::{CollectionError, CollectionResult, ListCollection};
use crate::config::{ConfigError, DashboardConfig};
use crate::event::{CollectionKind, DashboardEvent, EventBus};
use crate::model::goal::{Goal, GoalDraft, GoalPatch};
use crate::model::mood::{Mood, MoodEntry};
use crate::model::note::{Note, NoteDraft, NotePatch};
use crate::model::todo::{Todo, TodoDraft, TodoPatch};
use crate::model::{RecordId, ValidationError};
use crate::mood::MoodLog;
use crate::port::{Confirmer, Notice, Notifier};
use crate::store::sqlite::SqliteStore;
use crate::store::{PersistentStore, StoreError};
use crate::timer::countdown::CountdownTick;
use crate::timer::pomodoro::{PomodoroMode, PomodoroState, PomodoroTimer};
use crate::timer::scheduler::{Scheduler, ThreadScheduler, TickId};
use crate::timer::tracker::{ElapsedTracker, TimerState};
use crate::view::{ClockDisplay, MonthGrid};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

#[derive(Debug)]
pub enum DashboardError {
    Config(ConfigError),
    Store(StoreError),
    Validation(ValidationError),
    IdExhausted(CollectionKind),
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::IdExhausted(kind) => write!(f, "no id left to assign in `{}`", kind.as_str()),
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::IdExhausted(_) => None,
        }
    }
}

impl From<ConfigError> for DashboardError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<StoreError> for DashboardError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<CollectionError> for DashboardError {
    fn from(value: CollectionError) -> Self {
        match value {
            CollectionError::Validation(err) => Self::Validation(err),
            CollectionError::Store(err) => Self::Store(err),
            CollectionError::IdExhausted(kind) => Self::IdExhausted(kind),
        }
    }
}

/// Shared services injected into every component.
#[derive(Clone)]
pub struct DashboardCollaborators {
    pub store: Rc<dyn PersistentStore>,
    pub notifier: Rc<dyn Notifier>,
    pub confirmer: Rc<dyn Confirmer>,
    pub clock: Rc<dyn Clock>,
    pub scheduler: Rc<dyn Scheduler>,
}

/// Opaque UI triggers, one per button or field action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    AddTodo { text: String },
    EditTodo { id: RecordId, text: String },
    ToggleTodo { id: RecordId },
    DeleteTodo { id: RecordId },
    AddGoal { text: String, progress: i64 },
    EditGoal { id: RecordId, text: String, progress: i64 },
    DeleteGoal { id: RecordId },
    AddNote { content: String },
    EditNote { id: RecordId, content: String },
    DeleteNote { id: RecordId },
    StartTracker,
    PauseTracker,
    ResetTracker,
    LabelTracker { label: String },
    StartPomodoro,
    PausePomodoro,
    ResetPomodoro,
    SelectPomodoroMode(PomodoroMode),
    SelectMood(Mood),
    LogMood,
}

/// Record an edit dialog is opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Todo(RecordId),
    Goal(RecordId),
    Note(RecordId),
}

/// Prefilled values for the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub title: &'static str,
    pub text: String,
    /// Present only for goals.
    pub progress: Option<u8>,
}

/// Compact dashboard card data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub clock: ClockDisplay,
    pub calendar: MonthGrid,
    pub pending_todos: Vec<Todo>,
    pub current_goal: Option<Goal>,
    pub tracker: TimerState,
    pub tracker_display: String,
    pub pomodoro: PomodoroState,
    pub pomodoro_display: String,
    pub recent_moods: Vec<MoodEntry>,
}

pub struct DashboardApp {
    events: Rc<EventBus>,
    notifier: Rc<dyn Notifier>,
    confirmer: Rc<dyn Confirmer>,
    clock: Rc<dyn Clock>,
    todos: ListCollection<Todo>,
    goals: ListCollection<Goal>,
    notes: ListCollection<Note>,
    tracker: ElapsedTracker,
    pomodoro: PomodoroTimer,
    moods: MoodLog,
    ticks: Option<Receiver<TickId>>,
}

impl DashboardApp {
    /// Builds every component from `config`, loading persisted state.
    pub fn new(
        config: &DashboardConfig,
        collaborators: DashboardCollaborators,
    ) -> Result<Self, DashboardError> {
        config.validate()?;
        let DashboardCollaborators {
            store,
            notifier,
            confirmer,
            clock,
            scheduler,
        } = collaborators;
        let events = Rc::new(EventBus::new());

        let todos: ListCollection<Todo> =
            ListCollection::load(Rc::clone(&store), Rc::clone(&events))?;
        let goals: ListCollection<Goal> =
            ListCollection::load(Rc::clone(&store), Rc::clone(&events))?;
        let notes: ListCollection<Note> =
            ListCollection::load(Rc::clone(&store), Rc::clone(&events))?;
        let tracker = ElapsedTracker::load(
            Rc::clone(&store),
            Rc::clone(&scheduler),
            Rc::clone(&events),
            config.tick_interval,
        )?;
        let pomodoro = PomodoroTimer::new(
            config.pomodoro,
            scheduler,
            Rc::clone(&events),
            Rc::clone(&notifier),
            config.tick_interval,
        );
        let moods = MoodLog::load(
            config.mood_history_capacity,
            store,
            Rc::clone(&clock),
            Rc::clone(&events),
            Rc::clone(&notifier),
        )?;

        info!(
            "event=app_init module=app status=ok todos={} goals={} notes={} tracker_s={}",
            todos.len(),
            goals.len(),
            notes.len(),
            tracker.elapsed_seconds()
        );

        Ok(Self {
            events,
            notifier,
            confirmer,
            clock,
            todos,
            goals,
            notes,
            tracker,
            pomodoro,
            moods,
            ticks: None,
        })
    }

    /// Opens the configured SQLite store with the system clock and a
    /// thread-backed scheduler. Drive ticks with [`Self::pump_ticks`].
    pub fn open(
        config: &DashboardConfig,
        notifier: Rc<dyn Notifier>,
        confirmer: Rc<dyn Confirmer>,
    ) -> Result<Self, DashboardError> {
        config.validate()?;
        let store = match &config.db_path {
            Some(path) => SqliteStore::open(path)?,
            None => SqliteStore::open_in_memory()?,
        };
        let (scheduler, ticks) = ThreadScheduler::new();
        let mut app = Self::new(
            config,
            DashboardCollaborators {
                store: Rc::new(store),
                notifier,
                confirmer,
                clock: Rc::new(SystemClock),
                scheduler: Rc::new(scheduler),
            },
        )?;
        app.ticks = Some(ticks);
        Ok(app)
    }

    pub fn subscribe(&self, subscriber: impl Fn(&DashboardEvent) + 'static) {
        self.events.subscribe(subscriber);
    }

    pub fn todos(&self) -> &ListCollection<Todo> {
        &self.todos
    }

    pub fn goals(&self) -> &ListCollection<Goal> {
        &self.goals
    }

    pub fn notes(&self) -> &ListCollection<Note> {
        &self.notes
    }

    pub fn tracker(&self) -> &ElapsedTracker {
        &self.tracker
    }

    pub fn pomodoro(&self) -> &PomodoroTimer {
        &self.pomodoro
    }

    pub fn moods(&self) -> &MoodLog {
        &self.moods
    }

    /// Applies one UI trigger.
    ///
    /// # Errors
    /// Storage failures and id exhaustion; blank input is reported through
    /// the notifier.
    pub fn dispatch(&mut self, action: UiAction) -> Result<(), DashboardError> {
        match action {
            UiAction::AddTodo { text } => {
                let result = self.todos.add(TodoDraft::new(text));
                self.settle(result)
            }
            UiAction::EditTodo { id, text } => {
                let result = self.todos.update(id, TodoPatch::new(text));
                self.settle(result)
            }
            UiAction::ToggleTodo { id } => {
                let result = self.todos.toggle(id);
                self.settle(result)
            }
            UiAction::DeleteTodo { id } => {
                let result = self.todos.remove(id, self.confirmer.as_ref());
                self.settle(result)
            }
            UiAction::AddGoal { text, progress } => {
                let result = self.goals.add(GoalDraft::new(text, progress));
                self.settle(result)
            }
            UiAction::EditGoal { id, text, progress } => {
                let result = self.goals.update(id, GoalPatch::new(text, progress));
                self.settle(result)
            }
            UiAction::DeleteGoal { id } => {
                let result = self.goals.remove(id, self.confirmer.as_ref());
                self.settle(result)
            }
            UiAction::AddNote { content } => {
                let result = self.notes.add(NoteDraft::new(self.clock.today(), content));
                self.settle(result)
            }
            UiAction::EditNote { id, content } => {
                let result = self.notes.update(id, NotePatch::new(content));
                self.settle(result)
            }
            UiAction::DeleteNote { id } => {
                let result = self.notes.remove(id, self.confirmer.as_ref());
                self.settle(result)
            }
            UiAction::StartTracker => {
                self.tracker.start();
                Ok(())
            }
            UiAction::PauseTracker => {
                self.tracker.pause();
                Ok(())
            }
            UiAction::ResetTracker => Ok(self.tracker.reset()?),
            UiAction::LabelTracker { label } => {
                self.tracker.set_label(label);
                Ok(())
            }
            UiAction::StartPomodoro => {
                self.pomodoro.start();
                Ok(())
            }
            UiAction::PausePomodoro => {
                self.pomodoro.pause();
                Ok(())
            }
            UiAction::ResetPomodoro => {
                self.pomodoro.reset();
                Ok(())
            }
            UiAction::SelectPomodoroMode(mode) => {
                if mode != self.pomodoro.mode() {
                    self.pomodoro.set_mode(mode);
                }
                Ok(())
            }
            UiAction::SelectMood(mood) => {
                self.moods.select(mood);
                Ok(())
            }
            UiAction::LogMood => {
                self.moods.log_selected()?;
                Ok(())
            }
        }
    }

    /// Prefill values for editing `target`, or `None` if it no longer exists.
    pub fn edit_form(&self, target: EditTarget) -> Option<EditForm> {
        match target {
            EditTarget::Todo(id) => self.todos.get(id).map(|todo| EditForm {
                title: "Edit Todo",
                text: todo.text.clone(),
                progress: None,
            }),
            EditTarget::Goal(id) => self.goals.get(id).map(|goal| EditForm {
                title: "Edit Goal",
                text: goal.text.clone(),
                progress: Some(goal.progress),
            }),
            EditTarget::Note(id) => self.notes.get(id).map(|note| EditForm {
                title: "Edit Note",
                text: note.content.clone(),
                progress: None,
            }),
        }
    }

    /// Routes one tick to its owning timer. Returns whether any timer took it.
    pub fn on_tick(&mut self, id: TickId) -> Result<bool, DashboardError> {
        if self.tracker.on_tick(id)? {
            return Ok(true);
        }
        Ok(self.pomodoro.on_tick(id) != CountdownTick::Ignored)
    }

    /// Handles every tick already queued by the thread scheduler.
    ///
    /// Returns the number of ticks consumed by a timer; stale ticks from
    /// cancelled handles are dropped.
    pub fn pump_ticks(&mut self) -> Result<usize, DashboardError> {
        let queued: Vec<TickId> = match &self.ticks {
            Some(receiver) => receiver.try_iter().collect(),
            None => return Ok(0),
        };
        self.route(queued)
    }

    /// Waits up to `timeout` for the next tick, then drains the queue.
    pub fn pump_ticks_timeout(&mut self, timeout: Duration) -> Result<usize, DashboardError> {
        let first = match &self.ticks {
            Some(receiver) => match receiver.recv_timeout(timeout) {
                Ok(id) => id,
                Err(RecvTimeoutError::Timeout) => return Ok(0),
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("event=tick_pump module=app status=error error_code=disconnected");
                    return Ok(0);
                }
            },
            None => return Ok(0),
        };
        let consumed = self.route(vec![first])?;
        Ok(consumed + self.pump_ticks()?)
    }

    pub fn summary(&self) -> DashboardSummary {
        let now = self.clock.now();
        DashboardSummary {
            clock: ClockDisplay::at(now),
            calendar: MonthGrid::for_date(now.date()),
            pending_todos: self.todos.pending_summary().into_iter().cloned().collect(),
            current_goal: self.goals.current_goal().cloned(),
            tracker: self.tracker.state(),
            tracker_display: self.tracker.display(),
            pomodoro: self.pomodoro.state(),
            pomodoro_display: self.pomodoro.display(),
            recent_moods: self.moods.entries().to_vec(),
        }
    }

    fn route(&mut self, ticks: Vec<TickId>) -> Result<usize, DashboardError> {
        let mut consumed = 0;
        for id in ticks {
            if self.on_tick(id)? {
                consumed += 1;
            }
        }
        Ok(consumed)
    }

    /// Turns validation failures into a user notice; passes other errors up.
    fn settle<T>(&self, result: CollectionResult<T>) -> Result<(), DashboardError> {
        match result {
            Ok(_) => Ok(()),
            Err(CollectionError::Validation(err)) => {
                info!("event=ui_action module=app status=rejected reason={err}");
                self.notifier.notify(&Notice::EmptyInput);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
