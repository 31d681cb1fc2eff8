//! Pomodoro state machine over a [`CountdownTimer`].
//!
//! # Invariants
//! - `remaining` always belongs to the selected mode's duration.
//! - Completion of `pomodoro` switches to `short-break`; completion of any
//!   break switches to `pomodoro`. `long-break` is reached only by manual
//!   selection.
//! - After an automatic switch the timer is idle; the next run needs `start`.

use super::countdown::{CountdownTick, CountdownTimer};
use super::scheduler::{Scheduler, TickId};
use super::TimerPhase;
use crate::event::{DashboardEvent, EventBus};
use crate::model::ValidationError;
use crate::port::{Notice, Notifier};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PomodoroMode {
    #[default]
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl PomodoroMode {
    pub const ALL: [PomodoroMode; 3] = [
        PomodoroMode::Pomodoro,
        PomodoroMode::ShortBreak,
        PomodoroMode::LongBreak,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pomodoro => "pomodoro",
            Self::ShortBreak => "short-break",
            Self::LongBreak => "long-break",
        }
    }

    /// Mode selected automatically when this one runs out.
    pub fn next_after_completion(self) -> Self {
        match self {
            Self::Pomodoro => Self::ShortBreak,
            Self::ShortBreak | Self::LongBreak => Self::Pomodoro,
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, Self::Pomodoro)
    }
}

impl Display for PomodoroMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PomodoroMode {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        PomodoroMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownMode(value.to_string()))
    }
}

/// Per-mode durations in seconds, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroDurations {
    pub pomodoro: u64,
    pub short_break: u64,
    pub long_break: u64,
}

impl Default for PomodoroDurations {
    fn default() -> Self {
        Self {
            pomodoro: 25 * 60,
            short_break: 5 * 60,
            long_break: 15 * 60,
        }
    }
}

impl PomodoroDurations {
    pub fn for_mode(&self, mode: PomodoroMode) -> u64 {
        match mode {
            PomodoroMode::Pomodoro => self.pomodoro,
            PomodoroMode::ShortBreak => self.short_break,
            PomodoroMode::LongBreak => self.long_break,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PomodoroState {
    pub mode: PomodoroMode,
    pub remaining_seconds: u64,
    pub running: bool,
}

pub struct PomodoroTimer {
    countdown: CountdownTimer,
    mode: PomodoroMode,
    durations: PomodoroDurations,
    events: Rc<EventBus>,
    notifier: Rc<dyn Notifier>,
}

impl PomodoroTimer {
    /// Creates an idle timer in `pomodoro` mode with a full duration.
    pub fn new(
        durations: PomodoroDurations,
        scheduler: Rc<dyn Scheduler>,
        events: Rc<EventBus>,
        notifier: Rc<dyn Notifier>,
        tick_interval: Duration,
    ) -> Self {
        let mode = PomodoroMode::default();
        Self {
            countdown: CountdownTimer::new(durations.for_mode(mode), scheduler, tick_interval),
            mode,
            durations,
            events,
            notifier,
        }
    }

    pub fn mode(&self) -> PomodoroMode {
        self.mode
    }

    pub fn durations(&self) -> PomodoroDurations {
        self.durations
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.countdown.remaining_seconds()
    }

    pub fn phase(&self) -> TimerPhase {
        self.countdown.phase()
    }

    pub fn tick_id(&self) -> Option<TickId> {
        self.countdown.tick_id()
    }

    pub fn state(&self) -> PomodoroState {
        PomodoroState {
            mode: self.mode,
            remaining_seconds: self.countdown.remaining_seconds(),
            running: self.countdown.is_running(),
        }
    }

    /// `MM:SS` rendering of the remaining time.
    pub fn display(&self) -> String {
        self.countdown.display()
    }

    /// Stops any running tick and refills the counter for `mode`.
    pub fn set_mode(&mut self, mode: PomodoroMode) {
        self.countdown.rearm(self.durations.for_mode(mode));
        self.mode = mode;
        info!(
            "event=pomodoro_mode module=timer status=ok mode={} remaining_s={}",
            mode,
            self.countdown.remaining_seconds()
        );
        self.publish_changed();
    }

    pub fn start(&mut self) {
        if self.countdown.start() {
            info!(
                "event=pomodoro_start module=timer status=ok mode={} remaining_s={}",
                self.mode,
                self.countdown.remaining_seconds()
            );
            self.publish_changed();
        }
    }

    pub fn pause(&mut self) {
        if self.countdown.pause() {
            info!(
                "event=pomodoro_pause module=timer status=ok mode={} remaining_s={}",
                self.mode,
                self.countdown.remaining_seconds()
            );
            self.publish_changed();
        }
    }

    /// Restores the full duration of the current mode.
    pub fn reset(&mut self) {
        self.set_mode(self.mode);
    }

    /// Routes one tick. On completion, notifies, publishes and switches mode.
    pub fn on_tick(&mut self, id: TickId) -> CountdownTick {
        let outcome = self.countdown.on_tick(id);
        match outcome {
            CountdownTick::Ignored => {}
            CountdownTick::Advanced { .. } => self.publish_changed(),
            CountdownTick::Completed => {
                let finished = self.mode;
                let next = finished.next_after_completion();
                info!(
                    "event=pomodoro_complete module=timer status=ok finished={} next={}",
                    finished, next
                );
                self.notifier.notify(&Notice::PomodoroFinished(finished));
                self.events
                    .publish(DashboardEvent::PomodoroCompleted { finished, next });
                self.set_mode(next);
            }
        }
        outcome
    }

    fn publish_changed(&self) {
        self.events.publish(DashboardEvent::PomodoroChanged {
            mode: self.mode,
            remaining_seconds: self.countdown.remaining_seconds(),
            phase: self.countdown.phase(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::PomodoroMode;

    #[test]
    fn auto_transition_never_targets_long_break() {
        for mode in PomodoroMode::ALL {
            assert_ne!(mode.next_after_completion(), PomodoroMode::LongBreak);
        }
        assert_eq!(
            PomodoroMode::Pomodoro.next_after_completion(),
            PomodoroMode::ShortBreak
        );
    }

    #[test]
    fn parses_kebab_case_names() {
        assert_eq!(
            "long-break".parse::<PomodoroMode>().unwrap(),
            PomodoroMode::LongBreak
        );
        assert!("lunch".parse::<PomodoroMode>().is_err());
        assert_eq!(
            serde_json::to_string(&PomodoroMode::ShortBreak).unwrap(),
            "\"short-break\""
        );
    }
}
