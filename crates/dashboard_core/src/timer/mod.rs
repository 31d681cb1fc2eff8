//! Tick-driven timers: elapsed-time tracker and pomodoro countdown.
//!
//! # Invariants
//! - A timer is `Running` exactly when it holds a live tick handle.
//! - Ticks carrying an id other than the held handle's are ignored.

use scheduler::{Scheduler, TickHandle, TickId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod countdown;
pub mod pomodoro;
pub mod scheduler;
pub mod tracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Phase bookkeeping plus the live tick handle, shared by both timers.
#[derive(Debug)]
pub(crate) struct TickSlot {
    phase: TimerPhase,
    handle: Option<TickHandle>,
    period: Duration,
}

impl TickSlot {
    pub(crate) fn new(period: Duration, phase: TimerPhase) -> Self {
        Self {
            phase,
            handle: None,
            period,
        }
    }

    pub(crate) fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub(crate) fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Idle/paused -> running. Returns `false` when already running.
    pub(crate) fn start(&mut self, scheduler: &dyn Scheduler) -> bool {
        if self.is_running() {
            return false;
        }
        self.handle = Some(scheduler.every(self.period));
        self.phase = TimerPhase::Running;
        true
    }

    /// Running -> paused. Returns `false` when not running.
    pub(crate) fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.cancel_handle();
        self.phase = TimerPhase::Paused;
        true
    }

    /// Any phase -> idle.
    pub(crate) fn stop(&mut self) {
        self.cancel_handle();
        self.phase = TimerPhase::Idle;
    }

    /// Whether `id` belongs to the live handle.
    pub(crate) fn owns(&self, id: TickId) -> bool {
        self.handle.as_ref().is_some_and(|handle| handle.id() == id)
    }

    pub(crate) fn tick_id(&self) -> Option<TickId> {
        self.handle.as_ref().map(TickHandle::id)
    }

    fn cancel_handle(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }
}
