//! Countdown from a fixed duration to zero.

use super::scheduler::{Scheduler, TickId};
use super::{TickSlot, TimerPhase};
use crate::view::format_ms;
use std::rc::Rc;
use std::time::Duration;

/// Outcome of routing one tick to a [`CountdownTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// The tick did not belong to this timer's live handle.
    Ignored,
    Advanced { remaining_seconds: u64 },
    /// The tick arrived at zero: the timer stopped and is idle.
    Completed,
}

pub struct CountdownTimer {
    slot: TickSlot,
    duration: u64,
    remaining: u64,
    scheduler: Rc<dyn Scheduler>,
}

impl CountdownTimer {
    pub fn new(duration_seconds: u64, scheduler: Rc<dyn Scheduler>, tick_interval: Duration) -> Self {
        Self {
            slot: TickSlot::new(tick_interval, TimerPhase::Idle),
            duration: duration_seconds,
            remaining: duration_seconds,
            scheduler,
        }
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining
    }

    pub fn phase(&self) -> TimerPhase {
        self.slot.phase()
    }

    pub fn is_running(&self) -> bool {
        self.slot.is_running()
    }

    pub fn tick_id(&self) -> Option<TickId> {
        self.slot.tick_id()
    }

    /// `MM:SS` rendering of the remaining time.
    pub fn display(&self) -> String {
        format_ms(self.remaining)
    }

    /// Returns `false` when already running.
    pub fn start(&mut self) -> bool {
        self.slot.start(self.scheduler.as_ref())
    }

    /// Returns `false` when not running.
    pub fn pause(&mut self) -> bool {
        self.slot.pause()
    }

    /// Stops and refills to the configured duration.
    pub fn reset(&mut self) {
        self.slot.stop();
        self.remaining = self.duration;
    }

    /// Stops and reconfigures the duration, refilling the counter.
    pub fn rearm(&mut self, duration_seconds: u64) {
        self.duration = duration_seconds;
        self.reset();
    }

    pub fn on_tick(&mut self, id: TickId) -> CountdownTick {
        if !self.slot.owns(id) {
            return CountdownTick::Ignored;
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            return CountdownTick::Advanced {
                remaining_seconds: self.remaining,
            };
        }
        self.slot.stop();
        CountdownTick::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::{CountdownTick, CountdownTimer};
    use crate::timer::scheduler::{ManualScheduler, Scheduler};
    use crate::timer::TimerPhase;
    use std::rc::Rc;
    use std::time::Duration;

    fn countdown(seconds: u64) -> (CountdownTimer, Rc<ManualScheduler>) {
        let scheduler = Rc::new(ManualScheduler::new());
        let timer = CountdownTimer::new(seconds, scheduler.clone(), Duration::from_secs(1));
        (timer, scheduler)
    }

    #[test]
    fn completes_on_the_tick_after_reaching_zero() {
        let (mut timer, scheduler) = countdown(2);
        timer.start();
        let id = timer.tick_id().unwrap();

        assert_eq!(
            timer.on_tick(id),
            CountdownTick::Advanced { remaining_seconds: 1 }
        );
        assert_eq!(
            timer.on_tick(id),
            CountdownTick::Advanced { remaining_seconds: 0 }
        );
        assert_eq!(timer.on_tick(id), CountdownTick::Completed);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert!(scheduler.active_ticks().is_empty());
    }

    #[test]
    fn start_twice_keeps_a_single_handle() {
        let (mut timer, scheduler) = countdown(60);
        assert!(timer.start());
        assert!(!timer.start());
        assert_eq!(scheduler.issued_count(), 1);
    }

    #[test]
    fn reset_after_any_sequence_restores_initial_state() {
        let (mut timer, scheduler) = countdown(90);
        timer.start();
        let id = timer.tick_id().unwrap();
        for _ in 0..5 {
            timer.on_tick(id);
        }
        timer.pause();
        timer.start();
        let id = timer.tick_id().unwrap();
        timer.on_tick(id);

        timer.reset();
        assert_eq!(timer.remaining_seconds(), 90);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert!(scheduler.active_ticks().is_empty());
        assert_eq!(timer.display(), "01:30");
    }

    #[test]
    fn foreign_tick_is_ignored() {
        let (mut timer, scheduler) = countdown(10);
        timer.start();
        let stranger = scheduler.every(Duration::from_secs(1));
        assert_eq!(timer.on_tick(stranger.id()), CountdownTick::Ignored);
        assert_eq!(timer.remaining_seconds(), 10);
    }
}
