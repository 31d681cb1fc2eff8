//! Elapsed-time tracker.
//!
//! # Invariants
//! - Every tick persists the raw counter under `trackerTime`, so progress
//!   survives a restart mid-run.
//! - The running flag is never persisted: a reloaded tracker with time on
//!   the clock comes back `Paused`, an empty one `Idle`.

use super::scheduler::{Scheduler, TickId};
use super::{TickSlot, TimerPhase};
use crate::event::{DashboardEvent, EventBus};
use crate::store::{keys, PersistentStore, StoreResult};
use crate::view::format_hms;
use log::{info, warn};
use std::rc::Rc;
use std::time::Duration;

/// Label used when tracking starts without one.
pub const DEFAULT_TRACKER_LABEL: &str = "Untitled Task";

/// Snapshot of the tracker for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub elapsed_seconds: u64,
    pub running: bool,
}

pub struct ElapsedTracker {
    slot: TickSlot,
    elapsed: u64,
    label: Option<String>,
    store: Rc<dyn PersistentStore>,
    scheduler: Rc<dyn Scheduler>,
    events: Rc<EventBus>,
}

impl ElapsedTracker {
    /// Restores the tracker from `trackerTime`. Unparseable text counts as 0.
    pub fn load(
        store: Rc<dyn PersistentStore>,
        scheduler: Rc<dyn Scheduler>,
        events: Rc<EventBus>,
        tick_interval: Duration,
    ) -> StoreResult<Self> {
        let elapsed = match store.read_raw(keys::TRACKER_TIME)? {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                warn!("event=tracker_load module=timer status=malformed key={}", keys::TRACKER_TIME);
                0
            }),
            None => 0,
        };
        let phase = if elapsed > 0 {
            TimerPhase::Paused
        } else {
            TimerPhase::Idle
        };

        Ok(Self {
            slot: TickSlot::new(tick_interval, phase),
            elapsed,
            label: None,
            store,
            scheduler,
            events,
        })
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed
    }

    pub fn phase(&self) -> TimerPhase {
        self.slot.phase()
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            elapsed_seconds: self.elapsed,
            running: self.slot.is_running(),
        }
    }

    /// `HH:MM:SS` rendering of the elapsed time.
    pub fn display(&self) -> String {
        format_hms(self.elapsed)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Names what is being tracked. Blank text clears the label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        let trimmed = label.trim();
        self.label = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn tick_id(&self) -> Option<TickId> {
        self.slot.tick_id()
    }

    /// Starts ticking. An unlabelled run is named [`DEFAULT_TRACKER_LABEL`].
    pub fn start(&mut self) {
        if self.slot.start(self.scheduler.as_ref()) {
            if self.label.is_none() {
                self.label = Some(DEFAULT_TRACKER_LABEL.to_string());
            }
            info!(
                "event=tracker_start module=timer status=ok elapsed_s={}",
                self.elapsed
            );
            self.publish();
        }
    }

    pub fn pause(&mut self) {
        if self.slot.pause() {
            info!(
                "event=tracker_pause module=timer status=ok elapsed_s={}",
                self.elapsed
            );
            self.publish();
        }
    }

    /// Stops the tick, zeroes the counter, clears the label and forgets the
    /// stored time. Nothing changes when the stored time cannot be removed.
    pub fn reset(&mut self) -> StoreResult<()> {
        self.store.remove(keys::TRACKER_TIME)?;
        self.slot.stop();
        self.elapsed = 0;
        self.label = None;
        info!("event=tracker_reset module=timer status=ok");
        self.publish();
        Ok(())
    }

    /// Advances one second if `id` is this tracker's live tick.
    ///
    /// Returns whether the tick was consumed. A failed write leaves the
    /// counter where it was.
    pub fn on_tick(&mut self, id: TickId) -> StoreResult<bool> {
        if !self.slot.owns(id) {
            return Ok(false);
        }
        let next = self.elapsed.saturating_add(1);
        self.store.write_raw(keys::TRACKER_TIME, &next.to_string())?;
        self.elapsed = next;
        self.publish();
        Ok(true)
    }

    fn publish(&self) {
        self.events.publish(DashboardEvent::TrackerChanged {
            elapsed_seconds: self.elapsed,
            phase: self.slot.phase(),
        });
    }
}
