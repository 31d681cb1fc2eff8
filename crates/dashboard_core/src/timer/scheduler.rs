//! Recurring tick sources.
//!
//! A [`TickHandle`] is the only way to stop a recurring tick: cancel it or
//! drop it. Schedulers never mutate timer state themselves; they deliver
//! [`TickId`]s that the owner routes back to the timer holding the handle.

use log::debug;
use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(u64);

impl TickId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Owned recurring tick. Dropping the handle cancels the tick.
#[derive(Debug)]
pub struct TickHandle {
    id: TickId,
    cancelled: Arc<AtomicBool>,
}

impl TickHandle {
    fn new(id: TickId) -> (Self, Arc<AtomicBool>) {
        let cancelled = Arc::new(AtomicBool::new(false));
        (
            Self {
                id,
                cancelled: Arc::clone(&cancelled),
            },
            cancelled,
        )
    }

    pub fn id(&self) -> TickId {
        self.id
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

pub trait Scheduler {
    /// Starts a tick recurring every `period`.
    fn every(&self, period: Duration) -> TickHandle;
}

/// Scheduler without a clock: handles are issued, ticks are fired by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: Cell<u64>,
    issued: RefCell<Vec<(TickId, Arc<AtomicBool>)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of issued handles that have not been cancelled, oldest first.
    pub fn active_ticks(&self) -> Vec<TickId> {
        self.issued
            .borrow()
            .iter()
            .filter(|(_, cancelled)| !cancelled.load(Ordering::SeqCst))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn issued_count(&self) -> usize {
        self.issued.borrow().len()
    }
}

impl Scheduler for ManualScheduler {
    fn every(&self, _period: Duration) -> TickHandle {
        let id = TickId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        let (handle, cancelled) = TickHandle::new(id);
        self.issued.borrow_mut().push((id, cancelled));
        handle
    }
}

/// One sleeper thread per handle, delivering ticks over an mpsc channel.
///
/// The receiving side is drained on the owner's thread; the sleeper threads
/// never touch widget state. A cancelled thread exits at its next wake-up.
pub struct ThreadScheduler {
    next_id: Cell<u64>,
    sender: Sender<TickId>,
}

impl ThreadScheduler {
    pub fn new() -> (Self, Receiver<TickId>) {
        let (sender, receiver) = mpsc::channel();
        (
            Self {
                next_id: Cell::new(0),
                sender,
            },
            receiver,
        )
    }
}

impl Scheduler for ThreadScheduler {
    fn every(&self, period: Duration) -> TickHandle {
        let id = TickId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        let (handle, cancelled) = TickHandle::new(id);
        let sender = self.sender.clone();

        thread::spawn(move || loop {
            thread::sleep(period);
            if cancelled.load(Ordering::SeqCst) {
                break;
            }
            if sender.send(id).is_err() {
                break;
            }
        });
        debug!(
            "event=tick_schedule module=timer status=ok tick_id={} period_ms={}",
            id.0,
            period.as_millis()
        );
        handle
    }
}
