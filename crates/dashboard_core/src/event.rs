//! Change notifications consumed by rendering adapters.
//!
//! # Responsibility
//! - Decouple state mutation from rendering: components publish, renderers
//!   subscribe.
//!
//! # Invariants
//! - Subscribers run synchronously, in subscription order, on the publishing
//!   thread.
//! - A subscriber may subscribe further listeners while being notified; they
//!   receive events from the next publish on.

use crate::model::mood::MoodEntry;
use crate::timer::pomodoro::PomodoroMode;
use crate::timer::TimerPhase;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Todos,
    Goals,
    Notes,
}

impl CollectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todos => "todos",
            Self::Goals => "goals",
            Self::Notes => "notes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// Items of a collection were added, edited, toggled or removed.
    CollectionChanged(CollectionKind),
    MoodLogged(MoodEntry),
    TrackerChanged {
        elapsed_seconds: u64,
        phase: TimerPhase,
    },
    PomodoroChanged {
        mode: PomodoroMode,
        remaining_seconds: u64,
        phase: TimerPhase,
    },
    PomodoroCompleted {
        finished: PomodoroMode,
        next: PomodoroMode,
    },
}

type Subscriber = Rc<dyn Fn(&DashboardEvent)>;

/// Single-threaded fan-out of [`DashboardEvent`]s.
#[derive(Default)]
pub struct EventBus {
    subscribers: RefCell<Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&DashboardEvent) + 'static) {
        self.subscribers.borrow_mut().push(Rc::new(subscriber));
    }

    pub fn publish(&self, event: DashboardEvent) {
        let snapshot = self.subscribers.borrow().clone();
        for subscriber in snapshot {
            subscriber(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::{CollectionKind, DashboardEvent, EventBus};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn publish_reaches_every_subscriber_in_order() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |event| seen.borrow_mut().push((tag, event.clone())));
        }

        bus.publish(DashboardEvent::CollectionChanged(CollectionKind::Notes));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "first");
        assert_eq!(seen[1].0, "second");
    }

    #[test]
    fn subscribing_from_a_callback_does_not_deadlock() {
        let bus = Rc::new(EventBus::new());
        let inner = Rc::clone(&bus);
        bus.subscribe(move |_| inner.subscribe(|_| {}));

        bus.publish(DashboardEvent::CollectionChanged(CollectionKind::Todos));
        assert_eq!(bus.subscriber_count(), 2);
    }
}
