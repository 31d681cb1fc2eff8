use dashboard_core::db::DbError;
use dashboard_core::store::keys;
use dashboard_core::{
    DashboardEvent, ElapsedTracker, EventBus, ManualScheduler, MemoryStore, PersistentStore,
    StoreResult, TimerPhase, TimerState,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn tracker(store: &Rc<MemoryStore>, scheduler: &Rc<ManualScheduler>) -> ElapsedTracker {
    ElapsedTracker::load(
        store.clone(),
        scheduler.clone(),
        Rc::new(EventBus::new()),
        Duration::from_secs(1),
    )
    .unwrap()
}

#[test]
fn start_pause_reset_cycle() {
    let store = Rc::new(MemoryStore::new());
    let scheduler = Rc::new(ManualScheduler::new());
    let mut tracker = tracker(&store, &scheduler);
    assert_eq!(tracker.phase(), TimerPhase::Idle);

    tracker.start();
    tracker.start();
    assert_eq!(scheduler.issued_count(), 1);
    let id = tracker.tick_id().unwrap();
    for _ in 0..61 {
        tracker.on_tick(id).unwrap();
    }
    assert_eq!(tracker.display(), "00:01:01");

    tracker.pause();
    assert_eq!(
        tracker.state(),
        TimerState {
            elapsed_seconds: 61,
            running: false
        }
    );

    tracker.set_label("writing");
    tracker.reset().unwrap();
    assert_eq!(tracker.phase(), TimerPhase::Idle);
    assert_eq!(tracker.elapsed_seconds(), 0);
    assert_eq!(tracker.label(), None);
    assert!(store.read_raw(keys::TRACKER_TIME).unwrap().is_none());
    assert!(scheduler.active_ticks().is_empty());
}

#[test]
fn progress_survives_reload_mid_run() {
    let store = Rc::new(MemoryStore::new());
    let scheduler = Rc::new(ManualScheduler::new());
    {
        let mut running = tracker(&store, &scheduler);
        running.start();
        let id = running.tick_id().unwrap();
        for _ in 0..5 {
            running.on_tick(id).unwrap();
        }
    }

    let reloaded = tracker(&store, &scheduler);
    assert_eq!(reloaded.elapsed_seconds(), 5);
    assert_eq!(reloaded.phase(), TimerPhase::Paused);
    assert!(!reloaded.state().running);
}

#[test]
fn every_tick_publishes_tracker_changed() {
    let store = Rc::new(MemoryStore::new());
    let scheduler = Rc::new(ManualScheduler::new());
    let bus = Rc::new(EventBus::new());
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&seen);
        bus.subscribe(move |event| seen.borrow_mut().push(event.clone()));
    }
    let mut tracker =
        ElapsedTracker::load(store, scheduler, bus, Duration::from_secs(1)).unwrap();

    tracker.start();
    let id = tracker.tick_id().unwrap();
    tracker.on_tick(id).unwrap();

    assert_eq!(
        seen.borrow().last(),
        Some(&DashboardEvent::TrackerChanged {
            elapsed_seconds: 1,
            phase: TimerPhase::Running,
        })
    );
}

/// Store whose writes start failing on demand, as a full disk would.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    failing: std::cell::Cell<bool>,
}

impl FlakyStore {
    fn check(&self) -> StoreResult<()> {
        if self.failing.get() {
            let code = rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL);
            return Err(DbError::Sqlite(rusqlite::Error::SqliteFailure(code, None)).into());
        }
        Ok(())
    }
}

impl PersistentStore for FlakyStore {
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.read_raw(key)
    }

    fn write_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check()?;
        self.inner.write_raw(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.check()?;
        self.inner.remove(key)
    }
}

#[test]
fn failed_writes_leave_counter_and_store_in_step() {
    let store = Rc::new(FlakyStore::default());
    let mut tracker = ElapsedTracker::load(
        store.clone(),
        Rc::new(ManualScheduler::new()),
        Rc::new(EventBus::new()),
        Duration::from_secs(1),
    )
    .unwrap();
    tracker.start();
    let id = tracker.tick_id().unwrap();
    tracker.on_tick(id).unwrap();

    store.failing.set(true);
    assert!(tracker.on_tick(id).is_err());
    assert_eq!(tracker.elapsed_seconds(), 1);
    assert_eq!(
        store.read_raw(keys::TRACKER_TIME).unwrap().as_deref(),
        Some("1")
    );

    assert!(tracker.reset().is_err());
    assert_eq!(tracker.elapsed_seconds(), 1);
    assert_eq!(tracker.phase(), TimerPhase::Running);

    store.failing.set(false);
    tracker.reset().unwrap();
    assert_eq!(tracker.elapsed_seconds(), 0);
    assert_eq!(store.read_raw(keys::TRACKER_TIME).unwrap(), None);
}
