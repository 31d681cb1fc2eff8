use dashboard_core::{
    CountdownTick, DashboardEvent, EventBus, ManualScheduler, Notice, Notifier,
    PomodoroDurations, PomodoroMode, PomodoroState, PomodoroTimer, TimerPhase,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Default)]
struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }
}

struct Harness {
    timer: PomodoroTimer,
    scheduler: Rc<ManualScheduler>,
    notifier: Rc<RecordingNotifier>,
    events: Rc<RefCell<Vec<DashboardEvent>>>,
}

fn harness() -> Harness {
    let scheduler = Rc::new(ManualScheduler::new());
    let notifier = Rc::new(RecordingNotifier::default());
    let bus = Rc::new(EventBus::new());
    let events = Rc::new(RefCell::new(Vec::new()));
    {
        let events = Rc::clone(&events);
        bus.subscribe(move |event| events.borrow_mut().push(event.clone()));
    }
    let timer = PomodoroTimer::new(
        PomodoroDurations::default(),
        scheduler.clone(),
        bus,
        notifier.clone(),
        Duration::from_secs(1),
    );
    Harness {
        timer,
        scheduler,
        notifier,
        events,
    }
}

/// Starts the timer and ticks until the countdown reports completion.
fn run_to_completion(timer: &mut PomodoroTimer) -> usize {
    timer.start();
    let id = timer.tick_id().unwrap();
    let mut ticks = 0;
    loop {
        ticks += 1;
        if timer.on_tick(id) == CountdownTick::Completed {
            return ticks;
        }
    }
}

#[test]
fn starts_idle_in_pomodoro_mode_with_full_duration() {
    let h = harness();
    assert_eq!(
        h.timer.state(),
        PomodoroState {
            mode: PomodoroMode::Pomodoro,
            remaining_seconds: 1500,
            running: false,
        }
    );
    assert_eq!(h.timer.display(), "25:00");
}

#[test]
fn pomodoro_completion_switches_to_short_break() {
    let mut h = harness();

    let ticks = run_to_completion(&mut h.timer);

    // 1500 decrements, then one tick observed at zero.
    assert_eq!(ticks, 1501);
    assert_eq!(h.timer.mode(), PomodoroMode::ShortBreak);
    assert_eq!(h.timer.remaining_seconds(), 300);
    assert_eq!(h.timer.phase(), TimerPhase::Idle);
    assert!(h.scheduler.active_ticks().is_empty());
    assert_eq!(
        h.notifier.notices.borrow().as_slice(),
        [Notice::PomodoroFinished(PomodoroMode::Pomodoro)]
    );
    assert!(h.events.borrow().contains(&DashboardEvent::PomodoroCompleted {
        finished: PomodoroMode::Pomodoro,
        next: PomodoroMode::ShortBreak,
    }));
}

#[test]
fn short_break_completion_returns_to_pomodoro() {
    let mut h = harness();
    h.timer.set_mode(PomodoroMode::ShortBreak);

    run_to_completion(&mut h.timer);

    assert_eq!(h.timer.mode(), PomodoroMode::Pomodoro);
    assert_eq!(h.timer.remaining_seconds(), 1500);
}

#[test]
fn long_break_completion_returns_to_pomodoro_not_another_break() {
    let mut h = harness();
    h.timer.set_mode(PomodoroMode::LongBreak);
    assert_eq!(h.timer.remaining_seconds(), 900);

    run_to_completion(&mut h.timer);

    assert_eq!(h.timer.mode(), PomodoroMode::Pomodoro);
    assert_eq!(h.timer.remaining_seconds(), 1500);
}

#[test]
fn set_mode_stops_a_running_countdown() {
    let mut h = harness();
    h.timer.start();
    let id = h.timer.tick_id().unwrap();
    h.timer.on_tick(id);
    assert_eq!(h.timer.remaining_seconds(), 1499);

    h.timer.set_mode(PomodoroMode::LongBreak);

    assert_eq!(h.timer.phase(), TimerPhase::Idle);
    assert_eq!(h.timer.on_tick(id), CountdownTick::Ignored);
    assert_eq!(h.timer.remaining_seconds(), 900);
}

#[test]
fn reset_restores_full_duration_without_changing_mode() {
    let mut h = harness();
    h.timer.set_mode(PomodoroMode::ShortBreak);
    h.timer.start();
    let id = h.timer.tick_id().unwrap();
    for _ in 0..42 {
        h.timer.on_tick(id);
    }
    h.timer.pause();
    assert_eq!(h.timer.phase(), TimerPhase::Paused);

    h.timer.reset();

    assert_eq!(h.timer.mode(), PomodoroMode::ShortBreak);
    assert_eq!(h.timer.remaining_seconds(), 300);
    assert_eq!(h.timer.phase(), TimerPhase::Idle);
}

#[test]
fn pause_then_start_resumes_from_remaining() {
    let mut h = harness();
    h.timer.start();
    let first = h.timer.tick_id().unwrap();
    h.timer.on_tick(first);
    h.timer.pause();
    h.timer.pause();

    h.timer.start();
    let second = h.timer.tick_id().unwrap();
    assert_ne!(first, second);
    h.timer.on_tick(second);

    assert_eq!(h.timer.remaining_seconds(), 1498);
    assert_eq!(h.scheduler.active_ticks(), vec![second]);
}
