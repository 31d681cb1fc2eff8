use chrono::{Duration, NaiveDate, NaiveDateTime};
use dashboard_core::store::{keys, load, save};
use dashboard_core::{
    EventBus, FixedClock, MemoryStore, Mood, MoodEntry, MoodLog, Notice, Notifier,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }
}

fn morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(9, 5, 0)
        .unwrap()
}

fn mood_log(
    store: &Rc<MemoryStore>,
    clock: &Rc<FixedClock>,
    notifier: &Rc<RecordingNotifier>,
) -> MoodLog {
    MoodLog::load(
        5,
        store.clone(),
        clock.clone(),
        Rc::new(EventBus::new()),
        notifier.clone(),
    )
    .unwrap()
}

#[test]
fn unset_history_starts_from_seed_entries() {
    let store = Rc::new(MemoryStore::new());
    let log = mood_log(
        &store,
        &Rc::new(FixedClock::new(morning())),
        &Rc::new(RecordingNotifier::default()),
    );

    assert_eq!(log.entries(), MoodEntry::default_history().as_slice());
    assert_eq!(log.selected(), Mood::Neutral);
}

#[test]
fn record_on_full_history_evicts_oldest_and_prepends() {
    let store = Rc::new(MemoryStore::new());
    let full: Vec<MoodEntry> = ["e1", "e2", "e3", "e4", "e5"]
        .iter()
        .map(|label| MoodEntry::new(Mood::Sad, *label))
        .collect();
    save(store.as_ref(), keys::MOOD_HISTORY, &full).unwrap();
    let notifier = Rc::new(RecordingNotifier::default());
    let mut log = mood_log(&store, &Rc::new(FixedClock::new(morning())), &notifier);

    let entry = log.record(Mood::Productive).unwrap();

    assert_eq!(entry, MoodEntry::new(Mood::Productive, "09:05 AM"));
    let labels: Vec<&str> = log.entries().iter().map(|e| e.time.as_str()).collect();
    assert_eq!(labels, vec!["09:05 AM", "e1", "e2", "e3", "e4"]);

    let stored: Vec<MoodEntry> = load(store.as_ref(), keys::MOOD_HISTORY).unwrap().unwrap();
    assert_eq!(stored, log.entries());
    assert_eq!(
        notifier.notices.borrow().as_slice(),
        [Notice::MoodLogged(Mood::Productive)]
    );
}

#[test]
fn log_selected_uses_the_chosen_mood() {
    let store = Rc::new(MemoryStore::new());
    let mut log = mood_log(
        &store,
        &Rc::new(FixedClock::new(morning())),
        &Rc::new(RecordingNotifier::default()),
    );

    log.select(Mood::Stressed);
    let entry = log.log_selected().unwrap();

    assert_eq!(entry.mood, Mood::Stressed);
    assert_eq!(log.entries()[0], entry);
    assert_eq!(log.entries().len(), 5);
}

#[test]
fn labels_are_frozen_at_recording_time() {
    let store = Rc::new(MemoryStore::new());
    save(store.as_ref(), keys::MOOD_HISTORY, &Vec::<MoodEntry>::new()).unwrap();
    let clock = Rc::new(FixedClock::new(morning()));
    let mut log = mood_log(&store, &clock, &Rc::new(RecordingNotifier::default()));

    log.record(Mood::Happy).unwrap();
    clock.advance(Duration::days(3));
    log.record(Mood::Sad).unwrap();

    let labels: Vec<&str> = log.entries().iter().map(|e| e.time.as_str()).collect();
    assert_eq!(labels, vec!["09:05 AM", "09:05 AM"]);
}

#[test]
fn backfilled_entries_get_relative_labels() {
    let store = Rc::new(MemoryStore::new());
    save(store.as_ref(), keys::MOOD_HISTORY, &Vec::<MoodEntry>::new()).unwrap();
    let clock = Rc::new(FixedClock::new(morning()));
    let mut log = mood_log(&store, &clock, &Rc::new(RecordingNotifier::default()));

    let older = morning() - Duration::days(7) + Duration::hours(7);
    let yesterday = morning() - Duration::days(1) + Duration::hours(5);
    log.record_at(Mood::Neutral, older).unwrap();
    log.record_at(Mood::Happy, yesterday).unwrap();

    let labels: Vec<&str> = log.entries().iter().map(|e| e.time.as_str()).collect();
    assert_eq!(labels, vec!["Yesterday, 02:05 PM", "Oct 12, 04:05 PM"]);
}

#[test]
fn oversized_stored_history_is_truncated_on_load() {
    let store = Rc::new(MemoryStore::new());
    let seven: Vec<MoodEntry> = (0..7)
        .map(|n| MoodEntry::new(Mood::Happy, format!("entry {n}")))
        .collect();
    save(store.as_ref(), keys::MOOD_HISTORY, &seven).unwrap();

    let log = mood_log(
        &store,
        &Rc::new(FixedClock::new(morning())),
        &Rc::new(RecordingNotifier::default()),
    );

    assert_eq!(log.entries(), &seven[..5]);
}
