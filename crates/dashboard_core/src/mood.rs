//! Mood logger with a short newest-first history.
//!
//! # Invariants
//! - History holds at most `capacity` entries, newest first.
//! - Entry labels are computed once, when the entry is recorded.

use crate::clock::Clock;
use crate::event::{DashboardEvent, EventBus};
use crate::model::mood::{Mood, MoodEntry};
use crate::port::{Notice, Notifier};
use crate::store::{self, keys, PersistentStore, StoreResult};
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use std::rc::Rc;

/// Default number of entries kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Label for an entry logged at `logged_at`, seen from `today`.
///
/// - same day: `09:05 AM`
/// - previous day: `Yesterday, 09:05 AM`
/// - otherwise: `Oct 12, 09:05 AM`
pub fn format_mood_label(logged_at: NaiveDateTime, today: NaiveDate) -> String {
    let time = logged_at.format("%I:%M %p").to_string();
    let day = logged_at.date();
    if day == today {
        time
    } else if today.pred_opt() == Some(day) {
        format!("Yesterday, {time}")
    } else {
        format!("{}, {time}", logged_at.format("%b %-d"))
    }
}

pub struct MoodLog {
    entries: Vec<MoodEntry>,
    capacity: usize,
    selected: Mood,
    store: Rc<dyn PersistentStore>,
    clock: Rc<dyn Clock>,
    events: Rc<EventBus>,
    notifier: Rc<dyn Notifier>,
}

impl MoodLog {
    /// Restores history from `moodHistory`, seeding it when unset or
    /// malformed. Oversized stored history is cut to `capacity`.
    pub fn load(
        capacity: usize,
        store: Rc<dyn PersistentStore>,
        clock: Rc<dyn Clock>,
        events: Rc<EventBus>,
        notifier: Rc<dyn Notifier>,
    ) -> StoreResult<Self> {
        let mut entries = store::load::<Vec<MoodEntry>>(store.as_ref(), keys::MOOD_HISTORY)?
            .unwrap_or_else(MoodEntry::default_history);
        entries.truncate(capacity);

        Ok(Self {
            entries,
            capacity,
            selected: Mood::default(),
            store,
            clock,
            events,
            notifier,
        })
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn selected(&self) -> Mood {
        self.selected
    }

    pub fn select(&mut self, mood: Mood) {
        self.selected = mood;
    }

    /// Records the currently selected mood.
    pub fn log_selected(&mut self) -> StoreResult<MoodEntry> {
        self.record(self.selected)
    }

    /// Records `mood` as of now.
    pub fn record(&mut self, mood: Mood) -> StoreResult<MoodEntry> {
        self.record_at(mood, self.clock.now())
    }

    /// Records `mood` as logged at `logged_at`, labelled relative to today.
    pub fn record_at(&mut self, mood: Mood, logged_at: NaiveDateTime) -> StoreResult<MoodEntry> {
        let entry = MoodEntry::new(mood, format_mood_label(logged_at, self.clock.today()));

        let mut next = Vec::with_capacity(self.capacity);
        next.push(entry.clone());
        next.extend(self.entries.iter().cloned());
        next.truncate(self.capacity);

        store::save(self.store.as_ref(), keys::MOOD_HISTORY, &next)?;
        self.entries = next;

        info!(
            "event=mood_record module=mood status=ok mood={} history_len={}",
            mood,
            self.entries.len()
        );
        self.events.publish(DashboardEvent::MoodLogged(entry.clone()));
        self.notifier.notify(&Notice::MoodLogged(mood));
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::format_mood_label;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn labels_same_day_with_time_only() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_mood_label(at(19, 9, 5), today), "09:05 AM");
        assert_eq!(format_mood_label(at(19, 16, 45), today), "04:45 PM");
    }

    #[test]
    fn labels_previous_day_as_yesterday() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_mood_label(at(18, 14, 15), today), "Yesterday, 02:15 PM");
    }

    #[test]
    fn labels_older_days_with_month_and_day() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_mood_label(at(12, 16, 45), today), "Oct 12, 04:45 PM");
    }

    #[test]
    fn yesterday_crosses_month_boundary() {
        let today = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        let logged = NaiveDate::from_ymd_opt(2026, 10, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        assert_eq!(format_mood_label(logged, today), "Yesterday, 11:59 PM");
    }
}
