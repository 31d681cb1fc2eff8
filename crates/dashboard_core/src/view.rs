//! Render-ready projections: timer strings, clock text and the month grid.
//!
//! Nothing here touches state; renderers call these with values taken from
//! components or the clock.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};

/// `HH:MM:SS`, hours are not wrapped at 24.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// `MM:SS`, minutes are not wrapped at 60.
pub fn format_ms(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Header clock text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockDisplay {
    /// 24-hour `HH:MM:SS`.
    pub time: String,
    /// e.g. `Monday, October 19, 2026`.
    pub date: String,
}

impl ClockDisplay {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            time: now.format("%H:%M:%S").to_string(),
            date: now.format("%A, %B %-d, %Y").to_string(),
        }
    }
}

/// Sunday-first month layout for the calendar card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1.
    pub leading_blanks: u32,
    pub days_in_month: u32,
    /// Day of month to highlight.
    pub today: u32,
}

impl MonthGrid {
    pub const DAY_NAMES: [&'static str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

    /// Grid of the month containing `today`.
    pub fn for_date(today: NaiveDate) -> Self {
        let first = today - Days::new(u64::from(today.day0()));
        let days_in_month = first
            .checked_add_months(Months::new(1))
            .map_or(31, |next| (next - first).num_days() as u32);

        Self {
            year: today.year(),
            month: today.month(),
            leading_blanks: first.weekday().num_days_from_sunday(),
            days_in_month,
            today: today.day(),
        }
    }

    /// Flattened cells: `None` for leading blanks, then each day number.
    pub fn cells(&self) -> Vec<Option<u32>> {
        (0..self.leading_blanks)
            .map(|_| None)
            .chain((1..=self.days_in_month).map(Some))
            .collect()
    }
}
