//! Calendar window helpers.
//!
//! # Invariants
//! - Windows are inclusive date ranges (`start <= date <= end`).
//! - Weeks start on a configurable weekday (Sunday by default) and span
//!   seven days.
//! - All windows are computed on UTC dates.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn contains_instant(&self, at: DateTime<Utc>) -> bool {
        self.contains(at.date_naive())
    }

    /// Calendar week containing `date`.
    pub fn week_of(date: NaiveDate, week_start: Weekday) -> Self {
        Self::new(start_of_week(date, week_start), end_of_week(date, week_start))
    }

    /// Calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        Self::new(start_of_month(date), end_of_month(date))
    }

    /// Same-length window immediately before this one.
    pub fn previous_week(&self) -> Self {
        Self::new(self.start - Duration::days(7), self.end - Duration::days(7))
    }
}

pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset =
        (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    date - Duration::days(i64::from(offset))
}

pub fn end_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    start_of_week(date, week_start) + Duration::days(6)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let first = start_of_month(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next_first) => next_first - Duration::days(1),
        None => NaiveDate::MAX,
    }
}

pub fn is_today(date: NaiveDate, now: DateTime<Utc>) -> bool {
    date == now.date_naive()
}

pub fn is_this_week(date: NaiveDate, now: DateTime<Utc>, week_start: Weekday) -> bool {
    DateWindow::week_of(now.date_naive(), week_start).contains(date)
}
