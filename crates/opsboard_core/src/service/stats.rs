//! Derived statistics over store contents.
//!
//! # Responsibility
//! - Aggregate attendance per employee over a date range.
//! - Count tasks per status, compute completion and weekly growth figures.
//! - Select due and recently created records for dashboard panels.
//!
//! # Invariants
//! - Every function is pure and recomputes from its inputs; nothing is cached.
//! - Ratios with a zero denominator are defined as `0.0`, never NaN/inf.

use crate::model::attendance::{round_hundredths, AttendanceRecord, AttendanceStatistics};
use crate::model::entity::{EntityId, EntityKind};
use crate::model::mom::MeetingMinutes;
use crate::model::quest::Quest;
use crate::model::task::{Task, TaskStatus};
use crate::service::calendar::{is_today, DateWindow};
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const RECENT_TASKS_CAP: usize = 3;
const RECENT_MOMS_CAP: usize = 2;
const RECENT_QUESTS_CAP: usize = 2;

/// Per-employee attendance rows for records dated inside `window`.
///
/// Rows are sorted by employee name (see `compare_names`), then by employee
/// id. Employees without a matching record get no row.
pub fn attendance_statistics<'r>(
    records: impl IntoIterator<Item = &'r AttendanceRecord>,
    window: DateWindow,
    employee_name: impl Fn(&EntityId) -> String,
) -> Vec<AttendanceStatistics> {
    let mut per_employee: BTreeMap<&EntityId, (f64, BTreeSet<NaiveDate>)> = BTreeMap::new();
    for record in records {
        if !window.contains(record.date) {
            continue;
        }
        let entry = per_employee.entry(&record.employee_id).or_default();
        entry.0 += record.total_hours;
        entry.1.insert(record.date);
    }

    let mut rows: Vec<AttendanceStatistics> = per_employee
        .into_iter()
        .map(|(employee_id, (total_hours, days))| {
            let days_present = days.len() as u32;
            AttendanceStatistics {
                employee_id: employee_id.clone(),
                employee_name: employee_name(employee_id),
                total_hours: round_hundredths(total_hours),
                days_present,
                average_daily_hours: round_hundredths(total_hours / f64::from(days_present)),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        compare_names(&a.employee_name, &b.employee_name)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    rows
}

/// Name ordering for display lists.
///
/// Names compare on their base letters first (canonical decomposition with
/// combining marks removed, lowercased), so `Émile` sorts between `Ana` and
/// `Zoe`. Ties fall back to a lowercase compare, then an exact compare.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| a.cmp(b))
}

fn lowercase(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars().flat_map(char::to_lowercase)
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Task count per status column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStatusCounts {
    pub to_do: usize,
    pub in_progress: usize,
    pub done: usize,
    pub blocked: usize,
}

impl TaskStatusCounts {
    pub fn from_tasks<'t>(tasks: impl IntoIterator<Item = &'t Task>) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            *counts.slot(task.status) += 1;
        }
        counts
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::ToDo => self.to_do,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Done => self.done,
            TaskStatus::Blocked => self.blocked,
        }
    }

    pub fn total(&self) -> usize {
        self.to_do + self.in_progress + self.done + self.blocked
    }

    pub fn completion_rate(&self) -> f64 {
        completion_rate(self.done, self.total())
    }

    /// `round((done * 2 + in_progress) / max(total, 1) * 100)`.
    pub fn productivity_score(&self) -> u32 {
        let weighted = (self.done * 2 + self.in_progress) as f64;
        let total = self.total().max(1) as f64;
        (weighted / total * 100.0).round() as u32
    }

    fn slot(&mut self, status: TaskStatus) -> &mut usize {
        match status {
            TaskStatus::ToDo => &mut self.to_do,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
            TaskStatus::Blocked => &mut self.blocked,
        }
    }
}

/// `done / total * 100`, or `0.0` when there are no tasks.
pub fn completion_rate(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    done as f64 / total as f64 * 100.0
}

/// `(this - last) / last * 100`, or `0.0` when last week had nothing.
pub fn growth_percent(this_week: usize, last_week: usize) -> f64 {
    if last_week == 0 {
        return 0.0;
    }
    (this_week as f64 - last_week as f64) / last_week as f64 * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeeklyGrowth {
    pub this_week: usize,
    pub last_week: usize,
    pub growth_percent: f64,
}

/// Tasks created in the current calendar week versus the one before it.
pub fn weekly_task_growth<'t>(
    tasks: impl IntoIterator<Item = &'t Task>,
    now: DateTime<Utc>,
    week_start: Weekday,
) -> WeeklyGrowth {
    let this_window = DateWindow::week_of(now.date_naive(), week_start);
    let last_window = this_window.previous_week();

    let mut this_week = 0;
    let mut last_week = 0;
    for task in tasks {
        if this_window.contains_instant(task.created_at) {
            this_week += 1;
        } else if last_window.contains_instant(task.created_at) {
            last_week += 1;
        }
    }

    WeeklyGrowth {
        this_week,
        last_week,
        growth_percent: growth_percent(this_week, last_week),
    }
}

/// Task totals for one quest's associated tasks. Dangling ids are not
/// counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuestTaskCounts {
    pub total: usize,
    pub by_status: TaskStatusCounts,
}

impl QuestTaskCounts {
    pub fn from_tasks<'t>(tasks: impl IntoIterator<Item = &'t Task>) -> Self {
        let by_status = TaskStatusCounts::from_tasks(tasks);
        Self {
            total: by_status.total(),
            by_status,
        }
    }
}

/// Attendance for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAttendance {
    pub window: DateWindow,
    pub rows: Vec<AttendanceStatistics>,
    pub total_hours: f64,
    /// `total_hours / rows.len()`, or `0.0` when nobody attended.
    pub average_hours_per_employee: f64,
}

impl MonthlyAttendance {
    pub fn from_rows(window: DateWindow, rows: Vec<AttendanceStatistics>) -> Self {
        let total_hours: f64 = rows.iter().map(|row| row.total_hours).sum();
        let average_hours_per_employee = if rows.is_empty() {
            0.0
        } else {
            round_hundredths(total_hours / rows.len() as f64)
        };
        Self {
            window,
            rows,
            total_hours: round_hundredths(total_hours),
            average_hours_per_employee,
        }
    }

    /// Up to `limit` rows with the most hours, highest first.
    pub fn top_performers(&self, limit: usize) -> Vec<&AttendanceStatistics> {
        let mut ranked: Vec<&AttendanceStatistics> = self.rows.iter().collect();
        ranked.sort_by(|a, b| b.total_hours.total_cmp(&a.total_hours));
        ranked.truncate(limit);
        ranked
    }
}

/// Open tasks due on the current UTC date.
pub fn due_today<'t>(
    tasks: impl IntoIterator<Item = &'t Task>,
    now: DateTime<Utc>,
) -> Vec<&'t Task> {
    tasks
        .into_iter()
        .filter(|task| task.status != TaskStatus::Done && is_today(task.due_date, now))
        .collect()
}

/// Open tasks due later in the current week (today excluded).
pub fn due_this_week<'t>(
    tasks: impl IntoIterator<Item = &'t Task>,
    now: DateTime<Utc>,
    week_start: Weekday,
) -> Vec<&'t Task> {
    let window = DateWindow::week_of(now.date_naive(), week_start);
    tasks
        .into_iter()
        .filter(|task| {
            task.status != TaskStatus::Done
                && window.contains(task.due_date)
                && !is_today(task.due_date, now)
        })
        .collect()
}

/// One entry in the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentActivity {
    pub kind: EntityKind,
    pub id: EntityId,
    pub title: String,
    pub at: DateTime<Utc>,
}

/// Records created this week, newest first.
///
/// At most three tasks, two minutes and two quests are considered before the
/// merged feed is cut to `limit`.
pub fn recent_activity(
    tasks: &[Task],
    moms: &[MeetingMinutes],
    quests: &[Quest],
    now: DateTime<Utc>,
    week_start: Weekday,
    limit: usize,
) -> Vec<RecentActivity> {
    let window = DateWindow::week_of(now.date_naive(), week_start);

    let mut feed = newest_in_window(
        tasks
            .iter()
            .map(|task| activity(EntityKind::Task, &task.id, &task.title, task.created_at)),
        window,
        RECENT_TASKS_CAP,
    );
    feed.extend(newest_in_window(
        moms.iter()
            .map(|mom| activity(EntityKind::Mom, &mom.id, &mom.title, mom.created_at)),
        window,
        RECENT_MOMS_CAP,
    ));
    feed.extend(newest_in_window(
        quests
            .iter()
            .map(|quest| activity(EntityKind::Quest, &quest.id, &quest.title, quest.created_at)),
        window,
        RECENT_QUESTS_CAP,
    ));

    feed.sort_by(|a, b| b.at.cmp(&a.at));
    feed.truncate(limit);
    feed
}

fn activity(kind: EntityKind, id: &EntityId, title: &str, at: DateTime<Utc>) -> RecentActivity {
    RecentActivity {
        kind,
        id: id.clone(),
        title: title.to_string(),
        at,
    }
}

fn newest_in_window(
    items: impl Iterator<Item = RecentActivity>,
    window: DateWindow,
    cap: usize,
) -> Vec<RecentActivity> {
    let mut selected: Vec<RecentActivity> =
        items.filter(|item| window.contains_instant(item.at)).collect();
    selected.sort_by(|a, b| b.at.cmp(&a.at));
    selected.truncate(cap);
    selected
}
