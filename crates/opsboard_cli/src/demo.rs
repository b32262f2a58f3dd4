//! Demo seed anchored on the current date.
//!
//! Dates are relative to `today` so every dashboard panel has content
//! whenever the CLI runs.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use opsboard_core::{
    AttendanceDraft, AttendanceRecord, Employee, Manager, MeetingMinutes, Quest, QuestStatus,
    SeedData, Task, TaskStatus,
};

const EMPLOYEE_IDS: [&str; 3] = ["1", "2", "3"];

pub fn seed(now: DateTime<Utc>) -> SeedData {
    let today = now.date_naive();
    SeedData {
        managers: managers(),
        employees: employees(now),
        tasks: tasks(now, today),
        moms: moms(now, today),
        quests: quests(now),
        attendance: attendance(today),
    }
}

fn managers() -> Vec<Manager> {
    vec![
        Manager::new("1", "John Manager", "john@company.com"),
        Manager::new("2", "Sarah Smith", "sarah@company.com"),
        Manager::new("3", "Mike Johnson", "mike@company.com"),
    ]
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn employees(now: DateTime<Utc>) -> Vec<Employee> {
    let employee = |id: &str, name: &str, nickname: &str, archetype: &[&str], weakness: &str| {
        let stamp = now - Duration::days(60);
        Employee {
            id: id.into(),
            name: name.to_string(),
            nickname: nickname.to_string(),
            archetype: tags(archetype),
            special_abilities: tags(&["Problem Solving", "Communication"]),
            personalities: tags(&["Analytical", "Team Player"]),
            weaknesses: tags(&[weakness]),
            created_at: stamp,
            updated_at: stamp,
        }
    };
    vec![
        employee("1", "Alice Johnson", "Ali", &["Developer", "QA"], "Perfectionism"),
        employee("2", "Bob Smith", "Bobby", &["Designer"], "Procrastination"),
        employee("3", "Charlie Brown", "Chuck", &["Analyst", "Support"], "Lack of Focus"),
    ]
}

fn tasks(now: DateTime<Utc>, today: NaiveDate) -> Vec<Task> {
    let task = |id: &str,
                title: &str,
                due_in_days: i64,
                assignees: &[&str],
                status: TaskStatus,
                moms: &[&str],
                created_days_ago: i64| {
        let created_at = now - Duration::days(created_days_ago);
        Task {
            id: id.into(),
            title: title.to_string(),
            description: format!("{title} for the current sprint"),
            due_date: today + Duration::days(due_in_days),
            assigned_employee_ids: assignees.iter().map(|id| (*id).into()).collect(),
            status,
            attached_mom_ids: moms.iter().map(|id| (*id).into()).collect(),
            created_at,
            updated_at: created_at,
            created_by: "1".into(),
        }
    };
    vec![
        task("1", "Implement Login System", 0, &["1"], TaskStatus::InProgress, &["1"], 9),
        task("2", "Design Dashboard UI", 2, &["2"], TaskStatus::ToDo, &[], 1),
        task("3", "Database Schema Review", 5, &["1", "3"], TaskStatus::Done, &["2"], 12),
        task("4", "Write Release Notes", 1, &["3"], TaskStatus::Blocked, &[], 0),
    ]
}

fn moms(now: DateTime<Utc>, today: NaiveDate) -> Vec<MeetingMinutes> {
    let planning_at = now - Duration::days(9);
    let review_at = now - Duration::hours(3);
    vec![
        MeetingMinutes {
            id: "1".into(),
            title: "Q1 Planning Meeting".to_string(),
            date: planning_at.date_naive(),
            attendees: tags(&["John Manager", "Alice Johnson", "Bob Smith"]),
            content: "<h2>Meeting Agenda</h2><p>Discussed priorities and resource allocation.</p>"
                .to_string(),
            location: Some("Conference Room A".to_string()),
            duration: Some("2 hours".to_string()),
            to_follow_up: Some("Confirm login requirements\nSchedule UI review".to_string()),
            created_at: planning_at,
            updated_at: planning_at,
            created_by: "1".into(),
        },
        MeetingMinutes {
            id: "2".into(),
            title: "Database Review Session".to_string(),
            date: today,
            attendees: tags(&["Sarah Smith", "Alice Johnson", "Charlie Brown"]),
            content: "<h2>Database Schema Review</h2><p>Identified index improvements.</p>"
                .to_string(),
            location: Some("Virtual Meeting".to_string()),
            duration: Some("1.5 hours".to_string()),
            to_follow_up: None,
            created_at: review_at,
            updated_at: review_at,
            created_by: "2".into(),
        },
    ]
}

fn quests(now: DateTime<Utc>) -> Vec<Quest> {
    let sprint_at = now - Duration::days(9);
    let optimization_at = now - Duration::hours(1);
    vec![
        Quest {
            id: "1".into(),
            title: "Q1 Development Sprint".to_string(),
            description: "Oversee the completion of all development tasks".to_string(),
            assigned_pic_id: "2".into(),
            status: QuestStatus::OnProgress,
            associated_task_ids: vec!["1".into(), "2".into()],
            created_at: sprint_at,
            updated_at: sprint_at,
            created_by: "1".into(),
        },
        Quest {
            id: "2".into(),
            title: "Database Optimization Project".to_string(),
            description: "Lead the database review and optimization initiative".to_string(),
            assigned_pic_id: "3".into(),
            status: QuestStatus::Ready,
            associated_task_ids: vec!["3".into()],
            created_at: optimization_at,
            updated_at: optimization_at,
            created_by: "1".into(),
        },
    ]
}

/// Weekday attendance from the first of the month through `today`.
///
/// Check-in falls between 09:00 and 10:59, check-out between 17:00 and
/// 19:59; every tenth slot is an absence.
fn attendance(today: NaiveDate) -> Vec<AttendanceRecord> {
    let first = today - Duration::days(i64::from(today.day0()));
    let mut records = Vec::new();
    for date in first.iter_days().take_while(|date| *date <= today) {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        for (index, employee_id) in EMPLOYEE_IDS.iter().enumerate() {
            let slot = date.day() as i64 * 7 + index as i64 * 13;
            if slot % 10 == 0 {
                continue;
            }
            let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
                continue;
            };
            let midnight = midnight.and_utc();
            records.push(AttendanceRecord::from_draft(AttendanceDraft {
                employee_id: (*employee_id).into(),
                date,
                check_in_time: midnight + Duration::minutes(9 * 60 + slot % 120),
                check_out_time: midnight + Duration::minutes(17 * 60 + (slot * 3) % 180),
            }));
        }
    }
    records
}
