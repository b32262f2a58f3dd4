use chrono::{NaiveDate, TimeZone, Utc, Weekday};
use opsboard_core::{
    content_preview, parse_attendees, AttendanceDraft, AuthConfig, BoardConfig, ConfigError,
    EmployeeDraft, Manager, MeetingMinutesDraft, Quest, QuestDraft, QuestStatus, Task, TaskDraft,
    TaskStatus, ValidationError,
};
use serde_json::json;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn task_serializes_with_display_status_and_camel_case_fields() {
    let stamp = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
    let task = Task {
        id: "1".into(),
        title: "Implement User Authentication".to_string(),
        description: "Create login and registration system".to_string(),
        due_date: day(2024, 3, 15),
        assigned_employee_ids: vec!["1".into()],
        status: TaskStatus::InProgress,
        attached_mom_ids: vec!["2".into()],
        created_at: stamp,
        updated_at: stamp,
        created_by: "1".into(),
    };

    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value["status"], json!("In Progress"));
    assert_eq!(value["dueDate"], json!("2024-03-15"));
    assert_eq!(value["assignedEmployeeIds"], json!(["1"]));
    assert_eq!(value["attachedMoMIds"], json!(["2"]));
    assert_eq!(value["createdBy"], json!("1"));

    let back: Task = serde_json::from_value(value).unwrap();
    assert_eq!(back, task);
}

#[test]
fn status_names_match_board_columns() {
    let task_columns: Vec<&str> = TaskStatus::ALL.iter().map(|status| status.as_str()).collect();
    assert_eq!(task_columns, vec!["To Do", "In Progress", "Done", "Blocked"]);
    assert_eq!(TaskStatus::parse("Blocked"), Some(TaskStatus::Blocked));
    assert_eq!(TaskStatus::parse("blocked"), None);
    assert_eq!(TaskStatus::default(), TaskStatus::ToDo);

    let quest_columns: Vec<String> = QuestStatus::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(quest_columns, vec!["New", "Ready", "On Progress", "Done"]);
    assert_eq!(
        serde_json::to_value(QuestStatus::OnProgress).unwrap(),
        json!("On Progress")
    );
}

#[test]
fn quest_uses_pic_field_name() {
    let quest: Quest = serde_json::from_value(json!({
        "id": "1",
        "title": "Q1 Development Sprint",
        "description": "Complete all Q1 development tasks",
        "assignedPICId": "2",
        "status": "On Progress",
        "associatedTaskIds": ["1", "2"],
        "createdAt": "2024-01-01T10:00:00Z",
        "updatedAt": "2024-01-20T14:30:00Z",
        "createdBy": "1"
    }))
    .unwrap();

    assert_eq!(quest.assigned_pic_id.as_str(), "2");
    assert_eq!(quest.status, QuestStatus::OnProgress);
    assert_eq!(quest.associated_task_ids.len(), 2);
}

#[test]
fn manager_role_is_lowercase() {
    let manager = Manager::new("1", "John Manager", "manager@company.com");
    let value = serde_json::to_value(&manager).unwrap();
    assert_eq!(value["role"], json!("manager"));
    assert_eq!(value["email"], json!("manager@company.com"));
}

#[test]
fn employee_form_requires_names_and_tag_sets() {
    let mut draft = EmployeeDraft::new("Alice Johnson", "Ali");
    assert_eq!(draft.validate(), Err(ValidationError::EmptySet("archetype")));

    draft.archetype = vec!["Developer".to_string()];
    draft.special_abilities = vec!["Problem Solving".to_string()];
    draft.personalities = vec!["Analytical".to_string()];
    draft.weaknesses = vec!["Perfectionism".to_string()];
    assert_eq!(draft.validate(), Ok(()));

    draft.nickname = "  ".to_string();
    assert_eq!(draft.validate(), Err(ValidationError::MissingField("nickname")));
}

#[test]
fn task_and_quest_forms_require_text_and_people() {
    let mut task = TaskDraft::new("Design Dashboard UI", day(2024, 3, 10), "1".into());
    task.description = "Create mockups".to_string();
    let err = task.validate().unwrap_err();
    assert_eq!(err, ValidationError::EmptySet("assigned employee"));
    assert_eq!(err.to_string(), "at least one assigned employee is required");

    let quest = QuestDraft::new("", "2".into(), "1".into());
    assert_eq!(quest.validate(), Err(ValidationError::MissingField("title")));
}

#[test]
fn minutes_form_requires_attendees_and_content() {
    let mut draft = MeetingMinutesDraft::new("Sprint Review", day(2024, 2, 15), "2".into());
    assert_eq!(draft.validate(), Err(ValidationError::EmptySet("attendee")));

    draft.attendees = parse_attendees("Alice Johnson, , Bob Smith ,");
    assert_eq!(draft.attendees, vec!["Alice Johnson", "Bob Smith"]);
    assert_eq!(draft.validate(), Err(ValidationError::MissingField("content")));

    draft.content = "<p>Reviewed sprint</p>".to_string();
    assert_eq!(draft.validate(), Ok(()));
}

#[test]
fn attendance_form_rejects_reversed_times() {
    let check_in = Utc.with_ymd_and_hms(2024, 1, 2, 17, 0, 0).unwrap();
    let draft = AttendanceDraft {
        employee_id: "1".into(),
        date: day(2024, 1, 2),
        check_in_time: check_in,
        check_out_time: Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap(),
    };
    assert!(matches!(
        draft.validate(),
        Err(ValidationError::InvalidTimeRange { .. })
    ));
}

#[test]
fn content_preview_strips_markup() {
    let preview = content_preview("<h2>Agenda</h2><p>Budget <b>review</b> and hiring</p>", 20);
    assert_eq!(preview, "AgendaBudget review ...");
    assert_eq!(content_preview("<p>short</p>", 20), "short");
}

#[test]
fn config_files_are_partial_json() {
    let board = BoardConfig::from_json_str(r#"{"week_start": "Mon"}"#).unwrap();
    assert_eq!(board.week_start, Weekday::Mon);
    assert_eq!(board.unknown_mom_label, "Unknown MoM");

    let auth = AuthConfig::from_json_str("{}").unwrap();
    assert_eq!(auth.shared_password, "password");

    let err = AuthConfig::from_json_str("{").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
