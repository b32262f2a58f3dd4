use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use opsboard_core::{
    AttendanceRecord, Board, BoardConfig, ChangeEvent, Employee, EmployeeDraft, EntityId,
    EntityKind, FixedClock, Manager, ManagerDirectory, MeetingMinutes, Quest, QuestDraft,
    QuestStatus, Resolved, SeedData, StoreError, Task, TaskDraft, TaskStatus,
};
use std::cell::RefCell;
use std::rc::Rc;

fn at(d: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, d, hour, 0, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn employee(id: &str, name: &str, nickname: &str) -> Employee {
    Employee {
        id: id.into(),
        name: name.to_string(),
        nickname: nickname.to_string(),
        archetype: vec!["Developer".to_string()],
        special_abilities: Vec::new(),
        personalities: Vec::new(),
        weaknesses: Vec::new(),
        created_at: at(1, 8),
        updated_at: at(1, 8),
    }
}

fn task(id: &str, assignees: &[&str], moms: &[&str], status: TaskStatus) -> Task {
    Task {
        id: id.into(),
        title: format!("task {id}"),
        description: String::new(),
        due_date: day(2024, 3, 1),
        assigned_employee_ids: assignees.iter().map(|id| EntityId::from(*id)).collect(),
        status,
        attached_mom_ids: moms.iter().map(|id| EntityId::from(*id)).collect(),
        created_at: at(1, 9),
        updated_at: at(1, 9),
        created_by: "1".into(),
    }
}

fn mom(id: &str, title: &str) -> MeetingMinutes {
    MeetingMinutes {
        id: id.into(),
        title: title.to_string(),
        date: day(2024, 2, 1),
        attendees: vec!["Alice Johnson".to_string()],
        content: "<p>Discussed goals</p>".to_string(),
        location: None,
        duration: None,
        to_follow_up: None,
        created_at: at(1, 10),
        updated_at: at(1, 10),
        created_by: "1".into(),
    }
}

fn quest(id: &str, pic: &str, tasks: &[&str]) -> Quest {
    Quest {
        id: id.into(),
        title: format!("quest {id}"),
        description: String::new(),
        assigned_pic_id: pic.into(),
        status: QuestStatus::New,
        associated_task_ids: tasks.iter().map(|id| EntityId::from(*id)).collect(),
        created_at: at(1, 11),
        updated_at: at(1, 11),
        created_by: "1".into(),
    }
}

fn seeded_board() -> Board {
    let seed = SeedData {
        managers: vec![
            Manager::new("1", "John Manager", "manager@company.com"),
            Manager::new("2", "Sarah Director", "director@company.com"),
        ],
        employees: vec![
            employee("e1", "Alice Johnson", "Ali"),
            employee("e2", "Bob Smith", "Bobby"),
        ],
        tasks: vec![
            task("t1", &["e1"], &["m1"], TaskStatus::InProgress),
            task("t2", &["e1", "e2"], &[], TaskStatus::Done),
            task("t3", &["e2"], &[], TaskStatus::ToDo),
        ],
        moms: vec![mom("m1", "Q1 Planning Meeting")],
        quests: vec![quest("q1", "2", &["t1", "t2"])],
        attendance: Vec::new(),
    };
    let clock = Rc::new(FixedClock::at(at(5, 12)));
    Board::from_seed(seed, BoardConfig::default(), clock).unwrap()
}

#[test]
fn seeded_board_resolves_every_reference() {
    let board = seeded_board();
    let resolver = board.resolver();

    let t2 = board.tasks().get(&"t2".into()).unwrap();
    let names: Vec<String> = resolver
        .task_assignees(t2)
        .iter()
        .map(|resolved| resolved.label("Unknown", |employee| employee.name.clone()))
        .collect();
    assert_eq!(names, vec!["Alice Johnson", "Bob Smith"]);

    let t1 = board.tasks().get(&"t1".into()).unwrap();
    assert_eq!(
        resolver.task_moms(t1)[0].found().map(|mom| mom.title.as_str()),
        Some("Q1 Planning Meeting")
    );
    assert_eq!(resolver.employee_display_name(&"e1".into()), "Alice Johnson (Ali)");
    assert_eq!(resolver.employee_first_name(&"e2".into()), "Bob");
    assert_eq!(resolver.manager_name(&"2".into()), "Sarah Director");
    assert!(resolver.dangling_references().is_empty());
}

#[test]
fn deleting_an_employee_leaves_a_dangling_assignee() {
    let mut board = seeded_board();
    board.employees_mut().delete(&"e1".into()).unwrap();

    let t1 = board.tasks().get(&"t1".into()).unwrap();
    assert_eq!(t1.assigned_employee_ids, vec![EntityId::from("e1")]);

    let resolver = board.resolver();
    let assignees = resolver.task_assignees(t1);
    assert_eq!(assignees, vec![Resolved::Dangling("e1".into())]);
    assert!(assignees[0].is_dangling());
    assert_eq!(resolver.employee_name(&"e1".into()), "Unknown");
}

#[test]
fn created_records_keep_ids_of_deleted_employees() {
    let mut board = seeded_board();
    let e1 = board.employees_mut().create(EmployeeDraft::new("Carol White", "Caz"));
    let mut draft = TaskDraft::new("Setup CI", day(2024, 3, 2), "1".into());
    draft.assigned_employee_ids = vec![e1.clone(), "e2".into()];
    let t1 = board.tasks_mut().create(draft);

    board.employees_mut().delete(&e1).unwrap();

    let task = board.tasks().get(&t1).unwrap();
    assert!(task.assigned_employee_ids.contains(&e1));
    let resolved = board.resolver().task_assignees(task);
    assert_eq!(resolved[0], Resolved::Dangling(e1));
    assert_eq!(
        resolved[1].found().map(|employee| employee.name.as_str()),
        Some("Bob Smith")
    );
}

#[test]
fn unknown_manager_and_mom_fall_back_to_labels() {
    let board = seeded_board();
    let resolver = board.resolver();

    assert_eq!(resolver.manager_name(&"999".into()), "Unknown");
    assert_eq!(resolver.mom_title(&"nope".into()), "Unknown MoM");
    let quest = board.quests().get(&"q1".into()).unwrap();
    assert!(resolver.quest_pic(quest).found().is_some());
}

#[test]
fn fallback_labels_follow_config() {
    let config = BoardConfig {
        unknown_label: "Former staff".to_string(),
        ..BoardConfig::default()
    };
    let board = Board::new(
        config,
        Rc::new(FixedClock::at(at(5, 12))),
        ManagerDirectory::new(Vec::new()).unwrap(),
    );
    assert_eq!(board.resolver().employee_name(&"e1".into()), "Former staff");
}

#[test]
fn audit_lists_every_dangling_reference_in_store_order() {
    let mut board = seeded_board();
    board.employees_mut().delete(&"e2".into()).unwrap();
    board.tasks_mut().delete(&"t1".into()).unwrap();
    board.moms_mut().delete(&"m1".into()).unwrap();
    board
        .attendance_mut()
        .insert_seed(AttendanceRecord {
            id: "ghost-2024-02-01".into(),
            employee_id: "ghost".into(),
            date: day(2024, 2, 1),
            check_in_time: at(1, 9),
            check_out_time: at(1, 17),
            total_hours: 8.0,
        })
        .unwrap();

    let audit = board.resolver().dangling_references();
    let summary: Vec<(EntityKind, &str, &str, &str)> = audit
        .iter()
        .map(|dangling| {
            (
                dangling.source,
                dangling.source_id.as_str(),
                dangling.field,
                dangling.target_id.as_str(),
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            (EntityKind::Task, "t2", "assignedEmployeeIds", "e2"),
            (EntityKind::Task, "t3", "assignedEmployeeIds", "e2"),
            (EntityKind::Quest, "q1", "associatedTaskIds", "t1"),
            (EntityKind::Attendance, "ghost-2024-02-01", "employeeId", "ghost"),
        ]
    );
}

#[test]
fn quest_tasks_keep_quest_order_and_report_dangling_ids() {
    let mut board = seeded_board();
    board.tasks_mut().delete(&"t1".into()).unwrap();

    let quest = board.quests().get(&"q1".into()).unwrap();
    let resolved = board.resolver().quest_tasks(quest);
    assert_eq!(resolved.len(), 2);
    assert!(resolved[0].is_dangling());
    assert_eq!(resolved[1].found().map(|task| task.id.as_str()), Some("t2"));
}

#[test]
fn create_task_for_quest_appends_the_new_id() {
    let mut board = seeded_board();
    let quest_id = EntityId::from("q1");

    let draft = TaskDraft::new("Write docs", day(2024, 3, 5), "2".into());
    let task_id = board.create_task_for_quest(&quest_id, draft).unwrap();

    let quest = board.quests().get(&quest_id).unwrap();
    assert_eq!(
        quest.associated_task_ids,
        vec![EntityId::from("t1"), EntityId::from("t2"), task_id.clone()]
    );
    assert!(quest.updated_at > quest.created_at);
    assert_eq!(board.tasks().get(&task_id).unwrap().title, "Write docs");

    let counts = board.quest_task_counts(&quest_id).unwrap();
    assert_eq!(counts.total, 3);
    assert_eq!(counts.by_status.to_do, 1);
    assert_eq!(counts.by_status.in_progress, 1);
    assert_eq!(counts.by_status.done, 1);
}

#[test]
fn create_task_for_missing_quest_creates_nothing() {
    let mut board = seeded_board();
    let events = Rc::new(RefCell::new(Vec::<ChangeEvent>::new()));
    {
        let events = Rc::clone(&events);
        board
            .tasks()
            .subscribe(move |event: &ChangeEvent| events.borrow_mut().push(event.clone()));
    }

    let draft = TaskDraft::new("x", day(2024, 3, 5), "1".into());
    let err = board
        .create_task_for_quest(&"missing".into(), draft)
        .unwrap_err();

    assert!(matches!(err, StoreError::NotFound { kind: EntityKind::Quest, .. }));
    assert_eq!(board.tasks().len(), 3);
    assert!(events.borrow().is_empty());
}

#[test]
fn quest_task_counts_for_missing_quest_is_not_found() {
    let board = seeded_board();
    assert!(board.quest_task_counts(&"missing".into()).is_err());
}

#[test]
fn seeding_rejects_duplicate_ids_and_emits_nothing() {
    let mut seed = SeedData {
        employees: vec![employee("e1", "Alice", "A"), employee("e1", "Alice", "A")],
        ..SeedData::default()
    };
    let clock = Rc::new(FixedClock::at(at(5, 12)));
    let err = Board::from_seed(seed.clone(), BoardConfig::default(), clock.clone())
        .err()
        .unwrap();
    assert_eq!(
        err,
        StoreError::AlreadyExists {
            kind: EntityKind::Employee,
            key: "e1".to_string(),
        }
    );

    seed.employees.pop();
    let board = Board::from_seed(seed, BoardConfig::default(), clock).unwrap();
    assert_eq!(board.employees().len(), 1);
    assert_eq!(board.employees().listener_count(), 0);
}

#[test]
fn quest_can_be_created_through_the_board() {
    let mut board = seeded_board();
    let mut draft = QuestDraft::new("Q2 Planning", "1".into(), "1".into());
    draft.associated_task_ids = vec!["t3".into()];
    let id = board.quests_mut().create(draft);

    let quest = board.quests().get(&id).unwrap();
    assert_eq!(quest.created_at, board.now());
    let pic = board.resolver().quest_pic(quest);
    assert_eq!(
        pic.found().map(|manager| manager.name.as_str()),
        Some("John Manager")
    );
}
