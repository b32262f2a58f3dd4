//! Board root object.
//!
//! # Responsibility
//! - Own one store per entity kind plus the manager directory.
//! - Offer cross-store use cases (task creation inside a quest, dashboard
//!   figures, attendance statistics) on top of the individual stores.
//!
//! # Invariants
//! - A board is built once and passed by reference to every consumer; there
//!   is no global instance.
//! - Cross-store reads are pull-based and recomputed on every call.

use crate::clock::Clock;
use crate::config::BoardConfig;
use crate::model::attendance::{AttendanceRecord, AttendanceStatistics};
use crate::model::employee::Employee;
use crate::model::entity::EntityId;
use crate::model::manager::Manager;
use crate::model::mom::MeetingMinutes;
use crate::model::quest::{Quest, QuestPatch};
use crate::model::task::{Task, TaskDraft};
use crate::repo::attendance_repo::AttendanceLog;
use crate::repo::manager_repo::ManagerDirectory;
use crate::repo::store::{EmployeeStore, EntityStore, MomStore, QuestStore, StoreResult, TaskStore};
use crate::service::calendar::DateWindow;
use crate::service::resolver::ReferenceResolver;
use crate::service::stats::{
    attendance_statistics, due_this_week, due_today, recent_activity, weekly_task_growth,
    MonthlyAttendance, QuestTaskCounts, RecentActivity, TaskStatusCounts, WeeklyGrowth,
};
use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use serde::Serialize;
use std::rc::Rc;

const DASHBOARD_ACTIVITY_LIMIT: usize = 5;
const DASHBOARD_DUE_THIS_WEEK_LIMIT: usize = 5;

/// Fully-formed records supplied by an external seed provider.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub managers: Vec<Manager>,
    pub employees: Vec<Employee>,
    pub tasks: Vec<Task>,
    pub moms: Vec<MeetingMinutes>,
    pub quests: Vec<Quest>,
    pub attendance: Vec<AttendanceRecord>,
}

/// Figures shown on the dashboard, computed at `generated_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub generated_at: DateTime<Utc>,
    pub task_counts: TaskStatusCounts,
    pub completion_rate: f64,
    pub productivity_score: u32,
    pub weekly_growth: WeeklyGrowth,
    pub due_today: Vec<EntityId>,
    pub due_this_week: Vec<EntityId>,
    pub recent_activity: Vec<RecentActivity>,
    pub monthly_attendance: MonthlyAttendance,
    pub quests_created_this_week: usize,
}

pub struct Board {
    config: BoardConfig,
    clock: Rc<dyn Clock>,
    managers: ManagerDirectory,
    employees: EmployeeStore,
    tasks: TaskStore,
    moms: MomStore,
    quests: QuestStore,
    attendance: AttendanceLog,
}

impl Board {
    pub fn new(config: BoardConfig, clock: Rc<dyn Clock>, managers: ManagerDirectory) -> Self {
        Self {
            config,
            managers,
            employees: EntityStore::new(Rc::clone(&clock)),
            tasks: EntityStore::new(Rc::clone(&clock)),
            moms: EntityStore::new(Rc::clone(&clock)),
            quests: EntityStore::new(Rc::clone(&clock)),
            attendance: AttendanceLog::new(),
            clock,
        }
    }

    /// Builds a board pre-filled with seed records. No notifications fire.
    ///
    /// # Errors
    /// - `AlreadyExists` when the seed repeats an id (or a manager email).
    pub fn from_seed(
        seed: SeedData,
        config: BoardConfig,
        clock: Rc<dyn Clock>,
    ) -> StoreResult<Self> {
        let managers = ManagerDirectory::new(seed.managers)?;
        let mut board = Self::new(config, clock, managers);
        for employee in seed.employees {
            board.employees.insert_seed(employee)?;
        }
        for task in seed.tasks {
            board.tasks.insert_seed(task)?;
        }
        for mom in seed.moms {
            board.moms.insert_seed(mom)?;
        }
        for quest in seed.quests {
            board.quests.insert_seed(quest)?;
        }
        for record in seed.attendance {
            board.attendance.insert_seed(record)?;
        }

        info!(
            "event=board_seed module=board status=ok managers={} employees={} tasks={} moms={} quests={} attendance={}",
            board.managers.len(),
            board.employees.len(),
            board.tasks.len(),
            board.moms.len(),
            board.quests.len(),
            board.attendance.len()
        );
        Ok(board)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn managers(&self) -> &ManagerDirectory {
        &self.managers
    }

    pub fn employees(&self) -> &EmployeeStore {
        &self.employees
    }

    pub fn employees_mut(&mut self) -> &mut EmployeeStore {
        &mut self.employees
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskStore {
        &mut self.tasks
    }

    pub fn moms(&self) -> &MomStore {
        &self.moms
    }

    pub fn moms_mut(&mut self) -> &mut MomStore {
        &mut self.moms
    }

    pub fn quests(&self) -> &QuestStore {
        &self.quests
    }

    pub fn quests_mut(&mut self) -> &mut QuestStore {
        &mut self.quests
    }

    pub fn attendance(&self) -> &AttendanceLog {
        &self.attendance
    }

    pub fn attendance_mut(&mut self) -> &mut AttendanceLog {
        &mut self.attendance
    }

    pub fn resolver(&self) -> ReferenceResolver<'_> {
        ReferenceResolver {
            employees: &self.employees,
            tasks: &self.tasks,
            moms: &self.moms,
            quests: &self.quests,
            attendance: &self.attendance,
            managers: &self.managers,
            config: &self.config,
        }
    }

    /// Creates a task and appends its id to the quest's task list.
    ///
    /// # Errors
    /// - `NotFound` when the quest does not exist; no task is created then.
    pub fn create_task_for_quest(
        &mut self,
        quest_id: &EntityId,
        draft: TaskDraft,
    ) -> StoreResult<EntityId> {
        let mut task_ids = match self.quests.get(quest_id) {
            Ok(quest) => quest.associated_task_ids.clone(),
            Err(err) => {
                warn!("event=quest_task_create module=board status=quest_not_found");
                return Err(err);
            }
        };

        let task_id = self.tasks.create(draft);
        task_ids.push(task_id.clone());
        self.quests.update(
            quest_id,
            QuestPatch {
                associated_task_ids: Some(task_ids),
                ..QuestPatch::default()
            },
        )?;
        Ok(task_id)
    }

    /// Associated-task totals for one quest.
    ///
    /// # Errors
    /// - `NotFound` when the quest does not exist.
    pub fn quest_task_counts(&self, quest_id: &EntityId) -> StoreResult<QuestTaskCounts> {
        let quest = self.quests.get(quest_id)?;
        Ok(QuestTaskCounts::from_tasks(self.tasks.for_quest(quest)))
    }

    /// Per-employee attendance over `start..=end`, sorted by employee name.
    pub fn attendance_statistics(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<AttendanceStatistics> {
        let resolver = self.resolver();
        attendance_statistics(
            self.attendance.list(),
            DateWindow::new(start, end),
            |employee_id| resolver.employee_name(employee_id),
        )
    }

    /// Attendance for the calendar month containing `date`.
    pub fn monthly_attendance(&self, date: NaiveDate) -> MonthlyAttendance {
        let window = DateWindow::month_of(date);
        let rows = self.attendance_statistics(window.start, window.end);
        MonthlyAttendance::from_rows(window, rows)
    }

    pub fn task_status_counts(&self) -> TaskStatusCounts {
        TaskStatusCounts::from_tasks(self.tasks.list())
    }

    pub fn weekly_task_growth(&self) -> WeeklyGrowth {
        weekly_task_growth(self.tasks.list(), self.now(), self.config.week_start)
    }

    /// Every dashboard figure, computed against the board clock.
    pub fn dashboard(&self) -> DashboardSummary {
        let now = self.now();
        let week_start = self.config.week_start;
        let task_counts = self.task_status_counts();
        let this_week = DateWindow::week_of(now.date_naive(), week_start);

        DashboardSummary {
            generated_at: now,
            task_counts,
            completion_rate: task_counts.completion_rate(),
            productivity_score: task_counts.productivity_score(),
            weekly_growth: weekly_task_growth(self.tasks.list(), now, week_start),
            due_today: due_today(self.tasks.list(), now)
                .into_iter()
                .map(|task| task.id.clone())
                .collect(),
            due_this_week: due_this_week(self.tasks.list(), now, week_start)
                .into_iter()
                .take(DASHBOARD_DUE_THIS_WEEK_LIMIT)
                .map(|task| task.id.clone())
                .collect(),
            recent_activity: recent_activity(
                self.tasks.list(),
                self.moms.list(),
                self.quests.list(),
                now,
                week_start,
                DASHBOARD_ACTIVITY_LIMIT,
            ),
            monthly_attendance: self.monthly_attendance(now.date_naive()),
            quests_created_this_week: self
                .quests
                .filter(|quest| this_week.contains_instant(quest.created_at))
                .len(),
        }
    }
}
