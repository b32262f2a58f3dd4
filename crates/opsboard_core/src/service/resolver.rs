//! Cross-store reference resolution.
//!
//! # Responsibility
//! - Turn soft id references into display-ready joins.
//! - Report unresolvable ids as `Resolved::Dangling`, never as errors.
//!
//! # Invariants
//! - Resolution is read-only and recomputed on every call.
//! - Output order follows the order of ids in the source field.

use crate::config::BoardConfig;
use crate::model::employee::Employee;
use crate::model::entity::{EntityId, EntityKind};
use crate::model::manager::Manager;
use crate::model::mom::MeetingMinutes;
use crate::model::quest::Quest;
use crate::model::task::Task;
use crate::repo::attendance_repo::AttendanceLog;
use crate::repo::manager_repo::ManagerDirectory;
use crate::repo::store::{EmployeeStore, MomStore, QuestStore, TaskStore};
use serde::Serialize;

/// Outcome of following one soft reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<'a, T> {
    Found(&'a T),
    Dangling(EntityId),
}

impl<'a, T> Resolved<'a, T> {
    fn from_lookup(id: &EntityId, found: Option<&'a T>) -> Self {
        match found {
            Some(record) => Self::Found(record),
            None => Self::Dangling(id.clone()),
        }
    }

    pub fn found(&self) -> Option<&'a T> {
        match self {
            Self::Found(record) => Some(*record),
            Self::Dangling(_) => None,
        }
    }

    pub fn is_dangling(&self) -> bool {
        matches!(self, Self::Dangling(_))
    }

    /// Display text for the reference, or `fallback` when dangling.
    pub fn label(&self, fallback: &str, render: impl FnOnce(&T) -> String) -> String {
        match self {
            Self::Found(record) => render(*record),
            Self::Dangling(_) => fallback.to_string(),
        }
    }
}

/// One unresolvable reference found by a board-wide audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub source: EntityKind,
    pub source_id: EntityId,
    pub field: &'static str,
    pub target: EntityKind,
    pub target_id: EntityId,
}

pub struct ReferenceResolver<'a> {
    pub(crate) employees: &'a EmployeeStore,
    pub(crate) tasks: &'a TaskStore,
    pub(crate) moms: &'a MomStore,
    pub(crate) quests: &'a QuestStore,
    pub(crate) attendance: &'a AttendanceLog,
    pub(crate) managers: &'a ManagerDirectory,
    pub(crate) config: &'a BoardConfig,
}

impl<'a> ReferenceResolver<'a> {
    pub fn employee(&self, id: &EntityId) -> Resolved<'a, Employee> {
        Resolved::from_lookup(id, self.employees.find(id))
    }

    pub fn employees(&self, ids: &[EntityId]) -> Vec<Resolved<'a, Employee>> {
        ids.iter().map(|id| self.employee(id)).collect()
    }

    pub fn manager(&self, id: &EntityId) -> Resolved<'a, Manager> {
        Resolved::from_lookup(id, self.managers.get(id))
    }

    pub fn mom(&self, id: &EntityId) -> Resolved<'a, MeetingMinutes> {
        Resolved::from_lookup(id, self.moms.find(id))
    }

    pub fn task(&self, id: &EntityId) -> Resolved<'a, Task> {
        Resolved::from_lookup(id, self.tasks.find(id))
    }

    pub fn task_assignees(&self, task: &Task) -> Vec<Resolved<'a, Employee>> {
        self.employees(&task.assigned_employee_ids)
    }

    pub fn task_moms(&self, task: &Task) -> Vec<Resolved<'a, MeetingMinutes>> {
        task.attached_mom_ids.iter().map(|id| self.mom(id)).collect()
    }

    pub fn quest_tasks(&self, quest: &Quest) -> Vec<Resolved<'a, Task>> {
        quest
            .associated_task_ids
            .iter()
            .map(|id| self.task(id))
            .collect()
    }

    pub fn quest_pic(&self, quest: &Quest) -> Resolved<'a, Manager> {
        self.manager(&quest.assigned_pic_id)
    }

    pub fn employee_name(&self, id: &EntityId) -> String {
        self.employee(id)
            .label(&self.config.unknown_label, |employee| employee.name.clone())
    }

    /// `"Name (Nickname)"`.
    pub fn employee_display_name(&self, id: &EntityId) -> String {
        self.employee(id)
            .label(&self.config.unknown_label, Employee::display_name)
    }

    pub fn employee_first_name(&self, id: &EntityId) -> String {
        self.employee(id).label(&self.config.unknown_label, |employee| {
            employee.first_name().to_string()
        })
    }

    pub fn manager_name(&self, id: &EntityId) -> String {
        self.manager(id)
            .label(&self.config.unknown_label, |manager| manager.name.clone())
    }

    pub fn mom_title(&self, id: &EntityId) -> String {
        self.mom(id)
            .label(&self.config.unknown_mom_label, |mom| mom.title.clone())
    }

    /// Every soft reference on the board that does not resolve.
    ///
    /// Ordered by source store (tasks, minutes, quests, attendance), then by
    /// record order, then by field order.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut found = Vec::new();

        for task in self.tasks.list() {
            for employee_id in &task.assigned_employee_ids {
                if !self.employees.contains(employee_id) {
                    found.push(dangling(
                        EntityKind::Task,
                        &task.id,
                        "assignedEmployeeIds",
                        EntityKind::Employee,
                        employee_id,
                    ));
                }
            }
            for mom_id in &task.attached_mom_ids {
                if !self.moms.contains(mom_id) {
                    found.push(dangling(
                        EntityKind::Task,
                        &task.id,
                        "attachedMoMIds",
                        EntityKind::Mom,
                        mom_id,
                    ));
                }
            }
            self.check_author(&mut found, EntityKind::Task, &task.id, &task.created_by);
        }

        for mom in self.moms.list() {
            self.check_author(&mut found, EntityKind::Mom, &mom.id, &mom.created_by);
        }

        for quest in self.quests.list() {
            if self.managers.get(&quest.assigned_pic_id).is_none() {
                found.push(dangling(
                    EntityKind::Quest,
                    &quest.id,
                    "assignedPICId",
                    EntityKind::Manager,
                    &quest.assigned_pic_id,
                ));
            }
            for task_id in &quest.associated_task_ids {
                if !self.tasks.contains(task_id) {
                    found.push(dangling(
                        EntityKind::Quest,
                        &quest.id,
                        "associatedTaskIds",
                        EntityKind::Task,
                        task_id,
                    ));
                }
            }
            self.check_author(&mut found, EntityKind::Quest, &quest.id, &quest.created_by);
        }

        for record in self.attendance.list() {
            if !self.employees.contains(&record.employee_id) {
                found.push(dangling(
                    EntityKind::Attendance,
                    &record.id,
                    "employeeId",
                    EntityKind::Employee,
                    &record.employee_id,
                ));
            }
        }

        found
    }

    fn check_author(
        &self,
        found: &mut Vec<DanglingReference>,
        source: EntityKind,
        source_id: &EntityId,
        created_by: &EntityId,
    ) {
        if self.managers.get(created_by).is_none() {
            found.push(dangling(
                source,
                source_id,
                "createdBy",
                EntityKind::Manager,
                created_by,
            ));
        }
    }
}

fn dangling(
    source: EntityKind,
    source_id: &EntityId,
    field: &'static str,
    target: EntityKind,
    target_id: &EntityId,
) -> DanglingReference {
    DanglingReference {
        source,
        source_id: source_id.clone(),
        field,
        target,
        target_id: target_id.clone(),
    }
}
