//! Task model.
//!
//! # Responsibility
//! - Define task records, their flat status enum and creation/patch payloads.
//!
//! # Invariants
//! - Any status may move to any other status; there is no transition guard.
//! - `assigned_employee_ids` and `attached_mom_ids` are soft references and
//!   may point at records that no longer exist.

use crate::model::entity::{merge, Entity, EntityId, EntityKind};
use crate::model::validation::{require_items, require_text, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Task lifecycle column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
    #[serde(rename = "Blocked")]
    Blocked,
}

impl TaskStatus {
    /// Board column order.
    pub const ALL: [TaskStatus; 4] = [Self::ToDo, Self::InProgress, Self::Done, Self::Blocked];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
            Self::Blocked => "Blocked",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub assigned_employee_ids: Vec<EntityId>,
    pub status: TaskStatus,
    #[serde(rename = "attachedMoMIds")]
    pub attached_mom_ids: Vec<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Manager id of the author.
    pub created_by: EntityId,
}

impl Task {
    pub fn is_assigned_to(&self, employee_id: &EntityId) -> bool {
        self.assigned_employee_ids.contains(employee_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub assigned_employee_ids: Vec<EntityId>,
    pub status: TaskStatus,
    pub attached_mom_ids: Vec<EntityId>,
    pub created_by: EntityId,
}

impl TaskDraft {
    /// Starts a `To Do` task with no assignees and no attached minutes.
    pub fn new(title: impl Into<String>, due_date: NaiveDate, created_by: EntityId) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date,
            assigned_employee_ids: Vec::new(),
            status: TaskStatus::ToDo,
            attached_mom_ids: Vec::new(),
            created_by,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_items("assigned employee", &self.assigned_employee_ids)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub assigned_employee_ids: Option<Vec<EntityId>>,
    pub status: Option<TaskStatus>,
    pub attached_mom_ids: Option<Vec<EntityId>>,
}

impl TaskPatch {
    /// Status-only patch, as produced by moving a card between columns.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Entity for Task {
    const KIND: EntityKind = EntityKind::Task;

    type Draft = TaskDraft;
    type Patch = TaskPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            assigned_employee_ids: draft.assigned_employee_ids,
            status: draft.status,
            attached_mom_ids: draft.attached_mom_ids,
            created_at: now,
            updated_at: now,
            created_by: draft.created_by,
        }
    }

    fn apply_patch(&mut self, patch: TaskPatch) {
        merge(&mut self.title, patch.title);
        merge(&mut self.description, patch.description);
        merge(&mut self.due_date, patch.due_date);
        merge(&mut self.assigned_employee_ids, patch.assigned_employee_ids);
        merge(&mut self.status, patch.status);
        merge(&mut self.attached_mom_ids, patch.attached_mom_ids);
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStatus;

    #[test]
    fn status_parse_matches_display() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("todo"), None);
    }
}
