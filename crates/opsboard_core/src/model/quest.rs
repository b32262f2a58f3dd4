//! Quest (initiative) model.
//!
//! A quest has one person in charge (a manager id), a flat status and an
//! ordered list of associated task ids.

use crate::model::entity::{merge, Entity, EntityId, EntityKind};
use crate::model::validation::{require_text, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestStatus {
    #[default]
    #[serde(rename = "New")]
    New,
    #[serde(rename = "Ready")]
    Ready,
    #[serde(rename = "On Progress")]
    OnProgress,
    #[serde(rename = "Done")]
    Done,
}

impl QuestStatus {
    pub const ALL: [QuestStatus; 4] = [Self::New, Self::Ready, Self::OnProgress, Self::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Ready => "Ready",
            Self::OnProgress => "On Progress",
            Self::Done => "Done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl Display for QuestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    /// Manager id of the person in charge.
    #[serde(rename = "assignedPICId")]
    pub assigned_pic_id: EntityId,
    pub status: QuestStatus,
    pub associated_task_ids: Vec<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: EntityId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestDraft {
    pub title: String,
    pub description: String,
    pub assigned_pic_id: EntityId,
    pub status: QuestStatus,
    pub associated_task_ids: Vec<EntityId>,
    pub created_by: EntityId,
}

impl QuestDraft {
    pub fn new(title: impl Into<String>, assigned_pic_id: EntityId, created_by: EntityId) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            assigned_pic_id,
            status: QuestStatus::New,
            associated_task_ids: Vec::new(),
            created_by,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("person in charge", self.assigned_pic_id.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_pic_id: Option<EntityId>,
    pub status: Option<QuestStatus>,
    pub associated_task_ids: Option<Vec<EntityId>>,
}

impl QuestPatch {
    pub fn status(status: QuestStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Entity for Quest {
    const KIND: EntityKind = EntityKind::Quest;

    type Draft = QuestDraft;
    type Patch = QuestPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: QuestDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            assigned_pic_id: draft.assigned_pic_id,
            status: draft.status,
            associated_task_ids: draft.associated_task_ids,
            created_at: now,
            updated_at: now,
            created_by: draft.created_by,
        }
    }

    fn apply_patch(&mut self, patch: QuestPatch) {
        merge(&mut self.title, patch.title);
        merge(&mut self.description, patch.description);
        merge(&mut self.assigned_pic_id, patch.assigned_pic_id);
        merge(&mut self.status, patch.status);
        merge(&mut self.associated_task_ids, patch.associated_task_ids);
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
