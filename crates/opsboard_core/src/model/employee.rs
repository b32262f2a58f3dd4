//! Employee profile model.
//!
//! # Invariants
//! - Tag sets keep caller order; the store never deduplicates or sorts them.
//! - Empty tag sets are accepted by the store (form layer enforces them).

use crate::model::entity::{merge, Entity, EntityId, EntityKind};
use crate::model::validation::{require_items, require_text, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EntityId,
    pub name: String,
    pub nickname: String,
    /// Role tags such as `Developer` or `QA`.
    pub archetype: Vec<String>,
    pub special_abilities: Vec<String>,
    pub personalities: Vec<String>,
    pub weaknesses: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// `"Name (Nickname)"`, as shown in assignment pickers.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.nickname)
    }

    /// First whitespace-separated word of the name.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(self.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub nickname: String,
    pub archetype: Vec<String>,
    pub special_abilities: Vec<String>,
    pub personalities: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl EmployeeDraft {
    pub fn new(name: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nickname: nickname.into(),
            ..Self::default()
        }
    }

    /// Profile form rules: both names present and every tag set non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("nickname", &self.nickname)?;
        require_items("archetype", &self.archetype)?;
        require_items("special ability", &self.special_abilities)?;
        require_items("personality", &self.personalities)?;
        require_items("weakness", &self.weaknesses)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub archetype: Option<Vec<String>>,
    pub special_abilities: Option<Vec<String>>,
    pub personalities: Option<Vec<String>>,
    pub weaknesses: Option<Vec<String>>,
}

impl Entity for Employee {
    const KIND: EntityKind = EntityKind::Employee;

    type Draft = EmployeeDraft;
    type Patch = EmployeePatch;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: EmployeeDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            nickname: draft.nickname,
            archetype: draft.archetype,
            special_abilities: draft.special_abilities,
            personalities: draft.personalities,
            weaknesses: draft.weaknesses,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: EmployeePatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.nickname, patch.nickname);
        merge(&mut self.archetype, patch.archetype);
        merge(&mut self.special_abilities, patch.special_abilities);
        merge(&mut self.personalities, patch.personalities);
        merge(&mut self.weaknesses, patch.weaknesses);
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
