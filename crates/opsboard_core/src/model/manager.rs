//! Manager accounts.
//!
//! Managers come from a static seed list; they are never created or
//! deleted at runtime.

use crate::model::entity::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagerRole {
    #[default]
    Manager,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    pub id: EntityId,
    pub name: String,
    /// Unique within one directory.
    pub email: String,
    pub role: ManagerRole,
}

impl Manager {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: ManagerRole::Manager,
        }
    }
}
