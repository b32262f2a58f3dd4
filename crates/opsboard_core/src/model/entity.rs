//! Shared identity and lifecycle contracts.
//!
//! # Responsibility
//! - Define the opaque identifier used by every record.
//! - Define the `Entity` contract the generic store is instantiated with.
//!
//! # Invariants
//! - `EntityId` values are compared by exact string value.
//! - `created_at` is set once at creation and never changed by patches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque record identifier.
///
/// Generated ids are UUID v4 strings; seeded records may carry any value
/// (`"1"`, `"2"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wraps an existing identifier value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Record category, used in errors, change events and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Employee,
    Task,
    Mom,
    Quest,
    Attendance,
    Manager,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Task => "task",
            Self::Mom => "mom",
            Self::Quest => "quest",
            Self::Attendance => "attendance",
            Self::Manager => "manager",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract for records owned by a mutable `EntityStore`.
///
/// `Draft` is the creation payload (everything except identity and
/// lifecycle stamps); `Patch` is a partial update where `None` means
/// "leave unchanged".
pub trait Entity: Clone {
    const KIND: EntityKind;

    type Draft;
    type Patch;

    fn id(&self) -> &EntityId;

    /// Builds a record with `created_at == updated_at == now`.
    fn from_draft(id: EntityId, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Merges present patch fields. Must not touch identity or stamps.
    fn apply_patch(&mut self, patch: Self::Patch);

    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

/// Replaces `target` when the patch slot carries a value.
pub(crate) fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}
