//! Meeting minutes (MoM) model.
//!
//! # Responsibility
//! - Define meeting minute records and their payloads.
//! - Derive plain-text previews from the stored HTML body.
//!
//! # Invariants
//! - `attendees` are free-text display names, not employee ids.
//! - `content` is stored verbatim; previews are derived on read.

use crate::model::entity::{merge, Entity, EntityId, EntityKind};
use crate::model::validation::{require_items, require_text, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingMinutes {
    pub id: EntityId,
    pub title: String,
    pub date: NaiveDate,
    pub attendees: Vec<String>,
    /// Rich text body as HTML markup.
    pub content: String,
    pub location: Option<String>,
    pub duration: Option<String>,
    pub to_follow_up: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: EntityId,
}

impl MeetingMinutes {
    pub fn preview(&self, max_chars: usize) -> String {
        content_preview(&self.content, max_chars)
    }

    /// Follow-up items, one per non-blank line.
    pub fn follow_up_items(&self) -> Vec<&str> {
        self.to_follow_up
            .as_deref()
            .map(|text| {
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingMinutesDraft {
    pub title: String,
    pub date: NaiveDate,
    pub attendees: Vec<String>,
    pub content: String,
    pub location: Option<String>,
    pub duration: Option<String>,
    pub to_follow_up: Option<String>,
    pub created_by: EntityId,
}

impl MeetingMinutesDraft {
    pub fn new(title: impl Into<String>, date: NaiveDate, created_by: EntityId) -> Self {
        Self {
            title: title.into(),
            date,
            attendees: Vec::new(),
            content: String::new(),
            location: None,
            duration: None,
            to_follow_up: None,
            created_by,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_items("attendee", &self.attendees)?;
        require_text("content", &self.content)
    }
}

/// Partial update. Optional fields use `Some(None)` to clear a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingMinutesPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub attendees: Option<Vec<String>>,
    pub content: Option<String>,
    pub location: Option<Option<String>>,
    pub duration: Option<Option<String>>,
    pub to_follow_up: Option<Option<String>>,
}

impl Entity for MeetingMinutes {
    const KIND: EntityKind = EntityKind::Mom;

    type Draft = MeetingMinutesDraft;
    type Patch = MeetingMinutesPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: MeetingMinutesDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            date: draft.date,
            attendees: draft.attendees,
            content: draft.content,
            location: draft.location,
            duration: draft.duration,
            to_follow_up: draft.to_follow_up,
            created_at: now,
            updated_at: now,
            created_by: draft.created_by,
        }
    }

    fn apply_patch(&mut self, patch: MeetingMinutesPatch) {
        merge(&mut self.title, patch.title);
        merge(&mut self.date, patch.date);
        merge(&mut self.attendees, patch.attendees);
        merge(&mut self.content, patch.content);
        merge(&mut self.location, patch.location);
        merge(&mut self.duration, patch.duration);
        merge(&mut self.to_follow_up, patch.to_follow_up);
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

/// Splits comma-separated attendee input into trimmed, non-empty names.
pub fn parse_attendees(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strips HTML tags and keeps at most `max_chars` characters.
///
/// Truncated output ends with `...`.
pub fn content_preview(html: &str, max_chars: usize) -> String {
    let text = HTML_TAG_RE.replace_all(html, "");
    let mut preview: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        preview.push_str("...");
    }
    preview
}
