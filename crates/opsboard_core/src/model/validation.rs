//! Form-layer validation errors.
//!
//! Stores accept any well-typed payload; these checks belong to callers
//! that collect user input before invoking a store.

use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty or whitespace only.
    MissingField(&'static str),
    /// Required set has no entries.
    EmptySet(&'static str),
    /// Check-out happens before check-in.
    InvalidTimeRange {
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::EmptySet(field) => write!(f, "at least one {field} is required"),
            Self::InvalidTimeRange {
                check_in,
                check_out,
            } => write!(
                f,
                "check-out ({check_out}) must not be earlier than check-in ({check_in})"
            ),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

pub(crate) fn require_items<T>(field: &'static str, items: &[T]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::EmptySet(field));
    }
    Ok(())
}
