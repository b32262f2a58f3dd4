//! Attendance records and per-employee statistics rows.
//!
//! # Invariants
//! - Record id is `"{employee_id}-{YYYY-MM-DD}"`, so one record per
//!   employee per day.
//! - `total_hours` is fixed at creation: check-out minus check-in in hours,
//!   rounded to two decimals.
//! - Records are immutable once created.

use crate::model::entity::EntityId;
use crate::model::validation::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: EntityId,
    pub employee_id: EntityId,
    pub date: NaiveDate,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: DateTime<Utc>,
    pub total_hours: f64,
}

impl AttendanceRecord {
    pub fn from_draft(draft: AttendanceDraft) -> Self {
        let elapsed_ms = (draft.check_out_time - draft.check_in_time).num_milliseconds();
        Self {
            id: attendance_id(&draft.employee_id, draft.date),
            employee_id: draft.employee_id,
            date: draft.date,
            check_in_time: draft.check_in_time,
            check_out_time: draft.check_out_time,
            total_hours: round_hundredths(elapsed_ms as f64 / MILLIS_PER_HOUR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceDraft {
    pub employee_id: EntityId,
    pub date: NaiveDate,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: DateTime<Utc>,
}

impl AttendanceDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.check_out_time < self.check_in_time {
            return Err(ValidationError::InvalidTimeRange {
                check_in: self.check_in_time,
                check_out: self.check_out_time,
            });
        }
        Ok(())
    }
}

/// Aggregated attendance for one employee over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatistics {
    pub employee_id: EntityId,
    pub employee_name: String,
    pub total_hours: f64,
    pub days_present: u32,
    pub average_daily_hours: f64,
}

pub fn attendance_id(employee_id: &EntityId, date: NaiveDate) -> EntityId {
    EntityId::new(format!("{}-{}", employee_id, date.format("%Y-%m-%d")))
}

/// Rounds to two decimals, halves away from zero.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
