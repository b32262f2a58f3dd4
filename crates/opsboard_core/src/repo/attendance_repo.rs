//! Append-only attendance log.
//!
//! # Invariants
//! - Records are never updated or deleted.
//! - At most one record per `(employee_id, date)`, enforced through the
//!   derived record id.
//! - `list()` keeps insertion order.

use crate::model::attendance::{AttendanceDraft, AttendanceRecord};
use crate::model::entity::{EntityId, EntityKind};
use crate::repo::notify::{ChangeEvent, ChangeKind, ChangeNotifier, Subscription};
use crate::repo::store::{StoreError, StoreResult};
use chrono::NaiveDate;
use log::{info, warn};

#[derive(Default)]
pub struct AttendanceLog {
    records: Vec<AttendanceRecord>,
    notifier: ChangeNotifier,
}

impl AttendanceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a seed record without notifying subscribers.
    pub fn insert_seed(&mut self, record: AttendanceRecord) -> StoreResult<()> {
        self.ensure_vacant(&record.id)?;
        self.records.push(record);
        Ok(())
    }

    /// Records one day of attendance and returns the derived id.
    ///
    /// # Errors
    /// - `AlreadyExists` when the employee already has a record for that date.
    pub fn record(&mut self, draft: AttendanceDraft) -> StoreResult<EntityId> {
        let record = AttendanceRecord::from_draft(draft);
        if let Err(err) = self.ensure_vacant(&record.id) {
            warn!("event=attendance_record module=attendance status=duplicate");
            return Err(err);
        }

        let id = record.id.clone();
        self.records.push(record);
        info!(
            "event=attendance_record module=attendance status=ok count={}",
            self.records.len()
        );
        self.notifier.notify(&ChangeEvent::new(
            EntityKind::Attendance,
            ChangeKind::Created,
            id.clone(),
        ));
        Ok(id)
    }

    pub fn get(&self, id: &EntityId) -> StoreResult<&AttendanceRecord> {
        self.records
            .iter()
            .find(|record| &record.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: EntityKind::Attendance,
                id: id.clone(),
            })
    }

    pub fn list(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn filter(&self, predicate: impl Fn(&AttendanceRecord) -> bool) -> Vec<&AttendanceRecord> {
        self.records
            .iter()
            .filter(|record| predicate(*record))
            .collect()
    }

    /// Records with `start <= date <= end`, in insertion order.
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&AttendanceRecord> {
        self.filter(|record| record.date >= start && record.date <= end)
    }

    /// One employee's records, newest date first. Bounds are inclusive.
    pub fn by_employee(
        &self,
        employee_id: &EntityId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Vec<&AttendanceRecord> {
        let mut records = self.filter(|record| {
            &record.employee_id == employee_id
                && start.map_or(true, |start| record.date >= start)
                && end.map_or(true, |end| record.date <= end)
        });
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Registers `listener` for every later `record` call that succeeds.
    ///
    /// The listener is kept until `Subscription::unsubscribe` runs on the
    /// returned handle or one of its clones. Dropping the handle leaves the
    /// listener registered for the lifetime of the log, so callers that
    /// subscribe repeatedly must unsubscribe to keep the table bounded.
    pub fn subscribe(&self, listener: impl Fn(&ChangeEvent) + 'static) -> Subscription {
        self.notifier.subscribe(listener)
    }

    fn ensure_vacant(&self, id: &EntityId) -> StoreResult<()> {
        if self.records.iter().any(|record| &record.id == id) {
            return Err(StoreError::AlreadyExists {
                kind: EntityKind::Attendance,
                key: id.to_string(),
            });
        }
        Ok(())
    }
}
