//! Generic in-memory entity store.
//!
//! # Responsibility
//! - Own one collection of records of one kind.
//! - Assign identity and lifecycle stamps on create/update.
//! - Notify subscribers after every successful mutation.
//!
//! # Invariants
//! - `list()` returns records in insertion order; deletes keep the relative
//!   order of the remaining records.
//! - `updated_at` strictly increases on every update, even when the clock
//!   has not advanced.
//! - Failed operations (`NotFound`, `AlreadyExists`) mutate nothing and emit
//!   nothing.
//! - No business validation and no referential integrity checks.

use crate::clock::Clock;
use crate::model::employee::Employee;
use crate::model::entity::{Entity, EntityId, EntityKind};
use crate::model::mom::MeetingMinutes;
use crate::model::quest::{Quest, QuestStatus};
use crate::model::task::{Task, TaskStatus};
use crate::repo::notify::{ChangeEvent, ChangeKind, ChangeNotifier, Subscription};
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure. Always recoverable by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound { kind: EntityKind, id: EntityId },
    /// `key` is the colliding id, or the colliding email for managers.
    AlreadyExists { kind: EntityKind, key: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::AlreadyExists { kind, key } => write!(f, "{kind} already exists: {key}"),
        }
    }
}

impl Error for StoreError {}

pub type EmployeeStore = EntityStore<Employee>;
pub type TaskStore = EntityStore<Task>;
pub type MomStore = EntityStore<MeetingMinutes>;
pub type QuestStore = EntityStore<Quest>;

pub struct EntityStore<T: Entity> {
    records: Vec<T>,
    clock: Rc<dyn Clock>,
    notifier: ChangeNotifier,
}

impl<T: Entity> EntityStore<T> {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            records: Vec::new(),
            clock,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Inserts a fully-formed seed record without notifying subscribers.
    ///
    /// # Errors
    /// - `AlreadyExists` when a record with the same id is present.
    pub fn insert_seed(&mut self, record: T) -> StoreResult<()> {
        if self.contains(record.id()) {
            return Err(StoreError::AlreadyExists {
                kind: T::KIND,
                key: record.id().to_string(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Creates a record from `draft` and returns its new id.
    ///
    /// Never fails; the draft is stored as given.
    pub fn create(&mut self, draft: T::Draft) -> EntityId {
        let id = EntityId::generate();
        let now = self.clock.now();
        self.records.push(T::from_draft(id.clone(), draft, now));

        info!(
            "event=store_create module=store kind={} status=ok count={}",
            T::KIND,
            self.records.len()
        );
        self.notifier
            .notify(&ChangeEvent::new(T::KIND, ChangeKind::Created, id.clone()));
        id
    }

    /// Merges `patch` into the record and bumps `updated_at`.
    ///
    /// # Errors
    /// - `NotFound` when `id` is unknown.
    pub fn update(&mut self, id: &EntityId, patch: T::Patch) -> StoreResult<()> {
        let now = self.clock.now();
        let Some(record) = self.records.iter_mut().find(|record| record.id() == id) else {
            warn!(
                "event=store_update module=store kind={} status=not_found",
                T::KIND
            );
            return Err(Self::not_found(id));
        };

        record.apply_patch(patch);
        let stamp = next_update_stamp(record.updated_at(), now);
        record.set_updated_at(stamp);

        info!("event=store_update module=store kind={} status=ok", T::KIND);
        self.notifier
            .notify(&ChangeEvent::new(T::KIND, ChangeKind::Updated, id.clone()));
        Ok(())
    }

    /// Removes the record and returns it.
    ///
    /// # Errors
    /// - `NotFound` when `id` is unknown.
    pub fn delete(&mut self, id: &EntityId) -> StoreResult<T> {
        let Some(index) = self.records.iter().position(|record| record.id() == id) else {
            warn!(
                "event=store_delete module=store kind={} status=not_found",
                T::KIND
            );
            return Err(Self::not_found(id));
        };

        let removed = self.records.remove(index);
        info!(
            "event=store_delete module=store kind={} status=ok count={}",
            T::KIND,
            self.records.len()
        );
        self.notifier
            .notify(&ChangeEvent::new(T::KIND, ChangeKind::Deleted, id.clone()));
        Ok(removed)
    }

    /// # Errors
    /// - `NotFound` when `id` is unknown.
    pub fn get(&self, id: &EntityId) -> StoreResult<&T> {
        self.find(id).ok_or_else(|| Self::not_found(id))
    }

    /// Lookup that treats a missing record as an expected outcome.
    pub fn find(&self, id: &EntityId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.find(id).is_some()
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    /// Matching records in list order. Pure: no mutation, no notification.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<&T> {
        let matched: Vec<&T> = self
            .records
            .iter()
            .filter(|record| predicate(*record))
            .collect();
        debug!(
            "event=store_filter module=store kind={} matched={} scanned={}",
            T::KIND,
            matched.len(),
            self.records.len()
        );
        matched
    }

    /// Records whose id is in `ids`, in store order. Unknown ids are skipped.
    pub fn get_many(&self, ids: &[EntityId]) -> Vec<&T> {
        self.filter(|record| ids.contains(record.id()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Registers `listener` for every later mutation of this store.
    ///
    /// The listener is kept until `Subscription::unsubscribe` runs on the
    /// returned handle or one of its clones. Dropping the handle leaves the
    /// listener registered for the lifetime of the store, so callers that
    /// subscribe repeatedly must unsubscribe to keep the table bounded.
    pub fn subscribe(&self, listener: impl Fn(&ChangeEvent) + 'static) -> Subscription {
        self.notifier.subscribe(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.notifier.listener_count()
    }

    fn not_found(id: &EntityId) -> StoreError {
        StoreError::NotFound {
            kind: T::KIND,
            id: id.clone(),
        }
    }
}

impl EntityStore<Task> {
    pub fn by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.filter(|task| task.status == status)
    }

    pub fn by_employee(&self, employee_id: &EntityId) -> Vec<&Task> {
        self.filter(|task| task.is_assigned_to(employee_id))
    }

    /// Tasks associated with `quest`, in the quest's order. Dangling ids are
    /// skipped.
    pub fn for_quest(&self, quest: &Quest) -> Vec<&Task> {
        quest
            .associated_task_ids
            .iter()
            .filter_map(|task_id| self.find(task_id))
            .collect()
    }
}

impl EntityStore<Quest> {
    pub fn by_pic(&self, manager_id: &EntityId) -> Vec<&Quest> {
        self.filter(|quest| &quest.assigned_pic_id == manager_id)
    }

    pub fn by_status(&self, status: QuestStatus) -> Vec<&Quest> {
        self.filter(|quest| quest.status == status)
    }
}

fn next_update_stamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
