//! Synchronous change notification.
//!
//! # Responsibility
//! - Deliver one `ChangeEvent` per successful mutation to every current
//!   listener before the mutating call returns.
//!
//! # Invariants
//! - Delivery iterates a snapshot of the listener list, so listeners may
//!   subscribe or unsubscribe while an event is being delivered.
//! - A listener added during delivery only sees later events.
//! - No batching, no replay of past events.

use crate::model::entity::{EntityId, EntityKind};
use log::trace;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

/// One mutation of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub entity: EntityKind,
    pub change: ChangeKind,
    pub id: EntityId,
}

impl ChangeEvent {
    pub fn new(entity: EntityKind, change: ChangeKind, id: EntityId) -> Self {
        Self { entity, change, id }
    }
}

type Listener = Rc<dyn Fn(&ChangeEvent)>;

#[derive(Default)]
struct ListenerTable {
    next_token: u64,
    entries: Vec<(u64, Listener)>,
}

/// Listener registry owned by one store.
#[derive(Default)]
pub struct ChangeNotifier {
    table: Rc<RefCell<ListenerTable>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for future events.
    ///
    /// The listener stays registered until `Subscription::unsubscribe` is
    /// called; dropping the handle does not unsubscribe.
    pub fn subscribe(&self, listener: impl Fn(&ChangeEvent) + 'static) -> Subscription {
        let mut table = self.table.borrow_mut();
        let token = table.next_token;
        table.next_token += 1;
        table.entries.push((token, Rc::new(listener)));
        Subscription {
            table: Rc::downgrade(&self.table),
            token,
        }
    }

    /// Delivers `event` to every listener registered at call time.
    pub fn notify(&self, event: &ChangeEvent) {
        let snapshot: Vec<Listener> = self
            .table
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        trace!(
            "event=change_notify module=notify kind={} change={} listeners={}",
            event.entity,
            event.change.as_str(),
            snapshot.len()
        );

        for listener in snapshot {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.table.borrow().entries.len()
    }
}

/// Handle returned by `subscribe`.
#[derive(Clone)]
pub struct Subscription {
    table: Weak<RefCell<ListenerTable>>,
    token: u64,
}

impl Subscription {
    /// Removes the listener. Returns `false` when it was already removed or
    /// the owning store is gone.
    pub fn unsubscribe(&self) -> bool {
        let Some(table) = self.table.upgrade() else {
            return false;
        };
        let mut table = table.borrow_mut();
        let before = table.entries.len();
        table.entries.retain(|(token, _)| *token != self.token);
        table.entries.len() != before
    }
}
