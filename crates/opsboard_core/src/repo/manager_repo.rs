//! Static manager directory.

use crate::model::entity::{EntityId, EntityKind};
use crate::model::manager::Manager;
use crate::repo::store::{StoreError, StoreResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagerDirectory {
    managers: Vec<Manager>,
}

impl ManagerDirectory {
    /// Builds the directory, rejecting repeated ids or emails.
    pub fn new(managers: Vec<Manager>) -> StoreResult<Self> {
        for (index, manager) in managers.iter().enumerate() {
            let earlier = &managers[..index];
            if earlier.iter().any(|other| other.id == manager.id) {
                return Err(StoreError::AlreadyExists {
                    kind: EntityKind::Manager,
                    key: manager.id.to_string(),
                });
            }
            if earlier.iter().any(|other| other.email == manager.email) {
                return Err(StoreError::AlreadyExists {
                    kind: EntityKind::Manager,
                    key: manager.email.clone(),
                });
            }
        }
        Ok(Self { managers })
    }

    pub fn get(&self, id: &EntityId) -> Option<&Manager> {
        self.managers.iter().find(|manager| &manager.id == id)
    }

    /// Exact, case-sensitive email match.
    pub fn find_by_email(&self, email: &str) -> Option<&Manager> {
        self.managers.iter().find(|manager| manager.email == email)
    }

    pub fn list(&self) -> &[Manager] {
        &self.managers
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}
