//! Authentication gate in front of the board.
//!
//! # Responsibility
//! - Check an email/password pair against the manager directory and the
//!   shared password.
//! - Track whether a manager is currently signed in.
//!
//! # Invariants
//! - `is_authenticated()` is true exactly when `current_user()` is `Some`.
//! - Credentials are never written to logs.

use crate::config::AuthConfig;
use crate::model::entity::EntityId;
use crate::model::manager::Manager;
use crate::repo::manager_repo::ManagerDirectory;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password.
    InvalidCredentials,
    /// Operation requires a signed-in manager.
    NotAuthenticated,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => f.write_str("invalid email or password"),
            Self::NotAuthenticated => f.write_str("not authenticated"),
        }
    }
}

impl Error for AuthError {}

pub struct AuthSession {
    directory: ManagerDirectory,
    config: AuthConfig,
    current: Option<EntityId>,
}

impl AuthSession {
    pub fn new(directory: ManagerDirectory, config: AuthConfig) -> Self {
        Self {
            directory,
            config,
            current: None,
        }
    }

    /// Signs in the manager owning `email`.
    ///
    /// A failed attempt leaves any existing session untouched.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&Manager, AuthError> {
        let Some(manager) = self.directory.find_by_email(email) else {
            warn!("event=login module=auth status=denied reason=unknown_account");
            return Err(AuthError::InvalidCredentials);
        };
        if password != self.config.shared_password {
            warn!("event=login module=auth status=denied reason=bad_password");
            return Err(AuthError::InvalidCredentials);
        }

        info!("event=login module=auth status=ok manager_id={}", manager.id);
        self.current = Some(manager.id.clone());
        Ok(manager)
    }

    pub fn logout(&mut self) {
        if self.current.take().is_some() {
            info!("event=logout module=auth status=ok");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_user(&self) -> Option<&Manager> {
        self.current
            .as_ref()
            .and_then(|id| self.directory.get(id))
    }

    /// Signed-in manager, or `NotAuthenticated`.
    pub fn require_authenticated(&self) -> Result<&Manager, AuthError> {
        self.current_user().ok_or(AuthError::NotAuthenticated)
    }
}
