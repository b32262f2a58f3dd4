//! In-memory stores and change notification.
//!
//! # Responsibility
//! - Own each record collection exclusively; no record is shared across
//!   stores.
//! - Report missing ids as `StoreError::NotFound` instead of ignoring them.
//!
//! # Invariants
//! - Stores never validate business rules or cross-store references.
//! - Every successful mutation notifies subscribers before returning.

pub mod attendance_repo;
pub mod manager_repo;
pub mod notify;
pub mod store;
