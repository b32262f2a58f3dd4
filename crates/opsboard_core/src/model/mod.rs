//! Domain model for the operations board.
//!
//! # Responsibility
//! - Define the records held by each store and their creation/patch payloads.
//! - Keep form-layer validation next to the payload it checks.
//!
//! # Invariants
//! - Every record is identified by an opaque `EntityId`.
//! - Cross-record links are copied id values, never shared references.

pub mod attendance;
pub mod employee;
pub mod entity;
pub mod manager;
pub mod mom;
pub mod quest;
pub mod task;
pub mod validation;
