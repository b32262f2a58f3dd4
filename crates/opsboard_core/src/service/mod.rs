//! Board-level use cases.
//!
//! # Responsibility
//! - Compose the individual stores into one injectable `Board`.
//! - Resolve soft references and compute derived statistics on read.
//! - Gate access with the authentication session.

pub mod auth;
pub mod board;
pub mod calendar;
pub mod resolver;
pub mod stats;
