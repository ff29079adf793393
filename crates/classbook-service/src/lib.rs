//! Class schedule expansion, booking-conflict detection and occurrence listing.
//!
//! Everything here is pure and synchronous: callers hand in class definitions
//! that were already fetched and validated, and get occurrence lists or
//! conflict verdicts back. No I/O is performed.
//!
//! Conflict checks are read-then-decide. Between fetching the existing classes
//! and persisting a new one another request can slip past the same check, so
//! the persistence layer must close that gap itself (unique constraint,
//! optimistic retry or a serializable transaction).

pub mod aggregate;
pub mod catalog;
pub mod conflict;
pub mod error;
pub mod expand;
pub mod model;
pub mod overlap;

#[cfg(test)]
mod fixtures;
