//! RFC 5545 recurrence rule evaluation for custom class schedules.

pub mod error;
pub mod recur;
