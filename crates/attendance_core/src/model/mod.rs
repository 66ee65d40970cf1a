//! Attendance domain model.
//!
//! # Responsibility
//! - Define subjects and their dated attendance records.
//! - Keep input normalization rules next to the types they protect.
//!
//! # Invariants
//! - Subject ids are unique across a store; record ids are unique per subject.
//! - Duplicate record dates inside one subject are allowed.

pub mod record;
pub mod subject;
