//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model validation, snapshot persistence and alert refresh.
//! - Keep UI callers decoupled from storage details.

pub mod attendance_store;
pub mod batch;
