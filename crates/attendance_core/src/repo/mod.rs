//! Persistence abstractions for store snapshots.
//!
//! # Responsibility
//! - Define the key-value collaborator contract and its backends.
//! - Keep JSON snapshot details out of the store service.
//!
//! # Invariants
//! - Backends store opaque strings; only `snapshot` knows the subject schema.

pub mod kv_store;
pub mod snapshot;
